// ============================================================================
// SESSION CONTEXT - Compartir estado de sesión entre componentes
// ============================================================================
// The provider owns the single SessionManager of the app, mounts it while
// the provider is mounted and re-renders children on every state change.
// ============================================================================

use std::rc::Rc;

use yew::prelude::*;

use crate::config::CONFIG;
use crate::services::{Backend, SupabaseClient};
use crate::state::{SessionManager, SessionSnapshot};
use crate::utils::{BrowserSpawner, KeyValueStore, LocalStorageStore};

/// Value shared through the context: operations + the state they produced
#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub manager: SessionManager,
    pub state: SessionSnapshot,
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub children: Children,
}

fn build_manager() -> SessionManager {
    if let Err(e) = CONFIG.validate() {
        log::warn!("⚠️ {}", e);
    }
    let store: Rc<dyn KeyValueStore> = Rc::new(LocalStorageStore::open());
    let backend: Rc<dyn Backend> = Rc::new(SupabaseClient::new(&CONFIG, store.clone()));
    SessionManager::new(backend, store, Rc::new(BrowserSpawner))
}

/// Provider component que envuelve la app y proporciona el estado de sesión
#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let manager = use_memo((), |_| build_manager());
    let state = use_state(|| manager.snapshot());

    {
        let manager = (*manager).clone();
        let state = state.clone();
        use_effect_with((), move |_| {
            let changes = {
                let handle = manager.clone();
                manager.subscribe(move || state.set(handle.snapshot()))
            };
            let mounted = manager.mount();

            move || {
                drop(mounted);
                drop(changes);
            }
        });
    }

    let context = AuthContext {
        manager: (*manager).clone(),
        state: (*state).clone(),
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            {props.children.clone()}
        </ContextProvider<AuthContext>>
    }
}
