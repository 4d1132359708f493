use yew::prelude::*;

use crate::hooks::{use_auth, AuthProvider};
use crate::services::current_path;
use crate::utils::{ROUTE_PAYMENT_FAIL, ROUTE_PAYMENT_SUCCESS};

use super::{Dashboard, LoginScreen, PaymentFail, PaymentSuccess};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Home,
    PaymentFail,
    PaymentSuccess,
}

impl Route {
    /// Unknown paths fall back to the home screen
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        if path == ROUTE_PAYMENT_FAIL {
            Route::PaymentFail
        } else if path == ROUTE_PAYMENT_SUCCESS {
            Route::PaymentSuccess
        } else {
            Route::Home
        }
    }
}

#[function_component(Home)]
fn home() -> Html {
    let auth = use_auth();
    let login_error = use_state(|| None::<String>);
    let busy = use_state(|| false);

    let Some(auth) = auth else {
        return html! {};
    };

    if auth.state.is_authenticated() {
        return html! { <Dashboard /> };
    }

    let on_login = {
        let manager = auth.manager.clone();
        let login_error = login_error.clone();
        let busy = busy.clone();
        Callback::from(move |(email, password): (String, String)| {
            let manager = manager.clone();
            let login_error = login_error.clone();
            let busy = busy.clone();
            busy.set(true);
            wasm_bindgen_futures::spawn_local(async move {
                match manager.login(&email, &password).await {
                    Ok(()) => login_error.set(None),
                    Err(e) => login_error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        })
    };

    html! {
        <LoginScreen {on_login} error={(*login_error).clone()} busy={*busy} />
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let route = use_memo((), |_| Route::from_path(&current_path()));
    log::debug!("🧭 Route: {:?}", *route);

    match *route {
        Route::PaymentFail => html! { <PaymentFail /> },
        Route::PaymentSuccess => html! { <PaymentSuccess /> },
        Route::Home => html! {
            <AuthProvider>
                <Home />
            </AuthProvider>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_path() {
        assert_eq!(Route::from_path("/payment/fail"), Route::PaymentFail);
        assert_eq!(Route::from_path("/payment/success/"), Route::PaymentSuccess);
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/payment/unknown"), Route::Home);
    }
}
