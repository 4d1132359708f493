use yew::prelude::*;

use crate::hooks::session_context::AuthContext;

/// Session state and operations of the enclosing `AuthProvider`
#[hook]
pub fn use_auth() -> Option<AuthContext> {
    let context = use_context::<AuthContext>();
    if context.is_none() {
        log::error!("❌ use_auth must be used within an AuthProvider");
    }
    context
}
