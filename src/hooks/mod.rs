pub mod session_context;
pub mod use_auth;

pub use session_context::{AuthContext, AuthProvider};
pub use use_auth::use_auth;
