// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_manager;

pub use reactivity::{Listeners, Subscription};
pub use session_manager::{AuthPhase, FetchStage, MountGuard, SessionManager, SessionSnapshot};
