pub mod redirect;
pub mod fail;
pub mod success;

pub use redirect::{schedule_redirect, PendingRedirect};
pub use fail::PaymentFail;
pub use success::PaymentSuccess;
