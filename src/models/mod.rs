pub mod user;
pub mod inventory;
pub mod session;
pub mod payment;

pub use user::User;
pub use inventory::Product;
pub use session::{AuthChange, AuthEvent, AuthUser, Session};
pub use payment::{PaymentFailure, PaymentReport, PaymentSuccess};
