pub mod app;
pub mod dashboard;
pub mod login_screen;
pub mod payment;

pub use app::{App, Route};
pub use dashboard::Dashboard;
pub use login_screen::LoginScreen;
pub use payment::{PaymentFail, PaymentSuccess};
