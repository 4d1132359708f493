pub mod backend;
pub mod supabase_client;
pub mod navigation;

pub use backend::{Backend, Query};
pub use supabase_client::SupabaseClient;
pub use navigation::{current_path, current_query, BrowserNavigator, Navigator};
