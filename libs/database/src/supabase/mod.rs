mod config;
mod connector;
mod health;

pub use config::SupabaseConfig;
pub use connector::{Query, SupabaseClient};
pub use health::check_health;
