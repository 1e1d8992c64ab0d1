pub mod health;
pub mod meta;
pub mod users;

pub use health::{health, readiness};
pub use meta::{config_info, demo_data, hello, status};
pub use users::{create_user, delete_user, get_user, list_users};
