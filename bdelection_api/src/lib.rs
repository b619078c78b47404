mod client;
mod errors;
pub mod types;
mod user_agent;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::user_agent::get_user_agent;
