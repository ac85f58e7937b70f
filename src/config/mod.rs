pub mod server;
pub mod session;

pub use server::ServerConfig;
pub use session::{validate_production_config, SessionConfig, SessionConfigError, SessionLayer};
