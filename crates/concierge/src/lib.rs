pub mod config;
pub mod error;
pub mod orchestrator;
pub mod server;
pub mod tools;

pub use crate::config::Config;
pub use crate::error::{CoreError, CoreResult};
pub use crate::orchestrator::Orchestrator;
pub use crate::server::Server;
