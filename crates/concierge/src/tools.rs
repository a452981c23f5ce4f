pub mod coerce;
pub mod currency;
pub mod password;
pub mod registry;
pub mod weather;

pub use registry::{RegisteredTool, ToolHandler, ToolRegistry};
