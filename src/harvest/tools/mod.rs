pub mod config;
pub mod error;
pub mod io;
pub mod listify;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod split;

pub use error::{Result, ToolError};
