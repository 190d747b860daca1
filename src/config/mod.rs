//! Server configuration: JSON file types and loading.

pub mod types;
pub mod loader;

pub use types::*;
pub use loader::*;
