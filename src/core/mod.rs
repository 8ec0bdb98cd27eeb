pub mod config;
pub mod error;
pub mod symbolic;
pub mod types;

pub use config::{ExportConfig, LoreConfig};
pub use error::{LoreError, LoreResult};
