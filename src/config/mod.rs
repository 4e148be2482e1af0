//! Configuration loaded from `.gradebook.toml`.
//!
//! Settings are read once at start-up and fix the process-wide data file,
//! backup file and store capacity.

mod core;
mod loader;

pub use core::{DisplayConfig, GradebookConfig, StorageConfig, StoreConfig};
pub use loader::{
    directory_ancestors, load_config, parse_and_validate_config, CONFIG_FILE_NAME,
};
