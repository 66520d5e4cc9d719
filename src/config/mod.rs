//! Configuration loading and persistence.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and lock persistence in [`loader`]
//!
//! # Example
//!
//! ```
//! use dbguard::config::{ConfigProvider, FileConfigProvider};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("dbguard.toml"),
//!     "[environments.staging]\ngit_branches = [\"develop\"]\n",
//! )
//! .unwrap();
//!
//! let config = FileConfigProvider::discover(temp.path()).load().unwrap().unwrap();
//! assert!(config.registry.get("staging").is_some());
//! ```

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, load_config_file, parse_config, ConfigProvider, FileConfigProvider, LoadedConfig,
    CONFIG_FILE_NAME,
};
pub use schema::{EnvironmentConfig, Settings, DEFAULT_MIGRATION_CLI};
