//! Configuration loading for the shift roster service.
//!
//! The service reads one YAML file describing the HTTP listener, the
//! database connection and log output. Command line flags may override
//! individual values after loading.
//!
//! # Example
//!
//! ```no_run
//! use shift_roster::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/roster.yaml").unwrap();
//! println!("Database: {}", config.config().database.url);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DatabaseConfig, LoggingConfig, RosterConfig, ServerConfig};
