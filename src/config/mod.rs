//! Configuration loading and management for the cost engine.
//!
//! This module loads the jurisdiction configuration from YAML files: the
//! versioned progressive tax schedules and the statutory allowance defaults.
//! Tax brackets change every fiscal year, so they live in data files rather
//! than in the calculation code.
//!
//! # Example
//!
//! ```no_run
//! use tce_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/iran").unwrap();
//! println!("Loaded jurisdiction: {}", config.jurisdiction().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AllowanceDefaults, EngineConfig, JurisdictionMetadata, TaxBracket, TaxSchedule};
