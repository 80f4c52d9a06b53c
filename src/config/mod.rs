//! Unit configuration loading and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, loading and overrides in [`loader`]
//!
//! # Example
//!
//! ```
//! use rack_awareness::config::{parse_config, RackValue};
//! use std::path::Path;
//!
//! let config = parse_config("options:\n  broker-rack: us-west\n", Path::new("config.yaml")).unwrap();
//! assert_eq!(config.broker_rack(), RackValue::Valid("us-west".to_string()));
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config_file, parse_config, parse_override, ConfigSource, DEFAULT_CONFIG_FILE};
pub use schema::{
    rack_properties, RackValue, Settings, UnitConfig, BROKER_RACK_OPTION, BROKER_RACK_PROPERTY,
};
