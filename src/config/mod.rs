//! Sensor Configuration Module
//!
//! Analysis thresholds as an explicit, immutable `SensorConfig` value. Every
//! pipeline operation takes the config as an argument; nothing here is global.
//!
//! ## Loading Order (binary only)
//!
//! 1. `QORSENSE_CONFIG` environment variable (path to TOML file)
//! 2. `sensor_config.toml` in the current working directory
//! 3. Built-in defaults
//!
//! ```ignore
//! let config = SensorConfig::load();
//! let analysis = qorsense::analyze(&readings, &config)?;
//! ```

mod sensor_config;
pub mod defaults;
pub mod validation;

pub use sensor_config::*;
