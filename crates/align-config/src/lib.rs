//! Configuration loading for agent-align
//!
//! - [`Config`]: which agent is the source of truth and where servers go
//! - [`load_servers_file`]: stand-alone YAML server definitions

pub mod config;
pub mod error;
pub mod servers;

pub use config::{AdditionalJsonTarget, CONFIG_DIR, CONFIG_FILE, Config, default_config_path};
pub use error::{Error, Result};
pub use servers::{load_servers_file, parse_servers_yaml};
