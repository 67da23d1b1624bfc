//! Codecs between source payloads, the canonical model and rendered text.
//!
//! - **toml**: the `[mcp_servers.*]` TOML subset, read and written by hand
//! - **json**: JSON payload parsing and stable pretty rendering

pub mod json;
pub mod toml;

pub use json::{node_segments, parse_json_servers, render_json};
pub use toml::{SECTION_PREFIX, parse_toml_servers, render_toml_servers};

use tracing::debug;

use crate::agents::{AgentProfile, ConfigFormat};
use crate::error::Result;
use crate::model::ServerSet;

/// Parse a source agent's config file contents into a server set.
///
/// The profile's format decides the codec; JSON payloads are scoped to the
/// profile's node.
pub fn parse_source(profile: &AgentProfile, payload: &str) -> Result<ServerSet> {
    let servers = match profile.format {
        ConfigFormat::Toml => parse_toml_servers(payload),
        ConfigFormat::Json => parse_json_servers(payload, &profile.node)?,
    };
    debug!(agent = %profile.name, count = servers.len(), "parsed source servers");
    Ok(servers)
}
