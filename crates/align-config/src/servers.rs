//! Stand-alone MCP server definition files
//!
//! ```yaml
//! servers:
//!   github:
//!     command: npx
//!     args: ["-y", "@modelcontextprotocol/server-github"]
//! ```
//!
//! `mcpServers` is accepted in place of `servers`.

use std::collections::BTreeMap;

use align_core::{ServerSet, Value};
use align_fs::{NormalizedPath, io};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
struct RawServersFile {
    #[serde(default)]
    servers: Option<BTreeMap<String, Value>>,
    #[serde(default, rename = "mcpServers")]
    mcp_servers: Option<BTreeMap<String, Value>>,
}

/// Load server definitions from a YAML file.
pub fn load_servers_file(path: &NormalizedPath) -> Result<ServerSet> {
    let content = io::read_text(path)?;
    let servers = parse_servers_yaml(&content, path)?;
    debug!(path = %path, count = servers.len(), "loaded server definitions");
    Ok(servers)
}

/// Parse server definitions from YAML text.
///
/// Every entry must be a mapping and at least one server is required.
pub fn parse_servers_yaml(content: &str, path: &NormalizedPath) -> Result<ServerSet> {
    let raw: RawServersFile = serde_yaml::from_str(content).map_err(|e| Error::Parse {
        path: path.to_native(),
        message: e.to_string(),
    })?;

    let servers = raw
        .servers
        .filter(|s| !s.is_empty())
        .or(raw.mcp_servers)
        .unwrap_or_default();
    if servers.is_empty() {
        return Err(Error::invalid(path.to_native(), "no MCP servers found"));
    }

    if let Some((name, _)) = servers.iter().find(|(_, server)| !server.is_map()) {
        return Err(Error::invalid(
            path.to_native(),
            format!("server \"{name}\" must be a mapping"),
        ));
    }

    Ok(servers.into_iter().collect())
}
