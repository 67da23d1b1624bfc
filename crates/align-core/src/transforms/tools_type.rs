//! Copilot: tool list defaults, transport names and network validation

use tracing::debug;

use super::{ServerTransform, type_value};
use crate::error::{Error, Result};
use crate::model::{Map, ServerSet, Value};

/// Copilot transform.
///
/// - Adds an empty `tools` list when missing
/// - Maps `stdio` to `local` and `streamable-http` to `http`
/// - Requires both `type` and `url` on network servers
#[derive(Debug, Default, Clone)]
pub struct ToolsAndTypeTransform;

impl ServerTransform for ToolsAndTypeTransform {
    fn name(&self) -> &'static str {
        "tools-and-type"
    }

    fn transform(&self, servers: &mut ServerSet) -> Result<()> {
        for (name, server) in servers.iter_mut() {
            let Some(server) = server.as_map_mut() else {
                continue;
            };

            server
                .entry("tools".to_string())
                .or_insert_with(|| Value::List(Vec::new()));

            if let Some(alias) = type_value(server).and_then(|t| copilot_type(&t)) {
                debug!(server = %name, kind = alias, "normalized transport type");
                server.insert("type".to_string(), Value::from(alias));
            }

            validate_network_server(name, server)?;
        }
        Ok(())
    }
}

fn copilot_type(normalized: &str) -> Option<&'static str> {
    match normalized {
        "stdio" => Some("local"),
        "streamable-http" => Some("http"),
        _ => None,
    }
}

fn validate_network_server(name: &str, server: &Map) -> Result<()> {
    let has_type = server.contains_key("type");
    let has_url = server.contains_key("url");
    if !has_type && !has_url {
        return Ok(());
    }
    if type_value(server).as_deref() == Some("local") {
        return Ok(());
    }

    let missing: Vec<&str> = [("type", has_type), ("url", has_url)]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(field, _)| field)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }

    Err(Error::Validation {
        agent: "copilot".to_string(),
        server: name.to_string(),
        message: format!(
            "network-based server \"{name}\" is missing required field(s): {}. \
             Network servers must have both 'type' and 'url' fields",
            missing.join(", ")
        ),
    })
}
