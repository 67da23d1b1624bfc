//! JSON source parsing and stable JSON rendering.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{ServerSet, Value};

/// Parse servers out of a JSON document.
///
/// The document must be an object. With an empty `node` the whole document is
/// the server set; otherwise the servers are read from `document[node]`, and a
/// missing or non-object node yields an empty set.
pub fn parse_json_servers(payload: &str, node: &str) -> Result<ServerSet> {
    let document: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(payload).map_err(|e| Error::source_parse("JSON", e.to_string()))?;

    if node.is_empty() {
        return Ok(into_server_set(document));
    }

    match document.get(node) {
        Some(serde_json::Value::Object(servers)) => Ok(into_server_set(servers.clone())),
        _ => Ok(ServerSet::new()),
    }
}

/// Render a value as pretty JSON (2-space indentation) with a trailing newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Split a dotted node path into its non-empty segments.
pub fn node_segments(node: &str) -> Vec<&str> {
    node.trim()
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

fn into_server_set(map: serde_json::Map<String, serde_json::Value>) -> ServerSet {
    map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}
