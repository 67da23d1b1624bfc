//! JSON config writers
//!
//! [`JsonNodeWriter`] keeps every key of an existing document and only
//! replaces the server node. [`JsonFreshWriter`] ignores what is on disk.

use serde_json::{Map, Value};
use tracing::warn;

use super::ConfigMerger;
use crate::codec::json::{node_segments, render_json};
use crate::error::Result;
use crate::model::ServerSet;

/// JSON writer that overwrites only the server node.
///
/// Features:
/// - Preserves sibling keys of the existing document
/// - Missing or unparseable documents start from `{}`
/// - Dotted nodes (`a.b`) address nested objects, creating them as needed
#[derive(Debug, Default, Clone)]
pub struct JsonNodeWriter;

impl JsonNodeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Parse the existing document or return an empty object.
    fn parse_existing(existing: Option<&str>) -> Map<String, Value> {
        let Some(content) = existing.filter(|c| !c.trim().is_empty()) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!("existing JSON document is not an object; starting from an empty one");
                Map::new()
            }
            Err(e) => {
                warn!(error = %e, "existing JSON document is unparseable; starting from an empty one");
                Map::new()
            }
        }
    }
}

impl ConfigMerger for JsonNodeWriter {
    fn merge(&self, existing: Option<&str>, servers: &ServerSet, node: &str) -> Result<String> {
        let servers = serde_json::to_value(servers)?;
        let segments = node_segments(node);
        let Some((last, parents)) = segments.split_last() else {
            return render_json(&servers);
        };

        let mut root = Self::parse_existing(existing);
        insert_at(&mut root, parents, last, servers);

        render_json(&root)
    }
}

/// Insert `value` under `parents.last`, replacing non-object parents with `{}`.
fn insert_at(map: &mut Map<String, Value>, parents: &[&str], last: &str, value: Value) {
    let Some((head, rest)) = parents.split_first() else {
        map.insert(last.to_string(), value);
        return;
    };
    let mut child = match map.remove(*head) {
        Some(Value::Object(child)) => child,
        _ => Map::new(),
    };
    insert_at(&mut child, rest, last, value);
    map.insert(head.to_string(), Value::Object(child));
}

/// JSON writer that always produces a fresh document.
#[derive(Debug, Default, Clone)]
pub struct JsonFreshWriter;

impl JsonFreshWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigMerger for JsonFreshWriter {
    fn merge(&self, _existing: Option<&str>, servers: &ServerSet, node: &str) -> Result<String> {
        if node.is_empty() {
            return render_json(servers);
        }
        let mut document = Map::new();
        document.insert(node.to_string(), serde_json::to_value(servers)?);
        render_json(&document)
    }
}
