//! TOML writer that replaces server sections in place
//!
//! Everything outside `[mcp_servers.*]` (settings, profiles, comments) is kept
//! verbatim; the fresh server sections are appended after it.

use super::ConfigMerger;
use crate::codec::toml::{is_server_header, is_table_header, render_toml_servers};
use crate::error::Result;
use crate::model::ServerSet;

/// Block-replacing TOML writer.
#[derive(Debug, Default, Clone)]
pub struct TomlBlockWriter;

impl TomlBlockWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ConfigMerger for TomlBlockWriter {
    fn merge(&self, existing: Option<&str>, servers: &ServerSet, _node: &str) -> Result<String> {
        let preserved = strip_server_sections(existing.unwrap_or_default());
        let preserved = preserved.trim_end_matches(['\r', '\n']);
        let fresh = render_toml_servers(servers);
        let fresh = fresh.trim_end_matches(['\r', '\n']);

        let parts: Vec<&str> = [preserved, fresh]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            return Ok(String::new());
        }

        Ok(format!("{}\n", parts.join("\n\n")))
    }
}

/// Remove every `[mcp_servers.*]` section from TOML text.
///
/// A section runs from its header to the line before the next header that is
/// not itself a server section, or to the end of the text. All other lines are
/// kept as-is and in order.
pub fn strip_server_sections(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let mut kept = Vec::new();
    let mut inside_servers = false;

    for line in content.split('\n') {
        let trimmed = line.trim();
        if is_table_header(trimmed) {
            if is_server_header(trimmed) {
                inside_servers = true;
                continue;
            }
            inside_servers = false;
        }
        if !inside_servers {
            kept.push(line);
        }
    }

    kept.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn servers(value: serde_json::Value) -> ServerSet {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_strip_removes_blocks_and_keeps_others() {
        let content = r#"# Pre
[general]
val = true

[mcp_servers.old]
command = "node"

[mcp_servers.old.env]
KEY = "v"

[editor]
font = 12

[mcp_servers.new]
command = "npx"
"#;

        let stripped = strip_server_sections(content);
        assert_eq!(stripped, "# Pre\n[general]\nval = true\n\n[editor]\nfont = 12\n");
    }

    #[test]
    fn test_merge_preserves_existing_sections() {
        let existing = r#"model = "o3"

[profiles.default]
approval = "never"

[mcp_servers.stale]
command = "old"
"#;
        let input = servers(json!({"fresh": {"command": "npx", "args": ["-y", "pkg"]}}));

        let merged = TomlBlockWriter::new()
            .merge(Some(existing), &input, "")
            .unwrap();

        let expected = r#"model = "o3"

[profiles.default]
approval = "never"

[mcp_servers.fresh]
args = ["-y", "pkg"]
command = "npx"
"#;
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_merge_into_missing_file() {
        let input = servers(json!({"a": {"command": "x"}}));
        let merged = TomlBlockWriter::new().merge(None, &input, "").unwrap();
        assert_eq!(merged, "[mcp_servers.a]\ncommand = \"x\"\n");
    }

    #[test]
    fn test_empty_model_keeps_file() {
        let existing = "# settings\nmodel = \"o3\"\n\n[tui]\nnotifications = true";
        let merged = TomlBlockWriter::new()
            .merge(Some(existing), &ServerSet::new(), "")
            .unwrap();
        assert_eq!(merged, format!("{existing}\n"));
    }

    #[test]
    fn test_empty_everything() {
        let merged = TomlBlockWriter::new()
            .merge(Some("\n\n"), &ServerSet::new(), "")
            .unwrap();
        assert_eq!(merged, "");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let existing = "model = \"o3\"\n\n[mcp_servers.x]\ncommand = \"a\"\n\n[history]\nsave = \"all\"\n";
        let input = servers(json!({"x": {"command": "b", "env": {"K": "v"}}, "y": {"url": "http://h"}}));
        let writer = TomlBlockWriter::new();

        let first = writer.merge(Some(existing), &input, "").unwrap();
        let second = writer.merge(Some(&first), &input, "").unwrap();
        assert_eq!(first, second);
    }
}
