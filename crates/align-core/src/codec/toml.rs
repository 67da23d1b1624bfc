//! Reader and writer for the `[mcp_servers.*]` subset of TOML.
//!
//! Only what server definitions need is supported: quoted strings, lists of
//! quoted strings and dotted sub-sections. Everything else is read back as a
//! raw string, so numbers and booleans come back as strings after a round
//! trip.
//!
//! ```toml
//! [mcp_servers.github]
//! args = ["-y", "@modelcontextprotocol/server-github"]
//! command = "npx"
//!
//! [mcp_servers.github.env]
//! GITHUB_TOKEN = "secret"
//! ```

use crate::model::{Map, ServerSet, Value};

/// Namespace every server section lives under.
pub const SECTION_PREFIX: &str = "mcp_servers.";

/// Parse server sections out of TOML-subset text.
///
/// Only `[mcp_servers.*]` headers open a section. Other headers are skipped
/// and do not close the open section, and pairs before the first server
/// header are ignored. Dotted section names are folded into their parent
/// server afterwards.
pub fn parse_toml_servers(text: &str) -> ServerSet {
    let mut sections = Map::new();
    let mut current: Option<(String, Map)> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(name) = server_section_name(line) {
            if let Some((name, data)) = current.replace((name.to_string(), Map::new())) {
                sections.insert(name, Value::Map(data));
            }
            continue;
        }

        let Some((_, data)) = current.as_mut() else {
            continue;
        };
        if let Some((key, value)) = line.split_once('=') {
            data.insert(key.trim().to_string(), parse_value(value.trim()));
        }
    }

    if let Some((name, data)) = current {
        sections.insert(name, Value::Map(data));
    }

    nest_dotted_sections(&mut sections);
    ServerSet::from(sections)
}

/// Render servers as `[mcp_servers.<name>]` sections.
///
/// Entries that are not maps are skipped. Keys are emitted in lexicographic
/// order, nested maps become dotted sub-sections, and trailing blank lines
/// are trimmed.
pub fn render_toml_servers(servers: &ServerSet) -> String {
    let mut out = String::new();

    // ServerSet iterates in sorted name order
    for (name, value) in servers {
        if let Some(server) = value.as_map() {
            render_section(&mut out, &format!("{SECTION_PREFIX}{name}"), server);
        }
    }

    out.trim_end_matches('\n').to_string()
}

/// True for any `[...]` table header line (already trimmed).
pub(crate) fn is_table_header(line: &str) -> bool {
    line.starts_with('[') && line.ends_with(']')
}

/// True if a trimmed header line opens a server section.
pub(crate) fn is_server_header(line: &str) -> bool {
    server_section_name(line).is_some()
}

fn server_section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')?
        .strip_prefix(SECTION_PREFIX)?
        .strip_suffix(']')
}

fn parse_value(raw: &str) -> Value {
    if raw.starts_with('"') && raw.ends_with('"') {
        // A lone `"` unquotes to the empty string
        return Value::String(raw.get(1..raw.len() - 1).unwrap_or_default().to_string());
    }
    if raw.starts_with('[') {
        return Value::List(parse_string_list(raw).into_iter().map(Value::String).collect());
    }
    Value::String(raw.to_string())
}

/// Extract the quoted elements of a `["a", "b,c"]` list.
///
/// Commas inside quotes are literal. Anything outside quotes, including
/// unquoted tokens, is dropped. There is no escape handling.
fn parse_string_list(raw: &str) -> Vec<String> {
    let inner = raw.strip_prefix('[').unwrap_or(raw);
    let inner = inner.strip_suffix(']').unwrap_or(inner).trim();

    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in inner.chars() {
        match ch {
            '"' if in_quotes => {
                items.push(std::mem::take(&mut current));
                in_quotes = false;
            }
            '"' => in_quotes = true,
            _ if in_quotes => current.push(ch),
            _ => {}
        }
    }

    items
}

/// Fold `name.sub` sections into `name` as nested maps.
///
/// Dotted names are processed in sorted order so `a.env` lands before
/// `a.env.extra`. A parent that is missing or not a map is replaced by a
/// fresh map.
fn nest_dotted_sections(sections: &mut Map) {
    let mut dotted: Vec<String> = sections
        .keys()
        .filter(|name| name.contains('.'))
        .cloned()
        .collect();
    dotted.sort();

    for name in dotted {
        if let Some(value) = sections.remove(&name) {
            set_nested(sections, &name, value);
        }
    }
}

fn set_nested(map: &mut Map, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            map.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let mut child = match map.remove(head) {
                Some(Value::Map(child)) => child,
                _ => Map::new(),
            };
            set_nested(&mut child, rest, value);
            map.insert(head.to_string(), Value::Map(child));
        }
    }
}

fn render_section(out: &mut String, path: &str, map: &Map) {
    let (nested, simple): (Vec<_>, Vec<_>) = map.iter().partition(|(_, v)| v.is_map());

    out.push_str(&format!("[{path}]\n"));
    for (key, value) in simple {
        out.push_str(&format!("{key} = {}\n", render_value(value)));
    }
    out.push('\n');

    for (key, value) in nested {
        if let Some(child) = value.as_map() {
            render_section(out, &format!("{path}.{key}"), child);
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{s}\""),
        // Non-string list elements are dropped
        Value::List(items) => {
            let quoted: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| format!("\"{s}\""))
                .collect();
            format!("[{}]", quoted.join(", "))
        }
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Map(_) => String::new(),
    }
}
