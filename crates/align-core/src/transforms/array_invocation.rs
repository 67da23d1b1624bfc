//! OpenCode: single-list invocation, `environment` key, local/remote types

use super::{ServerTransform, type_value};
use crate::error::Result;
use crate::model::{Map, ServerSet, Value};

/// Keys OpenCode rejects. `type` is normalized instead of stripped.
const STRIPPED_FIELDS: &[&str] = &["alwaysAllow", "autoApprove", "disabled", "gallery", "tools"];

/// OpenCode transform.
///
/// `{"command": "npx", "args": ["-y", "pkg"], "env": {..}}` becomes
/// `{"command": ["npx", "-y", "pkg"], "environment": {..}, "type": "local"}`.
#[derive(Debug, Default, Clone)]
pub struct ArrayInvocationTransform;

impl ServerTransform for ArrayInvocationTransform {
    fn name(&self) -> &'static str {
        "array-invocation"
    }

    fn transform(&self, servers: &mut ServerSet) -> Result<()> {
        for (_, server) in servers.iter_mut() {
            let Some(server) = server.as_map_mut() else {
                continue;
            };
            merge_invocation(server);
            if let Some(env) = server.remove("env") {
                server.insert("environment".to_string(), env);
            }
            for field in STRIPPED_FIELDS {
                server.remove(*field);
            }
            if let Some(kind) = resolve_type(server) {
                server.insert("type".to_string(), Value::from(kind));
            }
        }
        Ok(())
    }
}

/// Fold `args` into `command` as one ordered list.
fn merge_invocation(server: &mut Map) {
    let Some(command) = server.remove("command") else {
        return;
    };
    let mut invocation = match command {
        Value::List(items) => items,
        other => vec![other],
    };
    match server.remove("args") {
        Some(Value::List(args)) => invocation.extend(args),
        Some(arg) => invocation.push(arg),
        None => {}
    }
    server.insert("command".to_string(), Value::List(invocation));
}

/// The `type` to write, or `None` to keep an unrecognized one as-is.
fn resolve_type(server: &Map) -> Option<&'static str> {
    if server.contains_key("type") {
        return match type_value(server).as_deref() {
            Some("stdio") | Some("local") => Some("local"),
            Some("http") | Some("streamable-http") | Some("remote") => Some("remote"),
            _ => None,
        };
    }
    if server.contains_key("command") || !server.contains_key("url") {
        Some("local")
    } else {
        Some("remote")
    }
}
