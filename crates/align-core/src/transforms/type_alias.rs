//! Claude Code: `streamable-http` is spelled `http`

use super::{ServerTransform, type_value};
use crate::error::Result;
use crate::model::{ServerSet, Value};

#[derive(Debug, Default, Clone)]
pub struct TypeAliasTransform;

impl ServerTransform for TypeAliasTransform {
    fn name(&self) -> &'static str {
        "type-alias"
    }

    fn transform(&self, servers: &mut ServerSet) -> Result<()> {
        for (_, server) in servers.iter_mut() {
            let Some(server) = server.as_map_mut() else {
                continue;
            };
            if type_value(server).as_deref() == Some("streamable-http") {
                server.insert("type".to_string(), Value::from("http"));
            }
        }
        Ok(())
    }
}
