//! Gemini: drop fields the agent rejects

use super::ServerTransform;
use crate::error::Result;
use crate::model::ServerSet;

/// Fields Gemini refuses in a server definition.
pub const UNSUPPORTED_FIELDS: &[&str] = &["alwaysAllow", "autoApprove", "disabled", "type", "gallery"];

/// Removes a fixed set of keys from every server.
#[derive(Debug, Clone)]
pub struct FieldStripTransform {
    fields: &'static [&'static str],
}

impl FieldStripTransform {
    pub fn new(fields: &'static [&'static str]) -> Self {
        Self { fields }
    }

    pub fn gemini() -> Self {
        Self::new(UNSUPPORTED_FIELDS)
    }
}

impl ServerTransform for FieldStripTransform {
    fn name(&self) -> &'static str {
        "field-strip"
    }

    fn transform(&self, servers: &mut ServerSet) -> Result<()> {
        for (_, server) in servers.iter_mut() {
            if let Some(server) = server.as_map_mut() {
                for field in self.fields {
                    server.remove(*field);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_gemini_strips_unsupported_fields() {
        let mut servers: ServerSet = serde_json::from_value(json!({
            "s": {
                "command": "npx",
                "type": "stdio",
                "alwaysAllow": ["x"],
                "autoApprove": [],
                "disabled": false,
                "gallery": true,
                "env": {"type": "kept"}
            },
            "o": "opaque"
        }))
        .unwrap();

        FieldStripTransform::gemini().transform(&mut servers).unwrap();

        let expected: ServerSet = serde_json::from_value(json!({
            "s": {"command": "npx", "env": {"type": "kept"}},
            "o": "opaque"
        }))
        .unwrap();
        assert_eq!(servers, expected);
    }
}
