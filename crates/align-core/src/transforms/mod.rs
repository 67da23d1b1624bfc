//! Per-agent transforms applied to a destination's copy of the servers
//!
//! Every destination gets its own [`ServerSet`] copy, which the transform
//! registered for that agent may rewrite or reject. Agents without a
//! registered transform get [`IdentityTransform`].
//!
//! | Agent        | Transform                  |
//! |--------------|----------------------------|
//! | `copilot`    | [`ToolsAndTypeTransform`]  |
//! | `codex`      | [`TokenHeaderTransform`]   |
//! | `claudecode` | [`TypeAliasTransform`]     |
//! | `gemini`     | [`FieldStripTransform`]    |
//! | `opencode`   | [`ArrayInvocationTransform`] |

mod array_invocation;
mod field_strip;
mod token_header;
mod tools_type;
mod type_alias;

pub use array_invocation::ArrayInvocationTransform;
pub use field_strip::{FieldStripTransform, UNSUPPORTED_FIELDS};
pub use token_header::{CODEX_TOKEN_ENV_VAR, TokenHeaderTransform};
pub use tools_type::ToolsAndTypeTransform;
pub use type_alias::TypeAliasTransform;

use std::collections::HashMap;

use crate::agents::normalize_agent;
use crate::error::Result;
use crate::model::{Map, ServerSet};

/// A destination-specific rewrite/validation step.
pub trait ServerTransform: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite `servers` in place, or reject them with a validation error.
    fn transform(&self, servers: &mut ServerSet) -> Result<()>;
}

/// Leaves servers untouched.
#[derive(Debug, Default, Clone)]
pub struct IdentityTransform;

impl ServerTransform for IdentityTransform {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn transform(&self, _servers: &mut ServerSet) -> Result<()> {
        Ok(())
    }
}

type Constructor = fn() -> Box<dyn ServerTransform>;

/// Registry of transform constructors keyed by normalized agent name.
pub struct TransformRegistry {
    constructors: HashMap<String, Constructor>,
}

impl TransformRegistry {
    /// Create an empty registry. Every lookup yields [`IdentityTransform`].
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Create a registry with the built-in agent transforms.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("copilot", || Box::new(ToolsAndTypeTransform));
        registry.register("codex", || Box::new(TokenHeaderTransform));
        registry.register("claudecode", || Box::new(TypeAliasTransform));
        registry.register("gemini", || Box::new(FieldStripTransform::gemini()));
        registry.register("opencode", || Box::new(ArrayInvocationTransform));
        registry
    }

    /// Register (or replace) the transform for an agent.
    pub fn register(&mut self, agent: &str, constructor: Constructor) {
        self.constructors.insert(normalize_agent(agent), constructor);
    }

    /// Build the transform for an agent, falling back to identity.
    pub fn get(&self, agent: &str) -> Box<dyn ServerTransform> {
        match self.constructors.get(&normalize_agent(agent)) {
            Some(constructor) => constructor(),
            None => Box::new(IdentityTransform),
        }
    }

    /// Check whether an agent has a dedicated transform.
    pub fn contains(&self, agent: &str) -> bool {
        self.constructors.contains_key(&normalize_agent(agent))
    }
}

impl Default for TransformRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// The server's `type`, lowercased and trimmed, if it is a string.
pub(crate) fn type_value(server: &Map) -> Option<String> {
    server
        .get("type")
        .and_then(|v| v.as_str())
        .map(|t| t.trim().to_lowercase())
}
