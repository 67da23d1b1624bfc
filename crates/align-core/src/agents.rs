//! Agent registry: maps agent names to their native config locations.
//!
//! This is the single source of truth for where each agent keeps its MCP
//! server definitions: file path, the JSON node holding the servers, the file
//! format and how new output is merged with what is already on disk.
//!
//! # Adding a new agent
//!
//! 1. Add the name to [`SUPPORTED_AGENTS`].
//! 2. Add an arm to the `match` in [`agent_spec`].
//! 3. Register a transform in [`crate::transforms::TransformRegistry`] if the
//!    agent needs one.

use align_fs::NormalizedPath;

use crate::error::{Error, Result};

/// All supported agent names.
pub const SUPPORTED_AGENTS: &[&str] = &[
    "copilot",
    "vscode",
    "codex",
    "claudecode",
    "gemini",
    "kilocode",
    "opencode",
];

/// File format of an agent config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

/// How rendered servers are reconciled with an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Replace every `[mcp_servers.*]` section, keep everything else.
    TomlBlockReplace,
    /// Replace the server node of the existing JSON document, keep siblings.
    JsonOverwriteNode,
    /// Write a fresh document holding only the servers.
    JsonFresh,
}

/// Where an agent's config lives relative to the home directory.
#[derive(Debug, Clone, Copy)]
enum DefaultPath {
    HomeRelative(&'static str),
    OsSpecific {
        windows: &'static str,
        other: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
struct AgentSpec {
    path: DefaultPath,
    node: &'static str,
    format: ConfigFormat,
    merge: MergePolicy,
}

/// A resolved destination: who, where, and how to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    /// Normalized agent name
    pub name: String,
    /// Config file location
    pub path: NormalizedPath,
    /// Key the servers are nested under; empty for the document root
    pub node: String,
    pub format: ConfigFormat,
    pub merge: MergePolicy,
}

/// A requested destination before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentTarget {
    pub name: String,
    pub path_override: Option<String>,
    pub node_override: Option<String>,
}

impl AgentTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path_override = Some(path.into());
        self
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node_override = Some(node.into());
        self
    }
}

/// Lowercase and trim an agent name.
pub fn normalize_agent(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Resolve the current user's home directory.
pub fn home_dir() -> Result<NormalizedPath> {
    dirs::home_dir()
        .map(NormalizedPath::new)
        .ok_or(Error::HomeDirNotFound)
}

fn agent_spec(name: &str) -> Option<AgentSpec> {
    let spec = match name {
        "copilot" => AgentSpec {
            path: DefaultPath::HomeRelative(".copilot/mcp-config.json"),
            node: "mcpServers",
            format: ConfigFormat::Json,
            merge: MergePolicy::JsonFresh,
        },
        "vscode" => AgentSpec {
            path: DefaultPath::HomeRelative(".config/Code/User/mcp.json"),
            node: "servers",
            format: ConfigFormat::Json,
            merge: MergePolicy::JsonFresh,
        },
        "codex" => AgentSpec {
            path: DefaultPath::HomeRelative(".codex/config.toml"),
            node: "",
            format: ConfigFormat::Toml,
            merge: MergePolicy::TomlBlockReplace,
        },
        "claudecode" => AgentSpec {
            path: DefaultPath::HomeRelative(".claude.json"),
            node: "mcpServers",
            format: ConfigFormat::Json,
            merge: MergePolicy::JsonFresh,
        },
        // settings.json holds unrelated user settings too
        "gemini" => AgentSpec {
            path: DefaultPath::HomeRelative(".gemini/settings.json"),
            node: "mcpServers",
            format: ConfigFormat::Json,
            merge: MergePolicy::JsonOverwriteNode,
        },
        "kilocode" => AgentSpec {
            path: DefaultPath::OsSpecific {
                windows: "AppData/Roaming/Code/user/mcp.json",
                other: ".config/Code/User/globalStorage/kilocode.kilo-code/settings/mcp_settings.json",
            },
            node: "mcpServers",
            format: ConfigFormat::Json,
            merge: MergePolicy::JsonFresh,
        },
        "opencode" => AgentSpec {
            path: DefaultPath::HomeRelative(".config/opencode/opencode.json"),
            node: "mcp",
            format: ConfigFormat::Json,
            merge: MergePolicy::JsonOverwriteNode,
        },
        _ => return None,
    };
    Some(spec)
}

impl AgentProfile {
    /// Resolve a target against the registry.
    ///
    /// Path overrides starting with `~/` are expanded against `home`.
    pub fn resolve(target: &AgentTarget, home: &NormalizedPath) -> Result<Self> {
        let name = normalize_agent(&target.name);
        let spec = agent_spec(&name).ok_or_else(|| Error::UnsupportedAgent {
            agent: target.name.clone(),
        })?;

        let default_path = match spec.path {
            DefaultPath::HomeRelative(rel) => home.join(rel),
            DefaultPath::OsSpecific { windows, other } => {
                home.join(if cfg!(windows) { windows } else { other })
            }
        };
        let path = match target.path_override.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => expand_home(custom, home),
            _ => default_path,
        };
        let node = target
            .node_override
            .as_deref()
            .map(str::trim)
            .unwrap_or(spec.node)
            .to_string();

        Ok(Self {
            name,
            path,
            node,
            format: spec.format,
            merge: spec.merge,
        })
    }

    /// Default profile for an agent name.
    pub fn for_agent(name: &str, home: &NormalizedPath) -> Result<Self> {
        Self::resolve(&AgentTarget::new(name), home)
    }

    /// Profile for an arbitrary JSON file that should receive the servers at a
    /// dotted `json_path` (empty for the document root).
    pub fn additional_json(path: &str, json_path: &str, home: &NormalizedPath) -> Self {
        let path = expand_home(path.trim(), home);
        Self {
            name: format!("json:{path}"),
            path,
            node: json_path.trim().to_string(),
            format: ConfigFormat::Json,
            merge: MergePolicy::JsonOverwriteNode,
        }
    }
}

/// Resolve every target, failing on the first unsupported agent.
pub fn resolve_profiles(targets: &[AgentTarget], home: &NormalizedPath) -> Result<Vec<AgentProfile>> {
    targets
        .iter()
        .map(|target| AgentProfile::resolve(target, home))
        .collect()
}

fn expand_home(path: &str, home: &NormalizedPath) -> NormalizedPath {
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None if path == "~" => home.clone(),
        None => NormalizedPath::new(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn home() -> NormalizedPath {
        NormalizedPath::new("/home/me")
    }

    #[rstest]
    #[case("copilot", "/home/me/.copilot/mcp-config.json", "mcpServers", ConfigFormat::Json)]
    #[case("vscode", "/home/me/.config/Code/User/mcp.json", "servers", ConfigFormat::Json)]
    #[case("codex", "/home/me/.codex/config.toml", "", ConfigFormat::Toml)]
    #[case("claudecode", "/home/me/.claude.json", "mcpServers", ConfigFormat::Json)]
    #[case("gemini", "/home/me/.gemini/settings.json", "mcpServers", ConfigFormat::Json)]
    #[case("opencode", "/home/me/.config/opencode/opencode.json", "mcp", ConfigFormat::Json)]
    fn test_default_profiles(
        #[case] agent: &str,
        #[case] path: &str,
        #[case] node: &str,
        #[case] format: ConfigFormat,
    ) {
        let profile = AgentProfile::for_agent(agent, &home()).unwrap();
        assert_eq!(profile.name, agent);
        assert_eq!(profile.path.as_str(), path);
        assert_eq!(profile.node, node);
        assert_eq!(profile.format, format);
    }

    #[test]
    fn test_kilocode_path_is_os_specific() {
        let profile = AgentProfile::for_agent("kilocode", &home()).unwrap();
        if cfg!(windows) {
            assert!(profile.path.as_str().ends_with("AppData/Roaming/Code/user/mcp.json"));
        } else {
            assert!(profile.path.as_str().ends_with("kilocode.kilo-code/settings/mcp_settings.json"));
        }
    }

    #[test]
    fn test_merge_policies() {
        let policy = |name| AgentProfile::for_agent(name, &home()).unwrap().merge;
        assert_eq!(policy("codex"), MergePolicy::TomlBlockReplace);
        assert_eq!(policy("gemini"), MergePolicy::JsonOverwriteNode);
        assert_eq!(policy("copilot"), MergePolicy::JsonFresh);
    }

    #[test]
    fn test_name_is_normalized() {
        let profile = AgentProfile::for_agent("  ClaudeCode ", &home()).unwrap();
        assert_eq!(profile.name, "claudecode");
    }

    #[test]
    fn test_unsupported_agent() {
        let err = AgentProfile::for_agent("notepad", &home()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedAgent { ref agent } if agent == "notepad"));
    }

    #[test]
    fn test_overrides() {
        let target = AgentTarget::new("copilot")
            .with_path(" ~/custom/mcp.json ")
            .with_node("servers");
        let profile = AgentProfile::resolve(&target, &home()).unwrap();
        assert_eq!(profile.path.as_str(), "/home/me/custom/mcp.json");
        assert_eq!(profile.node, "servers");

        let blank = AgentTarget::new("copilot").with_path("   ");
        let profile = AgentProfile::resolve(&blank, &home()).unwrap();
        assert_eq!(profile.path.as_str(), "/home/me/.copilot/mcp-config.json");
    }

    #[test]
    fn test_additional_json_profile() {
        let profile = AgentProfile::additional_json("/work/.mcp.json", "tools.mcp", &home());
        assert_eq!(profile.name, "json:/work/.mcp.json");
        assert_eq!(profile.node, "tools.mcp");
        assert_eq!(profile.merge, MergePolicy::JsonOverwriteNode);
    }

    #[test]
    fn test_resolve_profiles_fails_on_unknown() {
        let targets = vec![AgentTarget::new("codex"), AgentTarget::new("unknown")];
        assert!(resolve_profiles(&targets, &home()).is_err());
    }

    #[test]
    fn test_every_supported_agent_resolves() {
        for agent in SUPPORTED_AGENTS {
            assert!(AgentProfile::for_agent(agent, &home()).is_ok(), "{agent} must resolve");
        }
    }
}
