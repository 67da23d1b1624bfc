//! agent-align configuration file
//!
//! ```yaml
//! sourceAgent: codex
//! targets:
//!   agents:
//!     - copilot
//!     - name: vscode
//!       filePath: ~/work/.vscode/mcp.json
//!       node: servers
//!   additional:
//!     json:
//!       - filePath: ~/project/.mcp.json
//!         jsonPath: mcpServers
//! ```
//!
//! `targets` may also be a plain list of agent names, and `source` is accepted
//! in place of `sourceAgent`.

use std::path::PathBuf;

use align_core::{AgentProfile, AgentTarget, normalize_agent};
use align_fs::{NormalizedPath, io};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Directory under the user config dir holding the config file.
pub const CONFIG_DIR: &str = "agent-align";

/// Config file name.
pub const CONFIG_FILE: &str = "agent-align.yml";

/// A validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Normalized name of the agent whose config is the source of truth
    pub source_agent: String,
    /// Destination agents, normalized and without blanks
    pub targets: Vec<AgentTarget>,
    /// Arbitrary JSON files that also receive the servers
    pub additional_json: Vec<AdditionalJsonTarget>,
}

/// An extra JSON file to write the servers into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdditionalJsonTarget {
    pub file_path: String,
    /// Dotted path of the node; empty for the document root
    pub json_path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    source_agent: Option<String>,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    targets: Option<RawTargets>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTargets {
    List(Vec<RawAgent>),
    Table(RawTargetTable),
}

#[derive(Debug, Default, Deserialize)]
struct RawTargetTable {
    #[serde(default)]
    agents: Vec<RawAgent>,
    #[serde(default)]
    additional: RawAdditional,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAgent {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, rename = "filePath")]
        file_path: Option<String>,
        #[serde(default)]
        node: Option<String>,
    },
}

#[derive(Debug, Default, Deserialize)]
struct RawAdditional {
    #[serde(default)]
    json: Vec<RawJsonTarget>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawJsonTarget {
    #[serde(default)]
    file_path: String,
    #[serde(default)]
    json_path: String,
}

impl RawAgent {
    fn into_target(self) -> Option<AgentTarget> {
        let (name, path, node) = match self {
            RawAgent::Name(name) => (name, None, None),
            RawAgent::Detailed {
                name,
                file_path,
                node,
            } => (name, file_path, node),
        };
        let name = normalize_agent(&name);
        if name.is_empty() {
            return None;
        }
        Some(AgentTarget {
            name,
            path_override: path.filter(|p| !p.trim().is_empty()),
            node_override: node,
        })
    }
}

impl Config {
    /// Load and validate a config file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let content = io::read_text(path)?;
        let config = Self::from_yaml(&content, path.to_native())?;
        debug!(
            path = %path,
            source = %config.source_agent,
            targets = config.targets.len(),
            additional = config.additional_json.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Parse and validate config text. `path` is only used in error messages.
    pub fn from_yaml(content: &str, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw: RawConfig = serde_yaml::from_str(content).map_err(|e| Error::Parse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        // sourceAgent wins over the legacy `source` key
        let source_agent = raw
            .source_agent
            .filter(|s| !s.trim().is_empty())
            .or(raw.source)
            .map(|s| normalize_agent(&s))
            .unwrap_or_default();
        if source_agent.is_empty() {
            return Err(Error::invalid(&path, "config must define a source agent"));
        }

        let table = match raw.targets {
            Some(RawTargets::List(agents)) => RawTargetTable {
                agents,
                ..Default::default()
            },
            Some(RawTargets::Table(table)) => table,
            None => RawTargetTable::default(),
        };

        let targets: Vec<AgentTarget> = table
            .agents
            .into_iter()
            .filter_map(RawAgent::into_target)
            .collect();
        if targets.is_empty() && table.additional.json.is_empty() {
            return Err(Error::invalid(&path, "config must define at least one target"));
        }
        if let Some(target) = targets.iter().find(|t| t.name == source_agent) {
            return Err(Error::invalid(
                &path,
                format!(
                    "\"{}\" is listed as both source and target; remove it from targets",
                    target.name
                ),
            ));
        }

        let additional_json = table
            .additional
            .json
            .into_iter()
            .map(|raw| {
                let file_path = raw.file_path.trim().to_string();
                if file_path.is_empty() {
                    return Err(Error::invalid(
                        &path,
                        "additional JSON target is missing a filePath",
                    ));
                }
                Ok(AdditionalJsonTarget {
                    file_path,
                    json_path: raw.json_path.trim().to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            source_agent,
            targets,
            additional_json,
        })
    }

    /// Destination agents as resolution targets.
    pub fn agent_targets(&self) -> &[AgentTarget] {
        &self.targets
    }

    /// Profiles for the additional JSON targets.
    pub fn additional_profiles(&self, home: &NormalizedPath) -> Vec<AgentProfile> {
        self.additional_json
            .iter()
            .map(|target| AgentProfile::additional_json(&target.file_path, &target.json_path, home))
            .collect()
    }
}

/// Default config location: `<config dir>/agent-align/agent-align.yml`.
pub fn default_config_path() -> Option<NormalizedPath> {
    dirs::config_dir().map(|dir| NormalizedPath::new(dir).join(CONFIG_DIR).join(CONFIG_FILE))
}
