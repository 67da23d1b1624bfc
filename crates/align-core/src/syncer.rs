//! Syncer - renders one source server set for every destination agent
//!
//! For each destination profile, in order:
//! 1. Deep-copy the source servers
//! 2. Apply the agent's transform (a validation failure aborts the whole sync)
//! 3. Read the existing destination file, best effort
//! 4. Merge with the writer chosen by the profile's merge policy
//!
//! Nothing is written until [`SyncResult::write_all`] is called.

use std::collections::{BTreeMap, HashSet};

use align_fs::{NormalizedPath, io};
use tracing::{debug, info};

use crate::agents::{AgentProfile, AgentTarget, resolve_profiles};
use crate::error::{Error, Result};
use crate::model::ServerSet;
use crate::transforms::TransformRegistry;
use crate::writer::WriterRegistry;

/// Rendered output for one destination.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutput {
    pub profile: AgentProfile,
    pub content: String,
}

/// Outcome of a successful sync.
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// The source servers, untouched by any destination transform
    pub servers: ServerSet,
    /// Rendered output keyed by agent name
    pub agents: BTreeMap<String, AgentOutput>,
}

impl SyncResult {
    /// Write every rendered output to its destination file.
    ///
    /// Returns the written paths in agent name order.
    pub fn write_all(&self) -> Result<Vec<NormalizedPath>> {
        let mut written = Vec::with_capacity(self.agents.len());
        for (name, output) in &self.agents {
            io::write_text(&output.profile.path, &output.content)?;
            info!(agent = %name, path = %output.profile.path, "wrote agent config");
            written.push(output.profile.path.clone());
        }
        Ok(written)
    }
}

/// Sync orchestrator.
pub struct Syncer {
    profiles: Vec<AgentProfile>,
    transforms: TransformRegistry,
    writers: WriterRegistry,
}

impl Syncer {
    /// Create a syncer for the given destinations.
    ///
    /// Profiles are deduplicated by name; the first occurrence wins.
    pub fn new(profiles: Vec<AgentProfile>) -> Self {
        let mut seen = HashSet::new();
        let profiles = profiles
            .into_iter()
            .filter(|profile| seen.insert(profile.name.clone()))
            .collect();

        Self {
            profiles,
            transforms: TransformRegistry::with_builtins(),
            writers: WriterRegistry::new(),
        }
    }

    /// Resolve targets against the agent registry and create a syncer.
    pub fn from_targets(targets: &[AgentTarget], home: &NormalizedPath) -> Result<Self> {
        Ok(Self::new(resolve_profiles(targets, home)?))
    }

    /// Replace the transform registry.
    pub fn with_transforms(mut self, transforms: TransformRegistry) -> Self {
        self.transforms = transforms;
        self
    }

    /// Destination profiles after deduplication.
    pub fn profiles(&self) -> &[AgentProfile] {
        &self.profiles
    }

    /// Render `servers` for every destination.
    ///
    /// All or nothing: the first failing destination discards every output.
    pub fn sync(&self, servers: &ServerSet) -> Result<SyncResult> {
        if servers.is_empty() {
            return Err(Error::EmptyServers);
        }
        if self.profiles.is_empty() {
            return Err(Error::NoTargets);
        }

        let mut agents = BTreeMap::new();
        for profile in &self.profiles {
            let content = self.render(profile, servers)?;
            agents.insert(
                profile.name.clone(),
                AgentOutput {
                    profile: profile.clone(),
                    content,
                },
            );
        }

        info!(
            servers = servers.len(),
            agents = agents.len(),
            "rendered server configuration"
        );
        Ok(SyncResult {
            servers: servers.clone(),
            agents,
        })
    }

    fn render(&self, profile: &AgentProfile, servers: &ServerSet) -> Result<String> {
        let mut copy = servers.deep_copy();

        let transform = self.transforms.get(&profile.name);
        debug!(agent = %profile.name, transform = transform.name(), "applying transform");
        transform.transform(&mut copy)?;

        let existing = io::read_text_if_exists(&profile.path);
        debug!(
            agent = %profile.name,
            path = %profile.path,
            existing = existing.is_some(),
            policy = ?profile.merge,
            "merging destination"
        );

        self.writers
            .get_writer(profile.merge)
            .merge(existing.as_deref(), &copy, &profile.node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::ServerTransform;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    fn servers(value: serde_json::Value) -> ServerSet {
        serde_json::from_value(value).unwrap()
    }

    fn home(dir: &TempDir) -> NormalizedPath {
        NormalizedPath::new(dir.path())
    }

    fn syncer(agents: &[&str], home: &NormalizedPath) -> Syncer {
        let targets: Vec<_> = agents.iter().map(|a| AgentTarget::new(*a)).collect();
        Syncer::from_targets(&targets, home).unwrap()
    }

    #[test]
    fn test_empty_servers_rejected() {
        let dir = TempDir::new().unwrap();
        let err = syncer(&["copilot"], &home(&dir))
            .sync(&ServerSet::new())
            .unwrap_err();
        assert!(matches!(err, Error::EmptyServers));
    }

    #[test]
    fn test_no_targets_rejected() {
        let err = Syncer::new(Vec::new())
            .sync(&servers(json!({"s": {"command": "x"}})))
            .unwrap_err();
        assert!(matches!(err, Error::NoTargets));
    }

    #[test]
    fn test_destinations_are_isolated() {
        let dir = TempDir::new().unwrap();
        let source = servers(json!({"s": {"command": "npx", "type": "stdio"}}));

        let result = syncer(&["copilot", "gemini", "vscode"], &home(&dir))
            .sync(&source)
            .unwrap();

        assert_eq!(result.servers, source);
        assert!(result.agents["copilot"].content.contains("\"tools\": []"));
        assert!(result.agents["copilot"].content.contains("\"type\": \"local\""));
        assert!(!result.agents["gemini"].content.contains("\"type\""));
        assert!(!result.agents["gemini"].content.contains("tools"));
        assert!(result.agents["vscode"].content.contains("\"type\": \"stdio\""));
    }

    #[test]
    fn test_validation_failure_discards_everything() {
        let dir = TempDir::new().unwrap();
        let source = servers(json!({"remote": {"type": "http"}}));

        let err = syncer(&["vscode", "copilot"], &home(&dir))
            .sync(&source)
            .unwrap_err();
        assert!(matches!(err, Error::Validation { ref agent, .. } if agent == "copilot"));
    }

    #[test]
    fn test_duplicate_targets_deduplicated() {
        let dir = TempDir::new().unwrap();
        let targets = vec![
            AgentTarget::new("Copilot").with_path("/first.json"),
            AgentTarget::new("copilot").with_path("/second.json"),
            AgentTarget::new("codex"),
        ];
        let syncer = Syncer::from_targets(&targets, &home(&dir)).unwrap();

        assert_eq!(syncer.profiles().len(), 2);
        assert_eq!(syncer.profiles()[0].path.as_str(), "/first.json");
    }

    #[test]
    fn test_existing_destination_is_merged() {
        let dir = TempDir::new().unwrap();
        let home = home(&dir);
        io::write_text(
            &home.join(".gemini/settings.json"),
            r#"{"theme": "dark", "mcpServers": {"old": {}}}"#,
        )
        .unwrap();

        let result = syncer(&["gemini"], &home)
            .sync(&servers(json!({"s": {"command": "x"}})))
            .unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&result.agents["gemini"].content).unwrap();
        assert_eq!(parsed, json!({"theme": "dark", "mcpServers": {"s": {"command": "x"}}}));
    }

    #[test]
    fn test_custom_transform_registry() {
        struct Reject;
        impl ServerTransform for Reject {
            fn name(&self) -> &'static str {
                "reject"
            }
            fn transform(&self, _servers: &mut ServerSet) -> Result<()> {
                Err(Error::Validation {
                    agent: "vscode".into(),
                    server: "s".into(),
                    message: "rejected".into(),
                })
            }
        }

        let dir = TempDir::new().unwrap();
        let mut transforms = TransformRegistry::new();
        transforms.register("vscode", || Box::new(Reject));

        let err = syncer(&["vscode"], &home(&dir))
            .with_transforms(transforms)
            .sync(&servers(json!({"s": {}})))
            .unwrap_err();
        assert_eq!(err.to_string(), "vscode validation error: rejected");
    }

    #[test]
    fn test_write_all() {
        let dir = TempDir::new().unwrap();
        let home = home(&dir);
        let result = syncer(&["codex", "copilot"], &home)
            .sync(&servers(json!({"s": {"command": "x"}})))
            .unwrap();

        let written = result.write_all().unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            io::read_text(&home.join(".codex/config.toml")).unwrap(),
            "[mcp_servers.s]\ncommand = \"x\"\n"
        );
        assert!(home.join(".copilot/mcp-config.json").exists());
    }
}
