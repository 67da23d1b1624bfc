//! End-to-end sync tests
//!
//! Category: integration
//! Parses a source agent's config from disk, syncs it to several agents in a
//! scratch home directory and checks the files that land on disk.

use align_core::{AgentProfile, AgentTarget, Error, Syncer, codec};
use align_fs::{NormalizedPath, io};
use pretty_assertions::assert_eq;
use serde_json::{Value as Json, json};
use tempfile::TempDir;

const CODEX_SOURCE: &str = r#"model = "o3"

[mcp_servers.github]
url = "https://api.example.com/mcp"
type = "streamable-http"

[mcp_servers.github.headers]
Authorization = "Bearer secret"

[mcp_servers.files]
command = "npx"
args = ["-y", "fs-server", "a,b"]

[mcp_servers.files.env]
ROOT = "/srv"
"#;

fn setup() -> (TempDir, NormalizedPath) {
    let temp = TempDir::new().unwrap();
    let home = NormalizedPath::new(temp.path());
    (temp, home)
}

fn read_json(path: &NormalizedPath) -> Json {
    serde_json::from_str(&io::read_text(path).unwrap()).unwrap()
}

fn parse_codex(home: &NormalizedPath) -> align_core::ServerSet {
    let source = AgentProfile::for_agent("codex", home).unwrap();
    io::write_text(&source.path, CODEX_SOURCE).unwrap();
    let payload = io::read_text(&source.path).unwrap();
    codec::parse_source(&source, &payload).unwrap()
}

// ============================================================================
// Codex source
// ============================================================================

mod codex_source {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nested_sections_are_folded() {
        let (_temp, home) = setup();
        let servers = parse_codex(&home);

        assert_eq!(servers.names(), vec!["files", "github"]);
        let github = serde_json::to_value(servers.get("github").unwrap()).unwrap();
        assert_eq!(github["headers"], json!({"Authorization": "Bearer secret"}));
    }

    #[test]
    fn test_sync_to_json_agents() {
        let (_temp, home) = setup();
        let servers = parse_codex(&home);

        let gemini_path = home.join(".gemini/settings.json");
        io::write_text(&gemini_path, r#"{"theme": "GitHub", "mcpServers": {"stale": {}}}"#).unwrap();

        let targets = ["copilot", "gemini", "claudecode", "opencode"].map(AgentTarget::new);
        let result = Syncer::from_targets(&targets, &home)
            .unwrap()
            .sync(&servers)
            .unwrap();
        result.write_all().unwrap();

        let copilot = read_json(&home.join(".copilot/mcp-config.json"));
        assert_eq!(
            copilot["mcpServers"]["files"]["args"],
            json!(["-y", "fs-server", "a,b"])
        );
        assert_eq!(copilot["mcpServers"]["files"]["tools"], json!([]));
        assert_eq!(copilot["mcpServers"]["github"]["type"], json!("http"));

        let gemini = read_json(&gemini_path);
        assert_eq!(gemini["theme"], json!("GitHub"));
        assert!(gemini["mcpServers"].get("stale").is_none());
        assert!(gemini["mcpServers"]["github"].get("type").is_none());

        let claude = read_json(&home.join(".claude.json"));
        assert_eq!(claude["mcpServers"]["github"]["type"], json!("http"));
        assert!(claude["mcpServers"]["files"].get("tools").is_none());

        let opencode = read_json(&home.join(".config/opencode/opencode.json"));
        assert_eq!(
            opencode["mcp"]["files"],
            json!({
                "command": ["npx", "-y", "fs-server", "a,b"],
                "environment": {"ROOT": "/srv"},
                "type": "local"
            })
        );
        assert_eq!(opencode["mcp"]["github"]["type"], json!("remote"));
    }
}

// ============================================================================
// Codex destination
// ============================================================================

mod codex_destination {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_existing_settings_survive_and_token_is_rewritten() {
        let (_temp, home) = setup();
        let codex_path = home.join(".codex/config.toml");
        io::write_text(
            &codex_path,
            "model = \"o3\"\n\n[mcp_servers.old]\ncommand = \"gone\"\n\n[tui]\nnotifications = true\n",
        )
        .unwrap();

        let servers = serde_json::from_value(json!({
            "github": {
                "url": "https://api.example.com/mcp",
                "headers": {"Authorization": "Bearer secret"}
            },
            "files": {"command": "npx", "args": ["a,b", "c"]}
        }))
        .unwrap();

        let result = Syncer::from_targets(&[AgentTarget::new("codex")], &home)
            .unwrap()
            .sync(&servers)
            .unwrap();
        result.write_all().unwrap();

        let expected = r#"model = "o3"

[tui]
notifications = true

[mcp_servers.files]
args = ["a,b", "c"]
command = "npx"

[mcp_servers.github]
bearer_token_env_var = "CODEX_GITHUB_PERSONAL_ACCESS_TOKEN"
url = "https://api.example.com/mcp"
"#;
        assert_eq!(io::read_text(&codex_path).unwrap(), expected);
    }

    #[test]
    fn test_resync_is_stable() {
        let (_temp, home) = setup();
        let servers = parse_codex(&home);
        let syncer = Syncer::from_targets(&[AgentTarget::new("codex")], &home).unwrap();

        syncer.sync(&servers).unwrap().write_all().unwrap();
        let first = io::read_text(&home.join(".codex/config.toml")).unwrap();
        syncer.sync(&servers).unwrap().write_all().unwrap();
        let second = io::read_text(&home.join(".codex/config.toml")).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("model = \"o3\"\n\n[mcp_servers.files]"));
    }
}

#[test]
fn test_json_source_comma_survives_toml() {
    let (_temp, home) = setup();
    let source = AgentProfile::for_agent("copilot", &home).unwrap();
    let payload = r#"{"mcpServers":{"s":{"command":"npx","args":["a,b","c"]}}}"#;
    let servers = codec::parse_source(&source, payload).unwrap();

    let result = Syncer::from_targets(&[AgentTarget::new("codex")], &home)
        .unwrap()
        .sync(&servers)
        .unwrap();
    let rendered = &result.agents["codex"].content;

    assert!(rendered.lines().any(|line| line == r#"args = ["a,b", "c"]"#));
    let reparsed = codec::parse_toml_servers(rendered);
    assert_eq!(reparsed, servers);
}

// ============================================================================
// Failure modes
// ============================================================================

mod failures {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_validation_failure_writes_nothing() {
        let (_temp, home) = setup();
        let servers = serde_json::from_value(json!({"remote": {"url": "https://h"}})).unwrap();
        let targets = ["vscode", "copilot"].map(AgentTarget::new);

        let err = Syncer::from_targets(&targets, &home)
            .unwrap()
            .sync(&servers)
            .unwrap_err();

        assert!(matches!(err, Error::Validation { .. }));
        assert!(!home.join(".config/Code/User/mcp.json").exists());
    }

    #[test]
    fn test_unsupported_target() {
        let (_temp, home) = setup();
        let result = Syncer::from_targets(&[AgentTarget::new("emacs")], &home);
        assert!(matches!(result, Err(Error::UnsupportedAgent { .. })));
    }

    #[test]
    fn test_malformed_json_source() {
        let (_temp, home) = setup();
        let source = AgentProfile::for_agent("copilot", &home).unwrap();
        let err = codec::parse_source(&source, "{\"mcpServers\": ").unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse JSON source"));
    }

    #[test]
    fn test_unparseable_destination_is_replaced() {
        let (_temp, home) = setup();
        let path = home.join(".gemini/settings.json");
        io::write_text(&path, "not json at all").unwrap();
        let servers = serde_json::from_value(json!({"s": {"command": "x"}})).unwrap();

        Syncer::from_targets(&[AgentTarget::new("gemini")], &home)
            .unwrap()
            .sync(&servers)
            .unwrap()
            .write_all()
            .unwrap();

        assert_eq!(read_json(&path), json!({"mcpServers": {"s": {"command": "x"}}}));
    }
}

// ============================================================================
// Additional JSON targets
// ============================================================================

#[test]
fn test_additional_json_target() {
    let (_temp, home) = setup();
    let path = home.join("project/.mcp.json");
    io::write_text(&path, r#"{"name": "demo"}"#).unwrap();

    let profile = AgentProfile::additional_json("~/project/.mcp.json", "tools.mcp", &home);
    let servers = serde_json::from_value(json!({"s": {"command": "x", "type": "stdio"}})).unwrap();

    Syncer::new(vec![profile])
        .sync(&servers)
        .unwrap()
        .write_all()
        .unwrap();

    assert_eq!(
        read_json(&path),
        json!({"name": "demo", "tools": {"mcp": {"s": {"command": "x", "type": "stdio"}}}})
    );
}
