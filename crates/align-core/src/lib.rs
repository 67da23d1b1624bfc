//! Core engine for agent-align
//!
//! Turns one agent's MCP server definitions into the native configuration of
//! every other agent:
//!
//! - [`model`]: the canonical [`Value`] tree and [`ServerSet`]
//! - [`codec`]: the `[mcp_servers.*]` TOML subset and JSON payloads
//! - [`agents`]: where each agent keeps its servers and how files are merged
//! - [`transforms`]: per-agent rewrites and validation
//! - [`writer`]: merge policies that preserve content the tool does not own
//! - [`syncer`]: the orchestrator tying it together
//!
//! # Example
//!
//! ```no_run
//! use align_core::{AgentProfile, Syncer, codec, home_dir};
//!
//! # fn main() -> align_core::Result<()> {
//! let home = home_dir()?;
//! let source = AgentProfile::for_agent("codex", &home)?;
//! let payload = align_fs::io::read_text(&source.path)?;
//! let servers = codec::parse_source(&source, &payload)?;
//!
//! let targets = vec![AgentProfile::for_agent("copilot", &home)?];
//! let result = Syncer::new(targets).sync(&servers)?;
//! result.write_all()?;
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod codec;
pub mod error;
pub mod model;
pub mod syncer;
pub mod transforms;
pub mod writer;

pub use agents::{
    AgentProfile, AgentTarget, ConfigFormat, MergePolicy, SUPPORTED_AGENTS, home_dir,
    normalize_agent, resolve_profiles,
};
pub use error::{Error, Result};
pub use model::{Map, ServerSet, Value};
pub use syncer::{AgentOutput, SyncResult, Syncer};
pub use transforms::{ServerTransform, TransformRegistry};
pub use writer::{ConfigMerger, WriterRegistry};
