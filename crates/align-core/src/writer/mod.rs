//! Config writers: reconcile freshly rendered servers with existing files.
//!
//! - **TomlBlockWriter**: replaces `[mcp_servers.*]` sections, keeps the rest
//! - **JsonNodeWriter**: replaces the server node, keeps sibling keys
//! - **JsonFreshWriter**: full replacement (the agent file holds only servers)

mod json;
mod registry;
mod toml;
mod traits;

pub use json::{JsonFreshWriter, JsonNodeWriter};
pub use registry::WriterRegistry;
pub use toml::{TomlBlockWriter, strip_server_sections};
pub use traits::ConfigMerger;
