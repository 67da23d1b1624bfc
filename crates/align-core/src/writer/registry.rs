//! Writer registry for selecting writers by merge policy

use super::{ConfigMerger, JsonFreshWriter, JsonNodeWriter, TomlBlockWriter};
use crate::agents::MergePolicy;

/// Registry that selects the appropriate writer for a merge policy.
pub struct WriterRegistry {
    toml: TomlBlockWriter,
    node: JsonNodeWriter,
    fresh: JsonFreshWriter,
}

impl WriterRegistry {
    /// Create a new writer registry with all built-in writers.
    pub fn new() -> Self {
        Self {
            toml: TomlBlockWriter::new(),
            node: JsonNodeWriter::new(),
            fresh: JsonFreshWriter::new(),
        }
    }

    /// Get the writer for a merge policy.
    pub fn get_writer(&self, policy: MergePolicy) -> &dyn ConfigMerger {
        match policy {
            MergePolicy::TomlBlockReplace => &self.toml,
            MergePolicy::JsonOverwriteNode => &self.node,
            MergePolicy::JsonFresh => &self.fresh,
        }
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
