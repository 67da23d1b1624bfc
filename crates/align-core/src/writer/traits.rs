//! ConfigMerger trait

use crate::error::Result;
use crate::model::ServerSet;

/// Trait for config writers.
///
/// Each writer knows one merge policy. Merging is a pure text operation: the
/// caller reads the existing file (if any) and writes the result.
pub trait ConfigMerger: Send + Sync {
    /// Produce the new file content.
    ///
    /// # Arguments
    /// * `existing` - Current file content, `None` if missing or unreadable
    /// * `servers` - The transformed servers for this destination
    /// * `node` - Key the servers live under; empty for the document root
    fn merge(&self, existing: Option<&str>, servers: &ServerSet, node: &str) -> Result<String>;
}
