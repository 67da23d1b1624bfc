//! Filesystem helpers for agent-align
//!
//! Provides normalized path handling plus the read/write primitives used when
//! destination configuration files are merged and rewritten.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
