//! Command implementations for align-cli

pub mod agents;
pub mod sync;

pub use agents::run_agents;
pub use sync::run_sync;
