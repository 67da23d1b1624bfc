//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// agent-align - Keep MCP server definitions in sync across coding agents
#[derive(Parser, Debug)]
#[command(name = "agent-align")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run (defaults to `sync`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Sync arguments used when no command is given
    #[command(flatten)]
    pub sync: SyncArgs,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Copy the source agent's MCP servers into every target agent
    ///
    /// Examples:
    ///   agent-align sync                              # Use the default config file
    ///   agent-align sync --config ./agent-align.yml   # Use a specific config file
    ///   agent-align sync --source codex --agents copilot,gemini
    ///   agent-align sync --dry-run                    # Print instead of writing
    Sync(SyncArgs),

    /// List supported agents and their default config files
    Agents,
}

/// Arguments of the sync command
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncArgs {
    /// Path to the agent-align config file
    #[arg(short, long, env = "AGENT_ALIGN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Source agent, overriding the config file
    #[arg(short, long)]
    pub source: Option<String>,

    /// Comma-separated target agents, overriding the config file
    #[arg(short, long)]
    pub agents: Option<String>,

    /// Read servers from a YAML definitions file instead of the source agent
    #[arg(long)]
    pub mcp_config: Option<PathBuf>,

    /// Print the rendered configs without writing them
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    /// Target agent names from `--agents`, trimmed and without blanks.
    pub fn agent_list(&self) -> Option<Vec<String>> {
        self.agents.as_deref().map(|agents| {
            agents
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}
