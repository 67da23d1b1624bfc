//! Agents command implementation

use colored::Colorize;

use align_core::{AgentProfile, SUPPORTED_AGENTS, home_dir};

use crate::error::Result;

/// Run the agents command
///
/// Lists every supported agent with its default config file.
pub fn run_agents() -> Result<()> {
    let home = home_dir()?;

    println!("{} Supported agents:", "=>".blue().bold());
    for agent in SUPPORTED_AGENTS {
        let profile = AgentProfile::for_agent(agent, &home)?;
        println!("   {} {}", format!("{agent:<12}").cyan(), profile.path.as_str().dimmed());
    }
    Ok(())
}
