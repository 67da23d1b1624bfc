//! Sync command implementation

use colored::Colorize;
use tracing::debug;

use align_config::{Config, default_config_path, load_servers_file};
use align_core::{
    AgentProfile, AgentTarget, ServerSet, SyncResult, Syncer, codec, home_dir, normalize_agent,
    resolve_profiles,
};
use align_fs::{NormalizedPath, io};

use crate::cli::SyncArgs;
use crate::error::{CliError, Result};

/// What to sync: one source and every destination profile.
#[derive(Debug)]
struct SyncPlan {
    source: String,
    profiles: Vec<AgentProfile>,
}

/// Run the sync command
pub fn run_sync(args: &SyncArgs) -> Result<()> {
    let home = home_dir()?;
    let plan = build_plan(args, &home)?;

    let servers = match &args.mcp_config {
        Some(path) => load_servers_file(&NormalizedPath::new(path))?,
        None => read_source(&plan.source, &home)?,
    };

    println!(
        "{} Syncing {} server(s) from {}...",
        "=>".blue().bold(),
        servers.len(),
        plan.source.cyan()
    );

    let result = Syncer::new(plan.profiles).sync(&servers)?;

    if args.dry_run {
        print_dry_run(&result);
        return Ok(());
    }

    result.write_all()?;
    for (name, output) in &result.agents {
        println!(
            "   {} {} -> {}",
            "+".green(),
            name.cyan(),
            output.profile.path
        );
    }
    println!(
        "{} Synced {} agent config(s).",
        "OK".green().bold(),
        result.agents.len()
    );
    Ok(())
}

/// Combine the config file with command-line overrides.
///
/// With both `--source` and `--agents` the config file is not needed.
fn build_plan(args: &SyncArgs, home: &NormalizedPath) -> Result<SyncPlan> {
    let flag_targets = args
        .agent_list()
        .map(|agents| agents.iter().map(AgentTarget::new).collect::<Vec<_>>());

    let (source, targets, additional) = match (&args.source, flag_targets) {
        (Some(source), Some(targets)) => (source.clone(), targets, Vec::new()),
        (source_flag, target_flag) => {
            let config = load_config(args)?;
            let source = source_flag.clone().unwrap_or(config.source_agent.clone());
            let targets = target_flag.unwrap_or_else(|| config.agent_targets().to_vec());
            (source, targets, config.additional_profiles(home))
        }
    };

    let source = normalize_agent(&source);
    if source.is_empty() {
        return Err(CliError::user("a source agent is required"));
    }
    if let Some(target) = targets.iter().find(|t| normalize_agent(&t.name) == source) {
        return Err(CliError::user(format!(
            "\"{}\" is both the source and a target; remove it from the targets",
            target.name.trim()
        )));
    }

    let mut profiles = resolve_profiles(&targets, home)?;
    profiles.extend(additional);
    debug!(source = %source, targets = profiles.len(), "resolved sync plan");

    Ok(SyncPlan { source, profiles })
}

fn load_config(args: &SyncArgs) -> Result<Config> {
    let path = match &args.config {
        Some(path) => NormalizedPath::new(path),
        None => default_config_path().ok_or_else(|| {
            CliError::user("could not determine the config directory; pass --config")
        })?,
    };
    if !path.exists() {
        return Err(CliError::user(format!(
            "config file not found at {path}; pass --config or --source with --agents"
        )));
    }
    Ok(Config::load(&path)?)
}

/// Read and parse the source agent's own config file.
fn read_source(source: &str, home: &NormalizedPath) -> Result<ServerSet> {
    let profile = AgentProfile::for_agent(source, home)?;
    let payload = io::read_text(&profile.path)?;
    Ok(codec::parse_source(&profile, &payload)?)
}

fn print_dry_run(result: &SyncResult) {
    for (name, output) in &result.agents {
        println!();
        println!(
            "{} {} ({})",
            "#".dimmed(),
            name.cyan().bold(),
            output.profile.path
        );
        print!("{}", output.content);
    }
    println!();
    println!(
        "{} Dry run: {} agent config(s) rendered, nothing written.",
        "OK".green().bold(),
        result.agents.len()
    );
}
