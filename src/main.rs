//! MEF Builder CLI
//!
//! Command-line interface for building Music Expanded Framework packs.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use mef_builder::cli::commands::{self, CueEdit, NewPackOptions};
use mef_builder::cli::{Cli, Commands};
use mef_builder::{BuilderConfig, MefError};

fn main() {
    let cli = Cli::parse();

    // Initialize logger
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        if let Some(hint) = e.downcast_ref::<MefError>().and_then(|e| e.recovery_suggestion()) {
            eprintln!("hint: {}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    debug!("MEF Builder v{}", env!("CARGO_PKG_VERSION"));

    let config = BuilderConfig::resolve(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Some(cmd) => handle_command(cmd, &config),
        None => {
            println!("MEF Builder v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands, config: &BuilderConfig) -> Result<()> {
    match cmd {
        Commands::Inspect { path, json } => commands::inspect(&path, json),
        Commands::Preview { path, def } => commands::preview(&path, def.as_deref()),
        Commands::Overwrite { path } => commands::overwrite(&path),
        Commands::Build {
            path,
            out,
            name,
            force,
        } => {
            let out = out.unwrap_or_else(|| config.output_root.clone());
            commands::build(&path, &out, name.as_deref(), force)
        }
        Commands::New {
            game,
            music,
            package_id,
            icon,
            preview,
            out,
            name,
            force,
        } => commands::new_pack(
            config,
            &NewPackOptions {
                game,
                music,
                package_id,
                icon,
                preview,
                out: out.unwrap_or_else(|| config.output_root.clone()),
                name,
                force,
            },
        ),
        Commands::ApplyCue {
            path,
            def,
            track,
            cue,
            cue_data,
            biomes,
            replace_ambient,
            title,
        } => commands::apply_cue(
            &path,
            &CueEdit {
                def,
                track,
                cue,
                cue_data,
                biomes,
                replace_ambient,
                title,
            },
        ),
        Commands::RemoveCue {
            path,
            def,
            track,
            cue,
            cue_data,
        } => commands::remove_cue(&path, &def, track, &cue, &cue_data),
    }
}
