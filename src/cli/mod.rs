//! CLI Module
//!
//! Command-line interface for building and editing Music Expanded packs.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// MEF Builder - Music Expanded Framework pack builder
#[derive(Parser, Debug)]
#[command(name = "mef-builder")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON config with defaults for new packs
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the Defs, tracks and cues of a mod
    #[command(name = "inspect")]
    Inspect {
        /// Mod folder
        path: PathBuf,

        /// Print the loaded pack as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the documents a mod's Defs would be written as
    #[command(name = "preview")]
    Preview {
        /// Mod folder
        path: PathBuf,

        /// Only this Def
        #[arg(short, long)]
        def: Option<String>,
    },

    /// Rewrite every Def's documents in place
    #[command(name = "overwrite")]
    Overwrite {
        /// Mod folder
        path: PathBuf,
    },

    /// Re-package a mod into a new folder
    #[command(name = "build")]
    Build {
        /// Mod folder
        path: PathBuf,

        /// Output folder (defaults to the configured output root)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Name of the built mod folder
        #[arg(short, long)]
        name: Option<String>,

        /// Replace an existing build
        #[arg(short, long)]
        force: bool,
    },

    /// Create and build a pack from a folder of .ogg files
    #[command(name = "new")]
    New {
        /// Game name
        #[arg(short, long)]
        game: String,

        /// Folder scanned recursively for .ogg files
        #[arg(short, long)]
        music: PathBuf,

        /// Package id, e.g. musicexpanded.halo
        #[arg(short, long)]
        package_id: Option<String>,

        /// Mod icon, also used as the Def icon
        #[arg(short, long)]
        icon: Option<PathBuf>,

        /// Preview image
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Output folder (defaults to the configured output root)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Name of the built mod folder
        #[arg(short, long)]
        name: Option<String>,

        /// Replace an existing build
        #[arg(short, long)]
        force: bool,
    },

    /// Assign a cue to a track and save the Def
    #[command(name = "apply-cue")]
    ApplyCue {
        /// Mod folder
        path: PathBuf,

        /// Def name
        #[arg(short, long)]
        def: String,

        /// Track number
        #[arg(short, long)]
        track: u32,

        /// Cue name (Ambient, MainMenu, Credits, BattleSmall, ..., Custom)
        #[arg(long)]
        cue: String,

        /// Data for a Custom cue
        #[arg(long, default_value = "")]
        cue_data: String,

        /// Restrict the use to a biome (repeatable)
        #[arg(short, long = "biome")]
        biomes: Vec<String>,

        /// Swap out the default Ambient use instead of adding
        #[arg(long)]
        replace_ambient: bool,

        /// New display title for the track
        #[arg(long)]
        title: Option<String>,
    },

    /// Remove a cue from a track and save the Def
    #[command(name = "remove-cue")]
    RemoveCue {
        /// Mod folder
        path: PathBuf,

        /// Def name
        #[arg(short, long)]
        def: String,

        /// Track number
        #[arg(short, long)]
        track: u32,

        /// Cue name
        #[arg(long)]
        cue: String,

        /// Data of the Custom cue to remove
        #[arg(long, default_value = "")]
        cue_data: String,
    },
}
