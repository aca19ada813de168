//! CLI Command Implementations
//!
//! Thin wrappers over the library: open, edit, write, report.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::{info, warn};

use crate::config::BuilderConfig;
use crate::error::MefError;
use crate::export::export_def;
use crate::model::{Cue, ModPack, ProjectDef, TrackUse};
use crate::pack::{build_pack, open_pack, overwrite_def, overwrite_pack, BuildReport};

/// List a mod's Defs, tracks and uses.
pub fn inspect(path: &Path, json: bool) -> Result<()> {
    let pack = open(path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pack)?);
        return Ok(());
    }

    println!("{} ({})", pack.meta.name, pack.meta.package_id);
    println!("Versions: {}", pack.meta.supported_versions.join(", "));
    for def in &pack.defs {
        print_def(def);
    }

    Ok(())
}

fn print_def(def: &ProjectDef) {
    println!();
    println!("{} [ME_{}]", def.label_game, def.game_code);
    println!("{:-<60}", "");
    println!("Content folder: {}", def.content_folder);
    println!("Label prefix:   {}", def.label_prefix);
    for track in &def.tracks {
        println!(
            "  {:03}. {:<40} {}",
            track.index,
            track.display_title,
            track.uses_summary()
        );
    }
}

/// Print the documents each Def would be written as.
pub fn preview(path: &Path, def_name: Option<&str>) -> Result<()> {
    let pack = open(path)?;

    let defs: Vec<&ProjectDef> = match def_name {
        Some(name) => vec![pack.def(name).ok_or_else(|| MefError::DefNotFound {
            name: name.to_string(),
        })?],
        None => pack.defs.iter().collect(),
    };

    for def in defs {
        let docs = export_def(def);
        println!("=== {} / tracks.xml ===", def.label_game);
        print!("{}", docs.tracks_xml);
        println!("=== {} / theme.xml ===", def.label_game);
        print!("{}", docs.theme_xml);
    }

    Ok(())
}

/// Rewrite every Def of a mod in place.
pub fn overwrite(path: &Path) -> Result<()> {
    let pack = open(path)?;
    let written = overwrite_pack(&pack).context("Overwrite failed")?;
    for dir in &written {
        println!("Updated: {}", dir.display());
    }
    Ok(())
}

/// Re-package an opened mod.
pub fn build(path: &Path, out: &Path, name: Option<&str>, force: bool) -> Result<()> {
    let pack = open(path)?;
    let report = build_pack(&pack, out, name, force).context("Build failed")?;
    print_report(&report);
    Ok(())
}

/// Options of the `new` command.
#[derive(Debug, Clone)]
pub struct NewPackOptions {
    pub game: String,
    pub music: PathBuf,
    pub package_id: Option<String>,
    pub icon: Option<PathBuf>,
    pub preview: Option<PathBuf>,
    pub out: PathBuf,
    pub name: Option<String>,
    pub force: bool,
}

/// Create a one-Def pack from a music folder and build it.
pub fn new_pack(config: &BuilderConfig, options: &NewPackOptions) -> Result<()> {
    info!("Creating pack for {}", options.game);

    let mut meta = config.pack_meta(&options.game, options.package_id.as_deref());
    meta.mod_icon = options.icon.clone();
    meta.preview = options.preview.clone();

    let mut pack = ModPack::new(meta);
    let def = pack.add_def(&options.game)?;
    def.icon_source = options.icon.clone();
    let added = def
        .add_tracks_from_folder(&options.music)
        .with_context(|| format!("Failed to scan {}", options.music.display()))?;
    println!("Registered {} tracks", added);

    let report = build_pack(&pack, &options.out, options.name.as_deref(), options.force)
        .context("Build failed")?;
    print_report(&report);
    Ok(())
}

/// Cue edit of the `apply-cue` command.
#[derive(Debug, Clone)]
pub struct CueEdit {
    pub def: String,
    pub track: u32,
    pub cue: String,
    pub cue_data: String,
    pub biomes: Vec<String>,
    pub replace_ambient: bool,
    pub title: Option<String>,
}

/// Apply a cue to one track and write its Def back.
pub fn apply_cue(path: &Path, edit: &CueEdit) -> Result<()> {
    let mut pack = open(path)?;
    let cue = Cue::parse(&edit.cue, &edit.cue_data)?;

    let def = find_def(&mut pack, &edit.def)?;
    let track = def
        .track_mut(edit.track)
        .ok_or(MefError::TrackNotFound { index: edit.track })?;
    if let Some(title) = &edit.title {
        track.display_title = title.trim().to_string();
    }
    let use_ = TrackUse::new(cue, &edit.biomes);
    for biome in use_.unknown_biomes() {
        warn!("'{}' is not a vanilla biome; check the spelling", biome);
    }
    track.apply_use(use_, edit.replace_ambient)?;
    println!("Track {:03}: {}", track.index, track.uses_summary());

    let dir = overwrite_def(&pack, &edit.def)?;
    println!("Updated: {}", dir.display());
    Ok(())
}

/// Remove a cue from one track and write its Def back.
pub fn remove_cue(path: &Path, def_name: &str, index: u32, cue: &str, cue_data: &str) -> Result<()> {
    let mut pack = open(path)?;
    let cue = Cue::from_document(cue, cue_data).ok_or_else(|| MefError::UnknownCue {
        name: cue.to_string(),
    })?;

    let def = find_def(&mut pack, def_name)?;
    let track = def
        .track_mut(index)
        .ok_or(MefError::TrackNotFound { index })?;
    let removed = track.remove_use(&cue)?;
    println!("Removed {} from track {:03}: {}", removed, track.index, track.uses_summary());

    let dir = overwrite_def(&pack, def_name)?;
    println!("Updated: {}", dir.display());
    Ok(())
}

fn open(path: &Path) -> Result<ModPack> {
    open_pack(path).with_context(|| format!("Failed to open mod {}", path.display()))
}

fn find_def<'a>(pack: &'a mut ModPack, name: &str) -> Result<&'a mut ProjectDef> {
    pack.def_mut(name)
        .ok_or_else(|| anyhow!(MefError::DefNotFound { name: name.to_string() }))
}

fn print_report(report: &BuildReport) {
    println!("Built: {}", report.mod_dir.display());
    println!(
        "{} Defs, {} files copied",
        report.defs_written, report.files_copied
    );
    if !report.warnings.is_empty() {
        warn!("{} files could not be copied", report.warnings.len());
        for warning in &report.warnings {
            println!("  warning: {}", warning);
        }
    }
}
