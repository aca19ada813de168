//! Building a fresh mod folder
//!
//! Everything that can abort the build (validation, Def folder clashes, an
//! existing destination) is checked before the first file is written. After
//! that, documents are written strictly and asset copies are best effort:
//! a failed copy is recorded as a [`CopyWarning`] and the build goes on.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Serialize;

use super::layout::{create_dir, write_text, PackLayout};
use crate::error::{MefError, Result};
use crate::export::{build_about_xml, export_def, THEME_FILE, TRACKS_FILE};
use crate::import::{ABOUT_FILE, MOD_ICON_FILE, PREVIEW_FILE};
use crate::model::project::AUDIO_EXTENSION;
use crate::model::sanitize::sanitize_component;
use crate::model::{def_folder_name, indexed_name, ModPack, ProjectDef};

/// An asset that could not be copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyWarning {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub reason: String,
}

impl fmt::Display for CopyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "could not copy {} to {}: {}",
            self.source.display(),
            self.destination.display(),
            self.reason
        )
    }
}

/// Outcome of a build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    /// Root of the written mod.
    pub mod_dir: PathBuf,
    pub defs_written: usize,
    pub files_copied: usize,
    pub warnings: Vec<CopyWarning>,
}

impl BuildReport {
    fn copy(&mut self, source: &Path, destination: PathBuf) {
        match fs::copy(source, &destination) {
            Ok(_) => {
                debug!("Copied {} -> {}", source.display(), destination.display());
                self.files_copied += 1;
            }
            Err(e) => {
                let warning = CopyWarning {
                    source: source.to_path_buf(),
                    destination,
                    reason: e.to_string(),
                };
                warn!("{}", warning);
                self.warnings.push(warning);
            }
        }
    }
}

/// Def folder name for every Def, failing on the first clash.
///
/// Names are compared ignoring case so the result is portable.
pub fn plan_def_folders(defs: &[ProjectDef]) -> Result<Vec<String>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut folders = Vec::with_capacity(defs.len());
    for (i, def) in defs.iter().enumerate() {
        let folder = def_folder_name(def);
        if seen.insert(folder.to_lowercase(), i).is_some() {
            return Err(MefError::NamingConflict { folder });
        }
        folders.push(folder);
    }
    Ok(folders)
}

/// Folder name of the built mod: `name` if given, else the mod name.
pub fn mod_folder_name(pack: &ModPack, name: Option<&str>) -> Result<String> {
    let folder = sanitize_component(name.unwrap_or(pack.meta.name.as_str()).trim());
    if folder.is_empty() {
        return Err(MefError::MissingModName);
    }
    Ok(folder)
}

/// Fail if replacing `mod_dir` would delete the mod or any asset the build copies.
fn check_sources_outside(pack: &ModPack, mod_dir: &Path) -> Result<()> {
    let target = resolve(mod_dir);
    let assets = pack
        .root
        .iter()
        .chain(pack.meta.preview.iter())
        .chain(pack.meta.mod_icon.iter())
        .chain(pack.defs.iter().flat_map(|def| {
            def.icon_source
                .iter()
                .chain(def.tracks.iter().map(|track| &track.source_path))
        }));

    for asset in assets {
        if resolve(asset).starts_with(&target) {
            return Err(MefError::DestinationHoldsSources {
                path: mod_dir.to_path_buf(),
                asset: asset.clone(),
            });
        }
    }
    Ok(())
}

/// Absolute form of `path` when it exists.
fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Write `pack` as a new mod under `out_root`.
///
/// An existing destination is an error unless `force` is set, in which case
/// it is removed first. A destination holding the pack's own sources is
/// never removed.
pub fn build_pack(pack: &ModPack, out_root: &Path, name: Option<&str>, force: bool) -> Result<BuildReport> {
    pack.validate_for_build()?;
    let folders = plan_def_folders(&pack.defs)?;
    let mod_dir = out_root.join(mod_folder_name(pack, name)?);

    if mod_dir.exists() {
        if !force {
            return Err(MefError::DestinationExists { path: mod_dir });
        }
        check_sources_outside(pack, &mod_dir)?;
        info!("Replacing {}", mod_dir.display());
        fs::remove_dir_all(&mod_dir).map_err(|e| MefError::FileWriteError {
            path: mod_dir.clone(),
            source: e,
        })?;
    }

    for version in pack.meta.unknown_versions() {
        warn!("Unknown game version '{}' in supportedVersions", version);
    }

    info!("Building {} into {}", pack.meta.name, mod_dir.display());
    let layout = PackLayout::new(&mod_dir);
    let mut report = BuildReport {
        mod_dir: mod_dir.clone(),
        ..BuildReport::default()
    };

    let about_dir = layout.about_dir();
    create_dir(&about_dir)?;
    write_text(&about_dir.join(ABOUT_FILE), &build_about_xml(&pack.meta))?;
    if let Some(preview) = &pack.meta.preview {
        report.copy(preview, about_dir.join(PREVIEW_FILE));
    }
    if let Some(icon) = &pack.meta.mod_icon {
        report.copy(icon, about_dir.join(MOD_ICON_FILE));
    }

    for (def, folder) in pack.defs.iter().zip(&folders) {
        write_def(&layout, def, folder)?;
        report.defs_written += 1;

        let content_dir = layout.content_dir(&def.content_folder);
        create_dir(&content_dir)?;
        for track in &def.tracks {
            let ext = track
                .source_path
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_else(|| AUDIO_EXTENSION.to_string());
            let target = content_dir.join(format!("{}.{}", indexed_name(track), ext));
            report.copy(&track.source_path, target);
        }

        let icon = def.icon_source.as_ref().or(pack.meta.mod_icon.as_ref());
        match icon {
            Some(icon) if !def.icon_base.is_empty() => {
                let icons_dir = layout.icons_dir();
                create_dir(&icons_dir)?;
                report.copy(icon, icons_dir.join(format!("{}.png", def.icon_base)));
            }
            _ => debug!("No icon written for '{}'", def.label_game),
        }
    }

    info!(
        "Build finished: {} Defs, {} files copied, {} warnings",
        report.defs_written,
        report.files_copied,
        report.warnings.len()
    );
    Ok(report)
}

/// Write both documents of `def` into `Defs/<folder>/`.
pub(crate) fn write_def(layout: &PackLayout, def: &ProjectDef, folder: &str) -> Result<PathBuf> {
    let def_dir = layout.def_dir(folder);
    write_documents(def, &def_dir)?;
    Ok(def_dir)
}

/// Write both documents of `def` into `dir`, creating it if needed.
pub(crate) fn write_documents(def: &ProjectDef, dir: &Path) -> Result<()> {
    create_dir(dir)?;
    let docs = export_def(def);
    write_text(&dir.join(TRACKS_FILE), &docs.tracks_xml)?;
    write_text(&dir.join(THEME_FILE), &docs.theme_xml)?;
    debug!("Wrote '{}' to {}", def.label_game, dir.display());
    Ok(())
}
