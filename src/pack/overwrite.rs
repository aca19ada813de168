//! Writing edits back into an opened mod
//!
//! Only the two documents of each Def are rewritten. Audio, icons and
//! `About/` stay as they are.

use std::collections::HashSet;
use std::path::PathBuf;

use log::info;

use super::build::write_documents;
use super::layout::PackLayout;
use crate::error::{MefError, Result};
use crate::model::{def_folder_name, ModPack, ProjectDef};

/// Folder `def` is written back to: where it was imported from, or a new
/// `Defs/<folder>` for Defs added since.
pub fn overwrite_target(pack: &ModPack, def: &ProjectDef) -> Result<PathBuf> {
    if let Some(dir) = &def.source_dir {
        return Ok(dir.clone());
    }
    let root = pack.root.as_ref().ok_or(MefError::NoOpenedMod)?;
    Ok(PackLayout::new(root).def_dir(&def_folder_name(def)))
}

/// Rewrite the documents of every Def. Returns the folders written.
pub fn overwrite_pack(pack: &ModPack) -> Result<Vec<PathBuf>> {
    if pack.root.is_none() {
        return Err(MefError::NoOpenedMod);
    }

    let targets = pack
        .defs
        .iter()
        .map(|def| overwrite_target(pack, def))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    for target in &targets {
        if !seen.insert(target) {
            let folder = target
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            return Err(MefError::NamingConflict { folder });
        }
    }

    for (def, target) in pack.defs.iter().zip(&targets) {
        write_documents(def, target)?;
    }
    info!("Overwrote {} Defs", targets.len());
    Ok(targets)
}

/// Rewrite the documents of the Def called `name` only.
pub fn overwrite_def(pack: &ModPack, name: &str) -> Result<PathBuf> {
    if pack.root.is_none() {
        return Err(MefError::NoOpenedMod);
    }
    let def = pack.def(name).ok_or_else(|| MefError::DefNotFound {
        name: name.to_string(),
    })?;
    let target = overwrite_target(pack, def)?;
    write_documents(def, &target)?;
    info!("Overwrote '{}' in {}", def.label_game, target.display());
    Ok(target)
}
