//! Opening an existing mod folder

use std::path::Path;

use log::{debug, info, warn};
use walkdir::WalkDir;

use super::layout::{is_patches_dir, PackLayout};
use crate::error::{MefError, Result};
use crate::import::{import_def_folder, read_about, ImportContext, MOD_ICON_FILE, PREVIEW_FILE};
use crate::model::{ModPack, PackMeta};

/// Open the mod at `root`.
///
/// The folder needs `About/` and `Defs/`. Every Defs subfolder except
/// `Patches` is imported in name order; a Def that fails to import is
/// logged and skipped. Fails with [`MefError::NoValidDefs`] when nothing
/// could be imported.
pub fn open_pack(root: &Path) -> Result<ModPack> {
    let layout = PackLayout::new(root);
    layout.check()?;
    info!("Opening mod {}", root.display());

    let mut pack = ModPack::new(read_meta(&layout));
    pack.root = Some(root.to_path_buf());

    let ctx = ImportContext {
        fallback_label: String::new(),
        sounds_root: Some(layout.sounds_dir()),
        icons_root: Some(layout.icons_dir()),
    };

    let def_dirs = WalkDir::new(layout.defs_dir())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_dir())
        .filter(|e| !is_patches_dir(&e.file_name().to_string_lossy()));

    for entry in def_dirs {
        match import_def_folder(entry.path(), &ctx) {
            Ok(def) => {
                debug!("Loaded Def '{}' from {}", def.label_game, entry.path().display());
                pack.defs.push(def);
            }
            Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    if pack.defs.is_empty() {
        return Err(MefError::NoValidDefs {
            path: layout.defs_dir(),
        });
    }

    info!("Loaded {} Defs", pack.defs.len());
    Ok(pack)
}

/// Pack metadata, or empty metadata when `About.xml` is unreadable.
fn read_meta(layout: &PackLayout) -> PackMeta {
    let about_dir = layout.about_dir();
    read_about(&about_dir).unwrap_or_else(|e| {
        warn!("Could not read pack metadata: {}", e);
        PackMeta {
            preview: Some(about_dir.join(PREVIEW_FILE)).filter(|p| p.is_file()),
            mod_icon: Some(about_dir.join(MOD_ICON_FILE)).filter(|p| p.is_file()),
            ..PackMeta::default()
        }
    })
}
