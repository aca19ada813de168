//! Mod folder layout
//!
//! ```text
//! <mod>/
//!   About/About.xml, Preview.png, modicon.png
//!   Defs/<Def>/tracks.xml, theme.xml
//!   Sounds/MusicExpanded/<content folder>/<NNN. title>.ogg
//!   Textures/UI/Icons/<icon>.png
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MefError, Result};
use crate::model::project::CLIP_NAMESPACE;

pub const ABOUT_DIR: &str = "About";
pub const DEFS_DIR: &str = "Defs";
pub const SOUNDS_DIR: &str = "Sounds";
pub const TEXTURES_DIR: &str = "Textures";

/// Defs subfolder holding XML patches rather than a music Def.
pub const PATCHES_DIR: &str = "Patches";

/// Paths inside one mod folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackLayout {
    root: PathBuf,
}

impl PackLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn about_dir(&self) -> PathBuf {
        self.root.join(ABOUT_DIR)
    }

    pub fn defs_dir(&self) -> PathBuf {
        self.root.join(DEFS_DIR)
    }

    pub fn def_dir(&self, folder: &str) -> PathBuf {
        self.defs_dir().join(folder)
    }

    /// `Sounds/`; clip paths resolve below it.
    pub fn sounds_dir(&self) -> PathBuf {
        self.root.join(SOUNDS_DIR)
    }

    /// Audio folder of one content folder.
    pub fn content_dir(&self, content_folder: &str) -> PathBuf {
        self.sounds_dir().join(CLIP_NAMESPACE).join(content_folder)
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.root.join(TEXTURES_DIR).join("UI").join("Icons")
    }

    /// Check the folders every mod has. Reports the first one missing.
    pub fn check(&self) -> Result<()> {
        for (dir, name) in [(self.about_dir(), ABOUT_DIR), (self.defs_dir(), DEFS_DIR)] {
            if !dir.is_dir() {
                return Err(MefError::NotAModFolder {
                    path: self.root.clone(),
                    missing: name,
                });
            }
        }
        Ok(())
    }
}

/// Whether a Defs subfolder is the patches folder, ignoring case.
pub fn is_patches_dir(name: &str) -> bool {
    name.eq_ignore_ascii_case(PATCHES_DIR)
}

pub(crate) fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| MefError::DirectoryCreateError {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn write_text(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|e| MefError::FileWriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_layout_paths() {
        let layout = PackLayout::new("/mods/Halo");
        assert_eq!(layout.def_dir("Halo"), PathBuf::from("/mods/Halo/Defs/Halo"));
        assert_eq!(
            layout.content_dir("Halo"),
            PathBuf::from("/mods/Halo/Sounds/MusicExpanded/Halo")
        );
        assert_eq!(layout.icons_dir(), PathBuf::from("/mods/Halo/Textures/UI/Icons"));
    }

    #[test]
    fn test_check_reports_missing_folder() {
        let dir = tempdir().unwrap();
        let layout = PackLayout::new(dir.path());
        assert!(matches!(
            layout.check(),
            Err(MefError::NotAModFolder { missing: "About", .. })
        ));

        fs::create_dir_all(layout.about_dir()).unwrap();
        assert!(matches!(
            layout.check(),
            Err(MefError::NotAModFolder { missing: "Defs", .. })
        ));

        fs::create_dir_all(layout.defs_dir()).unwrap();
        assert!(layout.check().is_ok());
    }

    #[test]
    fn test_is_patches_dir() {
        assert!(is_patches_dir("Patches"));
        assert!(is_patches_dir("patches"));
        assert!(!is_patches_dir("Patchwork"));
    }
}
