//! Mod pack model
//!
//! A [`ModPack`] is the pack metadata plus the ordered list of Defs it ships.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::project::ProjectDef;
use super::sanitize::sanitize_simple;
use crate::error::{MefError, Result};

/// Stem every mod name starts with.
pub const MOD_NAME_STEM: &str = "Music Expanded:";

/// Required prefix of the package id.
pub const PACKAGE_ID_PREFIX: &str = "musicexpanded.";

/// Game versions a pack can declare support for.
pub const KNOWN_VERSIONS: &[&str] = &["1.3", "1.4", "1.5", "1.6", "1.7", "1.8", "1.9", "2.0"];

/// Pack metadata written to `About/About.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackMeta {
    pub name: String,
    pub description: String,
    pub author: String,
    pub package_id: String,
    pub supported_versions: Vec<String>,
    pub load_after: Vec<String>,

    /// Preview image copied to `About/Preview.png`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<PathBuf>,

    /// Mod icon copied to `About/modicon.png`; also the icon fallback for Defs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_icon: Option<PathBuf>,
}

impl PackMeta {
    /// Check the fields the framework needs before anything is written.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() || name == MOD_NAME_STEM {
            return Err(MefError::MissingModName);
        }

        let package_id = self.package_id.trim();
        if !package_id.starts_with(PACKAGE_ID_PREFIX) || package_id == PACKAGE_ID_PREFIX {
            return Err(MefError::InvalidPackageId {
                package_id: package_id.to_string(),
            });
        }

        if self.supported_versions.iter().all(|v| v.trim().is_empty()) {
            return Err(MefError::NoSupportedVersions);
        }

        Ok(())
    }

    /// Supported versions outside [`KNOWN_VERSIONS`].
    pub fn unknown_versions(&self) -> Vec<&str> {
        self.supported_versions
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty() && !KNOWN_VERSIONS.contains(v))
            .collect()
    }
}

/// Pack metadata plus the Defs it contains.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModPack {
    pub meta: PackMeta,
    pub defs: Vec<ProjectDef>,

    /// Mod root this pack was opened from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl ModPack {
    pub fn new(meta: PackMeta) -> Self {
        Self {
            meta,
            defs: Vec::new(),
            root: None,
        }
    }

    /// Add a new Def named `label_game`.
    ///
    /// Names must be non-empty and unique ignoring case.
    pub fn add_def(&mut self, label_game: &str) -> Result<&mut ProjectDef> {
        let name = label_game.trim();
        if name.is_empty() {
            return Err(MefError::EmptyDefName);
        }
        if self.position(name).is_some() {
            return Err(MefError::DuplicateDef {
                name: name.to_string(),
            });
        }
        self.defs.push(ProjectDef::new(name));
        let last = self.defs.len() - 1;
        Ok(&mut self.defs[last])
    }

    /// Rename the Def currently called `current`.
    pub fn rename_def(&mut self, current: &str, new_name: &str) -> Result<()> {
        let i = self.position(current).ok_or_else(|| MefError::DefNotFound {
            name: current.to_string(),
        })?;
        let clash = self
            .position(new_name.trim())
            .map(|other| other != i)
            .unwrap_or(false);
        if clash {
            return Err(MefError::DuplicateDef {
                name: new_name.trim().to_string(),
            });
        }
        self.defs[i].rename(new_name)
    }

    /// Remove and return the Def called `name`.
    pub fn remove_def(&mut self, name: &str) -> Result<ProjectDef> {
        let i = self.position(name).ok_or_else(|| MefError::DefNotFound {
            name: name.to_string(),
        })?;
        Ok(self.defs.remove(i))
    }

    pub fn def(&self, name: &str) -> Option<&ProjectDef> {
        self.position(name).map(|i| &self.defs[i])
    }

    pub fn def_mut(&mut self, name: &str) -> Option<&mut ProjectDef> {
        self.position(name).map(move |i| &mut self.defs[i])
    }

    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        self.defs
            .iter()
            .position(|d| d.label_game.trim().to_lowercase() == name)
    }

    /// Validate everything a fresh build needs.
    pub fn validate_for_build(&self) -> Result<()> {
        self.meta.validate()?;

        if self.defs.is_empty() {
            return Err(MefError::NoValidDefs {
                path: self.root.clone().unwrap_or_default(),
            });
        }

        if let Some(def) = self.defs.iter().find(|d| d.tracks.is_empty()) {
            return Err(MefError::EmptyDef {
                label: def.label_game.clone(),
            });
        }

        if self.meta.mod_icon.is_none() {
            let missing: Vec<String> = self
                .defs
                .iter()
                .filter(|d| d.icon_source.is_none())
                .map(|d| d.label_game.clone())
                .collect();
            if !missing.is_empty() {
                return Err(MefError::MissingIcon { defs: missing });
            }
        }

        Ok(())
    }
}

/// Folder name a Def is written to under `Defs/`.
pub fn def_folder_name(def: &ProjectDef) -> String {
    let simple = sanitize_simple(&def.label_game);
    if !simple.is_empty() {
        simple
    } else if !def.content_folder.is_empty() {
        def.content_folder.clone()
    } else {
        "Game".to_string()
    }
}
