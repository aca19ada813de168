//! Builder configuration
//!
//! Defaults applied to packs created from scratch. Read from a JSON file
//! given on the command line, else from `$MEF_BUILDER_CONFIG`, else the
//! built-in values. Keys missing from the file keep their default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{MefError, Result};
use crate::model::pack::MOD_NAME_STEM;
use crate::model::PackMeta;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "MEF_BUILDER_CONFIG";

/// Defaults for new packs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub author: String,
    /// Package id used when none is given; must be completed per pack.
    pub package_id: String,
    pub supported_versions: Vec<String>,
    pub load_after: Vec<String>,
    pub about_description: String,
    /// Folder built mods are written to.
    pub output_root: PathBuf,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            author: String::new(),
            package_id: "musicexpanded.".to_string(),
            supported_versions: vec!["1.6".to_string(), "2.0".to_string()],
            load_after: vec![
                "musicexpanded.framework".to_string(),
                "VanillaExpanded.VEE".to_string(),
            ],
            about_description: "Put your About description here (wrapped in CDATA).".to_string(),
            output_root: PathBuf::from("out"),
        }
    }
}

impl BuilderConfig {
    /// Load a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| MefError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: BuilderConfig = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `explicit`, else `$MEF_BUILDER_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load(Path::new(path.trim())),
            _ => Ok(Self::default()),
        }
    }

    /// Metadata for a new pack about `game`.
    pub fn pack_meta(&self, game: &str, package_id: Option<&str>) -> PackMeta {
        PackMeta {
            name: format!("{} {}", MOD_NAME_STEM, game.trim()),
            description: self.about_description.clone(),
            author: self.author.clone(),
            package_id: package_id.unwrap_or(self.package_id.as_str()).trim().to_string(),
            supported_versions: self.supported_versions.clone(),
            load_after: self.load_after.clone(),
            preview: None,
            mod_icon: None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.supported_versions, ["1.6", "2.0"]);
        assert_eq!(config.load_after, ["musicexpanded.framework", "VanillaExpanded.VEE"]);
        assert_eq!(config.output_root, PathBuf::from("out"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "author": "someone", "supported_versions": ["1.5"] }"#).unwrap();

        let config = BuilderConfig::load(&path).unwrap();
        assert_eq!(config.author, "someone");
        assert_eq!(config.supported_versions, ["1.5"]);
        assert_eq!(config.output_root, PathBuf::from("out"));
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, BuilderConfig::default().to_json().unwrap()).unwrap();
        assert_eq!(BuilderConfig::resolve(Some(path.as_path())).unwrap(), BuilderConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(BuilderConfig::load(&path), Err(MefError::Json(_))));
    }

    #[test]
    fn test_pack_meta() {
        let config = BuilderConfig {
            author: "someone".to_string(),
            ..BuilderConfig::default()
        };
        let meta = config.pack_meta(" Halo ", Some("musicexpanded.halo"));
        assert_eq!(meta.name, "Music Expanded: Halo");
        assert_eq!(meta.author, "someone");
        assert_eq!(meta.package_id, "musicexpanded.halo");
        assert!(meta.validate().is_ok());
    }
}
