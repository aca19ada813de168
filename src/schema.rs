//! Fixed XML vocabulary
//!
//! Tag names and literal strings dictated by the Music Expanded Framework.
//! Both the writers and the readers go through these.

pub const ROOT_DEFS: &str = "Defs";
pub const TRACK_DEF: &str = "MusicExpanded.TrackDef";
pub const THEME_DEF: &str = "MusicExpanded.ThemeDef";

pub const DEF_NAME: &str = "defName";
pub const LABEL: &str = "label";
pub const CLIP_PATH: &str = "clipPath";
pub const CUE: &str = "cue";
pub const CUE_DATA: &str = "cueData";
pub const TENSE: &str = "tense";
pub const ALLOWED_BIOMES: &str = "allowedBiomes";
pub const DESCRIPTION: &str = "description";
pub const ICON_PATH: &str = "iconPath";
pub const TRACKS: &str = "tracks";
pub const LIST_ITEM: &str = "li";

pub const MOD_METADATA: &str = "ModMetaData";
pub const NAME: &str = "name";
pub const AUTHOR: &str = "author";
pub const PACKAGE_ID: &str = "packageId";
pub const SUPPORTED_VERSIONS: &str = "supportedVersions";
pub const LOAD_AFTER: &str = "loadAfter";
pub const MOD_DEPENDENCIES: &str = "modDependenciesByVersion";

/// Prefix of every generated defName.
pub const DEF_NAME_PREFIX: &str = "ME_";

/// Prefix of the theme label, followed by the game label.
pub const THEME_LABEL_PREFIX: &str = "Music Expanded: ";

/// Icon folder referenced by `iconPath`.
pub const ICON_PATH_PREFIX: &str = "UI/Icons/";

/// Framework package id for game versions before 1.5.
pub const LEGACY_FRAMEWORK_ID: &str = "musicexpanded.framework";

/// Framework package id for game versions 1.5 and later.
pub const FRAMEWORK_ID: &str = "zal.mef";

pub const FRAMEWORK_DISPLAY_NAME: &str = "Music Expanded Framework";

pub const FRAMEWORK_DOWNLOAD_URL: &str =
    "https://github.com/Music-Expanded/music-expanded-framework/releases/latest";

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
