//! Error handling for MEF Builder
//!
//! Validation errors are raised before anything touches the disk; import and
//! I/O errors carry the path that failed.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for MEF Builder operations
pub type Result<T> = std::result::Result<T, MefError>;

/// Main error type for MEF Builder operations
#[derive(Error, Debug)]
pub enum MefError {
    // File Errors
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Validation Errors
    #[error("Mod name is missing (complete the title after \"Music Expanded: \")")]
    MissingModName,

    #[error("Invalid package id '{package_id}': must start with \"musicexpanded.\" and include a suffix")]
    InvalidPackageId { package_id: String },

    #[error("No supported version selected")]
    NoSupportedVersions,

    #[error("Def '{label}' has no tracks")]
    EmptyDef { label: String },

    #[error("cueData is required for Custom cues")]
    EmptyCueData,

    #[error("Icon required for: {}", defs.join(", "))]
    MissingIcon { defs: Vec<String> },

    #[error("Unknown cue: {name}")]
    UnknownCue { name: String },

    #[error("Def name must not be empty")]
    EmptyDefName,

    #[error("A Def named '{name}' already exists")]
    DuplicateDef { name: String },

    // Lookup Errors
    #[error("Def not found: {name}")]
    DefNotFound { name: String },

    #[error("Track {index:03} not found")]
    TrackNotFound { index: u32 },

    #[error("No {cue} cue on this track to remove")]
    NoMatchingCue { cue: String },

    #[error("No .ogg files found in {path}")]
    NoAudioFiles { path: PathBuf },

    // Import Errors
    #[error("Not a MEF mod folder (missing {missing}/): {path}")]
    NotAModFolder { path: PathBuf, missing: &'static str },

    #[error("Missing document: {path}")]
    MissingDocument { path: PathBuf },

    #[error("Malformed XML in {document}: {source}")]
    XmlParse {
        document: String,
        #[source]
        source: roxmltree::Error,
    },

    #[error("{document} has no <{element}> element")]
    MissingElement {
        document: String,
        element: &'static str,
    },

    #[error("No valid Defs found under {path}")]
    NoValidDefs { path: PathBuf },

    // Export Errors
    #[error("Duplicate Def folder name would be created: {folder}")]
    NamingConflict { folder: String },

    #[error("Destination already exists: {path}")]
    DestinationExists { path: PathBuf },

    #[error("Destination {path} holds files the build reads from: {asset}")]
    DestinationHoldsSources { path: PathBuf, asset: PathBuf },

    #[error("No opened mod to overwrite")]
    NoOpenedMod,

    // Serialization Errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MefError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            MefError::FileNotFound { .. } => "FILE_NOT_FOUND",
            MefError::FileReadError { .. } => "FILE_READ_ERROR",
            MefError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            MefError::DirectoryCreateError { .. } => "DIRECTORY_CREATE_ERROR",
            MefError::MissingModName => "MISSING_MOD_NAME",
            MefError::InvalidPackageId { .. } => "INVALID_PACKAGE_ID",
            MefError::NoSupportedVersions => "NO_SUPPORTED_VERSIONS",
            MefError::EmptyDef { .. } => "EMPTY_DEF",
            MefError::EmptyCueData => "EMPTY_CUE_DATA",
            MefError::MissingIcon { .. } => "MISSING_ICON",
            MefError::UnknownCue { .. } => "UNKNOWN_CUE",
            MefError::EmptyDefName => "EMPTY_DEF_NAME",
            MefError::DuplicateDef { .. } => "DUPLICATE_DEF",
            MefError::DefNotFound { .. } => "DEF_NOT_FOUND",
            MefError::TrackNotFound { .. } => "TRACK_NOT_FOUND",
            MefError::NoMatchingCue { .. } => "NO_MATCHING_CUE",
            MefError::NoAudioFiles { .. } => "NO_AUDIO_FILES",
            MefError::NotAModFolder { .. } => "NOT_A_MOD_FOLDER",
            MefError::MissingDocument { .. } => "MISSING_DOCUMENT",
            MefError::XmlParse { .. } => "XML_PARSE_ERROR",
            MefError::MissingElement { .. } => "MISSING_ELEMENT",
            MefError::NoValidDefs { .. } => "NO_VALID_DEFS",
            MefError::NamingConflict { .. } => "NAMING_CONFLICT",
            MefError::DestinationExists { .. } => "DESTINATION_EXISTS",
            MefError::DestinationHoldsSources { .. } => "DESTINATION_HOLDS_SOURCES",
            MefError::NoOpenedMod => "NO_OPENED_MOD",
            MefError::Json(_) => "JSON_ERROR",
        }
    }

    /// Returns true for errors reported before any output is written.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MefError::MissingModName
                | MefError::InvalidPackageId { .. }
                | MefError::NoSupportedVersions
                | MefError::EmptyDef { .. }
                | MefError::EmptyCueData
                | MefError::MissingIcon { .. }
                | MefError::UnknownCue { .. }
                | MefError::EmptyDefName
                | MefError::DuplicateDef { .. }
                | MefError::NamingConflict { .. }
                | MefError::DestinationHoldsSources { .. }
        )
    }

    /// Returns true if a bulk import can skip the offending Def and carry on.
    pub fn is_def_local(&self) -> bool {
        matches!(
            self,
            MefError::MissingDocument { .. }
                | MefError::XmlParse { .. }
                | MefError::MissingElement { .. }
                | MefError::FileReadError { .. }
        )
    }

    /// Returns a user-friendly recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            MefError::NotAModFolder { .. } => {
                Some("Point at the mod root, the folder that contains About/ and Defs/.")
            }
            MefError::NoValidDefs { .. } => {
                Some("Each Def needs Defs/<Something>/tracks.xml and theme.xml.")
            }
            MefError::InvalidPackageId { .. } => Some("Use an id such as 'musicexpanded.mygame'."),
            MefError::NoSupportedVersions => Some("List at least one supported version (1.3 to 2.0) in the config."),
            MefError::EmptyDef { .. } => Some("Add tracks to the Def or remove it."),
            MefError::MissingIcon { .. } => {
                Some("Give each Def an icon or set a mod icon for the whole pack.")
            }
            MefError::NamingConflict { .. } => Some("Rename one of the Defs."),
            MefError::DestinationExists { .. } => {
                Some("Choose another output name or pass --force to replace it.")
            }
            MefError::DestinationHoldsSources { .. } => {
                Some("Build into another folder; replacing this one would delete the mod being built.")
            }
            MefError::NoOpenedMod => Some("Open a mod folder before overwriting."),
            MefError::EmptyCueData => Some("Pass --cue-data with the custom trigger name."),
            _ => None,
        }
    }
}
