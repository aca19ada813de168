//! Def data model
//!
//! A [`ProjectDef`] is one game's music pack entry. It owns its tracks, each
//! track owns its cue uses.

use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use walkdir::WalkDir;

use super::cue::{Cue, TrackUse};
use super::sanitize::{infer_game_code, infer_title_from_filename, sanitize_component, sanitize_simple};
use crate::error::{MefError, Result};

/// Namespace segment every clip path starts with.
pub const CLIP_NAMESPACE: &str = "MusicExpanded";

/// Separator between label prefix and title.
pub const LABEL_SEPARATOR: &str = " – ";

/// Content folder used when a game label has no usable characters.
pub const FALLBACK_CONTENT_FOLDER: &str = "Game";

/// Extension of registered audio files.
pub const AUDIO_EXTENSION: &str = "ogg";

/// One audio source in a Def.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Ordering number shown as the `NNN.` prefix of generated paths.
    pub index: u32,

    /// Where the audio file lives on disk.
    pub source_path: PathBuf,

    /// Right-hand side of the generated label.
    pub display_title: String,

    /// Path-safe title used in clip paths and file names.
    pub file_title: String,

    /// Cue assignments, never empty.
    #[serde(default = "default_uses", deserialize_with = "uses_or_ambient")]
    uses: Vec<TrackUse>,
}

fn default_uses() -> Vec<TrackUse> {
    vec![TrackUse::ambient()]
}

/// An empty `uses` list reads back as the default Ambient use.
fn uses_or_ambient<'de, D>(deserializer: D) -> std::result::Result<Vec<TrackUse>, D::Error>
where
    D: Deserializer<'de>,
{
    let uses = Vec::<TrackUse>::deserialize(deserializer)?;
    Ok(if uses.is_empty() { default_uses() } else { uses })
}

impl Track {
    /// Create a track with the default Ambient use.
    pub fn new(index: u32, source_path: impl Into<PathBuf>, display_title: &str, file_title: &str) -> Self {
        Self {
            index,
            source_path: source_path.into(),
            display_title: display_title.to_string(),
            file_title: file_title.to_string(),
            uses: default_uses(),
        }
    }

    /// Register an audio file, inferring its titles from the file name.
    pub fn from_audio_file(index: u32, path: &Path, game_label: &str, content_folder: &str) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let display = infer_title_from_filename(&filename, game_label, content_folder);
        let file_title = sanitize_component(&display);
        Self::new(index, path, &display, &file_title)
    }

    pub fn uses(&self) -> &[TrackUse] {
        &self.uses
    }

    /// Replace every use. An empty list restores the default Ambient use.
    pub fn set_uses(&mut self, uses: Vec<TrackUse>) {
        self.uses = uses;
        if self.uses.is_empty() {
            self.uses.push(TrackUse::ambient());
        }
    }

    /// Apply a cue assignment.
    ///
    /// With `replace_ambient`, a track whose only use is the default Ambient
    /// one gets that use swapped for a non-Ambient `new_use`. Otherwise the
    /// first use in the same slot is replaced, or `new_use` is appended.
    pub fn apply_use(&mut self, new_use: TrackUse, replace_ambient: bool) -> Result<()> {
        if matches!(new_use.cue.custom_data(), Some(data) if data.trim().is_empty()) {
            return Err(MefError::EmptyCueData);
        }

        if replace_ambient
            && self.uses.len() == 1
            && self.uses[0].cue.is_ambient()
            && !new_use.cue.is_ambient()
        {
            self.uses[0] = new_use;
            return Ok(());
        }

        match self.uses.iter().position(|u| u.cue.same_slot(&new_use.cue)) {
            Some(i) => self.uses[i] = new_use,
            None => self.uses.push(new_use),
        }
        Ok(())
    }

    /// Remove the first use in the same slot as `cue`.
    pub fn remove_use(&mut self, cue: &Cue) -> Result<TrackUse> {
        let i = self
            .uses
            .iter()
            .position(|u| u.cue.same_slot(cue))
            .ok_or_else(|| MefError::NoMatchingCue {
                cue: cue.to_string(),
            })?;
        let removed = self.uses.remove(i);
        if self.uses.is_empty() {
            self.uses.push(TrackUse::ambient());
        }
        Ok(removed)
    }

    /// Summary of all uses, e.g. `"Ambient, BattleSmall"`.
    pub fn uses_summary(&self) -> String {
        self.uses
            .iter()
            .map(|u| u.cue.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One game's music pack entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDef {
    /// Display name of the game.
    pub label_game: String,

    /// Short uppercase code used in generated defNames.
    pub game_code: String,

    /// Folder holding this Def's audio, referenced by every clip path.
    pub content_folder: String,

    /// Icon name under `UI/Icons/`.
    pub icon_base: String,

    /// Image copied to the icon location on build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_source: Option<PathBuf>,

    /// Left-hand side of generated labels; empty means no prefix.
    pub label_prefix: String,

    /// Theme description text.
    pub theme_description: String,

    /// Tracks in playlist order.
    pub tracks: Vec<Track>,

    /// Folder this Def was imported from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_dir: Option<PathBuf>,
}

impl ProjectDef {
    /// Create an empty Def with every derived field filled from `label_game`.
    pub fn new(label_game: &str) -> Self {
        let label_game = label_game.trim().to_string();
        let content_folder = default_content_folder(&label_game);
        Self {
            game_code: infer_game_code(&label_game),
            icon_base: content_folder.clone(),
            content_folder,
            icon_source: None,
            label_prefix: label_game.clone(),
            theme_description: default_theme_description(&label_game),
            tracks: Vec::new(),
            source_dir: None,
            label_game,
        }
    }

    /// Rename the Def, filling any derived field that is still empty.
    pub fn rename(&mut self, label_game: &str) -> Result<()> {
        let label_game = label_game.trim();
        if label_game.is_empty() {
            return Err(MefError::EmptyDefName);
        }
        self.label_game = label_game.to_string();
        if self.game_code.is_empty() {
            self.game_code = infer_game_code(label_game);
        }
        if self.content_folder.is_empty() {
            self.content_folder = default_content_folder(label_game);
        }
        if self.icon_base.is_empty() {
            self.icon_base = self.content_folder.clone();
        }
        if self.label_prefix.is_empty() {
            self.label_prefix = self.label_game.clone();
        }
        Ok(())
    }

    /// Number used for the next registered track.
    pub fn next_index(&self) -> u32 {
        self.tracks.iter().map(|t| t.index).max().unwrap_or(0) + 1
    }

    /// Register audio files in the given order. Returns how many were added.
    pub fn add_track_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> usize {
        let start = self.next_index();
        for (offset, path) in paths.iter().enumerate() {
            let track = Track::from_audio_file(
                start + offset as u32,
                path.as_ref(),
                &self.label_game,
                &self.content_folder,
            );
            debug!("Registered track {:03}: {}", track.index, track.display_title);
            self.tracks.push(track);
        }
        paths.len()
    }

    /// Recursively register every `.ogg` under `dir`, sorted by path.
    pub fn add_tracks_from_folder(&mut self, dir: &Path) -> Result<usize> {
        if !dir.is_dir() {
            return Err(MefError::FileNotFound {
                path: dir.to_path_buf(),
            });
        }

        let mut files: Vec<PathBuf> = WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case(AUDIO_EXTENSION))
                    .unwrap_or(false)
            })
            .map(|entry| entry.into_path())
            .collect();

        if files.is_empty() {
            return Err(MefError::NoAudioFiles {
                path: dir.to_path_buf(),
            });
        }

        files.sort_by_key(|p| p.to_string_lossy().replace('\\', "/").to_lowercase());
        Ok(self.add_track_files(&files))
    }

    pub fn track_mut(&mut self, index: u32) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.index == index)
    }

    /// Remove the first track carrying `index`.
    pub fn remove_track(&mut self, index: u32) -> Result<Track> {
        let i = self
            .tracks
            .iter()
            .position(|t| t.index == index)
            .ok_or(MefError::TrackNotFound { index })?;
        Ok(self.tracks.remove(i))
    }

    /// Label written for `track`: `"<prefix> – <title>"`, or just the title
    /// when there is no prefix.
    pub fn compose_label(&self, track: &Track) -> String {
        let right = match track.display_title.trim() {
            "" => track.file_title.as_str(),
            title => title,
        };
        match self.label_prefix.trim() {
            "" => right.to_string(),
            prefix => format!("{}{}{}", prefix, LABEL_SEPARATOR, right),
        }
    }

    /// Clip path the framework resolves to `track`'s audio asset.
    pub fn clip_path(&self, track: &Track) -> String {
        format!(
            "{}/{}/{}",
            CLIP_NAMESPACE,
            self.content_folder,
            indexed_name(track)
        )
    }

    /// Total number of (track, use) pairs.
    pub fn use_count(&self) -> usize {
        self.tracks.iter().map(|t| t.uses().len()).sum()
    }
}

/// `"<NNN>. <file title>"`, shared by clip paths and copied audio files.
pub fn indexed_name(track: &Track) -> String {
    format!("{:03}. {}", track.index, track.file_title)
}

/// Theme description given to new Defs.
pub fn default_theme_description(label_game: &str) -> String {
    format!("{} music integrated via the Music Expanded Framework.", label_game)
}

fn default_content_folder(label_game: &str) -> String {
    match sanitize_simple(label_game) {
        folder if folder.is_empty() => FALLBACK_CONTENT_FOLDER.to_string(),
        folder => folder,
    }
}
