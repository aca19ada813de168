//! Document import
//!
//! Rebuilds a [`ProjectDef`] from the two documents an export wrote. Track
//! definitions that point at the same clip collapse into one track with
//! several uses, repeated uses are dropped, and tracks come back sorted by
//! their clip index.

pub mod about;
pub mod theme;
pub mod tracks;
mod xml;

pub use about::{parse_about, read_about, ABOUT_FILE, MOD_ICON_FILE, PREVIEW_FILE};
pub use theme::{parse_theme, ThemeRecord};
pub use tracks::{parse_track_defs, TrackDefEntry};

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, warn};
use regex::Regex;

use crate::error::{MefError, Result};
use crate::export::{THEME_FILE, TRACKS_FILE};
use crate::model::sanitize::sanitize_component;
use crate::model::{default_theme_description, ProjectDef, Track, TrackUse};
use crate::model::project::AUDIO_EXTENSION;

static CLIP_PATTERN: OnceLock<Regex> = OnceLock::new();
static LABEL_SEPARATOR_PATTERN: OnceLock<Regex> = OnceLock::new();
static DEF_NAME_ORDINAL: OnceLock<Regex> = OnceLock::new();

fn clip_pattern() -> &'static Regex {
    CLIP_PATTERN.get_or_init(|| {
        Regex::new(r"^\s*MusicExpanded/([^/]+)/(\d{3})\.\s*(.+?)\s*$").expect("invalid regex pattern")
    })
}

fn label_separator() -> &'static Regex {
    LABEL_SEPARATOR_PATTERN.get_or_init(|| Regex::new(r"\s+[-–—]\s+").expect("invalid regex pattern"))
}

fn def_name_ordinal() -> &'static Regex {
    DEF_NAME_ORDINAL.get_or_init(|| Regex::new(r"^ME_[A-Z0-9]+_(\d+)$").expect("invalid regex pattern"))
}

/// Where a Def's assets live relative to the documents being read.
#[derive(Debug, Clone, Default)]
pub struct ImportContext {
    /// Name used when the theme label is missing, usually the Def folder.
    pub fallback_label: String,
    /// `Sounds/` of the mod; clip paths resolve below it.
    pub sounds_root: Option<PathBuf>,
    /// `Textures/UI/Icons/` of the mod.
    pub icons_root: Option<PathBuf>,
}

/// Split a label at its first dash-like separator.
///
/// Returns `(prefix, title)`; the prefix is `None` when there is no
/// separator or nothing before it.
pub fn split_label(label: &str) -> (Option<&str>, &str) {
    let label = label.trim();
    let mut parts = label_separator().splitn(label, 2);
    match (parts.next(), parts.next()) {
        (Some(left), Some(right)) => {
            let left = left.trim();
            (Some(left).filter(|l| !l.is_empty()), right.trim())
        }
        _ => (None, label),
    }
}

/// What a clip path says about its track.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ClipInfo {
    content_folder: Option<String>,
    index: Option<u32>,
    file_title: String,
}

fn parse_clip(clip: &str) -> ClipInfo {
    match clip_pattern().captures(clip) {
        Some(caps) => ClipInfo {
            content_folder: Some(caps[1].to_string()),
            index: caps[2].parse().ok(),
            file_title: sanitize_component(&caps[3]),
        },
        None => ClipInfo {
            content_folder: None,
            index: None,
            file_title: sanitize_component(clip.rsplit('/').next().unwrap_or_default()),
        },
    }
}

/// Tracks under construction, keyed by clip in first-seen order.
struct TrackGroup {
    key: String,
    clip_path: String,
    index: Option<u32>,
    file_title: String,
    display_title: String,
    uses: Vec<TrackUse>,
}

/// Rebuild a Def from parsed documents.
pub fn assemble_def(theme: ThemeRecord, mut entries: Vec<TrackDefEntry>, ctx: &ImportContext) -> ProjectDef {
    // Content folder and label prefix follow document order.
    let mut prefix_votes: Vec<(String, usize)> = Vec::new();
    let mut content_folder: Option<String> = None;
    for entry in &entries {
        if content_folder.is_none() {
            content_folder = parse_clip(&entry.clip_path).content_folder;
        }
        if let (Some(prefix), _) = split_label(&entry.label) {
            match prefix_votes.iter_mut().find(|(p, _)| p.as_str() == prefix) {
                Some((_, count)) => *count += 1,
                None => prefix_votes.push((prefix.to_string(), 1)),
            }
        }
    }

    // Track-definition documents are grouped by section; generation order
    // is recovered from the defName counter when every entry carries one.
    let ordinals: Option<Vec<u64>> = entries
        .iter()
        .map(|e| {
            def_name_ordinal()
                .captures(&e.def_name)
                .and_then(|caps| caps[1].parse().ok())
        })
        .collect();
    if let Some(ordinals) = ordinals {
        let mut keyed: Vec<(u64, TrackDefEntry)> = ordinals.into_iter().zip(entries).collect();
        keyed.sort_by_key(|(ordinal, _)| *ordinal);
        entries = keyed.into_iter().map(|(_, entry)| entry).collect();
    }

    let known: HashSet<&str> = entries.iter().map(|e| e.def_name.as_str()).collect();
    for missing in theme.track_refs.iter().filter(|r| !known.contains(r.as_str())) {
        warn!("Theme lists {} but no track definition has that defName", missing);
    }

    let mut groups: Vec<TrackGroup> = Vec::new();

    for entry in entries {
        let clip = parse_clip(&entry.clip_path);
        let (_, title) = split_label(&entry.label);

        let file_title = if clip.file_title.is_empty() {
            sanitize_component(title)
        } else {
            clip.file_title
        };

        let key = if entry.clip_path.is_empty() {
            file_title.clone()
        } else {
            entry.clip_path.clone()
        };
        let use_ = TrackUse::new(entry.cue, &entry.allowed_biomes);

        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.uses.push(use_),
            None => groups.push(TrackGroup {
                key,
                clip_path: entry.clip_path,
                index: clip.index,
                display_title: if title.is_empty() { file_title.clone() } else { title.to_string() },
                file_title,
                uses: vec![use_],
            }),
        }
    }

    let game_label = theme
        .game_label
        .unwrap_or_else(|| ctx.fallback_label.clone());
    let mut def = ProjectDef::new(&game_label);
    if let Some(code) = theme.game_code {
        def.game_code = code;
    }
    if let Some(folder) = content_folder {
        def.content_folder = folder;
    }
    def.icon_base = theme.icon_base.unwrap_or_else(|| def.content_folder.clone());
    def.icon_source = ctx
        .icons_root
        .as_ref()
        .map(|root| root.join(format!("{}.png", def.icon_base)))
        .filter(|path| path.is_file());
    def.theme_description = theme
        .description
        .unwrap_or_else(|| default_theme_description(&def.label_game));

    // Majority vote; the first candidate seen wins a tie.
    let mut best: Option<(String, usize)> = None;
    for (prefix, count) in prefix_votes {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((prefix, count));
        }
    }
    def.label_prefix = best.map(|(prefix, _)| prefix).unwrap_or_default();

    groups.sort_by(|a, b| {
        (a.index.is_none(), a.index, &a.file_title).cmp(&(b.index.is_none(), b.index, &b.file_title))
    });

    for (position, group) in groups.into_iter().enumerate() {
        let index = group.index.unwrap_or(position as u32 + 1);
        let source_path = match &ctx.sounds_root {
            Some(root) if !group.clip_path.is_empty() => {
                root.join(format!("{}.{}", group.clip_path, AUDIO_EXTENSION))
            }
            _ => PathBuf::from(format!("{}.{}", group.file_title, AUDIO_EXTENSION)),
        };

        let mut seen = HashSet::new();
        let uses: Vec<TrackUse> = group
            .uses
            .into_iter()
            .filter(|u| seen.insert(u.dedup_key()))
            .collect();

        let mut track = Track::new(index, source_path, &group.display_title, &group.file_title);
        track.set_uses(uses);
        def.tracks.push(track);
    }

    debug!(
        "Imported '{}': {} tracks, {} uses",
        def.label_game,
        def.tracks.len(),
        def.use_count()
    );
    def
}

/// Rebuild a Def from the text of its two documents.
pub fn parse_def_documents(theme_xml: &str, tracks_xml: &str, ctx: &ImportContext) -> Result<ProjectDef> {
    let theme = parse_theme(theme_xml, THEME_FILE)?;
    let entries = parse_track_defs(tracks_xml, TRACKS_FILE)?;
    Ok(assemble_def(theme, entries, ctx))
}

/// Import the Def stored in `def_dir`.
///
/// Missing icon and sound roots in `ctx` are fine; the folder name is used
/// as the label when the theme has none.
pub fn import_def_folder(def_dir: &Path, ctx: &ImportContext) -> Result<ProjectDef> {
    let theme_path = def_dir.join(THEME_FILE);
    let tracks_path = def_dir.join(TRACKS_FILE);
    let theme_xml = read_document(&theme_path)?;
    let tracks_xml = read_document(&tracks_path)?;

    let theme = parse_theme(&theme_xml, &theme_path.display().to_string())?;
    let entries = parse_track_defs(&tracks_xml, &tracks_path.display().to_string())?;

    let mut ctx = ctx.clone();
    if ctx.fallback_label.is_empty() {
        ctx.fallback_label = def_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
    }

    let mut def = assemble_def(theme, entries, &ctx);
    def.source_dir = Some(def_dir.to_path_buf());
    Ok(def)
}

fn read_document(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(MefError::MissingDocument {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|e| MefError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cue;
    use tempfile::tempdir;

    fn entry(def_name: &str, label: &str, clip: &str, cue: Cue, biomes: &[&str]) -> TrackDefEntry {
        TrackDefEntry {
            def_name: def_name.to_string(),
            label: label.to_string(),
            clip_path: clip.to_string(),
            cue,
            allowed_biomes: biomes.iter().map(|b| b.to_string()).collect(),
        }
    }

    fn theme() -> ThemeRecord {
        ThemeRecord {
            game_label: Some("Halo".to_string()),
            game_code: Some("HLO".to_string()),
            ..ThemeRecord::default()
        }
    }

    #[test]
    fn test_split_label() {
        assert_eq!(split_label("Halo – Opening"), (Some("Halo"), "Opening"));
        assert_eq!(split_label("Halo - Part - Two"), (Some("Halo"), "Part - Two"));
        assert_eq!(split_label("Halo — Finale "), (Some("Halo"), "Finale"));
        assert_eq!(split_label("Half-Life"), (None, "Half-Life"));
        assert_eq!(split_label(" Opening "), (None, "Opening"));
    }

    #[test]
    fn test_parse_clip() {
        let info = parse_clip("MusicExpanded/Halo/012. Opening Suite");
        assert_eq!(info.content_folder.as_deref(), Some("Halo"));
        assert_eq!(info.index, Some(12));
        assert_eq!(info.file_title, "Opening Suite");

        let other = parse_clip("Music/Elsewhere/Opening");
        assert_eq!(other.content_folder, None);
        assert_eq!(other.index, None);
        assert_eq!(other.file_title, "Opening");
    }

    #[test]
    fn test_shared_clip_becomes_one_track() {
        let clip = "MusicExpanded/Halo/001. Opening";
        let entries = vec![
            entry("ME_HLO_001", "Halo – Opening", clip, Cue::Ambient, &[]),
            entry("ME_HLO_002", "Halo – Opening", clip, Cue::BattleLarge, &["Desert"]),
        ];
        let def = assemble_def(theme(), entries, &ImportContext::default());
        assert_eq!(def.tracks.len(), 1);
        assert_eq!(def.tracks[0].uses_summary(), "Ambient, BattleLarge");
        assert_eq!(def.tracks[0].uses()[1].allowed_biomes(), ["Desert"]);
        assert_eq!(def.game_code, "HLO");
        assert_eq!(def.content_folder, "Halo");
        assert_eq!(def.label_prefix, "Halo");
    }

    #[test]
    fn test_duplicate_uses_are_dropped() {
        let clip = "MusicExpanded/Halo/001. Opening";
        let entries = vec![
            entry("ME_HLO_001", "Halo – Opening", clip, Cue::Credits, &["Desert", "Tundra"]),
            entry("ME_HLO_002", "Halo – Opening", clip, Cue::Credits, &["Tundra", "Desert"]),
            entry("ME_HLO_003", "Halo – Opening", clip, Cue::Credits, &[]),
        ];
        let def = assemble_def(theme(), entries, &ImportContext::default());
        let uses = def.tracks[0].uses();
        assert_eq!(uses.len(), 2);
        assert_eq!(uses[0].allowed_biomes(), ["Desert", "Tundra"]);
        assert!(uses[1].allowed_biomes().is_empty());
    }

    #[test]
    fn test_generation_order_restored_from_def_names() {
        let clip = "MusicExpanded/Halo/001. Opening";
        let entries = vec![
            entry("ME_HLO_002", "Halo – Opening", clip, Cue::Ambient, &[]),
            entry("ME_HLO_001", "Halo – Opening", clip, Cue::BattleSmall, &[]),
        ];
        let def = assemble_def(theme(), entries, &ImportContext::default());
        assert_eq!(def.tracks[0].uses_summary(), "BattleSmall, Ambient");
    }

    #[test]
    fn test_folder_and_prefix_follow_document_order() {
        let entries = vec![
            entry("ME_X_002", "Beta – One", "MusicExpanded/Other/001. One", Cue::Ambient, &[]),
            entry("ME_X_001", "Alpha – Two", "MusicExpanded/Xfolder/002. Two", Cue::Ambient, &[]),
        ];
        let def = assemble_def(theme(), entries, &ImportContext::default());
        assert_eq!(def.label_prefix, "Beta");
        assert_eq!(def.content_folder, "Other");
        let titles: Vec<&str> = def.tracks.iter().map(|t| t.display_title.as_str()).collect();
        assert_eq!(titles, ["One", "Two"]);
    }

    #[test]
    fn test_tracks_sorted_with_missing_index_last() {
        let entries = vec![
            entry("X", "Halo – Zulu", "Loose/Zulu", Cue::Ambient, &[]),
            entry("Y", "Halo – Beta", "MusicExpanded/Halo/002. Beta", Cue::Ambient, &[]),
            entry("Z", "Halo – Alpha", "Loose/Alpha", Cue::Ambient, &[]),
            entry("W", "Halo – Gamma", "MusicExpanded/Halo/001. Gamma", Cue::Ambient, &[]),
        ];
        let def = assemble_def(theme(), entries, &ImportContext::default());
        let order: Vec<(u32, &str)> = def
            .tracks
            .iter()
            .map(|t| (t.index, t.file_title.as_str()))
            .collect();
        assert_eq!(order, [(1, "Gamma"), (2, "Beta"), (3, "Alpha"), (4, "Zulu")]);
    }

    #[test]
    fn test_prefix_majority_with_first_seen_tie_break() {
        let entries = vec![
            entry("A", "Halo 2 – One", "MusicExpanded/Halo/001. One", Cue::Ambient, &[]),
            entry("B", "Halo – Two", "MusicExpanded/Halo/002. Two", Cue::Ambient, &[]),
            entry("C", "Halo – Three", "MusicExpanded/Halo/003. Three", Cue::Ambient, &[]),
            entry("D", "Halo 2 – Four", "MusicExpanded/Halo/004. Four", Cue::Ambient, &[]),
        ];
        let def = assemble_def(theme(), entries, &ImportContext::default());
        assert_eq!(def.label_prefix, "Halo 2");
    }

    #[test]
    fn test_no_prefix_candidates_leaves_prefix_empty() {
        let entries = vec![entry("A", "Opening", "MusicExpanded/Halo/001. Opening", Cue::Ambient, &[])];
        let def = assemble_def(theme(), entries, &ImportContext::default());
        assert_eq!(def.label_prefix, "");
        assert_eq!(def.compose_label(&def.tracks[0]), "Opening");
    }

    #[test]
    fn test_fallbacks_when_theme_is_sparse() {
        let entries = vec![entry("A", "", "", Cue::Ambient, &[])];
        let ctx = ImportContext {
            fallback_label: "Doom Eternal".to_string(),
            ..ImportContext::default()
        };
        let def = assemble_def(ThemeRecord::default(), entries, &ctx);
        assert_eq!(def.label_game, "Doom Eternal");
        assert_eq!(def.game_code, "DE");
        assert_eq!(def.content_folder, "DoomEternal");
        assert_eq!(def.icon_base, "DoomEternal");
        assert_eq!(
            def.theme_description,
            "Doom Eternal music integrated via the Music Expanded Framework."
        );
        assert_eq!(def.tracks[0].index, 1);
    }

    #[test]
    fn test_import_def_folder_resolves_assets() {
        let dir = tempdir().unwrap();
        let def_dir = dir.path().join("Defs").join("Halo");
        let icons = dir.path().join("Textures").join("UI").join("Icons");
        fs::create_dir_all(&def_dir).unwrap();
        fs::create_dir_all(&icons).unwrap();
        fs::write(icons.join("Halo.png"), b"png").unwrap();

        let mut source = ProjectDef::new("Halo");
        source.tracks.push(Track::new(1, "a.ogg", "Opening", "Opening"));
        let docs = crate::export::export_def(&source);
        fs::write(def_dir.join(THEME_FILE), &docs.theme_xml).unwrap();
        fs::write(def_dir.join(TRACKS_FILE), &docs.tracks_xml).unwrap();

        let ctx = ImportContext {
            sounds_root: Some(dir.path().join("Sounds")),
            icons_root: Some(icons.clone()),
            ..ImportContext::default()
        };
        let def = import_def_folder(&def_dir, &ctx).unwrap();
        assert_eq!(def.source_dir.as_deref(), Some(def_dir.as_path()));
        assert_eq!(def.icon_source, Some(icons.join("Halo.png")));
        assert_eq!(
            def.tracks[0].source_path,
            dir.path().join("Sounds").join("MusicExpanded/Halo/001. Opening.ogg")
        );
    }

    #[test]
    fn test_import_def_folder_missing_document() {
        let dir = tempdir().unwrap();
        let err = import_def_folder(dir.path(), &ImportContext::default()).unwrap_err();
        assert!(matches!(err, MefError::MissingDocument { .. }));
        assert!(err.is_def_local());
    }
}
