//! Document export
//!
//! Turns the in-memory model into the framework's XML documents. Each Def is
//! classified once and both of its documents are rendered from that single
//! pass, so the defNames the theme lists always match the track definitions.

pub mod about;
pub mod classify;
pub mod ids;
pub mod theme;
pub mod tracks;
pub mod xml;

pub use about::{build_about_xml, dependency_for_version, FrameworkDependency};
pub use classify::{classify_def, ClassifiedEntry, Section};
pub use ids::{theme_def_name, DefNameSequence};
pub use theme::build_theme_xml;
pub use tracks::build_tracks_xml;

use crate::model::ProjectDef;

/// File name of the track-definition document inside a Def folder.
pub const TRACKS_FILE: &str = "tracks.xml";

/// File name of the theme document inside a Def folder.
pub const THEME_FILE: &str = "theme.xml";

/// Both rendered documents of one Def.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefDocuments {
    pub tracks_xml: String,
    pub theme_xml: String,
}

/// Render both documents of `def`.
pub fn export_def(def: &ProjectDef) -> DefDocuments {
    let entries = classify_def(def);
    log::debug!(
        "Exporting '{}': {} track definitions",
        def.label_game,
        entries.len()
    );
    DefDocuments {
        tracks_xml: build_tracks_xml(&entries),
        theme_xml: build_theme_xml(def, &entries),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cue, Track, TrackUse};

    #[test]
    fn test_theme_lists_every_track_def() {
        let mut def = ProjectDef::new("Halo");
        let mut track = Track::new(1, "a.ogg", "A", "A");
        track.set_uses(vec![
            TrackUse::ambient(),
            TrackUse::new(Cue::BattleMedium, Vec::<String>::new()),
        ]);
        def.tracks.push(track);
        def.tracks.push(Track::new(2, "b.ogg", "B", "B"));

        let docs = export_def(&def);
        for id in ["ME_H_001", "ME_H_002", "ME_H_003"] {
            assert!(docs.tracks_xml.contains(&format!("<defName>{}</defName>", id)));
            assert!(docs.theme_xml.contains(&format!("<li>{}</li>", id)));
        }
        assert!(!docs.theme_xml.contains("ME_H_004"));
    }

    #[test]
    fn test_empty_def_exports_headings_only() {
        let docs = export_def(&ProjectDef::new("Halo"));
        assert!(!docs.tracks_xml.contains("<MusicExpanded.TrackDef>"));
        assert!(docs.theme_xml.contains("<defName>ME_H</defName>"));
    }
}
