//! Entry classification
//!
//! Walks a Def's (track, use) pairs once, hands each a defName in traversal
//! order, and sorts it into one of four output sections. Both documents are
//! rendered from the same classified list, so their identifiers agree.

use serde::Serialize;

use super::ids::DefNameSequence;
use crate::model::{Cue, ProjectDef};

/// Output section of a track definition, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Section {
    Ambient,
    MainCredits,
    Battle,
    Custom,
}

impl Section {
    /// Sections in the order they are written.
    pub const ORDER: [Section; 4] = [
        Section::Ambient,
        Section::MainCredits,
        Section::Battle,
        Section::Custom,
    ];

    /// Section a cue belongs to.
    ///
    /// Cue names the framework does not know never reach this point: the
    /// importer folds them into Ambient.
    pub fn of(cue: &Cue) -> Self {
        match cue {
            Cue::Ambient => Section::Ambient,
            Cue::MainMenu | Cue::Credits => Section::MainCredits,
            Cue::BattleSmall | Cue::BattleMedium | Cue::BattleLarge | Cue::BattleLegendary => {
                Section::Battle
            }
            Cue::Custom(_) => Section::Custom,
        }
    }

    /// Comment text written above the section.
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Ambient => "Ambient Tracks (No Cue)",
            Section::MainCredits => "MainMenu and Credits Tracks",
            Section::Battle => {
                "Battle Tracks (BattleSmall, BattleMedium, BattleLarge, BattleLegendary)"
            }
            Section::Custom => "Custom Cues",
        }
    }
}

/// One track definition ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEntry {
    pub def_name: String,
    pub section: Section,
    pub label: String,
    pub clip_path: String,
    /// `<cue>` value; `None` for Ambient.
    pub cue: Option<&'static str>,
    /// `<cueData>` value; only for Custom cues with data.
    pub cue_data: Option<String>,
    pub tense: bool,
    pub allowed_biomes: Vec<String>,
}

/// Classify every (track, use) pair of `def` in traversal order.
pub fn classify_def(def: &ProjectDef) -> Vec<ClassifiedEntry> {
    let mut ids = DefNameSequence::new(&def.game_code);
    let mut entries = Vec::with_capacity(def.use_count());

    for track in &def.tracks {
        let label = def.compose_label(track);
        let clip_path = def.clip_path(track);

        for (use_, def_name) in track.uses().iter().zip(ids.by_ref()) {
            let section = Section::of(&use_.cue);
            entries.push(ClassifiedEntry {
                def_name,
                section,
                label: label.clone(),
                clip_path: clip_path.clone(),
                cue: (section != Section::Ambient).then(|| use_.cue.name()),
                cue_data: use_
                    .cue
                    .custom_data()
                    .filter(|data| !data.is_empty())
                    .map(str::to_string),
                tense: section == Section::Battle,
                allowed_biomes: use_.allowed_biomes().to_vec(),
            });
        }
    }

    entries
}

/// Entries of one section, keeping traversal order.
pub fn in_section(entries: &[ClassifiedEntry], section: Section) -> impl Iterator<Item = &ClassifiedEntry> {
    entries.iter().filter(move |e| e.section == section)
}
