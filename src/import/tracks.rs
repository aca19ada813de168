//! tracks.xml reader

use log::warn;

use super::xml::{child_text, list_items, parse_document};
use crate::error::{MefError, Result};
use crate::model::Cue;
use crate::schema::{ALLOWED_BIOMES, CLIP_PATH, CUE, CUE_DATA, DEF_NAME, LABEL, TRACK_DEF};

/// One `<MusicExpanded.TrackDef>` as written in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDefEntry {
    pub def_name: String,
    pub label: String,
    pub clip_path: String,
    pub cue: Cue,
    pub allowed_biomes: Vec<String>,
}

/// Read every track definition in `xml`, in document order.
///
/// Cue names the framework does not define are read as Ambient. A Custom
/// cue without data is kept as it is so re-exporting writes it back
/// unchanged.
pub fn parse_track_defs(xml: &str, document: &str) -> Result<Vec<TrackDefEntry>> {
    let doc = parse_document(xml, document)?;

    let entries: Vec<TrackDefEntry> = doc
        .descendants()
        .filter(|n| n.has_tag_name(TRACK_DEF))
        .map(|node| {
            let def_name = child_text(node, DEF_NAME).unwrap_or_default().trim().to_string();
            let cue_name = child_text(node, CUE).unwrap_or_default().trim();
            let cue_data = child_text(node, CUE_DATA).unwrap_or_default();

            let cue = match Cue::from_document(cue_name, cue_data) {
                Some(Cue::Custom(data)) if data.is_empty() => {
                    warn!("{}: {} has a Custom cue without cueData", document, def_name);
                    Cue::Custom(data)
                }
                Some(cue) => cue,
                None => {
                    warn!(
                        "{}: {} has unknown cue '{}', reading it as Ambient",
                        document, def_name, cue_name
                    );
                    Cue::Ambient
                }
            };

            TrackDefEntry {
                label: child_text(node, LABEL).unwrap_or_default().trim().to_string(),
                clip_path: child_text(node, CLIP_PATH).unwrap_or_default().trim().to_string(),
                cue,
                allowed_biomes: list_items(node, ALLOWED_BIOMES),
                def_name,
            }
        })
        .collect();

    if entries.is_empty() {
        return Err(MefError::MissingElement {
            document: document.to_string(),
            element: TRACK_DEF,
        });
    }

    Ok(entries)
}
