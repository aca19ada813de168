//! tracks.xml writer

use super::classify::{in_section, ClassifiedEntry, Section};
use super::xml::escape_text;
use crate::schema::{
    ALLOWED_BIOMES, CLIP_PATH, CUE, CUE_DATA, DEF_NAME, LABEL, LIST_ITEM, ROOT_DEFS, TENSE,
    TRACK_DEF, XML_DECLARATION,
};

/// Render the track-definition document, grouped by section.
pub fn build_tracks_xml(entries: &[ClassifiedEntry]) -> String {
    let mut lines = vec![XML_DECLARATION.to_string(), format!("<{}>", ROOT_DEFS)];

    for (i, section) in Section::ORDER.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("\t<!-- {} -->", section.heading()));
        for entry in in_section(entries, *section) {
            push_track_def(&mut lines, entry);
        }
    }

    lines.push(format!("</{}>", ROOT_DEFS));
    lines.join("\n") + "\n"
}

fn push_track_def(lines: &mut Vec<String>, entry: &ClassifiedEntry) {
    lines.push(format!("\t<{}>", TRACK_DEF));
    lines.push(element(2, DEF_NAME, &entry.def_name));
    lines.push(element(2, LABEL, &entry.label));
    lines.push(element(2, CLIP_PATH, &entry.clip_path));
    if let Some(cue) = entry.cue {
        lines.push(element(2, CUE, cue));
    }
    if let Some(data) = &entry.cue_data {
        lines.push(element(2, CUE_DATA, data));
    }
    if entry.tense {
        lines.push(element(2, TENSE, "true"));
    }
    if !entry.allowed_biomes.is_empty() {
        lines.push(format!("\t\t<{}>", ALLOWED_BIOMES));
        for biome in &entry.allowed_biomes {
            lines.push(element(3, LIST_ITEM, biome));
        }
        lines.push(format!("\t\t</{}>", ALLOWED_BIOMES));
    }
    lines.push(format!("\t</{}>", TRACK_DEF));
}

/// `<tag>text</tag>` indented by `depth` tabs.
pub(crate) fn element(depth: usize, tag: &str, text: &str) -> String {
    format!(
        "{}<{tag}>{}</{tag}>",
        "\t".repeat(depth),
        escape_text(text),
        tag = tag
    )
}
