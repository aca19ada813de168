//! theme.xml writer

use super::classify::{in_section, ClassifiedEntry, Section};
use super::ids::theme_def_name;
use super::tracks::element;
use crate::model::ProjectDef;
use crate::schema::{
    DEF_NAME, DESCRIPTION, ICON_PATH, ICON_PATH_PREFIX, LABEL, LIST_ITEM, ROOT_DEFS, THEME_DEF,
    THEME_LABEL_PREFIX, TRACKS, XML_DECLARATION,
};

/// Render the theme document.
///
/// The playlist lists defNames in the same order the track-definition
/// document declares them; the section comments carry no meaning.
pub fn build_theme_xml(def: &ProjectDef, entries: &[ClassifiedEntry]) -> String {
    let mut lines = vec![
        XML_DECLARATION.to_string(),
        format!("<{}>", ROOT_DEFS),
        format!("\t<{}>", THEME_DEF),
        element(2, DEF_NAME, &theme_def_name(&def.game_code)),
        element(2, LABEL, &format!("{}{}", THEME_LABEL_PREFIX, def.label_game)),
        element(2, DESCRIPTION, &def.theme_description),
    ];
    if !def.icon_base.is_empty() {
        lines.push(element(
            2,
            ICON_PATH,
            &format!("{}{}", ICON_PATH_PREFIX, def.icon_base),
        ));
    }

    lines.push(format!("\t\t<{}>", TRACKS));
    for section in Section::ORDER {
        lines.push(format!("\t\t\t<!-- {} -->", section.heading()));
        for entry in in_section(entries, section) {
            lines.push(element(3, LIST_ITEM, &entry.def_name));
        }
    }
    lines.push(format!("\t\t</{}>", TRACKS));

    lines.push(format!("\t</{}>", THEME_DEF));
    lines.push(format!("</{}>", ROOT_DEFS));
    lines.join("\n") + "\n"
}
