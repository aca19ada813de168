//! theme.xml reader

use std::sync::OnceLock;

use regex::Regex;

use super::xml::{child_raw_text, child_text, list_items, parse_document};
use crate::error::{MefError, Result};
use crate::schema::{DEF_NAME, DESCRIPTION, ICON_PATH, LABEL, THEME_DEF, TRACKS};

static THEME_LABEL: OnceLock<Regex> = OnceLock::new();
static THEME_DEF_NAME: OnceLock<Regex> = OnceLock::new();
static ICON_PATH_PATTERN: OnceLock<Regex> = OnceLock::new();

fn theme_label() -> &'static Regex {
    THEME_LABEL.get_or_init(|| Regex::new(r"^\s*Music Expanded:\s*").expect("invalid regex pattern"))
}

fn theme_def_name() -> &'static Regex {
    THEME_DEF_NAME.get_or_init(|| Regex::new(r"^\s*ME_([A-Z0-9]+)\s*$").expect("invalid regex pattern"))
}

fn icon_path_pattern() -> &'static Regex {
    ICON_PATH_PATTERN.get_or_init(|| Regex::new(r"^\s*UI/Icons/(.+?)\s*$").expect("invalid regex pattern"))
}

/// What a theme document says about its Def.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeRecord {
    /// Label with the `Music Expanded:` stem removed.
    pub game_label: Option<String>,
    /// `<CODE>` from a `ME_<CODE>` defName.
    pub game_code: Option<String>,
    /// Verbatim, empty when the element is present but empty.
    pub description: Option<String>,
    /// Icon name after `UI/Icons/`.
    pub icon_base: Option<String>,
    /// defNames listed under `<tracks>`.
    pub track_refs: Vec<String>,
}

/// Read the first theme record in `xml`.
pub fn parse_theme(xml: &str, document: &str) -> Result<ThemeRecord> {
    let doc = parse_document(xml, document)?;
    let theme = doc
        .descendants()
        .find(|n| n.has_tag_name(THEME_DEF))
        .ok_or_else(|| MefError::MissingElement {
            document: document.to_string(),
            element: THEME_DEF,
        })?;

    let game_label = child_text(theme, LABEL)
        .map(|label| theme_label().replace(label, "").trim().to_string())
        .filter(|label| !label.is_empty());

    let game_code = child_text(theme, DEF_NAME)
        .and_then(|name| theme_def_name().captures(name.trim()))
        .map(|caps| caps[1].to_string());

    let icon_base = child_text(theme, ICON_PATH)
        .and_then(|path| icon_path_pattern().captures(path.trim()))
        .map(|caps| caps[1].to_string());

    Ok(ThemeRecord {
        game_label,
        game_code,
        description: child_raw_text(theme, DESCRIPTION).map(str::to_string),
        icon_base,
        track_refs: list_items(theme, TRACKS),
    })
}
