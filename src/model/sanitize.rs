//! Name normalization
//!
//! Pure string helpers that turn user-facing names into path segments,
//! folder names and short game codes.

use std::sync::OnceLock;

use regex::Regex;

/// Characters that may not appear in a path segment on any supported platform.
pub const FORBIDDEN_FS_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Game code used when a label has no alphanumeric characters at all.
pub const FALLBACK_GAME_CODE: &str = "GME";

/// Maximum length of an inferred game code.
const GAME_CODE_LEN: usize = 3;

static OGG_EXTENSION: OnceLock<Regex> = OnceLock::new();
static ORDERING_PREFIX: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();

fn ogg_extension() -> &'static Regex {
    OGG_EXTENSION.get_or_init(|| Regex::new(r"(?i)\.ogg$").expect("invalid regex pattern"))
}

fn ordering_prefix() -> &'static Regex {
    ORDERING_PREFIX
        .get_or_init(|| Regex::new(r"^\s*\d{1,3}\s*[.\-]\s*").expect("invalid regex pattern"))
}

fn whitespace_run() -> &'static Regex {
    WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("invalid regex pattern"))
}

/// Make `s` safe to use as a single path segment.
///
/// Every forbidden character becomes `_`, then trailing spaces and dots are
/// stripped (Windows refuses both at the end of a name).
pub fn sanitize_component(s: &str) -> String {
    let replaced: String = s
        .chars()
        .map(|c| if FORBIDDEN_FS_CHARS.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim_end_matches([' ', '.']).to_string()
}

/// Keep only ASCII letters and digits.
pub fn sanitize_simple(name: &str) -> String {
    name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

/// Build a short uppercase code from the initials of each alphanumeric run.
///
/// `"Fallout: New Vegas"` becomes `"FNV"`; a label without any letters or
/// digits falls back to [`FALLBACK_GAME_CODE`].
pub fn infer_game_code(label: &str) -> String {
    let code: String = label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter_map(|run| run.chars().next())
        .take(GAME_CODE_LEN)
        .collect::<String>()
        .to_ascii_uppercase();

    if code.is_empty() {
        FALLBACK_GAME_CODE.to_string()
    } else {
        code
    }
}

/// Derive a display title from an audio file name.
///
/// Strips the `.ogg` extension, a leading `01.`/`01 -` ordering number, and a
/// leading `"<game> - "`, `"<folder> - "`, `"Soundtrack - "` or `"OST - "`
/// prefix (any dash style), then collapses whitespace.
pub fn infer_title_from_filename(filename: &str, game_label: &str, content_folder: &str) -> String {
    let title = ogg_extension().replace(filename, "");
    let title = ordering_prefix().replace(&title, "");

    let alternatives: Vec<String> = [game_label, content_folder, "soundtrack", "ost"]
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| regex::escape(s))
        .collect();
    let pattern = format!(r"(?i)^\s*(?:{})\s*[-–—]\s*", alternatives.join("|"));
    let title = match Regex::new(&pattern) {
        Ok(prefix) => prefix.replace(&title, "").into_owned(),
        Err(_) => title.into_owned(),
    };

    whitespace_run().replace_all(&title, " ").trim().to_string()
}
