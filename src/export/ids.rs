//! defName generation
//!
//! One sequence per Def per export call: `ME_<code>_001`, `ME_<code>_002`, ...

use crate::schema::DEF_NAME_PREFIX;

/// Monotonic defName generator scoped to a single export.
#[derive(Debug, Clone)]
pub struct DefNameSequence {
    game_code: String,
    counter: u32,
}

impl DefNameSequence {
    pub fn new(game_code: &str) -> Self {
        Self {
            game_code: game_code.to_string(),
            counter: 0,
        }
    }

    /// Number of identifiers handed out so far.
    pub fn issued(&self) -> u32 {
        self.counter
    }
}

impl Iterator for DefNameSequence {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.counter += 1;
        Some(format!("{}{}_{:03}", DEF_NAME_PREFIX, self.game_code, self.counter))
    }
}

/// defName of the theme record for `game_code`.
pub fn theme_def_name(game_code: &str) -> String {
    format!("{}{}", DEF_NAME_PREFIX, game_code)
}
