//! Cue assignments
//!
//! A [`Cue`] is the playback trigger the framework uses to pick a track; a
//! [`TrackUse`] pairs one cue with an optional biome restriction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MefError, Result};

/// Biome tags offered when restricting a use.
pub const DEFAULT_BIOMES: &[&str] = &[
    "TemperateForest",
    "BorealForest",
    "Tundra",
    "AridShrubland",
    "Desert",
    "TropicalRainforest",
    "TemperateSwamp",
    "TropicalSwamp",
    "IceSheet",
    "SeaIce",
];

/// Playback trigger for one track definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Cue {
    /// Regular background music; written without a `<cue>` element.
    #[default]
    Ambient,
    MainMenu,
    Credits,
    BattleSmall,
    BattleMedium,
    BattleLarge,
    BattleLegendary,
    /// Framework-specific trigger named by its data string.
    Custom(String),
}

impl Cue {
    /// Names accepted by [`Cue::parse`], in display order.
    pub const NAMES: &'static [&'static str] = &[
        "Ambient",
        "MainMenu",
        "Credits",
        "BattleSmall",
        "BattleMedium",
        "BattleLarge",
        "BattleLegendary",
        "Custom",
    ];

    /// Name as written in `<cue>`.
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Ambient => "Ambient",
            Cue::MainMenu => "MainMenu",
            Cue::Credits => "Credits",
            Cue::BattleSmall => "BattleSmall",
            Cue::BattleMedium => "BattleMedium",
            Cue::BattleLarge => "BattleLarge",
            Cue::BattleLegendary => "BattleLegendary",
            Cue::Custom(_) => "Custom",
        }
    }

    /// Strict parse used by edit operations.
    ///
    /// Unknown names are rejected and a Custom cue must carry data.
    pub fn parse(name: &str, data: &str) -> Result<Self> {
        match Self::from_document(name, data) {
            Some(Cue::Custom(data)) if data.is_empty() => Err(MefError::EmptyCueData),
            Some(cue) => Ok(cue),
            None => Err(MefError::UnknownCue {
                name: name.trim().to_string(),
            }),
        }
    }

    /// Lenient parse used when reading `<cue>`/`<cueData>` back.
    ///
    /// An empty name means Ambient. Unknown names return `None` so the
    /// caller can decide how to fall back. Custom keeps its data even when
    /// empty.
    pub fn from_document(name: &str, data: &str) -> Option<Self> {
        let cue = match name.trim() {
            "" | "Ambient" => Cue::Ambient,
            "MainMenu" => Cue::MainMenu,
            "Credits" => Cue::Credits,
            "BattleSmall" => Cue::BattleSmall,
            "BattleMedium" => Cue::BattleMedium,
            "BattleLarge" => Cue::BattleLarge,
            "BattleLegendary" => Cue::BattleLegendary,
            "Custom" => Cue::Custom(data.trim().to_string()),
            _ => return None,
        };
        Some(cue)
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, Cue::Ambient)
    }

    pub fn is_battle(&self) -> bool {
        matches!(
            self,
            Cue::BattleSmall | Cue::BattleMedium | Cue::BattleLarge | Cue::BattleLegendary
        )
    }

    /// Data string of a Custom cue.
    pub fn custom_data(&self) -> Option<&str> {
        match self {
            Cue::Custom(data) => Some(data),
            _ => None,
        }
    }

    /// Whether `other` targets the same slot on a track.
    ///
    /// Custom cues only match when their data is equal; every other cue
    /// matches by kind.
    pub fn same_slot(&self, other: &Cue) -> bool {
        match (self, other) {
            (Cue::Custom(a), Cue::Custom(b)) => a == b,
            _ => self == other,
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Custom(data) if !data.is_empty() => write!(f, "Custom[{}]", data),
            other => f.write_str(other.name()),
        }
    }
}

/// One assignment of a track to a cue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackUse {
    /// Trigger for this use.
    pub cue: Cue,

    /// Biomes this use is limited to; empty means every biome.
    #[serde(default)]
    allowed_biomes: Vec<String>,
}

impl TrackUse {
    /// Create a use, dropping blank and repeated biome tags.
    pub fn new<I, S>(cue: Cue, allowed_biomes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut biomes: Vec<String> = Vec::new();
        for biome in allowed_biomes {
            let biome = biome.as_ref().trim();
            if !biome.is_empty() && !biomes.iter().any(|b| b == biome) {
                biomes.push(biome.to_string());
            }
        }
        Self {
            cue,
            allowed_biomes: biomes,
        }
    }

    /// The default use every track starts with.
    pub fn ambient() -> Self {
        Self::default()
    }

    pub fn allowed_biomes(&self) -> &[String] {
        &self.allowed_biomes
    }

    /// Biome tags outside [`DEFAULT_BIOMES`], usually modded biomes or typos.
    pub fn unknown_biomes(&self) -> Vec<&str> {
        self.allowed_biomes
            .iter()
            .map(String::as_str)
            .filter(|b| !DEFAULT_BIOMES.contains(b))
            .collect()
    }

    /// Key under which two uses count as duplicates.
    ///
    /// Biome order does not matter for equality.
    pub fn dedup_key(&self) -> (Cue, Vec<String>) {
        let mut biomes = self.allowed_biomes.clone();
        biomes.sort();
        (self.cue.clone(), biomes)
    }
}

impl fmt::Display for TrackUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cue)?;
        if !self.allowed_biomes.is_empty() {
            write!(f, " ({})", self.allowed_biomes.join(", "))?;
        }
        Ok(())
    }
}
