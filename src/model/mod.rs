//! Data model
//!
//! Plain owned data: a [`ModPack`] owns its [`ProjectDef`]s, a Def owns its
//! [`Track`]s, a track owns its [`TrackUse`]s.

pub mod cue;
pub mod pack;
pub mod project;
pub mod sanitize;

pub use cue::{Cue, TrackUse, DEFAULT_BIOMES};
pub use pack::{def_folder_name, ModPack, PackMeta, KNOWN_VERSIONS};
pub use project::{default_theme_description, indexed_name, ProjectDef, Track};
