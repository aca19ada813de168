//! MEF Builder - Music Expanded Framework pack builder
//!
//! Builds and round-trips the XML a RimWorld music pack needs for the Music
//! Expanded Framework.
//!
//! # Architecture
//!
//! - `model`: packs, Defs, tracks and cue uses
//! - `export`: classification, defName generation and the XML writers
//! - `import`: XML readers that rebuild the model from written documents
//! - `pack`: mod folders on disk (open, overwrite, build)
//!
//! Exporting and importing are inverse: re-exporting an imported Def
//! reproduces the same defNames, fields and ordering.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod model;
pub mod pack;
pub mod schema;

pub use config::BuilderConfig;
pub use error::{MefError, Result};
pub use export::{export_def, DefDocuments};
pub use import::{import_def_folder, parse_def_documents, ImportContext};
pub use model::{Cue, ModPack, PackMeta, ProjectDef, Track, TrackUse};
pub use pack::{build_pack, open_pack, overwrite_pack, BuildReport, CopyWarning};
