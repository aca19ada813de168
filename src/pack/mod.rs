//! Mod folders on disk
//!
//! Opening a mod imports every Def it holds; overwriting writes the edited
//! documents back in place; building writes a complete new mod elsewhere.

pub mod build;
pub mod layout;
pub mod open;
pub mod overwrite;

pub use build::{build_pack, mod_folder_name, plan_def_folders, BuildReport, CopyWarning};
pub use layout::{is_patches_dir, PackLayout};
pub use open::open_pack;
pub use overwrite::{overwrite_def, overwrite_pack, overwrite_target};
