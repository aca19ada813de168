//! About.xml reader

use std::fs;
use std::path::Path;

use super::xml::{child_text, list_items, parse_document};
use crate::error::{MefError, Result};
use crate::model::PackMeta;
use crate::schema::{
    AUTHOR, DESCRIPTION, LOAD_AFTER, MOD_METADATA, NAME, PACKAGE_ID, SUPPORTED_VERSIONS,
};

/// File name of the pack metadata document.
pub const ABOUT_FILE: &str = "About.xml";
/// Preview image shown in the mod list.
pub const PREVIEW_FILE: &str = "Preview.png";
/// Mod icon, also the fallback Def icon.
pub const MOD_ICON_FILE: &str = "modicon.png";

/// Parse pack metadata from an About document.
pub fn parse_about(xml: &str, document: &str) -> Result<PackMeta> {
    let doc = parse_document(xml, document)?;
    let root = doc.root_element();
    if !root.has_tag_name(MOD_METADATA) {
        return Err(MefError::MissingElement {
            document: document.to_string(),
            element: MOD_METADATA,
        });
    }

    let text = |tag: &str| child_text(root, tag).unwrap_or_default().trim().to_string();

    Ok(PackMeta {
        name: text(NAME),
        description: child_text(root, DESCRIPTION).unwrap_or_default().to_string(),
        author: text(AUTHOR),
        package_id: text(PACKAGE_ID),
        supported_versions: list_items(root, SUPPORTED_VERSIONS),
        load_after: list_items(root, LOAD_AFTER),
        preview: None,
        mod_icon: None,
    })
}

/// Read `About/About.xml` and note which images sit beside it.
pub fn read_about(about_dir: &Path) -> Result<PackMeta> {
    let path = about_dir.join(ABOUT_FILE);
    if !path.is_file() {
        return Err(MefError::MissingDocument { path });
    }
    let xml = fs::read_to_string(&path).map_err(|e| MefError::FileReadError {
        path: path.clone(),
        source: e,
    })?;

    let mut meta = parse_about(&xml, &path.display().to_string())?;
    meta.preview = Some(about_dir.join(PREVIEW_FILE)).filter(|p| p.is_file());
    meta.mod_icon = Some(about_dir.join(MOD_ICON_FILE)).filter(|p| p.is_file());
    Ok(meta)
}
