//! About.xml writer
//!
//! The indentation below mirrors the files the framework's own tooling
//! produces, uneven nesting included.

use super::xml::{cdata, escape_text};
use crate::model::PackMeta;
use crate::schema::{
    FRAMEWORK_DISPLAY_NAME, FRAMEWORK_DOWNLOAD_URL, FRAMEWORK_ID, LEGACY_FRAMEWORK_ID,
    XML_DECLARATION,
};

/// Game version from which the current framework package applies.
const CURRENT_FRAMEWORK_SINCE: f64 = 1.5;

/// Framework dependency declared for one game version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameworkDependency {
    pub package_id: &'static str,
    pub display_name: &'static str,
}

/// Pick the framework package for `version`.
///
/// Versions that do not parse as a number are treated as current.
pub fn dependency_for_version(version: &str) -> FrameworkDependency {
    let legacy = version
        .trim()
        .parse::<f64>()
        .map(|v| v < CURRENT_FRAMEWORK_SINCE)
        .unwrap_or(false);
    FrameworkDependency {
        package_id: if legacy { LEGACY_FRAMEWORK_ID } else { FRAMEWORK_ID },
        display_name: FRAMEWORK_DISPLAY_NAME,
    }
}

/// Render the pack metadata document.
pub fn build_about_xml(meta: &PackMeta) -> String {
    let versions: Vec<&str> = meta
        .supported_versions
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    let mut lines = vec![
        XML_DECLARATION.to_string(),
        "<ModMetaData>".to_string(),
        format!("\t<name>{}</name>", escape_text(meta.name.trim())),
        format!("\t<description>{}</description>", cdata(&meta.description)),
        format!("\t<author>{}</author>", escape_text(meta.author.trim())),
        format!("\t<packageId>{}</packageId>", escape_text(meta.package_id.trim())),
        "\t\t<supportedVersions>".to_string(),
    ];
    for v in &versions {
        lines.push(format!("\t\t\t<li>{}</li>", escape_text(v)));
    }
    lines.push("\t\t</supportedVersions>".to_string());

    lines.push("\t<loadAfter>".to_string());
    for package in meta.load_after.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        lines.push(format!("\t\t<li>{}</li>", escape_text(package)));
    }
    lines.push("\t</loadAfter>".to_string());

    lines.push("\t\t<modDependenciesByVersion>".to_string());
    for v in &versions {
        let dep = dependency_for_version(v);
        lines.push(format!("\t\t\t<v{}>", v));
        lines.push("\t\t\t\t<li>".to_string());
        lines.push(format!("\t\t\t\t\t<packageId>{}</packageId>", dep.package_id));
        lines.push(format!("\t\t\t\t\t<displayName>{}</displayName>", dep.display_name));
        lines.push(format!("\t\t\t\t\t<downloadUrl>{}</downloadUrl>", FRAMEWORK_DOWNLOAD_URL));
        lines.push("\t\t\t\t</li>".to_string());
        lines.push(format!("\t\t\t</v{}>", v));
    }
    lines.push("\t\t</modDependenciesByVersion>".to_string());
    lines.push("</ModMetaData>".to_string());

    lines.join("\n") + "\n"
}
