//! roxmltree helpers shared by the document readers.

use roxmltree::{Document, Node};

use crate::error::{MefError, Result};
use crate::schema::LIST_ITEM;

/// Parse `xml`, naming `document` in the error.
pub(crate) fn parse_document<'input>(xml: &'input str, document: &str) -> Result<Document<'input>> {
    Document::parse(xml).map_err(|source| MefError::XmlParse {
        document: document.to_string(),
        source,
    })
}

/// First child element named `tag`.
pub(crate) fn child<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(tag))
}

/// Raw text of the first child element named `tag`.
///
/// An empty element and a missing one both give `None`.
pub(crate) fn child_text<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &str) -> Option<&'a str> {
    child(node, tag)
        .and_then(|n| n.text())
        .filter(|text| !text.trim().is_empty())
}

/// Text of the first child element named `tag`, kept verbatim.
///
/// A present but empty element gives `Some("")`; only a missing one gives `None`.
pub(crate) fn child_raw_text<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &str) -> Option<&'a str> {
    child(node, tag).map(|n| n.text().unwrap_or_default())
}

/// Trimmed, non-empty `<li>` texts under the child element named `tag`.
pub(crate) fn list_items(node: Node<'_, '_>, tag: &str) -> Vec<String> {
    child(node, tag)
        .map(|list| {
            list.descendants()
                .filter(|n| n.has_tag_name(LIST_ITEM))
                .filter_map(|n| n.text())
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
