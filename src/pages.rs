//! Pages-string parsing and encoding.
//!
//! A pages string is a user's navigation menu in one field:
//!
//! ```text
//! Dashboard,Jurnal>Jurnal=jurnal|Pengaturan Jurnal=jurnal/pengaturan
//! ```
//!
//! Entries are separated by `,`. An entry is either a leaf (`title=page`
//! or a bare `page`) or a group (`label>child|child`) whose children are
//! leaves. Malformed entries are dropped; parsing never fails.

use itertools::Itertools;
use tracing::debug;

use crate::error::AccessError;
use crate::glyphs::{GlyphTable, LEGACY_GLYPHS};
use crate::types::{MenuNode, ParsedPages};

const ENTRY_SEPARATOR: char = ',';
const GROUP_MARKER: char = '>';
const CHILD_SEPARATOR: char = '|';
const ID_MARKER: char = '=';

/// Parse a pages string with the legacy glyph table.
pub fn parse_pages(input: Option<&str>) -> ParsedPages {
    parse_with(&LEGACY_GLYPHS, input)
}

/// Parser with a configurable glyph table.
#[derive(Debug, Clone, Default)]
pub struct PagesParser {
    glyphs: GlyphTable,
}

impl PagesParser {
    pub fn new(glyphs: GlyphTable) -> Self {
        PagesParser { glyphs }
    }

    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// `None` and blank input both yield an empty result.
    pub fn parse(&self, input: Option<&str>) -> ParsedPages {
        parse_with(&self.glyphs, input)
    }
}

fn parse_with(glyphs: &GlyphTable, input: Option<&str>) -> ParsedPages {
    let Some(raw) = input.filter(|s| !s.trim().is_empty()) else {
        return ParsedPages::default();
    };

    let normalized = glyphs.normalize(raw);
    let mut flat: Vec<String> = Vec::new();
    let mut tree: Vec<MenuNode> = Vec::new();

    for token in normalized
        .split(ENTRY_SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        let node = match token.split_once(GROUP_MARKER) {
            Some((label, children)) => parse_group(label, children).inspect(|group| {
                flat.extend(group.children.iter().map(|c| c.page_id.clone()));
            }),
            None => parse_leaf(token).inspect(|leaf| flat.push(leaf.page_id.clone())),
        };

        match node {
            Some(node) => tree.push(node),
            None => debug!(event = "Pages", phase = "Drop", token = token),
        }
    }

    ParsedPages {
        flat_identifiers: flat.into_iter().unique().collect(),
        tree,
    }
}

/// `title=page` or a bare `page`. Either side of `=` being blank drops it.
fn parse_leaf(token: &str) -> Option<MenuNode> {
    match token.split_once(ID_MARKER) {
        Some((title, page_id)) => {
            let (title, page_id) = (title.trim(), page_id.trim());
            if title.is_empty() || page_id.is_empty() {
                return None;
            }
            Some(MenuNode::leaf(title, page_id))
        }
        None => Some(MenuNode::leaf(token, token)),
    }
}

/// `label>child|child`. Identifiers never contain `>`, so groups do not
/// nest: a child holding a `>` is dropped along with any blank or
/// half-empty `title=page` child.
fn parse_group(label: &str, children: &str) -> Option<MenuNode> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let children = children
        .split(CHILD_SEPARATOR)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .filter_map(|child| {
            let leaf = if child.contains(GROUP_MARKER) {
                None
            } else {
                parse_leaf(child)
            };
            if leaf.is_none() {
                debug!(event = "Pages", phase = "Drop", group = label, child = child);
            }
            leaf
        })
        .collect();

    Some(MenuNode::group(label, children))
}

/// Write a menu tree back into a pages string, checked against the legacy
/// glyph table.
///
/// Leaves whose title equals their page id are written bare. A group
/// writes its `title` as the label; its `page_id` is not stored. A group
/// without entries is written as `label>` so it stays a header. Titles
/// and page ids that would not survive a parse are rejected.
pub fn encode_pages(tree: &[MenuNode]) -> Result<String, AccessError> {
    encode_with(&LEGACY_GLYPHS, tree)
}

impl PagesParser {
    /// [`encode_pages`] against this parser's glyph table.
    pub fn encode(&self, tree: &[MenuNode]) -> Result<String, AccessError> {
        encode_with(&self.glyphs, tree)
    }
}

fn encode_with(glyphs: &GlyphTable, tree: &[MenuNode]) -> Result<String, AccessError> {
    let entries = tree
        .iter()
        .map(|node| encode_entry(glyphs, node))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries.join(","))
}

fn encode_entry(glyphs: &GlyphTable, node: &MenuNode) -> Result<String, AccessError> {
    if node.is_leaf() {
        return encode_leaf(glyphs, node);
    }

    check_text(
        glyphs,
        &node.title,
        &[ENTRY_SEPARATOR, GROUP_MARKER, CHILD_SEPARATOR],
    )?;
    let children = node
        .children
        .iter()
        .map(|child| {
            if child.is_leaf() {
                encode_leaf(glyphs, child)
            } else {
                Err(AccessError::InvalidFormat(format!(
                    "menu group '{}' is nested inside '{}'",
                    child.title, node.title
                )))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        "{}{GROUP_MARKER}{}",
        node.title,
        children.join("|")
    ))
}

fn encode_leaf(glyphs: &GlyphTable, node: &MenuNode) -> Result<String, AccessError> {
    check_text(
        glyphs,
        &node.title,
        &[ENTRY_SEPARATOR, GROUP_MARKER, CHILD_SEPARATOR, ID_MARKER],
    )?;
    check_text(
        glyphs,
        &node.page_id,
        &[ENTRY_SEPARATOR, GROUP_MARKER, CHILD_SEPARATOR],
    )?;

    if node.title == node.page_id {
        Ok(node.title.clone())
    } else {
        Ok(format!("{}{ID_MARKER}{}", node.title, node.page_id))
    }
}

/// Stripped and separator glyphs are rewritten on parse, so they are as
/// reserved as the delimiters.
fn check_text(glyphs: &GlyphTable, text: &str, reserved: &[char]) -> Result<(), AccessError> {
    if text.trim().is_empty() {
        return Err(AccessError::InvalidFormat(
            "menu entry has an empty title or page id".to_string(),
        ));
    }
    if let Some(c) = text.chars().find(|c| {
        reserved.contains(c) || glyphs.stripped().contains(c) || glyphs.separators().contains(c)
    }) {
        return Err(AccessError::InvalidFormat(format!(
            "'{text}' contains the reserved character '{c}'"
        )));
    }
    Ok(())
}
