//! Navigation tree decoded from a user's pages string.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry in a user's navigation menu.
///
/// Leaves point at a page. Group headers carry their label as both `title`
/// and `page_id`, and list their entries in `children`.
///
/// A group parsed from `Laporan>` has no children but is still a header:
/// its label never becomes a page. That marker is not part of the JSON
/// shape, so a childless group read back from JSON is a leaf.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub title: String,
    pub page_id: String,
    #[serde(default)]
    #[schema(no_recursion)]
    pub children: Vec<MenuNode>,
    #[serde(skip)]
    header: bool,
}

impl MenuNode {
    /// A menu entry pointing at a single page.
    pub fn leaf(title: impl Into<String>, page_id: impl Into<String>) -> Self {
        MenuNode {
            title: title.into(),
            page_id: page_id.into(),
            children: Vec::new(),
            header: false,
        }
    }

    /// A menu header. The label doubles as the node's page id.
    pub fn group(label: impl Into<String>, children: Vec<MenuNode>) -> Self {
        let label = label.into();
        MenuNode {
            page_id: label.clone(),
            title: label,
            children,
            header: true,
        }
    }

    /// Whether this node is a menu header, with or without entries.
    pub fn is_group(&self) -> bool {
        self.header || !self.children.is_empty()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_group()
    }
}

impl Display for MenuNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_leaf() {
            write!(f, "{} ({})", self.title, self.page_id)
        } else {
            write!(f, "{} [{} entries]", self.title, self.children.len())
        }
    }
}

/// Result of parsing a pages string.
#[derive(Debug, Default, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPages {
    /// Every page id in the string, first occurrence order, no duplicates.
    pub flat_identifiers: Vec<String>,
    pub tree: Vec<MenuNode>,
}

impl ParsedPages {
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Whether `page_id` is one of the pages this menu grants.
    ///
    /// Group labels are headers, not pages, so they never match here.
    pub fn allows_page(&self, page_id: &str) -> bool {
        self.flat_identifiers.iter().any(|id| id == page_id)
    }
}
