//! Decorative glyphs that legacy pages strings carry.
//!
//! Older menu editors stored checkbox and emoji decorations inside the
//! pages string. A [`GlyphTable`] lists the characters to drop before
//! tokenizing and the characters that stood in for the `,` separator.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AccessError;

/// Characters with meaning in the pages grammar. A glyph table may never
/// strip these.
pub(crate) const DELIMITERS: [char; 4] = [',', '>', '|', '='];

const SEPARATOR: char = ',';

/// Ballot boxes that old data used between entries.
const LEGACY_SEPARATORS: [char; 3] = ['\u{2610}', '\u{2611}', '\u{2612}'];

const LEGACY_STRIPPED: [char; 21] = [
    // check and cross marks
    '\u{2713}',
    '\u{2714}',
    '\u{2705}',
    '\u{2717}',
    '\u{2718}',
    '\u{274C}',
    // emoji presentation selector, zero width space and joiner
    '\u{FE0F}',
    '\u{200B}',
    '\u{200D}',
    // menu icons
    '\u{1F3E0}',
    '\u{1F4CA}',
    '\u{1F4CB}',
    '\u{1F4DD}',
    '\u{1F4C5}',
    '\u{1F4C1}',
    '\u{1F4DA}',
    '\u{1F465}',
    '\u{2699}',
    '\u{1F512}',
    '\u{1F4C8}',
    '\u{1F514}',
];

/// The built-in legacy table, shared by [`crate::parse_pages`].
pub static LEGACY_GLYPHS: Lazy<GlyphTable> = Lazy::new(GlyphTable::legacy);

/// Character classes applied to a pages string before it is tokenized.
///
/// Stripping runs first, so a character listed in both classes is dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "GlyphTableConfig")]
pub struct GlyphTable {
    stripped: Vec<char>,
    separators: Vec<char>,
}

#[derive(Deserialize)]
struct GlyphTableConfig {
    #[serde(default)]
    stripped: Vec<char>,
    #[serde(default)]
    separators: Vec<char>,
}

impl TryFrom<GlyphTableConfig> for GlyphTable {
    type Error = AccessError;

    fn try_from(config: GlyphTableConfig) -> Result<Self, Self::Error> {
        if let Some(c) = config.stripped.iter().find(|c| DELIMITERS.contains(c)) {
            return Err(AccessError::ConfigError(format!(
                "glyph table cannot strip the delimiter '{c}'"
            )));
        }
        Ok(GlyphTable {
            stripped: config.stripped,
            separators: config.separators,
        })
    }
}

impl GlyphTable {
    /// A table that leaves input untouched.
    pub fn empty() -> Self {
        GlyphTable {
            stripped: Vec::new(),
            separators: Vec::new(),
        }
    }

    pub fn legacy() -> Self {
        let table = LEGACY_STRIPPED
            .into_iter()
            .fold(GlyphTable::empty(), GlyphTable::strip);
        LEGACY_SEPARATORS
            .into_iter()
            .fold(table, GlyphTable::separator)
    }

    /// Load a table from JSON: `{"stripped": ["✓"], "separators": ["☐"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, AccessError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Drop `glyph` from input. Grammar delimiters are ignored.
    pub fn strip(mut self, glyph: char) -> Self {
        if DELIMITERS.contains(&glyph) {
            debug!(event = "Glyphs", phase = "Config", ignored = %glyph);
            return self;
        }
        self.separators.retain(|c| *c != glyph);
        if !self.stripped.contains(&glyph) {
            self.stripped.push(glyph);
        }
        self
    }

    /// Read `glyph` as an entry separator.
    pub fn separator(mut self, glyph: char) -> Self {
        self.stripped.retain(|c| *c != glyph);
        if !self.separators.contains(&glyph) {
            self.separators.push(glyph);
        }
        self
    }

    pub fn stripped(&self) -> &[char] {
        &self.stripped
    }

    pub fn separators(&self) -> &[char] {
        &self.separators
    }

    /// Remove stripped glyphs, then replace separator glyphs with `,`.
    pub fn normalize<'a>(&self, input: &'a str) -> Cow<'a, str> {
        let touched = input
            .chars()
            .any(|c| self.stripped.contains(&c) || self.separators.contains(&c));
        if !touched {
            return Cow::Borrowed(input);
        }

        let out: String = input
            .chars()
            .filter(|c| !self.stripped.contains(c))
            .map(|c| {
                if self.separators.contains(&c) {
                    SEPARATOR
                } else {
                    c
                }
            })
            .collect();
        Cow::Owned(out)
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        GlyphTable::legacy()
    }
}
