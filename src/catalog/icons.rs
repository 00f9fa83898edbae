//! Icon table referenced by `ItemRecord::icon_index`
//!
//! Icons are terminal glyphs configured in `config.toml`. Records that point
//! outside the table fall back to a neutral marker instead of failing.

use super::ItemRecord;

/// Glyph shown for records whose icon index is outside the table
pub const FALLBACK_ICON: &str = "·";

/// Default glyph table (index-aligned with the bundled catalog)
pub fn default_glyphs() -> Vec<String> {
    ["⚔", "🛡", "⚗", "👢", "💍", "🏹", "➶", "🗺", "🏮", "💎"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Lookup table from icon index to glyph
#[derive(Debug, Clone)]
pub struct IconLookup {
    glyphs: Vec<String>,
}

impl IconLookup {
    pub fn new(glyphs: Vec<String>) -> Self {
        Self { glyphs }
    }

    /// Resolve an icon index to its glyph
    pub fn resolve(&self, icon_index: i32) -> &str {
        usize::try_from(icon_index)
            .ok()
            .and_then(|i| self.glyphs.get(i))
            .map(String::as_str)
            .unwrap_or(FALLBACK_ICON)
    }

    /// Warn about records whose icon index has no glyph
    ///
    /// Returns the number of records that will render with the fallback.
    pub fn validate(&self, records: &[ItemRecord]) -> usize {
        let mut missing = 0;
        for record in records {
            let in_range = usize::try_from(record.icon_index)
                .map(|i| i < self.glyphs.len())
                .unwrap_or(false);
            if !in_range {
                missing += 1;
                tracing::warn!(
                    "Item '{}' references icon {} but only {} icons are configured",
                    record.name,
                    record.icon_index,
                    self.glyphs.len()
                );
            }
        }
        missing
    }
}

impl Default for IconLookup {
    fn default() -> Self {
        Self::new(default_glyphs())
    }
}
