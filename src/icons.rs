//! Icon glyph lookup
//!
//! Resolves `(family, name)` pairs to terminal glyphs. Unknown families fall
//! back to the default family; unknown names fall back to a placeholder.

use crate::types::IconRef;

pub const DEFAULT_FAMILY: &str = "ionicons";

/// Glyph shown when nothing matches
pub const MISSING_GLYPH: &str = "?";

const IONICONS: &[(&str, &str)] = &[
    ("flame", "🔥"),
    ("heart", "♥"),
    ("heart-outline", "♡"),
    ("chatbubbles", "💬"),
    ("person", "☺"),
    ("settings", "⚙"),
    ("star", "★"),
    ("location", "⌖"),
    ("close", "✕"),
    ("checkmark", "✓"),
];

const MATERIAL_COMMUNITY: &[(&str, &str)] = &[
    ("cards-heart", "♥"),
    ("cards", "▣"),
    ("message-text", "✉"),
    ("account-circle", "◉"),
    ("cog", "⚙"),
];

const FONT_AWESOME: &[(&str, &str)] = &[
    ("fire", "🔥"),
    ("heart", "♥"),
    ("comments", "💬"),
    ("user", "☺"),
    ("gear", "⚙"),
];

fn family_table(family: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match family {
        "ionicons" => Some(IONICONS),
        "material-community" => Some(MATERIAL_COMMUNITY),
        "font-awesome" => Some(FONT_AWESOME),
        _ => None,
    }
}

/// Resolve an icon to a glyph
pub fn resolve(family: &str, name: &str) -> &'static str {
    let table = match family_table(family) {
        Some(table) => table,
        None => {
            tracing::debug!(family, "unknown icon family, using default");
            IONICONS
        }
    };

    table
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, glyph)| *glyph)
        .unwrap_or(MISSING_GLYPH)
}

/// Resolve an [`IconRef`]
pub fn glyph(icon: IconRef) -> &'static str {
    resolve(icon.family, icon.name)
}
