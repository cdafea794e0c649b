//! Avatar colors for recipe contributors.
//!
//! Known family members have a fixed color. Anyone else gets a color derived
//! from their name, stable across runs and matching the colors the web
//! catalog has always shown for the same names.

/// Family roster, in display order.
const ROSTER: &[(&str, &str)] = &[
    ("Nan", "#d97706"),
    ("Wade", "#0369a1"),
    ("Shirley", "#e11d48"),
    ("Mom", "#059669"),
    ("Grandma", "#7c2d12"),
];

/// Contributor offered alongside the roster when adding a recipe.
pub const GUEST: &str = "Guest";

/// The fixed name-to-color roster, in display order.
#[must_use]
pub fn roster() -> &'static [(&'static str, &'static str)] {
    ROSTER
}

/// Look up a name in the roster. Matching is exact and case-sensitive.
#[must_use]
pub fn roster_color(name: &str) -> Option<&'static str> {
    ROSTER
        .iter()
        .find(|(member, _)| *member == name)
        .map(|(_, color)| *color)
}

/// Resolve the avatar color for a contributor.
///
/// Roster members get their roster color; every other name is hashed.
#[must_use]
pub fn avatar_color(name: &str) -> String {
    roster_color(name).map_or_else(|| hashed_color(name), str::to_string)
}

/// Deterministic color for a name outside the roster.
///
/// Accumulates `hash = code + (hash << 5) - hash` over the UTF-16 code units
/// with wrapping 32-bit arithmetic, then formats the low 24 bits as
/// `#RRGGBB` in uppercase.
#[must_use]
pub fn hashed_color(name: &str) -> String {
    let hash = name.encode_utf16().fold(0_i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    format!("#{:06X}", hash & 0x00FF_FFFF)
}
