//! Level presets: `;`-separated lists of `WxH` board sizes.

use crate::board::GridSize;
use crate::core::Result;

/// What a preset run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PresetReport {
    /// Boards started, in order.
    pub started: Vec<GridSize>,
    /// Entries that were skipped, as written.
    pub skipped: Vec<String>,
}

/// Parse every entry of a preset, in order.
///
/// Blank entries (for example from a trailing `;`) are ignored. Each other
/// entry parses on its own, so one malformed token does not affect the rest.
///
/// ```
/// use rust_pairs::round::parse_preset;
///
/// let entries = parse_preset("2x2; bad ;3x3;");
/// assert_eq!(entries.len(), 3);
/// assert!(entries[0].is_ok());
/// assert!(entries[1].is_err());
/// assert!(entries[2].is_ok());
/// ```
#[must_use]
pub fn parse_preset(preset: &str) -> Vec<Result<GridSize>> {
    preset.split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::parse::<GridSize>)
        .collect()
}
