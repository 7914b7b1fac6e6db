use std::fmt;

/// Number of hue slots used when the feed count is unknown.
pub const DEFAULT_COLOR_SLOTS: usize = 12;

const SATURATION: u8 = 70;
const LIGHTNESS: u8 = 70;
const ALPHA: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslaColor {
    pub hue: f64,
    pub saturation: u8,
    pub lightness: u8,
    pub alpha: f64,
}

impl fmt::Display for HslaColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// Spread `total` colors evenly around the hue circle and pick the one for `index`.
///
/// A `total` of zero falls back to [`DEFAULT_COLOR_SLOTS`]. The index is reduced
/// modulo `total` first so `generate_color(i, t) == generate_color(i + t, t)` holds
/// exactly rather than up to float rounding.
pub fn generate_color(index: usize, total: usize) -> HslaColor {
    let total = if total == 0 { DEFAULT_COLOR_SLOTS } else { total };
    let hue = ((index % total) * 360) as f64 / total as f64;

    HslaColor {
        hue: hue % 360.0,
        saturation: SATURATION,
        lightness: LIGHTNESS,
        alpha: ALPHA,
    }
}
