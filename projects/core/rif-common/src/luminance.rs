//! RGB to luminance conversion.

/// Red weight of the luminance formula.
pub const RED_WEIGHT: f64 = 0.2125;
/// Green weight of the luminance formula.
pub const GREEN_WEIGHT: f64 = 0.7154;
/// Blue weight of the luminance formula.
pub const BLUE_WEIGHT: f64 = 0.0721;

/// Converts an RGB colour to an 8-bit luminance value.
///
/// The weighted sum is evaluated in `f64` in red, green, blue order and rounded
/// half-to-even, so exact `.5` results round towards the even neighbour.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    let value = RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64;
    // Saturating cast; the weights sum to 1.0 so the value never leaves 0..=255 by more than an ulp.
    value.round_ties_even() as u8
}
