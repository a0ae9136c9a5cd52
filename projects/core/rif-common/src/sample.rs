//! A single luminance + alpha pixel.

/// One pixel of a [`crate::PixelGrid`]: an 8-bit luminance value and an 8-bit alpha value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Sample {
    /// Grayscale intensity.
    pub luminance: u8,
    /// Coverage; `255` is fully opaque, `0` fully transparent.
    pub alpha: u8,
}

/// Sample used for block positions that fall outside the grid.
///
/// The sentinel is opaque (alpha `255`), so it counts towards the opaque-count of
/// any pattern that contains it.
pub const PADDING_SAMPLE: Sample = Sample::new(0, 255);

impl Sample {
    /// Creates a new sample.
    #[inline(always)]
    pub const fn new(luminance: u8, alpha: u8) -> Self {
        Self { luminance, alpha }
    }

    /// Creates a fully opaque sample.
    #[inline(always)]
    pub const fn opaque(luminance: u8) -> Self {
        Self::new(luminance, 255)
    }

    /// Returns `true` if the sample has any coverage, i.e. alpha is not `0`.
    #[inline(always)]
    pub const fn is_visible(self) -> bool {
        self.alpha != 0
    }

    /// Returns `true` if the sample needs an alpha channel to be represented,
    /// i.e. alpha is not `255`.
    #[inline(always)]
    pub const fn needs_alpha(self) -> bool {
        self.alpha != 255
    }

    /// Contribution of this sample to a pattern fingerprint.
    #[inline(always)]
    pub const fn weight(self) -> u64 {
        self.luminance as u64 + self.alpha as u64
    }
}

impl From<(u8, u8)> for Sample {
    fn from((luminance, alpha): (u8, u8)) -> Self {
        Self::new(luminance, alpha)
    }
}
