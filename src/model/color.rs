//! Swatch colours for resources.

use rand::Rng;
use std::fmt;

/// Hex digits a light swatch may use. Every digit is at least `B`, so each channel
/// lands in `0xBB..=0xFF`.
const LIGHT_DIGITS: [u8; 5] = [0xB, 0xC, 0xD, 0xE, 0xF];

/// An RGB swatch shown behind a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Draws six hex digits independently and uniformly from `B`..=`F`.
    ///
    /// Collisions between resources are allowed.
    pub fn random_light<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut digit = || LIGHT_DIGITS[rng.random_range(0..LIGHT_DIGITS.len())];
        let mut channels = [0u8; 3];
        for channel in &mut channels {
            *channel = (digit() << 4) | digit();
        }
        Self(channels)
    }

    pub fn is_light(&self) -> bool {
        self.0
            .iter()
            .all(|c| (c >> 4) >= LIGHT_DIGITS[0] && (c & 0x0F) >= LIGHT_DIGITS[0])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}
