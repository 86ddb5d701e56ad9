//! Additive 3-channel colour
//!
//! Each channel is either fully lit or dark. Beams carry a colour, filters
//! and tinted mirrors narrow it with [`LuxColour::mask`], and a beam whose
//! colour reaches black stops propagating.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One bit per red, green and blue channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LuxColour {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl LuxColour {
    pub const WHITE: Self = Self::new(true, true, true);
    pub const RED: Self = Self::new(true, false, false);
    pub const GREEN: Self = Self::new(false, true, false);
    pub const BLUE: Self = Self::new(false, false, true);
    pub const YELLOW: Self = Self::new(true, true, false);
    pub const MAGENTA: Self = Self::new(true, false, true);
    pub const CYAN: Self = Self::new(false, true, true);
    pub const BLACK: Self = Self::new(false, false, false);

    pub const fn new(red: bool, green: bool, blue: bool) -> Self {
        Self { red, green, blue }
    }

    /// Channel-wise AND
    #[inline]
    pub const fn mask(self, other: Self) -> Self {
        Self {
            red: self.red && other.red,
            green: self.green && other.green,
            blue: self.blue && other.blue,
        }
    }

    /// Channel-wise NOT
    #[inline]
    pub const fn invert(self) -> Self {
        Self {
            red: !self.red,
            green: !self.green,
            blue: !self.blue,
        }
    }

    /// No light left in any channel
    #[inline]
    pub const fn is_black(self) -> bool {
        !(self.red || self.green || self.blue)
    }

    /// Number of lit channels
    pub fn channel_count(self) -> u32 {
        self.red as u32 + self.green as u32 + self.blue as u32
    }

    pub fn name(self) -> &'static str {
        match (self.red, self.green, self.blue) {
            (true, true, true) => "white",
            (true, true, false) => "yellow",
            (true, false, true) => "magenta",
            (true, false, false) => "red",
            (false, true, true) => "cyan",
            (false, true, false) => "green",
            (false, false, true) => "blue",
            (false, false, false) => "black",
        }
    }

    /// Normalized RGBA for vertex colouring
    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let channel = |on: bool| if on { 1.0 } else { 0.0 };
        [channel(self.red), channel(self.green), channel(self.blue), alpha]
    }
}

impl fmt::Display for LuxColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
