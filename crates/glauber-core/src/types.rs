use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, GlauberError};

/// Color index drawn from a [`Palette`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color(u32);

impl Color {
    /// Creates a color from its raw index.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw color index.
    pub const fn as_raw(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of available colors `{0, .., k-1}` for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Palette {
    size: u32,
}

impl Palette {
    /// Creates a palette with `size` colors. A palette must hold at least one color.
    pub fn new(size: u32) -> Result<Self, GlauberError> {
        if size == 0 {
            return Err(GlauberError::Config(
                ErrorInfo::new("invalid-palette", "palette must contain at least one color")
                    .with_context("colors", size.to_string())
                    .with_hint("set `colors` to a positive integer"),
            ));
        }
        Ok(Self { size })
    }

    /// Returns the number of colors `k`.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns whether the color belongs to this palette.
    pub fn contains(&self, color: Color) -> bool {
        color.as_raw() < self.size
    }

    /// Iterates over every color in ascending order.
    pub fn colors(&self) -> impl Iterator<Item = Color> {
        (0..self.size).map(Color::from_raw)
    }
}

impl TryFrom<u32> for Palette {
    type Error = GlauberError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Palette::new(value)
    }
}

impl From<Palette> for u32 {
    fn from(value: Palette) -> Self {
        value.size
    }
}
