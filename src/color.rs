//! Colors and ink planes for the tri-color panel
//!
//! The panel shows exactly three colors. White is the bare substrate; black
//! and red are pigments, each driven by its own bit plane.
//!
//! | Color | Palette index | Black plane | Red plane |
//! |-------|---------------|-------------|-----------|
//! | Black | 0             | 1           | 0         |
//! | Red   | 1             | 0           | 1         |
//! | White | 2             | 0           | 0         |
//!
//! ## Example
//!
//! ```
//! use epd2in7b::{Color, Plane};
//!
//! assert_eq!(Color::Black.plane(), Some(Plane::Black));
//! assert_eq!(Color::Red.plane(), Some(Plane::Red));
//! assert_eq!(Color::White.plane(), None);
//! assert_eq!(Color::from_index(1), Some(Color::Red));
//! ```

/// Colors the panel can display
///
/// The discriminant is the palette index used by the dither engine. Ties in
/// nearest-color search resolve towards the lower index.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Color {
    /// Black pigment
    Black = 0,
    /// Red pigment
    Red = 1,
    /// Bare substrate (no ink on either plane)
    White = 2,
}

impl Color {
    /// All palette entries in index order
    pub const ALL: [Self; 3] = [Self::Black, Self::Red, Self::White];

    /// Palette index of this color
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a color by palette index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Black),
            1 => Some(Self::Red),
            2 => Some(Self::White),
            _ => None,
        }
    }

    /// Reference sRGB value of the pigment as seen by the dither engine
    pub const fn srgb(self) -> [u8; 3] {
        match self {
            Self::Black => [0, 0, 0],
            Self::Red => [255, 0, 0],
            Self::White => [255, 255, 255],
        }
    }

    /// The ink plane that carries this color, if any
    pub const fn plane(self) -> Option<Plane> {
        match self {
            Self::Black => Some(Plane::Black),
            Self::Red => Some(Plane::Red),
            Self::White => None,
        }
    }
}

/// One of the two ink planes
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum Plane {
    /// Black pigment plane, sent with `DATA_START_TRANSMISSION_1`
    #[default]
    Black,
    /// Red pigment plane, sent with `DATA_START_TRANSMISSION_2`
    Red,
}

impl Plane {
    /// The color this plane paints
    pub const fn color(self) -> Color {
        match self {
            Self::Black => Color::Black,
            Self::Red => Color::Red,
        }
    }
}

impl core::fmt::Display for Plane {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Black => write!(f, "black"),
            Self::Red => write!(f, "red"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for color in Color::ALL {
            assert_eq!(Color::from_index(color.index()), Some(color));
        }
        assert_eq!(Color::from_index(3), None);
    }

    #[test]
    fn test_palette_order() {
        assert_eq!(Color::Black.index(), 0);
        assert_eq!(Color::Red.index(), 1);
        assert_eq!(Color::White.index(), 2);
    }

    #[test]
    fn test_plane_color_pairs() {
        assert_eq!(Plane::Black.color().plane(), Some(Plane::Black));
        assert_eq!(Plane::Red.color().plane(), Some(Plane::Red));
    }
}
