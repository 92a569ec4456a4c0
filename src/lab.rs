//! sRGB to CIELAB conversion
//!
//! The dither engine measures color distance in CIELAB, where Euclidean
//! distance tracks perceived difference far better than raw sRGB. Conversion
//! runs sRGB → linear light → CIE XYZ (D65) → CIELAB.
//!
//! ```
//! use epd2in7b::lab::Lab;
//!
//! let white = Lab::from_srgb([255, 255, 255]);
//! assert!((white.l - 100.0).abs() < 0.01);
//!
//! let black = Lab::from_srgb([0, 0, 0]);
//! assert!(black.l.abs() < 1e-4);
//! ```

use alloc::vec::Vec;

/// sRGB → XYZ matrix for the D65 illuminant
const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_456_4, 0.357_576_1, 0.180_437_5],
    [0.212_672_9, 0.715_152_2, 0.072_175_0],
    [0.019_333_9, 0.119_192_0, 0.950_304_1],
];

/// D65 reference white in XYZ
const D65_WHITE: [f32; 3] = [0.950_47, 1.0, 1.088_83];

/// 6/29
const DELTA: f32 = 6.0 / 29.0;

/// A color in CIELAB space
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Lab {
    /// Lightness, 0 (black) to 100 (diffuse white)
    pub l: f32,
    /// Green (negative) to red (positive)
    pub a: f32,
    /// Blue (negative) to yellow (positive)
    pub b: f32,
}

impl Lab {
    /// Create a color from its components
    pub const fn new(l: f32, a: f32, b: f32) -> Self {
        Self { l, a, b }
    }

    /// Convert one sRGB sample
    pub fn from_srgb(rgb: [u8; 3]) -> Self {
        Self::from_linear([
            srgb_to_linear(rgb[0]),
            srgb_to_linear(rgb[1]),
            srgb_to_linear(rgb[2]),
        ])
    }

    /// Convert linear-light RGB in [0, 1]
    pub fn from_linear(rgb: [f32; 3]) -> Self {
        Self::from_xyz(linear_to_xyz(rgb))
    }

    /// Convert CIE XYZ (D65, Y of white = 1.0)
    pub fn from_xyz(xyz: [f32; 3]) -> Self {
        let fx = lab_f(xyz[0] / D65_WHITE[0]);
        let fy = lab_f(xyz[1] / D65_WHITE[1]);
        let fz = lab_f(xyz[2] / D65_WHITE[2]);
        Self {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Squared Euclidean distance
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}

impl core::ops::Add for Lab {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.l + rhs.l, self.a + rhs.a, self.b + rhs.b)
    }
}

impl core::ops::AddAssign for Lab {
    fn add_assign(&mut self, rhs: Self) {
        self.l += rhs.l;
        self.a += rhs.a;
        self.b += rhs.b;
    }
}

impl core::ops::Sub for Lab {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.l - rhs.l, self.a - rhs.a, self.b - rhs.b)
    }
}

impl core::ops::Mul<f32> for Lab {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.l * rhs, self.a * rhs, self.b * rhs)
    }
}

/// Decode one gamma-encoded sRGB channel to linear light
#[inline]
pub fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        libm::powf((c + 0.055) / 1.055, 2.4)
    }
}

/// Linear RGB → CIE XYZ
#[inline]
pub fn linear_to_xyz(rgb: [f32; 3]) -> [f32; 3] {
    let m = &SRGB_TO_XYZ;
    [
        m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
        m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
        m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
    ]
}

/// CIELAB transfer function
#[inline]
fn lab_f(t: f32) -> f32 {
    if t > DELTA * DELTA * DELTA {
        libm::cbrtf(t)
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Build the 256-entry sRGB → linear table
fn linear_table() -> [f32; 256] {
    let mut table = [0.0; 256];
    for (value, slot) in table.iter_mut().enumerate() {
        *slot = srgb_to_linear(value as u8);
    }
    table
}

/// Convert a slice of sRGB pixels
///
/// Each pixel is independent; the gamma curve is tabulated once per call.
/// Produces the same values as [`Lab::from_srgb`] pixel by pixel.
pub fn convert_pixels(pixels: &[[u8; 3]]) -> Vec<Lab> {
    let table = linear_table();
    pixels
        .iter()
        .map(|&[r, g, b]| {
            Lab::from_linear([
                table[r as usize],
                table[g as usize],
                table[b as usize],
            ])
        })
        .collect()
}
