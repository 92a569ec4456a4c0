//! Tri-color error-diffusion dithering
//!
//! Quantizes a full-color image to the panel's three colors and splits the
//! result into a black mask and a red mask.
//!
//! ## Pipeline
//!
//! 1. Optional boost: saturation, then contrast (see [`DitherOptions`])
//! 2. Convert every pixel to CIELAB
//! 3. Serpentine scan: even rows left to right, odd rows right to left
//! 4. Pick the nearest palette entry; ties go to the lower palette index
//! 5. Diffuse the residual to unvisited neighbours:
//!
//! ```text
//!   scan →      *    7/16
//!        3/16  5/16  1/16
//! ```
//!
//! On right-to-left rows the kernel is mirrored. Taps that fall outside the
//! image are dropped.
//!
//! Each decision depends on error from pixels visited before it, so the loop
//! is strictly sequential. The output is bit-for-bit reproducible.
//!
//! ## Example
//!
//! ```
//! use epd2in7b::dither::{dither, DitherOptions, SourceImage};
//! use epd2in7b::{HEIGHT, WIDTH};
//!
//! let pixels = vec![[255u8, 255, 255]; WIDTH as usize * HEIGHT as usize];
//! let image = SourceImage::new(WIDTH, HEIGHT, &pixels).unwrap();
//! let (black, red) = dither(&image, &DitherOptions::default()).unwrap();
//! assert!(black.is_blank());
//! assert!(red.is_blank());
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::color::Color;
use crate::config::{HEIGHT, WIDTH};
use crate::error::{BuilderError, InputError};
use crate::lab::{Lab, convert_pixels};
use crate::mask::InkMask;

/// Default saturation multiplier
pub const DEFAULT_SATURATION: f32 = 2.5;
/// Default contrast multiplier
pub const DEFAULT_CONTRAST: f32 = 1.3;

/// Diffusion weight for the next pixel in scan direction
const WEIGHT_AHEAD: f32 = 7.0 / 16.0;
/// Next row, behind the scan direction
const WEIGHT_BEHIND_BELOW: f32 = 3.0 / 16.0;
/// Directly below
const WEIGHT_BELOW: f32 = 5.0 / 16.0;
/// Next row, ahead of the scan direction
const WEIGHT_AHEAD_BELOW: f32 = 1.0 / 16.0;

/// A borrowed sRGB image
#[derive(Clone, Copy, Debug)]
pub struct SourceImage<'a> {
    width: u16,
    height: u16,
    pixels: &'a [[u8; 3]],
}

impl<'a> SourceImage<'a> {
    /// Wrap row-major sRGB pixels
    ///
    /// # Errors
    ///
    /// Returns [`InputError::PixelCount`] if `pixels` does not hold exactly
    /// `width * height` entries.
    pub fn new(width: u16, height: u16, pixels: &'a [[u8; 3]]) -> Result<Self, InputError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(InputError::PixelCount {
                expected,
                provided: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Row-major pixels
    pub fn pixels(&self) -> &'a [[u8; 3]] {
        self.pixels
    }
}

/// Pre-dither enhancement settings
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DitherOptions {
    saturation: f32,
    contrast: f32,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            saturation: DEFAULT_SATURATION,
            contrast: DEFAULT_CONTRAST,
        }
    }
}

impl DitherOptions {
    /// Start from the defaults (2.5x saturation, 1.3x contrast)
    pub fn builder() -> DitherOptionsBuilder {
        DitherOptionsBuilder {
            options: Self::default(),
        }
    }

    /// Options that skip enhancement entirely
    pub const fn unboosted() -> Self {
        Self {
            saturation: 1.0,
            contrast: 1.0,
        }
    }

    /// Saturation multiplier; 1.0 leaves colors unchanged, 0.0 is grayscale
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Contrast multiplier around the mean luma; 1.0 leaves the image unchanged
    pub fn contrast(&self) -> f32 {
        self.contrast
    }
}

/// Builder for [`DitherOptions`]
#[must_use]
pub struct DitherOptionsBuilder {
    options: DitherOptions,
}

impl DitherOptionsBuilder {
    /// Set the saturation multiplier
    pub fn saturation(mut self, value: f32) -> Self {
        self.options.saturation = value;
        self
    }

    /// Set the contrast multiplier
    pub fn contrast(mut self, value: f32) -> Self {
        self.options.contrast = value;
        self
    }

    /// Validate and build
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError`] if a multiplier is negative or not finite.
    pub fn build(self) -> Result<DitherOptions, BuilderError> {
        let DitherOptions {
            saturation,
            contrast,
        } = self.options;
        if !saturation.is_finite() || saturation < 0.0 {
            return Err(BuilderError::InvalidSaturation(saturation));
        }
        if !contrast.is_finite() || contrast < 0.0 {
            return Err(BuilderError::InvalidContrast(contrast));
        }
        Ok(self.options)
    }
}

/// The three panel colors, pre-converted to CIELAB
#[derive(Clone, Debug)]
pub struct Palette {
    entries: [Lab; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// Convert the reference colors once
    pub fn new() -> Self {
        Self {
            entries: Color::ALL.map(|color| Lab::from_srgb(color.srgb())),
        }
    }

    /// CIELAB value of a palette entry
    pub fn lab(&self, color: Color) -> Lab {
        self.entries[color.index()]
    }

    /// Nearest entry by squared CIELAB distance, lowest index on ties
    pub fn nearest(&self, value: &Lab) -> Color {
        let mut best = Color::Black;
        let mut best_distance = f32::INFINITY;
        for color in Color::ALL {
            let distance = value.distance_squared(&self.entries[color.index()]);
            if distance < best_distance {
                best_distance = distance;
                best = color;
            }
        }
        best
    }
}

/// Per-pixel palette decisions for one frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quantized {
    width: u16,
    height: u16,
    colors: Vec<Color>,
}

impl Quantized {
    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Color chosen for (x, y)
    pub fn get(&self, x: u16, y: u16) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.colors
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Row-major colors
    pub fn as_slice(&self) -> &[Color] {
        &self.colors
    }

    /// Split into (black mask, red mask)
    pub fn to_masks(&self) -> (InkMask, InkMask) {
        let mut black = InkMask::new(self.width, self.height);
        let mut red = InkMask::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                match self.colors[y as usize * self.width as usize + x as usize] {
                    Color::Black => black.set(x, y, true),
                    Color::Red => red.set(x, y, true),
                    Color::White => {}
                }
            }
        }
        (black, red)
    }
}

/// Error-diffusion quantizer bound to a palette
#[derive(Clone, Debug, Default)]
pub struct Ditherer {
    palette: Palette,
}

impl Ditherer {
    /// Create a ditherer with the panel palette
    pub fn new() -> Self {
        Self {
            palette: Palette::new(),
        }
    }

    /// The palette in use
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Quantize CIELAB pixels with serpentine error diffusion
    ///
    /// # Errors
    ///
    /// Returns [`InputError::PixelCount`] if `pixels` is not `width * height`
    /// long.
    pub fn quantize(
        &self,
        width: u16,
        height: u16,
        pixels: &[Lab],
    ) -> Result<Quantized, InputError> {
        let w = width as usize;
        let h = height as usize;
        if pixels.len() != w * h {
            return Err(InputError::PixelCount {
                expected: w * h,
                provided: pixels.len(),
            });
        }

        let mut error = vec![Lab::default(); w * h];
        let mut colors = vec![Color::White; w * h];

        for y in 0..h {
            let reverse = y % 2 == 1;
            for step in 0..w {
                let x = if reverse { w - 1 - step } else { step };
                let idx = y * w + x;

                let value = pixels[idx] + error[idx];
                let chosen = self.palette.nearest(&value);
                colors[idx] = chosen;

                let residual = value - self.palette.lab(chosen);
                diffuse(&mut error, w, h, x, y, reverse, residual);
            }
        }

        Ok(Quantized {
            width,
            height,
            colors,
        })
    }

    /// Boost, convert and quantize an sRGB image of any size
    pub fn quantize_image(
        &self,
        image: &SourceImage<'_>,
        options: &DitherOptions,
    ) -> Result<Quantized, InputError> {
        let boosted = enhance(image.pixels, options);
        let lab = convert_pixels(&boosted);
        self.quantize(image.width, image.height, &lab)
    }

    /// Dither a canvas-sized image into (black mask, red mask)
    ///
    /// # Errors
    ///
    /// Returns [`InputError::DimensionMismatch`] unless the image is exactly
    /// [`WIDTH`] × [`HEIGHT`].
    pub fn dither(
        &self,
        image: &SourceImage<'_>,
        options: &DitherOptions,
    ) -> Result<(InkMask, InkMask), InputError> {
        if (image.width, image.height) != (WIDTH, HEIGHT) {
            return Err(InputError::DimensionMismatch {
                expected: (WIDTH, HEIGHT),
                provided: (image.width, image.height),
            });
        }
        let quantized = self.quantize_image(image, options)?;
        let (black, red) = quantized.to_masks();
        log::debug!(
            "Dithered {}x{}: {} black, {} red",
            image.width,
            image.height,
            black.count(),
            red.count()
        );
        Ok((black, red))
    }
}

/// Spread `residual` from (x, y) over the four unvisited neighbours
fn diffuse(
    error: &mut [Lab],
    w: usize,
    h: usize,
    x: usize,
    y: usize,
    reverse: bool,
    residual: Lab,
) {
    let right = Some(x + 1).filter(|&n| n < w);
    let left = x.checked_sub(1);
    let (ahead, behind) = if reverse { (left, right) } else { (right, left) };

    if let Some(ax) = ahead {
        error[y * w + ax] += residual * WEIGHT_AHEAD;
    }
    if y + 1 >= h {
        return;
    }
    let below = (y + 1) * w;
    if let Some(bx) = behind {
        error[below + bx] += residual * WEIGHT_BEHIND_BELOW;
    }
    error[below + x] += residual * WEIGHT_BELOW;
    if let Some(ax) = ahead {
        error[below + ax] += residual * WEIGHT_AHEAD_BELOW;
    }
}

/// Dither a canvas-sized image with a fresh palette
///
/// Convenience wrapper around [`Ditherer::dither`].
pub fn dither(
    image: &SourceImage<'_>,
    options: &DitherOptions,
) -> Result<(InkMask, InkMask), InputError> {
    Ditherer::new().dither(image, options)
}

/// 8-bit ITU-R 601 luma in 16.16 fixed point, rounded
#[inline]
fn luma(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((r * 19_595 + g * 38_470 + b * 7_471 + 0x8000) >> 16) as u8
}

/// Blend `value` away from `reference` by `factor`, truncated back to a byte
#[inline]
fn stretch(reference: u8, value: u8, factor: f32) -> u8 {
    let reference = reference as f32;
    let out = reference + factor * (value as f32 - reference);
    out.clamp(0.0, 255.0) as u8
}

/// Apply saturation then contrast
///
/// Saturation blends each pixel away from its own 8-bit luma. Contrast blends
/// away from the mean luma of the saturated image, rounded half up. Blended
/// channels are truncated, not rounded. A factor of 1.0 is the identity for
/// either stage.
pub fn enhance(pixels: &[[u8; 3]], options: &DitherOptions) -> Vec<[u8; 3]> {
    let mut out = pixels.to_vec();

    if options.saturation != 1.0 {
        for px in &mut out {
            let gray = luma(*px);
            *px = px.map(|c| stretch(gray, c, options.saturation));
        }
    }

    if options.contrast != 1.0 && !out.is_empty() {
        let total: u64 = out.iter().map(|px| u64::from(luma(*px))).sum();
        let mean = libm::floor(total as f64 / out.len() as f64 + 0.5) as u8;
        for px in &mut out {
            *px = px.map(|c| stretch(mean, c, options.contrast));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(rgb: [u8; 3]) -> Vec<[u8; 3]> {
        vec![rgb; WIDTH as usize * HEIGHT as usize]
    }

    #[test]
    fn test_uniform_white_has_no_ink() {
        let pixels = canvas([255, 255, 255]);
        let image = SourceImage::new(WIDTH, HEIGHT, &pixels).unwrap();
        let (black, red) = dither(&image, &DitherOptions::default()).unwrap();
        assert_eq!(black.size(), (WIDTH, HEIGHT));
        assert_eq!(red.size(), (WIDTH, HEIGHT));
        assert!(black.is_blank());
        assert!(red.is_blank());
    }

    #[test]
    fn test_uniform_black_is_all_black_ink() {
        let pixels = canvas([0, 0, 0]);
        let image = SourceImage::new(WIDTH, HEIGHT, &pixels).unwrap();
        let (black, red) = dither(&image, &DitherOptions::default()).unwrap();
        assert!(black.is_full());
        assert!(red.is_blank());
    }

    #[test]
    fn test_uniform_red_is_all_red_ink() {
        let pixels = canvas([255, 0, 0]);
        let image = SourceImage::new(WIDTH, HEIGHT, &pixels).unwrap();
        let (black, red) = dither(&image, &DitherOptions::unboosted()).unwrap();
        assert!(black.is_blank());
        assert!(red.is_full());
    }

    #[test]
    fn test_planes_never_overlap_and_output_is_deterministic() {
        let pixels: Vec<[u8; 3]> = (0..HEIGHT as usize)
            .flat_map(|y| {
                (0..WIDTH as usize).map(move |x| {
                    [
                        (x * 255 / (WIDTH as usize - 1)) as u8,
                        (y * 255 / (HEIGHT as usize - 1)) as u8,
                        ((x + y) % 256) as u8,
                    ]
                })
            })
            .collect();
        let image = SourceImage::new(WIDTH, HEIGHT, &pixels).unwrap();
        let ditherer = Ditherer::new();

        let (black, red) = ditherer.dither(&image, &DitherOptions::default()).unwrap();
        for (b, r) in black.as_slice().iter().zip(red.as_slice()) {
            assert!(!(*b && *r));
        }
        assert!(black.count() > 0);
        assert!(red.count() > 0);

        let (black_again, red_again) = ditherer
            .dither(&image, &DitherOptions::default())
            .unwrap();
        assert_eq!(black, black_again);
        assert_eq!(red, red_again);
    }

    #[test]
    fn test_dimension_mismatch_fails_fast() {
        let pixels = vec![[0u8; 3]; 176 * 264];
        let image = SourceImage::new(176, 264, &pixels).unwrap();
        let result = dither(&image, &DitherOptions::default());
        assert_eq!(
            result,
            Err(InputError::DimensionMismatch {
                expected: (264, 176),
                provided: (176, 264)
            })
        );
    }

    #[test]
    fn test_source_image_rejects_short_pixels() {
        let pixels = vec![[0u8; 3]; 10];
        assert!(matches!(
            SourceImage::new(4, 4, &pixels),
            Err(InputError::PixelCount {
                expected: 16,
                provided: 10
            })
        ));
    }

    #[test]
    fn test_exact_palette_value_has_zero_residual() {
        let ditherer = Ditherer::new();
        let red = ditherer.palette().lab(Color::Red);
        // Neighbour on the right sits halfway between red and white; any
        // leaked error would tip it one way or the other.
        let white = ditherer.palette().lab(Color::White);
        let probe = Lab::new(
            (red.l + white.l) / 2.0,
            (red.a + white.a) / 2.0,
            (red.b + white.b) / 2.0,
        );
        let out = ditherer.quantize(2, 1, &[red, probe]).unwrap();
        assert_eq!(out.get(0, 0), Some(Color::Red));

        let alone = ditherer.quantize(1, 1, &[probe]).unwrap();
        assert_eq!(out.get(1, 0), alone.get(0, 0));
    }

    #[test]
    fn test_first_row_scans_left_to_right() {
        let ditherer = Ditherer::new();
        let white = ditherer.palette().lab(Color::White);
        let gray55 = Lab::new(55.0, 0.0, 0.0);
        let gray60 = Lab::new(60.0, 0.0, 0.0);

        // Left to right: 55 -> white (residual -45), pushes 60 down to ~40 -> black.
        // Right to left would instead turn 60 white and 55 black.
        let out = ditherer.quantize(3, 1, &[white, gray55, gray60]).unwrap();
        assert_eq!(out.as_slice(), &[Color::White, Color::White, Color::Black]);
    }

    #[test]
    fn test_second_row_scans_right_to_left() {
        let ditherer = Ditherer::new();
        let white = ditherer.palette().lab(Color::White);
        let gray55 = Lab::new(55.0, 0.0, 0.0);
        let gray60 = Lab::new(60.0, 0.0, 0.0);

        let pixels = [white, white, white, white, gray55, gray60];
        let out = ditherer.quantize(3, 2, &pixels).unwrap();
        assert_eq!(out.get(2, 1), Some(Color::White));
        assert_eq!(out.get(1, 1), Some(Color::Black));
        assert_eq!(out.get(0, 1), Some(Color::White));
    }

    #[test]
    fn test_error_is_dropped_at_edges() {
        // A single pixel has no neighbours; nothing to diffuse into.
        let ditherer = Ditherer::new();
        let out = ditherer.quantize(1, 1, &[Lab::new(45.0, 0.0, 0.0)]).unwrap();
        assert_eq!(out.get(0, 0), Some(Color::Black));
    }

    #[test]
    fn test_diffuse_weights_left_to_right() {
        let mut error = vec![Lab::default(); 9];
        diffuse(&mut error, 3, 3, 1, 0, false, Lab::new(16.0, 0.0, 0.0));
        assert_eq!(error[2].l, 7.0); // (2, 0)
        assert_eq!(error[3].l, 3.0); // (0, 1)
        assert_eq!(error[4].l, 5.0); // (1, 1)
        assert_eq!(error[5].l, 1.0); // (2, 1)
        assert_eq!(error[0].l, 0.0);
    }

    #[test]
    fn test_diffuse_weights_mirror_right_to_left() {
        let mut error = vec![Lab::default(); 9];
        diffuse(&mut error, 3, 3, 1, 1, true, Lab::new(16.0, 0.0, 0.0));
        assert_eq!(error[3].l, 7.0); // (0, 1)
        assert_eq!(error[8].l, 3.0); // (2, 2)
        assert_eq!(error[7].l, 5.0); // (1, 2)
        assert_eq!(error[6].l, 1.0); // (0, 2)
        assert_eq!(error[5].l, 0.0);
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let palette = Palette::new();
        let black = palette.lab(Color::Black);
        let white = palette.lab(Color::White);
        let midpoint = Lab::new(
            (black.l + white.l) / 2.0,
            (black.a + white.a) / 2.0,
            (black.b + white.b) / 2.0,
        );
        // Red is far from the neutral axis, so this is a black/white tie at worst.
        let chosen = palette.nearest(&midpoint);
        assert_ne!(chosen, Color::Red);

        let exact = Palette {
            entries: [Lab::new(0.0, 0.0, 0.0), Lab::new(0.0, 0.0, 0.0), white],
        };
        assert_eq!(exact.nearest(&Lab::new(1.0, 0.0, 0.0)), Color::Black);
    }

    #[test]
    fn test_enhance_identity() {
        let pixels = [[10, 20, 30], [200, 100, 50]];
        assert_eq!(enhance(&pixels, &DitherOptions::unboosted()), pixels.to_vec());
    }

    #[test]
    fn test_enhance_keeps_grays_and_extremes() {
        let pixels = [[0, 0, 0], [255, 255, 255]];
        let options = DitherOptions::builder().contrast(1.0).build().unwrap();
        assert_eq!(enhance(&pixels, &options), pixels.to_vec());
    }

    #[test]
    fn test_enhance_saturation_pushes_away_from_luma() {
        let options = DitherOptions::builder()
            .saturation(2.0)
            .contrast(1.0)
            .build()
            .unwrap();
        // luma 130
        let out = enhance(&[[200, 100, 100]], &options);
        assert_eq!(out, vec![[255, 70, 70]]);
    }

    #[test]
    fn test_enhance_contrast_uses_mean_luma() {
        let options = DitherOptions::builder()
            .saturation(1.0)
            .contrast(2.0)
            .build()
            .unwrap();
        // mean luma = 100
        let out = enhance(&[[50, 50, 50], [150, 150, 150]], &options);
        assert_eq!(out, vec![[0, 0, 0], [200, 200, 200]]);
    }

    #[test]
    fn test_enhance_truncates_blended_channels() {
        let options = DitherOptions::builder()
            .saturation(1.5)
            .contrast(1.0)
            .build()
            .unwrap();
        // luma 100, blue 100 + 1.5 * 3 = 104.5
        assert_eq!(enhance(&[[100, 100, 103]], &options), vec![[100, 100, 104]]);
    }

    #[test]
    fn test_enhance_contrast_mean_rounds_half_up() {
        let options = DitherOptions::builder()
            .saturation(1.0)
            .contrast(1.5)
            .build()
            .unwrap();
        // mean 15.5 rounds to 16; 16 + 1.5 * 5 = 23.5 truncates to 23
        let out = enhance(&[[10, 10, 10], [21, 21, 21]], &options);
        assert_eq!(out, vec![[7, 7, 7], [23, 23, 23]]);
    }

    #[test]
    fn test_option_accessors() {
        let options = DitherOptions::builder().saturation(0.0).build().unwrap();
        assert_eq!(options.saturation(), 0.0);
        assert_eq!(options.contrast(), DEFAULT_CONTRAST);
    }

    #[test]
    fn test_builder_rejects_bad_multipliers() {
        assert!(matches!(
            DitherOptions::builder().saturation(f32::NAN).build(),
            Err(BuilderError::InvalidSaturation(_))
        ));
        assert_eq!(
            DitherOptions::builder().contrast(-0.5).build(),
            Err(BuilderError::InvalidContrast(-0.5))
        );
        assert_eq!(DitherOptions::builder().build(), Ok(DitherOptions::default()));
    }
}
