//! Glyph measurement and rasterization
//!
//! Text on the canvas goes through the [`Glyphs`] trait so that any font
//! engine can back it. [`MonoGlyphs`] is the built-in source using the
//! embedded-graphics ASCII mono fonts; the composer falls back to it whenever
//! another source fails.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::prelude::Point;
//! use epd2in7b::font::{Glyphs, MonoGlyphs};
//! use epd2in7b::InkMask;
//!
//! let mut mask = InkMask::new(64, 16);
//! assert_eq!(MonoGlyphs.measure("Hi", 10), Ok(12));
//! MonoGlyphs.rasterize("Hi", Point::new(0, 0), 10, &mut mask).unwrap();
//! assert!(!mask.is_blank());
//! ```

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_6X10, FONT_6X13, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text, renderer::TextRenderer},
};

use crate::error::GlyphError;
use crate::mask::InkMask;

/// A source of glyphs for canvas text
///
/// `size` is the requested line height in pixels. Text is placed with its
/// top-left corner at `origin`.
pub trait Glyphs {
    /// Width in pixels of `text` at `size`
    fn measure(&self, text: &str, size: u32) -> Result<u32, GlyphError>;

    /// Draw `text` as ink into `target`
    fn rasterize(
        &self,
        text: &str,
        origin: Point,
        size: u32,
        target: &mut InkMask,
    ) -> Result<(), GlyphError>;
}

impl<G: Glyphs + ?Sized> Glyphs for &G {
    fn measure(&self, text: &str, size: u32) -> Result<u32, GlyphError> {
        (**self).measure(text, size)
    }

    fn rasterize(
        &self,
        text: &str,
        origin: Point,
        size: u32,
        target: &mut InkMask,
    ) -> Result<(), GlyphError> {
        (**self).rasterize(text, origin, size, target)
    }
}

/// Built-in fixed-width ASCII font
///
/// Picks the closest of three mono fonts: 6x10 up to size 10, 6x13 up to
/// size 13, 10x20 above. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoGlyphs;

impl MonoGlyphs {
    /// Font used for a requested size
    pub fn font(size: u32) -> &'static MonoFont<'static> {
        match size {
            0..=10 => &FONT_6X10,
            11..=13 => &FONT_6X13,
            _ => &FONT_10X20,
        }
    }

    /// Width of `text` in pixels
    pub fn width(text: &str, size: u32) -> u32 {
        Self::style(size)
            .measure_string(text, Point::zero(), Baseline::Top)
            .bounding_box
            .size
            .width
    }

    /// Draw `text` with its top-left corner at `origin`
    pub fn draw(text: &str, origin: Point, size: u32, target: &mut InkMask) {
        let Ok(_) = Text::with_baseline(text, origin, Self::style(size), Baseline::Top).draw(target);
    }

    fn style(size: u32) -> MonoTextStyle<'static, BinaryColor> {
        MonoTextStyle::new(Self::font(size), BinaryColor::On)
    }
}

impl Glyphs for MonoGlyphs {
    fn measure(&self, text: &str, size: u32) -> Result<u32, GlyphError> {
        Ok(Self::width(text, size))
    }

    fn rasterize(
        &self,
        text: &str,
        origin: Point,
        size: u32,
        target: &mut InkMask,
    ) -> Result<(), GlyphError> {
        Self::draw(text, origin, size, target);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_selection() {
        assert_eq!(MonoGlyphs::font(8).character_size.height, 10);
        assert_eq!(MonoGlyphs::font(12).character_size.height, 13);
        assert_eq!(MonoGlyphs::font(24).character_size.height, 20);
    }

    #[test]
    fn test_measure() {
        assert_eq!(MonoGlyphs.measure("", 10), Ok(0));
        assert_eq!(MonoGlyphs.measure("abc", 10), Ok(18));
        assert_eq!(MonoGlyphs.measure("abc", 20), Ok(30));
    }

    #[test]
    fn test_rasterize_stays_in_text_box() {
        let mut mask = InkMask::new(100, 40);
        MonoGlyphs
            .rasterize("WM", Point::new(20, 5), 10, &mut mask)
            .unwrap();
        assert!(!mask.is_blank());
        for y in 0..40 {
            for x in 0..100 {
                if mask.get(x, y) {
                    assert!((20..32).contains(&x), "x = {x}");
                    assert!((5..15).contains(&y), "y = {y}");
                }
            }
        }
    }

    #[test]
    fn test_rasterize_clips_off_canvas() {
        let mut mask = InkMask::new(8, 8);
        MonoGlyphs
            .rasterize("XYZ", Point::new(-4, -4), 10, &mut mask)
            .unwrap();
        assert!(mask.count() < 64);
    }
}
