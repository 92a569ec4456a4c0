//! Boolean ink masks
//!
//! An [`InkMask`] records, for one plane, whether ink is present at each
//! pixel. A frame is always a pair of masks (black plane and red plane) of the
//! same size; a pixel with ink on neither plane shows the white substrate.
//!
//! With the `graphics` feature, a mask is an embedded-graphics
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) over
//! `BinaryColor`, where `On` means ink.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::InputError;

/// A width × height grid of ink flags for one plane
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InkMask {
    width: u16,
    height: u16,
    ink: Vec<bool>,
}

impl InkMask {
    /// Create a mask with no ink
    pub fn new(width: u16, height: u16) -> Self {
        Self::filled(width, height, false)
    }

    /// Create a mask with every pixel set to `ink`
    pub fn filled(width: u16, height: u16, ink: bool) -> Self {
        Self {
            width,
            height,
            ink: vec![ink; width as usize * height as usize],
        }
    }

    /// Build a mask from row-major ink flags
    ///
    /// # Errors
    ///
    /// Returns [`InputError::PixelCount`] if `ink` does not hold exactly
    /// `width * height` entries.
    pub fn from_vec(width: u16, height: u16, ink: Vec<bool>) -> Result<Self, InputError> {
        let expected = width as usize * height as usize;
        if ink.len() != expected {
            return Err(InputError::PixelCount {
                expected,
                provided: ink.len(),
            });
        }
        Ok(Self { width, height, ink })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// (width, height)
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Ink at (x, y); out-of-bounds pixels have no ink
    pub fn get(&self, x: u16, y: u16) -> bool {
        self.index(x, y).is_some_and(|i| self.ink[i])
    }

    /// Set ink at (x, y); out-of-bounds writes are ignored
    pub fn set(&mut self, x: u16, y: u16, ink: bool) {
        if let Some(i) = self.index(x, y) {
            self.ink[i] = ink;
        }
    }

    /// Set every pixel
    pub fn fill(&mut self, ink: bool) {
        self.ink.fill(ink);
    }

    /// Number of inked pixels
    pub fn count(&self) -> usize {
        self.ink.iter().filter(|ink| **ink).count()
    }

    /// True if no pixel carries ink
    pub fn is_blank(&self) -> bool {
        !self.ink.iter().any(|ink| *ink)
    }

    /// True if every pixel carries ink
    pub fn is_full(&self) -> bool {
        self.ink.iter().all(|ink| *ink)
    }

    /// Row-major ink flags
    pub fn as_slice(&self) -> &[bool] {
        &self.ink
    }

    /// Copy `other` into this mask with its top-left corner at (x, y)
    ///
    /// Covered pixels are overwritten, ink or not. Parts falling outside this
    /// mask are clipped.
    pub fn paste(&mut self, other: &Self, x: i32, y: i32) {
        for sy in 0..other.height {
            let dy = y + sy as i32;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..other.width {
                let dx = x + sx as i32;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                self.set(dx as u16, dy as u16, other.get(sx, sy));
            }
        }
    }

    /// Fail unless the mask is `width` × `height`
    pub fn check_size(&self, width: u16, height: u16) -> Result<(), InputError> {
        if self.size() != (width, height) {
            return Err(InputError::DimensionMismatch {
                expected: (width, height),
                provided: self.size(),
            });
        }
        Ok(())
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }
}

#[cfg(feature = "graphics")]
mod draw {
    use core::convert::Infallible;

    use embedded_graphics_core::{
        draw_target::DrawTarget,
        geometry::{OriginDimensions, Point, Size},
        pixelcolor::BinaryColor,
        prelude::Pixel,
    };

    use super::InkMask;

    impl DrawTarget for InkMask {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
        where
            Iter: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(Point { x, y }, color) in pixels {
                if x < 0 || y < 0 || x > u16::MAX as i32 || y > u16::MAX as i32 {
                    continue;
                }
                self.set(x as u16, y as u16, color.is_on());
            }
            Ok(())
        }
    }

    impl OriginDimensions for InkMask {
        fn size(&self) -> Size {
            Size::new(self.width as u32, self.height as u32)
        }
    }
}
