//! Error types for the crate
//!
//! - [`Error`] - Runtime errors from the panel driver
//! - [`InputError`] - Images, masks or buffers that do not fit the canvas
//! - [`BuilderError`] - Rejected configuration values
//! - [`GlyphError`] - Text rendering failures (recovered by font fallback)
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level SPI/GPIO errors
//!
//! ## Example
//!
//! ```
//! use epd2in7b::{BuilderError, DitherOptions};
//!
//! let result = DitherOptions::builder().saturation(-1.0).build();
//! assert!(matches!(result, Err(BuilderError::InvalidSaturation(_))));
//! ```

use crate::display::PanelState;
use crate::interface::DisplayInterface;

/// Errors that can occur when driving the panel
///
/// Generic over the interface type so the underlying hardware error is kept.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// SPI or GPIO failure during normal operation
    Interface(I::Error),
    /// The panel did not respond during initialization
    ///
    /// Raised when the reset and power-on sequence fails at the interface
    /// level. Callers should treat this as "no display attached" and shut the
    /// display path down rather than crash.
    DeviceNotFound(I::Error),
    /// Operation not allowed in the current session state
    InvalidState {
        /// State the panel was in
        state: PanelState,
        /// Operation that was refused
        operation: &'static str,
    },
    /// Mask pair does not match the canvas
    InvalidInput(InputError),
    /// Packed plane buffer has the wrong length
    BufferLength {
        /// Required length in bytes
        expected: usize,
        /// Provided length in bytes
        provided: usize,
    },
}

impl<I: DisplayInterface> From<InputError> for Error<I> {
    fn from(err: InputError) -> Self {
        Self::InvalidInput(err)
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
            Self::DeviceNotFound(e) => write!(f, "Display not found: {e:?}"),
            Self::InvalidState { state, operation } => {
                write!(f, "Cannot {operation} while panel is {state:?}")
            }
            Self::InvalidInput(e) => write!(f, "Invalid input: {e}"),
            Self::BufferLength { expected, provided } => {
                write!(
                    f,
                    "Plane buffer length: expected {expected} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Input that does not fit the canvas
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputError {
    /// Image or mask size differs from the expected canvas
    ///
    /// Images are never cropped or stretched to fit.
    DimensionMismatch {
        /// Expected (width, height)
        expected: (u16, u16),
        /// Provided (width, height)
        provided: (u16, u16),
    },
    /// Pixel data length does not agree with the declared dimensions
    PixelCount {
        /// width * height
        expected: usize,
        /// Number of pixels supplied
        provided: usize,
    },
}

impl core::fmt::Display for InputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, provided } => write!(
                f,
                "expected {}x{} pixels, got {}x{}",
                expected.0, expected.1, provided.0, provided.1
            ),
            Self::PixelCount { expected, provided } => {
                write!(f, "expected {expected} pixels, got {provided}")
            }
        }
    }
}

impl core::error::Error for InputError {}

/// Errors that can occur when building configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BuilderError {
    /// Saturation multiplier must be finite and non-negative
    InvalidSaturation(f32),
    /// Contrast multiplier must be finite and non-negative
    InvalidContrast(f32),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidSaturation(v) => write!(f, "Invalid saturation multiplier {v}"),
            Self::InvalidContrast(v) => write!(f, "Invalid contrast multiplier {v}"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Text rendering failures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphError {
    /// The font backing this glyph source is not loaded
    Unavailable,
}

impl core::fmt::Display for GlyphError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "Font unavailable"),
        }
    }
}

impl core::error::Error for GlyphError {}
