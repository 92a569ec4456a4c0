//! Tri-color E-Paper Imaging and Driver
//!
//! Renders content for the 2.7" black/white/red e-paper panel (IL91874
//! controller, 176x264) and drives it over SPI.
//!
//! ## Features
//!
//! - `no_std` compatible (needs `alloc`)
//! - `embedded-hal` v1.0 support
//! - Floyd-Steinberg dithering in CIELAB to the three panel colors
//! - Dual-plane canvas built on `embedded-graphics` (with `graphics` feature)
//! - Landscape 264x176 canvas, rotated into the panel's native layout
//!
//! ## Pipeline
//!
//! ```text
//! sRGB pixels --dither--> (black, red) masks --pack--> 5808-byte planes --> Display
//! drawing calls --Composer--^
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use epd2in7b::dither::{dither, DitherOptions, SourceImage};
//! use epd2in7b::{Builder, Display, Interface, HEIGHT, WIDTH};
//!
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! # let photo = vec![[128u8, 64, 32]; WIDTH as usize * HEIGHT as usize];
//! let interface = Interface::new(spi, dc, rst, busy);
//! let mut display = Display::new(interface, Builder::new().build());
//! if display.init(&mut delay).is_err() {
//!     return; // no panel attached
//! }
//!
//! let image = match SourceImage::new(WIDTH, HEIGHT, &photo) {
//!     Ok(image) => image,
//!     Err(_) => return,
//! };
//! let (black, red) = match dither(&image, &DitherOptions::default()) {
//!     Ok(masks) => masks,
//!     Err(_) => return,
//! };
//!
//! let _ = display.show(&black, &red, &mut delay);
//! let _ = display.close(&mut delay);
//! ```

#![no_std]

extern crate alloc;

/// Colors and ink planes
pub mod color;
/// IL91874 command definitions
pub mod command;
/// Panel geometry, register configuration and builder
pub mod config;
/// Panel session and wire protocol
pub mod display;
/// Tri-color error diffusion
pub mod dither;
/// Error types for the crate
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// sRGB to CIELAB conversion
pub mod lab;
/// Refresh waveform tables
pub mod lut;
/// Boolean ink masks
pub mod mask;
/// Mask to panel buffer packing
pub mod pack;
/// Canvas to panel coordinate mapping
pub mod rotation;

/// Dual-plane drawing canvas (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod composer;
/// Glyph sources for canvas text (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod font;

pub use color::{Color, Plane};
pub use config::{BUFFER_SIZE, Builder, Config, Dimensions, HEIGHT, PANEL_HEIGHT, PANEL_WIDTH, WIDTH};
pub use display::{Display, PanelState};
pub use dither::{DitherOptions, Ditherer, SourceImage};
pub use error::{BuilderError, Error, GlyphError, InputError};
pub use interface::{
    BUSY_POLL_INTERVAL_MS, BusyStatus, DEFAULT_BUSY_TIMEOUT_MS, DisplayInterface, Interface,
    InterfaceError,
};
pub use mask::InkMask;
pub use pack::{pack, unpack};

#[cfg(feature = "graphics")]
pub use composer::Composer;
#[cfg(feature = "graphics")]
pub use font::{Glyphs, MonoGlyphs};
