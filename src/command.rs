//! IL91874 command definitions
//!
//! Command bytes for the tri-color 2.7" panel controller. Commands are sent
//! with the DC pin low, their parameters with DC high.
//!
//! ## Example
//!
//! ```rust,no_run
//! use epd2in7b::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//! // Panel resolution: 176 x 264
//! let _ = interface.send_command(command::TCON_RESOLUTION);
//! let _ = interface.send_data(&[0x00, 0xB0, 0x01, 0x08]);
//! ```

// Power

/// Panel setting (0x00)
///
/// One byte: resolution, LUT source, scan direction.
pub const PANEL_SETTING: u8 = 0x00;

/// Power setting (0x01)
///
/// Five bytes: source/gate voltage enables and levels.
pub const POWER_SETTING: u8 = 0x01;

/// Power off (0x02)
///
/// BUSY goes active until the charge pumps have discharged.
pub const POWER_OFF: u8 = 0x02;

/// Power on (0x04)
///
/// BUSY goes active until the booster is up.
pub const POWER_ON: u8 = 0x04;

/// Booster soft start (0x06)
///
/// Three bytes: soft-start phases A, B, C.
pub const BOOSTER_SOFT_START: u8 = 0x06;

/// Deep sleep (0x07)
///
/// One check byte (0xA5). Only a hardware reset wakes the controller.
pub const DEEP_SLEEP: u8 = 0x07;

// Frame data

/// Start transmission of the black plane (0x10)
pub const DATA_START_TRANSMISSION_1: u8 = 0x10;

/// End of a data transmission (0x11)
pub const DATA_STOP: u8 = 0x11;

/// Refresh the panel from the loaded planes (0x12)
pub const DISPLAY_REFRESH: u8 = 0x12;

/// Start transmission of the red plane (0x13)
pub const DATA_START_TRANSMISSION_2: u8 = 0x13;

/// Partial display refresh (0x16)
///
/// Written with 0x00 during initialization to select full refresh.
pub const PARTIAL_DISPLAY_REFRESH: u8 = 0x16;

// Waveforms

/// VCOM waveform (0x20), 44 bytes
pub const LUT_FOR_VCOM: u8 = 0x20;

/// White to white waveform (0x21), 42 bytes
pub const LUT_WHITE_TO_WHITE: u8 = 0x21;

/// Black to white waveform (0x22), 42 bytes
pub const LUT_BLACK_TO_WHITE: u8 = 0x22;

/// White to black waveform (0x23), 42 bytes
pub const LUT_WHITE_TO_BLACK: u8 = 0x23;

/// Black to black waveform (0x24), 42 bytes
pub const LUT_BLACK_TO_BLACK: u8 = 0x24;

// Timing and analog

/// PLL control (0x30)
///
/// One byte selecting the frame rate.
pub const PLL_CONTROL: u8 = 0x30;

/// VCOM and data interval setting (0x50)
///
/// One byte: border output and data polarity.
pub const VCOM_AND_DATA_INTERVAL: u8 = 0x50;

/// Resolution setting (0x61)
///
/// Four bytes: width (2 bytes) then height (2 bytes), big endian.
pub const TCON_RESOLUTION: u8 = 0x61;

/// VCM DC setting (0x82)
pub const VCM_DC_SETTING: u8 = 0x82;

/// Vendor power optimisation (0xF8)
///
/// Two bytes: internal register, value.
pub const POWER_OPTIMIZATION: u8 = 0xF8;
