//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for communicating with the IL91874 controller over SPI.
//!
//! ## Hardware Requirements
//!
//! The panel requires:
//! - SPI bus (MOSI + SCK, chip select handled by the [`SpiDevice`])
//! - 3 GPIO pins:
//!   - **DC**: Data/Command select (output)
//!   - **RST**: Reset (output, active low)
//!   - **BUSY**: Busy status (input, active low)
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use epd2in7b::{BusyStatus, DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! # let mut delay = MockDelay;
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
//!
//! // Power on
//! let _ = interface.send_command(0x04);
//!
//! // Wait for display ready
//! if let Ok(BusyStatus::TimedOut) = interface.busy_wait(&mut delay) {
//!     // Panel kept BUSY asserted; carry on anyway
//! }
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Default timeout for busy-wait in milliseconds
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 30_000;

/// Interval between BUSY pin samples in milliseconds
pub const BUSY_POLL_INTERVAL_MS: u32 = 100;

/// Reset pulse timing: high, low, high (ms)
const RESET_TIMING_MS: [u32; 3] = [200, 2, 200];

/// Outcome of waiting on the BUSY line
///
/// A panel that never releases BUSY is not an error: the caller logs it and
/// continues with the sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusyStatus {
    /// The controller reported idle
    Idle,
    /// The timeout elapsed with BUSY still asserted
    TimedOut,
}

/// Trait for hardware interface to the panel controller
///
/// This trait abstracts over different hardware implementations,
/// allowing the [`Display`](crate::display::Display) to work with any
/// SPI + GPIO implementation that satisfies embedded-hal traits.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If you need
/// custom behavior (e.g., a different reset pulse, a shared SPI bus),
/// implement this trait on your own type.
pub trait DisplayInterface {
    /// Error type for interface operations
    ///
    /// Must implement [`Debug`] for error reporting.
    type Error: Debug;

    /// Send a command byte to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin low (command mode)
    /// 2. Send the command byte over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC pin high (data mode)
    /// 2. Send the data bytes over SPI
    ///
    /// # Errors
    ///
    /// Returns an error if SPI communication or GPIO fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Perform hardware reset
    ///
    /// Drives RST high for 200ms, low for 2ms, then high for 200ms.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset pin cannot be driven.
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error>;

    /// Wait for the controller to leave the busy state
    ///
    /// Polls BUSY every [`BUSY_POLL_INTERVAL_MS`] until it reads idle or the
    /// implementation's timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns an error only if the BUSY pin cannot be read. A timeout is
    /// reported as [`BusyStatus::TimedOut`].
    fn busy_wait<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> InterfaceResult<BusyStatus, Self::Error>;

    /// Drive RST and DC low before the bus is released
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be driven.
    fn shutdown(&mut self) -> InterfaceResult<(), Self::Error>;
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for the IL91874
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
///
/// ## Example
///
/// ```rust,no_run
/// use epd2in7b::{Builder, Display, Interface};
/// # use core::convert::Infallible;
/// # use embedded_hal::digital::{InputPin, OutputPin};
/// # use embedded_hal::spi::{Operation, SpiDevice};
/// # struct MockSpi;
/// # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
/// # impl SpiDevice for MockSpi {
/// #     fn transaction(
/// #         &mut self,
/// #         _operations: &mut [Operation<'_, u8>],
/// #     ) -> Result<(), Self::Error> {
/// #         Ok(())
/// #     }
/// # }
/// # struct MockPin;
/// # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
/// # impl OutputPin for MockPin {
/// #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// # }
/// # impl InputPin for MockPin {
/// #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(true) }
/// #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(false) }
/// # }
/// let mut interface = Interface::new(
///     MockSpi,  // SpiDevice
///     MockPin,  // OutputPin
///     MockPin,  // OutputPin
///     MockPin,  // InputPin
/// );
/// interface.set_busy_timeout(10_000);
///
/// let _display = Display::new(interface, Builder::new().build());
/// ```
pub struct Interface<SPI, DC, RST, BUSY> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin (active low)
    rst: RST,
    /// Busy pin (active low)
    busy: BUSY,
    /// Timeout for busy-wait in milliseconds
    busy_timeout_ms: u32,
    /// Busy pin polarity (true = active high, false = active low)
    busy_active_high: bool,
}

impl<SPI, DC, RST, BUSY> Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin (output, active low)
    /// * `busy` - Busy pin (input, active low)
    pub fn new(spi: SPI, dc: DC, rst: RST, busy: BUSY) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            busy_active_high: false,
        }
    }

    /// Set the busy-wait timeout in milliseconds
    ///
    /// Default is 30,000ms (30 seconds). Set to 0 to wait indefinitely.
    pub fn set_busy_timeout(&mut self, timeout_ms: u32) -> &mut Self {
        self.busy_timeout_ms = timeout_ms;
        self
    }

    /// Get the current busy-wait timeout in milliseconds
    pub fn busy_timeout(&self) -> u32 {
        self.busy_timeout_ms
    }

    /// Set busy pin polarity
    ///
    /// Default is active-low (pin reads 0 while the panel is busy).
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Give the bus and pins back to the caller
    pub fn release(self) -> (SPI, DC, RST, BUSY) {
        (self.spi, self.dc, self.rst, self.busy)
    }
}

impl<SPI, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> InterfaceResult<(), Self::Error> {
        let [settle, pulse, recover] = RESET_TIMING_MS;
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(settle);
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(pulse);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(recover);
        Ok(())
    }

    fn busy_wait<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> InterfaceResult<BusyStatus, Self::Error> {
        let timeout_ms = self.busy_timeout_ms;
        let mut waited_ms = 0u32;

        loop {
            let is_busy = if self.busy_active_high {
                self.busy.is_high()
            } else {
                self.busy.is_low()
            }
            .map_err(InterfaceError::Pin)?;

            if !is_busy {
                return Ok(BusyStatus::Idle);
            }

            if timeout_ms > 0 && waited_ms >= timeout_ms {
                return Ok(BusyStatus::TimedOut);
            }

            delay.delay_ms(BUSY_POLL_INTERVAL_MS);
            waited_ms = waited_ms.saturating_add(BUSY_POLL_INTERVAL_MS);
        }
    }

    fn shutdown(&mut self) -> InterfaceResult<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::digital::ErrorType;
    use embedded_hal::spi::ErrorType as SpiErrorType;

    #[derive(Debug, Clone, Copy)]
    struct MockError;

    impl embedded_hal::digital::Error for MockError {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl embedded_hal::spi::Error for MockError {
        fn kind(&self) -> embedded_hal::spi::ErrorKind {
            embedded_hal::spi::ErrorKind::Other
        }
    }

    #[derive(Default)]
    struct MockSpi {
        written: Vec<u8>,
    }

    impl SpiErrorType for MockSpi {
        type Error = MockError;
    }

    impl SpiDevice for MockSpi {
        fn transaction(
            &mut self,
            operations: &mut [embedded_hal::spi::Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let embedded_hal::spi::Operation::Write(data) = op {
                    self.written.extend_from_slice(data);
                }
            }
            Ok(())
        }
    }

    /// Output pin that logs its level changes to a shared trace
    struct TracePin<'a> {
        name: char,
        trace: &'a RefCell<Vec<(char, bool)>>,
    }

    impl ErrorType for TracePin<'_> {
        type Error = MockError;
    }

    impl OutputPin for TracePin<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.trace.borrow_mut().push((self.name, false));
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.trace.borrow_mut().push((self.name, true));
            Ok(())
        }
    }

    impl InputPin for TracePin<'_> {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(true)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(false)
        }
    }

    /// Busy pin that reads low (busy) for a number of samples, then high
    struct BusyPin {
        busy_reads: u32,
    }

    impl ErrorType for BusyPin {
        type Error = MockError;
    }

    impl InputPin for BusyPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            self.is_low().map(|low| !low)
        }
        fn is_low(&mut self) -> Result<bool, Self::Error> {
            if self.busy_reads == 0 {
                Ok(false)
            } else {
                self.busy_reads = self.busy_reads.saturating_sub(1);
                Ok(true)
            }
        }
    }

    impl OutputPin for BusyPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingDelay {
        calls: u32,
        total_ms: u32,
        log: Vec<u32>,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.delay_ms(ns / 1_000_000);
        }
        fn delay_ms(&mut self, ms: u32) {
            self.calls += 1;
            self.total_ms += ms;
            self.log.push(ms);
        }
    }

    fn busy_interface(busy_reads: u32) -> Interface<MockSpi, BusyPin, BusyPin, BusyPin> {
        Interface::new(
            MockSpi::default(),
            BusyPin { busy_reads: 0 },
            BusyPin { busy_reads: 0 },
            BusyPin { busy_reads },
        )
    }

    #[test]
    fn test_default_busy_timeout() {
        assert_eq!(DEFAULT_BUSY_TIMEOUT_MS, 30_000);
    }

    #[test]
    fn test_set_busy_timeout() {
        let mut interface = busy_interface(0);
        assert_eq!(interface.busy_timeout(), DEFAULT_BUSY_TIMEOUT_MS);
        assert!(!interface.busy_active_high());

        interface.set_busy_timeout(5_000);
        assert_eq!(interface.busy_timeout(), 5_000);

        interface.set_busy_timeout(0);
        assert_eq!(interface.busy_timeout(), 0);
    }

    #[test]
    fn test_busy_wait_idle_immediately() {
        let mut interface = busy_interface(0);
        let mut delay = CountingDelay::default();
        assert_eq!(interface.busy_wait(&mut delay).unwrap(), BusyStatus::Idle);
        assert_eq!(delay.calls, 0);
    }

    #[test]
    fn test_busy_wait_polls_every_100ms() {
        let mut interface = busy_interface(3);
        let mut delay = CountingDelay::default();
        assert_eq!(interface.busy_wait(&mut delay).unwrap(), BusyStatus::Idle);
        assert_eq!(delay.log, [100, 100, 100]);
    }

    #[test]
    fn test_busy_wait_times_out_without_error() {
        let mut interface = busy_interface(u32::MAX);
        interface.set_busy_timeout(1_000);
        let mut delay = CountingDelay::default();
        assert_eq!(
            interface.busy_wait(&mut delay).unwrap(),
            BusyStatus::TimedOut
        );
        assert_eq!(delay.calls, 10);
        assert_eq!(delay.total_ms, 1_000);
    }

    #[test]
    fn test_busy_active_high_polarity() {
        // An idle line reads high, which active-high polarity treats as busy
        let mut interface = busy_interface(0);
        interface.set_busy_active_high(true);
        interface.set_busy_timeout(300);
        let mut delay = CountingDelay::default();
        assert_eq!(
            interface.busy_wait(&mut delay).unwrap(),
            BusyStatus::TimedOut
        );
    }

    #[test]
    fn test_reset_pulse() {
        let trace = RefCell::new(Vec::new());
        let mut interface = Interface::new(
            MockSpi::default(),
            TracePin { name: 'D', trace: &trace },
            TracePin { name: 'R', trace: &trace },
            TracePin { name: 'B', trace: &trace },
        );
        let mut delay = CountingDelay::default();
        interface.reset(&mut delay).unwrap();
        assert_eq!(*trace.borrow(), [('R', true), ('R', false), ('R', true)]);
        assert_eq!(delay.log, [200, 2, 200]);
    }

    #[test]
    fn test_command_then_data_toggles_dc() {
        let trace = RefCell::new(Vec::new());
        let mut interface = Interface::new(
            MockSpi::default(),
            TracePin { name: 'D', trace: &trace },
            TracePin { name: 'R', trace: &trace },
            TracePin { name: 'B', trace: &trace },
        );
        interface.send_command(0x61).unwrap();
        interface.send_data(&[0x00, 0xB0, 0x01, 0x08]).unwrap();
        interface.shutdown().unwrap();
        assert_eq!(
            *trace.borrow(),
            [('D', false), ('D', true), ('R', false), ('D', false)]
        );

        let (spi, ..) = interface.release();
        assert_eq!(spi.written, [0x61, 0x00, 0xB0, 0x01, 0x08]);
    }
}
