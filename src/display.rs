//! Panel session and wire protocol

use alloc::vec;

use embedded_hal::delay::DelayNs;

use crate::color::Plane;
use crate::command::{
    BOOSTER_SOFT_START, DATA_START_TRANSMISSION_1, DATA_START_TRANSMISSION_2, DATA_STOP,
    DEEP_SLEEP, DISPLAY_REFRESH, PANEL_SETTING, PARTIAL_DISPLAY_REFRESH, PLL_CONTROL, POWER_OFF,
    POWER_ON, POWER_OPTIMIZATION, POWER_SETTING, TCON_RESOLUTION, VCM_DC_SETTING,
    VCOM_AND_DATA_INTERVAL,
};
use crate::config::{BUFFER_SIZE, Config, PANEL_HEIGHT, PANEL_WIDTH};
use crate::error::Error;
use crate::interface::{BusyStatus, DisplayInterface};
use crate::lut;
use crate::mask::InkMask;
use crate::pack::pack;

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Settle time between a transmission command and its plane data (ms)
const TRANSMISSION_SETTLE_MS: u32 = 2;

/// Time for the controller to latch deep sleep before pins drop (ms)
const DEEP_SLEEP_SETTLE_MS: u32 = 2_000;

/// Session state of the panel
///
/// ```text
/// Uninitialized -> Ready -> Displaying -> Idle -> ... -> Sleeping -> Closed
///                    ^                                      |
///                    +---------------- init ----------------+
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Constructed, no reset or configuration yet
    #[default]
    Uninitialized,
    /// Powered and configured, nothing shown this session
    Ready,
    /// A frame is being transmitted or refreshed
    Displaying,
    /// Last refresh finished
    Idle,
    /// Powered down in deep sleep
    Sleeping,
    /// Torn down; the panel cannot be used again
    Closed,
}

impl PanelState {
    /// Powered and accepting frames
    pub fn is_active(self) -> bool {
        matches!(self, Self::Ready | Self::Displaying | Self::Idle)
    }
}

/// Driver for the 2.7" tri-color panel
///
/// Exclusively owns its [`DisplayInterface`] from construction until
/// [`release`](Display::release).
///
/// ## Example
///
/// ```rust,no_run
/// use embedded_hal::delay::DelayNs;
/// use epd2in7b::{Builder, Display, InkMask, Interface, HEIGHT, WIDTH};
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
/// # struct MockDelay;
/// # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
/// # let mut delay = MockDelay;
/// let interface = Interface::new(MockSpi, MockPin, MockPin, MockPin);
/// let mut display = Display::new(interface, Builder::new().build());
///
/// if display.init(&mut delay).is_err() {
///     return; // no panel attached
/// }
///
/// let mut black = InkMask::new(WIDTH, HEIGHT);
/// let red = InkMask::new(WIDTH, HEIGHT);
/// black.set(10, 10, true);
/// let _ = display.show(&black, &red, &mut delay);
/// let _ = display.close(&mut delay);
/// ```
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Register configuration
    config: Config,
    /// Session state
    state: PanelState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            state: PanelState::Uninitialized,
        }
    }

    /// Current session state
    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reset, power on and configure the panel
    ///
    /// Valid from any state except [`PanelState::Closed`]; calling it from
    /// [`PanelState::Sleeping`] wakes the panel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DeviceNotFound`] if the interface fails at any point
    /// in the sequence. The session stays in its previous state.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.require(self.state != PanelState::Closed, "init")?;

        log::debug!("Resetting panel");
        self.power_up(delay).map_err(Error::DeviceNotFound)?;

        self.state = PanelState::Ready;
        log::info!("Panel initialized");
        Ok(())
    }

    /// Show a frame from a black/red mask pair
    ///
    /// Both masks must be [`WIDTH`](crate::WIDTH) × [`HEIGHT`](crate::HEIGHT).
    /// Where both planes carry ink the panel shows red.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if a mask has the wrong size; nothing is sent
    /// - [`Error::InvalidState`] unless the panel is initialized and awake
    /// - [`Error::Interface`] on SPI/GPIO failure
    pub fn show<D: DelayNs>(
        &mut self,
        black: &InkMask,
        red: &InkMask,
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.require(self.state.is_active(), "show")?;
        let black = pack(black, Plane::Black)?;
        let red = pack(red, Plane::Red)?;
        self.transmit(&black, &red, delay)?;
        log::info!("Display updated");
        Ok(())
    }

    /// Show a frame from already packed planes
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferLength`] unless both buffers are
    /// [`BUFFER_SIZE`] bytes.
    pub fn show_buffers<D: DelayNs>(
        &mut self,
        black: &[u8],
        red: &[u8],
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.require(self.state.is_active(), "show")?;
        for buffer in [black, red] {
            if buffer.len() != BUFFER_SIZE {
                return Err(Error::BufferLength {
                    expected: BUFFER_SIZE,
                    provided: buffer.len(),
                });
            }
        }
        self.transmit(black, red, delay)?;
        log::info!("Display updated from packed planes");
        Ok(())
    }

    /// Refresh the panel to plain white
    pub fn clear<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.require(self.state.is_active(), "clear")?;
        let blank = vec![0u8; BUFFER_SIZE];
        self.transmit(&blank, &blank, delay)?;
        log::info!("Display cleared");
        Ok(())
    }

    /// Power down and enter deep sleep
    ///
    /// RST and DC are driven low afterwards. Use [`init`](Self::init) to wake.
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.require(self.state.is_active(), "sleep")?;

        self.send_command(VCOM_AND_DATA_INTERVAL)?;
        self.send_data(&[self.config.vcom_data_interval_sleep])?;
        self.send_command(POWER_OFF)?;
        self.wait_idle(delay, "power off")?;
        self.send_command(DEEP_SLEEP)?;
        self.send_data(&[self.config.deep_sleep_key])?;
        delay.delay_ms(DEEP_SLEEP_SETTLE_MS);
        self.interface.shutdown().map_err(Error::Interface)?;

        self.state = PanelState::Sleeping;
        log::info!("Panel sleeping");
        Ok(())
    }

    /// Clear, sleep and mark the session closed
    ///
    /// Best-effort: each step's failure is logged and the next step still
    /// runs. The session always ends [`PanelState::Closed`]. The result
    /// reports the first failure for callers that want it.
    pub fn close<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let mut outcome = Ok(());

        match self.state {
            PanelState::Closed => return Ok(()),
            PanelState::Uninitialized => {
                if let Err(e) = self.interface.shutdown() {
                    log::error!("Releasing pins failed: {e:?}");
                    outcome = Err(Error::Interface(e));
                }
            }
            PanelState::Sleeping => {}
            PanelState::Ready | PanelState::Displaying | PanelState::Idle => {
                if let Err(e) = self.clear(delay) {
                    log::error!("Clear during close failed: {e}");
                    outcome = Err(e);
                }
                if let Err(e) = self.sleep(delay) {
                    log::error!("Sleep during close failed: {e}");
                    if outcome.is_ok() {
                        outcome = Err(e);
                    }
                    if let Err(e) = self.interface.shutdown() {
                        log::error!("Releasing pins failed: {e:?}");
                    }
                }
            }
        }

        self.state = PanelState::Closed;
        log::info!("Panel closed");
        outcome
    }

    /// Hand back the owned interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Hardware reset, power on, registers and waveforms
    fn power_up<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), I::Error> {
        let config = &self.config;
        let interface = &mut self.interface;

        interface.reset(delay)?;

        interface.send_command(POWER_ON)?;
        if interface.busy_wait(delay)? == BusyStatus::TimedOut {
            log::warn!("Busy timeout during power on, continuing");
        }

        interface.send_command(PANEL_SETTING)?;
        interface.send_data(&[config.panel_setting])?;
        interface.send_command(PLL_CONTROL)?;
        interface.send_data(&[config.pll_control])?;
        interface.send_command(POWER_SETTING)?;
        interface.send_data(&config.power_setting)?;
        interface.send_command(BOOSTER_SOFT_START)?;
        interface.send_data(&config.booster_soft_start)?;

        for pair in &config.power_optimization {
            interface.send_command(POWER_OPTIMIZATION)?;
            interface.send_data(pair)?;
        }

        interface.send_command(VCM_DC_SETTING)?;
        interface.send_data(&[config.vcm_dc])?;
        interface.send_command(VCOM_AND_DATA_INTERVAL)?;
        interface.send_data(&[config.vcom_data_interval])?;

        log::debug!("Loading waveforms");
        for (register, table) in lut::tables() {
            interface.send_command(register)?;
            interface.send_data(table)?;
        }

        interface.send_command(PARTIAL_DISPLAY_REFRESH)?;
        interface.send_data(&[0x00])?;
        Ok(())
    }

    /// Send both planes and refresh
    fn transmit<D: DelayNs>(
        &mut self,
        black: &[u8],
        red: &[u8],
        delay: &mut D,
    ) -> DisplayResult<I> {
        self.state = PanelState::Displaying;

        self.send_command(TCON_RESOLUTION)?;
        self.send_data(&resolution_bytes())?;

        log::debug!("Sending black plane");
        self.send_command(DATA_START_TRANSMISSION_1)?;
        delay.delay_ms(TRANSMISSION_SETTLE_MS);
        self.send_data(black)?;
        self.send_command(DATA_STOP)?;

        log::debug!("Sending red plane");
        self.send_command(DATA_START_TRANSMISSION_2)?;
        delay.delay_ms(TRANSMISSION_SETTLE_MS);
        self.send_data(red)?;
        self.send_command(DATA_STOP)?;

        self.send_command(DISPLAY_REFRESH)?;
        self.wait_idle(delay, "refresh")?;

        self.state = PanelState::Idle;
        Ok(())
    }

    fn wait_idle<D: DelayNs>(&mut self, delay: &mut D, phase: &str) -> DisplayResult<I> {
        log::debug!("Waiting for {phase}");
        match self.interface.busy_wait(delay).map_err(Error::Interface)? {
            BusyStatus::Idle => {}
            BusyStatus::TimedOut => log::warn!("Busy timeout during {phase}, continuing"),
        }
        Ok(())
    }

    fn require(&self, allowed: bool, operation: &'static str) -> DisplayResult<I> {
        if allowed {
            Ok(())
        } else {
            Err(Error::InvalidState {
                state: self.state,
                operation,
            })
        }
    }

    /// Send a command to the display controller
    fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send data to the display controller
    fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

/// Resolution register payload: width then height, 16-bit big endian
fn resolution_bytes() -> [u8; 4] {
    let [w_hi, w_lo] = PANEL_WIDTH.to_be_bytes();
    let [h_hi, h_lo] = PANEL_HEIGHT.to_be_bytes();
    [w_hi, w_lo, h_hi, h_lo]
}
