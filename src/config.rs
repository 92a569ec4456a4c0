//! Panel geometry and configuration
//!
//! The panel is 176 × 264 pixels in its native portrait orientation. Content
//! is composed on a landscape canvas of 264 × 176 and rotated by the packer.

/// Logical canvas width (landscape)
pub const WIDTH: u16 = 264;
/// Logical canvas height (landscape)
pub const HEIGHT: u16 = 176;

/// Physical panel width in the controller's native orientation
pub const PANEL_WIDTH: u16 = 176;
/// Physical panel height in the controller's native orientation
pub const PANEL_HEIGHT: u16 = 264;

/// Bytes per packed plane
pub const BUFFER_SIZE: usize = PANEL.buffer_size();

/// Native panel dimensions
pub const PANEL: Dimensions = Dimensions {
    rows: PANEL_HEIGHT,
    cols: PANEL_WIDTH,
};

/// Display dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, gate outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, source outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Calculate required buffer size in bytes
    pub const fn buffer_size(&self) -> usize {
        (self.rows as usize * self.cols as usize) / 8
    }
}

/// Panel register configuration
///
/// Holds the values written during initialization and power-down. The
/// defaults are the ones this panel ships with; use [`Builder`] to override.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Panel setting register (0x00)
    pub panel_setting: u8,
    /// PLL control (0x30), sets the frame rate
    pub pll_control: u8,
    /// Power setting (0x01)
    pub power_setting: [u8; 5],
    /// Booster soft start (0x06)
    pub booster_soft_start: [u8; 3],
    /// Vendor power optimisation register/value pairs (0xF8)
    pub power_optimization: [[u8; 2]; 5],
    /// VCM DC setting (0x82)
    pub vcm_dc: u8,
    /// VCOM and data interval (0x50) while running
    pub vcom_data_interval: u8,
    /// VCOM and data interval (0x50) before power off
    pub vcom_data_interval_sleep: u8,
    /// Check byte sent with deep sleep (0x07)
    pub deep_sleep_key: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // KWR mode, LUT from register
            panel_setting: 0xAF,
            // 100 Hz
            pll_control: 0x3A,
            power_setting: [0x03, 0x00, 0x2B, 0x2B, 0x09],
            booster_soft_start: [0x07, 0x07, 0x17],
            power_optimization: [
                [0x60, 0xA5],
                [0x89, 0xA5],
                [0x90, 0x00],
                [0x93, 0x2A],
                [0x73, 0x41],
            ],
            vcm_dc: 0x12,
            vcom_data_interval: 0x87,
            vcom_data_interval_sleep: 0xF7,
            deep_sleep_key: 0xA5,
        }
    }
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```
/// use epd2in7b::Builder;
///
/// let config = Builder::new().vcm_dc(0x0E).build();
/// assert_eq!(config.vcm_dc, 0x0E);
/// assert_eq!(config.panel_setting, 0xAF);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the panel setting register
    pub fn panel_setting(mut self, value: u8) -> Self {
        self.config.panel_setting = value;
        self
    }

    /// Set the PLL control register
    pub fn pll_control(mut self, value: u8) -> Self {
        self.config.pll_control = value;
        self
    }

    /// Set the power setting bytes
    pub fn power_setting(mut self, values: [u8; 5]) -> Self {
        self.config.power_setting = values;
        self
    }

    /// Set booster soft-start parameters
    pub fn booster_soft_start(mut self, values: [u8; 3]) -> Self {
        self.config.booster_soft_start = values;
        self
    }

    /// Set the vendor power optimisation pairs
    pub fn power_optimization(mut self, pairs: [[u8; 2]; 5]) -> Self {
        self.config.power_optimization = pairs;
        self
    }

    /// Set the VCM DC register
    pub fn vcm_dc(mut self, value: u8) -> Self {
        self.config.vcm_dc = value;
        self
    }

    /// Set the VCOM/data interval used while running
    pub fn vcom_data_interval(mut self, value: u8) -> Self {
        self.config.vcom_data_interval = value;
        self
    }

    /// Set the VCOM/data interval written before power off
    pub fn vcom_data_interval_sleep(mut self, value: u8) -> Self {
        self.config.vcom_data_interval_sleep = value;
        self
    }

    /// Set the check byte sent with deep sleep
    pub fn deep_sleep_key(mut self, value: u8) -> Self {
        self.config.deep_sleep_key = value;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}
