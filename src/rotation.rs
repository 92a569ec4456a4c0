//! Canvas to panel coordinate mapping
//!
//! The canvas is landscape (264 × 176); the controller stores pixels in
//! portrait (176 × 264), 8 horizontal pixels per byte, MSB first. A canvas
//! pixel (x, y) lands at panel pixel:
//!
//! ```text
//! new_x = y
//! new_y = PANEL_HEIGHT - x - 1
//! ```
//!
//! This is the only supported orientation. Masks must be in canvas
//! orientation before packing.
//!
//! ## Example
//!
//! ```
//! use epd2in7b::rotation::canvas_to_panel;
//!
//! // Canvas origin is the bottom-left of the portrait panel
//! let (idx, bit) = canvas_to_panel(0, 0);
//! assert_eq!(idx, 263 * 22);
//! assert_eq!(bit, 0x80);
//!
//! // Canvas (0, 7) is the LSB of the same byte
//! let (idx, bit) = canvas_to_panel(0, 7);
//! assert_eq!(idx, 263 * 22);
//! assert_eq!(bit, 0x01);
//! ```

use crate::config::{PANEL_HEIGHT, PANEL_WIDTH};

/// Bytes per panel row
const ROW_BYTES: u32 = PANEL_WIDTH as u32 / 8;

/// Map a canvas pixel to its (byte_index, bit_mask) in a packed plane
///
/// # Arguments
///
/// * `x` - Canvas column, 0 to 263
/// * `y` - Canvas row, 0 to 175
pub fn canvas_to_panel(x: u32, y: u32) -> (usize, u8) {
    let new_x = y;
    let new_y = PANEL_HEIGHT as u32 - x - 1;
    let index = (new_x / 8 + new_y * ROW_BYTES) as usize;
    let bit = 0x80 >> (new_x % 8);
    (index, bit)
}

/// Map a panel pixel back to canvas coordinates
pub fn panel_to_canvas(new_x: u32, new_y: u32) -> (u32, u32) {
    (PANEL_HEIGHT as u32 - new_y - 1, new_x)
}
