//! Canvas mask to panel buffer packing
//!
//! Packs a landscape [`InkMask`] into the controller's portrait, bit-packed
//! plane format. A bit of 1 means ink on that plane, 0 means none; the
//! convention is the same for the black and the red plane.
//!
//! ## Example
//!
//! ```
//! use epd2in7b::pack::{pack, unpack};
//! use epd2in7b::{InkMask, Plane, BUFFER_SIZE, HEIGHT, WIDTH};
//!
//! let mut mask = InkMask::new(WIDTH, HEIGHT);
//! mask.set(10, 20, true);
//!
//! let buffer = pack(&mask, Plane::Red).unwrap();
//! assert_eq!(buffer.len(), BUFFER_SIZE);
//! assert_eq!(unpack(&buffer).unwrap(), mask);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::color::Plane;
use crate::config::{BUFFER_SIZE, HEIGHT, PANEL_HEIGHT, PANEL_WIDTH, WIDTH};
use crate::error::InputError;
use crate::mask::InkMask;
use crate::rotation::{canvas_to_panel, panel_to_canvas};

/// Pack one plane for transmission
///
/// The buffer starts with every bit set; each canvas pixel without ink
/// clears its bit.
///
/// # Errors
///
/// Returns [`InputError::DimensionMismatch`] unless the mask is
/// [`WIDTH`] × [`HEIGHT`].
pub fn pack(mask: &InkMask, plane: Plane) -> Result<Vec<u8>, InputError> {
    mask.check_size(WIDTH, HEIGHT)?;

    let mut buffer = vec![0xFFu8; BUFFER_SIZE];
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            if !mask.get(x, y) {
                let (index, bit) = canvas_to_panel(x as u32, y as u32);
                buffer[index] &= !bit;
            }
        }
    }

    log::trace!("Packed {plane} plane: {} inked pixels", mask.count());
    Ok(buffer)
}

/// Recover the canvas mask from a packed plane
///
/// # Errors
///
/// Returns [`InputError::PixelCount`] if the buffer is not [`BUFFER_SIZE`]
/// bytes.
pub fn unpack(buffer: &[u8]) -> Result<InkMask, InputError> {
    if buffer.len() != BUFFER_SIZE {
        return Err(InputError::PixelCount {
            expected: BUFFER_SIZE * 8,
            provided: buffer.len() * 8,
        });
    }

    let mut mask = InkMask::new(WIDTH, HEIGHT);
    let row_bytes = PANEL_WIDTH as usize / 8;
    for new_y in 0..PANEL_HEIGHT as u32 {
        for new_x in 0..PANEL_WIDTH as u32 {
            let byte = buffer[new_y as usize * row_bytes + new_x as usize / 8];
            if byte & (0x80 >> (new_x % 8)) != 0 {
                let (x, y) = panel_to_canvas(new_x, new_y);
                mask.set(x as u16, y as u16, true);
            }
        }
    }
    Ok(mask)
}
