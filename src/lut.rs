//! Refresh waveform tables
//!
//! Loaded into the controller at every initialization. The panel setting
//! register selects LUT-from-register mode, so these tables define the full
//! refresh waveform.

/// VCOM waveform, written to [`LUT_FOR_VCOM`](crate::command::LUT_FOR_VCOM)
pub static LUT_VCOM: [u8; 44] = [
    0x00, 0x00, 0x00, 0x1A, 0x1A, 0x00, 0x00, 0x01, 0x00, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x00,
    0x0E, 0x01, 0x0E, 0x01, 0x10, 0x00, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x00, 0x04, 0x10, 0x00,
    0x00, 0x05, 0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, 0x00, 0x23, 0x00, 0x00, 0x00, 0x01,
];

/// White to white
pub static LUT_WW: [u8; 42] = [
    0x90, 0x1A, 0x1A, 0x00, 0x00, 0x01, 0x40, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x84, 0x0E, 0x01,
    0x0E, 0x01, 0x10, 0x80, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x00, 0x04, 0x10, 0x00, 0x00, 0x05,
    0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, 0x00, 0x23, 0x00, 0x00, 0x00, 0x01,
];

/// Black to white
pub static LUT_BW: [u8; 42] = [
    0xA0, 0x1A, 0x1A, 0x00, 0x00, 0x01, 0x00, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x84, 0x0E, 0x01,
    0x0E, 0x01, 0x10, 0x90, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0xB0, 0x04, 0x10, 0x00, 0x00, 0x05,
    0xB0, 0x03, 0x0E, 0x00, 0x00, 0x0A, 0xC0, 0x23, 0x00, 0x00, 0x00, 0x01,
];

/// White to black
///
/// Same bytes as [`LUT_WW`].
pub static LUT_WB: [u8; 42] = [
    0x90, 0x1A, 0x1A, 0x00, 0x00, 0x01, 0x40, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x84, 0x0E, 0x01,
    0x0E, 0x01, 0x10, 0x80, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x00, 0x04, 0x10, 0x00, 0x00, 0x05,
    0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, 0x00, 0x23, 0x00, 0x00, 0x00, 0x01,
];

/// Black to black
pub static LUT_BB: [u8; 42] = [
    0x90, 0x1A, 0x1A, 0x00, 0x00, 0x01, 0x20, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x84, 0x0E, 0x01,
    0x0E, 0x01, 0x10, 0x10, 0x0A, 0x0A, 0x00, 0x00, 0x08, 0x00, 0x04, 0x10, 0x00, 0x00, 0x05,
    0x00, 0x03, 0x0E, 0x00, 0x00, 0x0A, 0x00, 0x23, 0x00, 0x00, 0x00, 0x01,
];

/// Register/table pairs in the order they are written
pub fn tables() -> [(u8, &'static [u8]); 5] {
    use crate::command::*;
    [
        (LUT_FOR_VCOM, LUT_VCOM.as_slice()),
        (LUT_WHITE_TO_WHITE, LUT_WW.as_slice()),
        (LUT_BLACK_TO_WHITE, LUT_BW.as_slice()),
        (LUT_WHITE_TO_BLACK, LUT_WB.as_slice()),
        (LUT_BLACK_TO_BLACK, LUT_BB.as_slice()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        let registers: alloc::vec::Vec<u8> = tables().iter().map(|(reg, _)| *reg).collect();
        assert_eq!(registers, [0x20, 0x21, 0x22, 0x23, 0x24]);
    }

    #[test]
    fn test_table_lengths() {
        assert_eq!(tables()[0].1.len(), 44);
        for (_, table) in &tables()[1..] {
            assert_eq!(table.len(), 42);
        }
    }

    #[test]
    fn test_tables_end_with_repeat_count() {
        for (_, table) in tables() {
            assert_eq!(table.last(), Some(&0x01));
        }
    }

    #[test]
    fn test_white_to_black_matches_white_to_white() {
        assert_eq!(LUT_WB, LUT_WW);
        assert_ne!(LUT_BB, LUT_WW);
    }
}
