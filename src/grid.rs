//! The coordinate spaces of the pad grid.
//!
//! The device packs its pads into the note-on key space with a stride of 16
//! per row: key = 16 * row + column. Each row is 9 columns wide (the 8x8
//! matrix plus the round button at its right edge), so keys 9..=15 of every
//! row stride are dead space. The 9 control buttons along the top live in a
//! separate coordinate space, as controller numbers 0x68..=0x70.

/// Number of pad rows addressable through the note key space
pub const GRID_ROWS: u8 = 8;
/// Number of pad columns addressable through the note key space
pub const GRID_COLUMNS: u8 = 9;
/// Number of control buttons
pub const CONTROL_COUNT: u8 = 9;

/// Key-space distance between the first pads of two adjacent rows
const ROW_STRIDE: u8 = 16;
/// Controller number of control button 0
const FIRST_CONTROL_NUMBER: u8 = 0x68;

/// A pad location on the grid: `row` in 0..=7, `col` in 0..=8.
///
/// The fields are not validated on construction; operations that encode a
/// [`Pad`] onto the wire or index state tables with it reject invalid
/// coordinates instead. Use [`Pad::is_valid`] to check manually.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pad {
    pub row: u8,
    pub col: u8,
}

impl Pad {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Decode a MIDI key number into a pad coordinate, or `None` if the key
    /// doesn't address a pad (a column past the row edge, or a key beyond the
    /// last row).
    pub fn from_key(key: u8) -> Option<Self> {
        let pad = Self {
            row: key / ROW_STRIDE,
            col: key % ROW_STRIDE,
        };

        pad.is_valid().then_some(pad)
    }

    /// The MIDI key number addressing this pad. Inverse of [`Pad::from_key`]
    /// for all valid pads.
    pub fn to_key(self) -> u8 {
        ROW_STRIDE * self.row + self.col
    }

    /// Whether this coordinate lies on the grid
    pub fn is_valid(self) -> bool {
        self.row < GRID_ROWS && self.col < GRID_COLUMNS
    }
}

/// Decode a controller number into a control button index, or `None` if the
/// number doesn't address one of the 9 control buttons.
pub fn control_index(number: u8) -> Option<u8> {
    number
        .checked_sub(FIRST_CONTROL_NUMBER)
        .filter(|&index| index < CONTROL_COUNT)
}

/// The controller number addressing the given control button. Inverse of
/// [`control_index`] for indices in 0..=8.
pub fn control_number(index: u8) -> u8 {
    FIRST_CONTROL_NUMBER + index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_key_round_trip() {
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLUMNS {
                let pad = Pad::new(row, col);
                assert_eq!(Pad::from_key(pad.to_key()), Some(pad));
            }
        }
    }

    #[test]
    fn control_round_trip() {
        for index in 0..CONTROL_COUNT {
            assert_eq!(control_index(control_number(index)), Some(index));
        }
    }

    #[test]
    fn keys_between_rows_are_dead_space() {
        // row 0 ends at key 8; keys 9..=15 address nothing
        assert_eq!(Pad::from_key(8), Some(Pad::new(0, 8)));
        for key in 9..=15 {
            assert_eq!(Pad::from_key(key), None);
        }
    }

    #[test]
    fn keys_beyond_last_row_are_invalid() {
        assert_eq!(Pad::from_key(0x78), Some(Pad::new(7, 8)));
        for key in [128u8, 130, 200, 255] {
            assert_eq!(Pad::from_key(key), None);
        }
    }

    #[test]
    fn key_encoding_is_row_stride_packed() {
        assert_eq!(Pad::new(0, 0).to_key(), 0x00);
        assert_eq!(Pad::new(2, 3).to_key(), 0x23);
        assert_eq!(Pad::from_key(0x23), Some(Pad::new(2, 3)));
    }

    #[test]
    fn control_numbers_outside_the_row_are_invalid() {
        assert_eq!(control_index(0x67), None);
        assert_eq!(control_index(0x71), None);
        assert_eq!(control_index(0x00), None);
        assert_eq!(control_index(0x68), Some(0));
        assert_eq!(control_index(0x70), Some(8));
    }
}
