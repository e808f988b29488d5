/// The fixed LED palette of the device.
///
/// Every entry is a pair of 2-bit red and green intensities. The wire byte
/// also carries the double-buffer copy and clear flags (bits 2 and 3), which
/// the device expects to be set on plain color writes - that's why `Off`
/// encodes as 0x0C and not 0x00.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    #[default]
    Off,
    RedLow,
    RedHigh,
    AmberLow,
    AmberHigh,
    GreenLow,
    GreenHigh,
}

/// Double-buffer copy and clear flags, set on every palette entry
const FLAG_BITS: u8 = 0b0000_1100;

impl Color {
    /// Red LED brightness, 0..=3
    pub fn red(self) -> u8 {
        match self {
            Self::Off | Self::GreenLow | Self::GreenHigh => 0,
            Self::RedLow | Self::AmberLow => 1,
            Self::RedHigh | Self::AmberHigh => 3,
        }
    }

    /// Green LED brightness, 0..=3
    pub fn green(self) -> u8 {
        match self {
            Self::Off | Self::RedLow | Self::RedHigh => 0,
            Self::GreenLow | Self::AmberLow => 1,
            Self::GreenHigh | Self::AmberHigh => 3,
        }
    }

    /// The velocity byte that sets this color on a pad or control LED.
    ///
    /// Bit 5..4 - green brightness, bit 3..2 - buffer flags, bit 1..0 - red
    /// brightness.
    pub fn value(self) -> u8 {
        (self.green() << 4) | FLAG_BITS | self.red()
    }

    /// Reverse lookup of [`Color::value`]. Zero is accepted as `Off` (the
    /// device treats a zero velocity as "LED off"); any other byte that isn't
    /// a palette entry returns `None`.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0x00 | 0x0C => Some(Self::Off),
            0x0D => Some(Self::RedLow),
            0x0F => Some(Self::RedHigh),
            0x1D => Some(Self::AmberLow),
            0x3F => Some(Self::AmberHigh),
            0x1C => Some(Self::GreenLow),
            0x3C => Some(Self::GreenHigh),
            _ => None,
        }
    }

    /// Canonical palette name
    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::RedLow => "RedLow",
            Self::RedHigh => "RedHigh",
            Self::AmberLow => "AmberLow",
            Self::AmberHigh => "AmberHigh",
            Self::GreenLow => "GreenLow",
            Self::GreenHigh => "GreenHigh",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: [(Color, u8); 7] = [
        (Color::Off, 0x0C),
        (Color::RedLow, 0x0D),
        (Color::RedHigh, 0x0F),
        (Color::AmberLow, 0x1D),
        (Color::AmberHigh, 0x3F),
        (Color::GreenLow, 0x1C),
        (Color::GreenHigh, 0x3C),
    ];

    #[test]
    fn palette_wire_values() {
        for (color, value) in PALETTE {
            assert_eq!(color.value(), value, "{}", color);
        }
    }

    #[test]
    fn value_round_trip() {
        for (color, value) in PALETTE {
            assert_eq!(Color::from_value(value), Some(color));
        }
    }

    #[test]
    fn zero_velocity_reads_as_off() {
        assert_eq!(Color::from_value(0), Some(Color::Off));
    }

    #[test]
    fn named_lookups() {
        assert_eq!(Color::from_value(0x3C), Some(Color::GreenHigh));
        assert_eq!(Color::from_value(0x3C).unwrap().name(), "GreenHigh");
    }

    #[test]
    fn unknown_values_have_no_name() {
        for value in [0x01, 0x0E, 0x1E, 0x30, 0x7F] {
            assert_eq!(Color::from_value(value), None);
        }
    }

    #[test]
    fn default_is_off() {
        assert_eq!(Color::default(), Color::Off);
    }
}
