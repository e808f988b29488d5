use midir::MidiOutputConnection;

use super::{CONTROLLER_CHANGE, NOTE_ON};
use crate::grid::{self, CONTROL_COUNT};
use crate::{Color, MidiError, OutputDevice, Pad};

/// The grid surface output connection handler.
pub struct Output {
    connection: MidiOutputConnection,
}

impl crate::OutputDevice for Output {
    const MIDI_CONNECTION_NAME: &'static str = "Padgrid output";
    const MIDI_DEVICE_KEYWORD: &'static str = "Launchpad";

    fn from_connection(connection: MidiOutputConnection) -> Result<Self, MidiError> {
        Ok(Self { connection })
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        self.connection.send(bytes)?;
        Ok(())
    }
}

impl SurfaceOutput for Output {}

/// The color-set commands of the grid surface, available on any
/// [`OutputDevice`] that speaks the protocol.
///
/// Each method is a single fire-and-forget MIDI message; no acknowledgement
/// is modeled. Coordinates are validated before anything is put on the wire,
/// so an out-of-range pad or index comes back as an error instead of a
/// malformed data byte.
pub trait SurfaceOutput: OutputDevice {
    /// Set the LED of a single pad to a certain `color`.
    ///
    /// For example to light the top-left pad red:
    /// ```no_run
    /// # use padgrid::surface::{Output, SurfaceOutput as _};
    /// # use padgrid::{Color, OutputDevice as _, Pad};
    /// # let mut output = Output::guess()?;
    /// output.set_pad_color(Pad::new(0, 0), Color::RedHigh)?;
    /// # Ok::<(), padgrid::MidiError>(())
    /// ```
    fn set_pad_color(&mut self, pad: Pad, color: Color) -> Result<(), MidiError> {
        if !pad.is_valid() {
            return Err(MidiError::PadOutOfRange { pad });
        }

        self.send(&[NOTE_ON, pad.to_key(), color.value()])
    }

    /// Set the LED of a single control button to a certain `color`.
    fn set_control_color(&mut self, index: u8, color: Color) -> Result<(), MidiError> {
        if index >= CONTROL_COUNT {
            return Err(MidiError::ControlOutOfRange { index });
        }

        self.send(&[CONTROLLER_CHANGE, grid::control_number(index), color.value()])
    }

    /// Turn off every LED on the device.
    ///
    /// This is the raw device reset; it doesn't know about any recorded
    /// color state. [`super::Surface::reset_colors`] keeps the two in sync.
    fn reset_colors(&mut self) -> Result<(), MidiError> {
        self.send(&[CONTROLLER_CHANGE, 0x00, 0x00])
    }
}
