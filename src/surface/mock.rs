use midir::MidiOutputConnection;

use super::SurfaceOutput;
use crate::{MidiError, OutputDevice};

/// An output endpoint that records every message instead of putting it on a
/// wire. Useful for tests and for running surface code without hardware.
#[derive(Default)]
pub struct MockOutput {
    sent: Vec<Vec<u8>>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, oldest first
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Forget all recorded messages
    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl OutputDevice for MockOutput {
    const MIDI_CONNECTION_NAME: &'static str = "Padgrid mock output";
    const MIDI_DEVICE_KEYWORD: &'static str = "Mock";

    fn from_connection(_connection: MidiOutputConnection) -> Result<Self, MidiError> {
        Ok(Self::new())
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        self.sent.push(bytes.to_vec());
        Ok(())
    }
}

impl SurfaceOutput for MockOutput {}
