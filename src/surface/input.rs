use log::{debug, warn};

use super::{CONTROLLER_CHANGE, NOTE_OFF, NOTE_ON};
use crate::grid;
use crate::Pad;

/// A decoded grid surface input message
#[derive(Debug, Eq, PartialEq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// A grid pad changed state. Zero velocity means the pad was released
    Pad { pad: Pad, velocity: u8 },
    /// A control button changed state. Zero velocity means it was released
    Control { index: u8, velocity: u8 },
}

impl Message {
    /// The press intensity carried by this message
    pub fn velocity(&self) -> u8 {
        match *self {
            Self::Pad { velocity, .. } => velocity,
            Self::Control { velocity, .. } => velocity,
        }
    }

    /// Returns whether this is a press message
    pub fn is_press(&self) -> bool {
        self.velocity() > 0
    }

    /// Returns whether this is a release message
    pub fn is_release(&self) -> bool {
        !self.is_press()
    }
}

/// The grid surface input connection creator.
pub struct Input;

impl crate::InputDevice for Input {
    const MIDI_DEVICE_KEYWORD: &'static str = "Launchpad";
    const MIDI_CONNECTION_NAME: &'static str = "Padgrid input";
    type Message = Message;

    fn decode_message(_timestamp: u64, data: &[u8]) -> Option<Message> {
        // first byte of a short message is the message type
        match data {
            &[NOTE_ON, key, velocity] => match Pad::from_key(key) {
                Some(pad) => Some(Message::Pad { pad, velocity }),
                None => {
                    warn!("note-on key {:#04x} is outside the grid, dropping", key);
                    None
                }
            },
            // The device itself never sends these - releases arrive as
            // zero-velocity note-ons - but hosts replaying captured streams
            // do, and a note-off is just a release
            &[NOTE_OFF, key, _velocity] => {
                Pad::from_key(key).map(|pad| Message::Pad { pad, velocity: 0 })
            }
            &[CONTROLLER_CHANGE, number, velocity] => match grid::control_index(number) {
                Some(index) => Some(Message::Control { index, velocity }),
                None => {
                    debug!("ignoring controller change for number {:#04x}", number);
                    None
                }
            },
            other => {
                debug!("ignoring unrecognized midi message: {:?}", other);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputDevice as _;

    fn decode(data: &[u8]) -> Option<Message> {
        Input::decode_message(0, data)
    }

    #[test]
    fn note_on_decodes_to_pad_event() {
        assert_eq!(
            decode(&[0x90, 0x23, 64]),
            Some(Message::Pad {
                pad: Pad::new(2, 3),
                velocity: 64,
            })
        );
    }

    #[test]
    fn zero_velocity_note_on_is_a_release() {
        let msg = decode(&[0x90, 0x00, 0]).unwrap();
        assert!(msg.is_release());
        assert_eq!(msg.velocity(), 0);
    }

    #[test]
    fn note_off_decodes_to_release() {
        assert_eq!(
            decode(&[0x80, 0x23, 64]),
            Some(Message::Pad {
                pad: Pad::new(2, 3),
                velocity: 0,
            })
        );
    }

    #[test]
    fn controller_change_decodes_to_control_event() {
        assert_eq!(
            decode(&[0xB0, 0x6C, 127]),
            Some(Message::Control {
                index: 4,
                velocity: 127,
            })
        );
    }

    #[test]
    fn keys_outside_the_grid_produce_no_event() {
        assert_eq!(decode(&[0x90, 9, 100]), None);
        assert_eq!(decode(&[0x90, 0x7F, 100]), None);
    }

    #[test]
    fn controller_numbers_outside_the_row_produce_no_event() {
        assert_eq!(decode(&[0xB0, 0x00, 0]), None);
        assert_eq!(decode(&[0xB0, 0x67, 127]), None);
    }

    #[test]
    fn unrecognized_messages_are_ignored() {
        // polyphonic aftertouch, pitch bend, sysex, wrong lengths
        assert_eq!(decode(&[0xA0, 0x23, 64]), None);
        assert_eq!(decode(&[0xE0, 0x00, 0x40]), None);
        assert_eq!(decode(&[0xF0, 0x7E, 0x00, 0x06, 0x01, 0xF7]), None);
        assert_eq!(decode(&[0x90, 0x23]), None);
    }
}
