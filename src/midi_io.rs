use midir::{MidiInput, MidiInputConnection, MidiInputPort, MidiOutput, MidiOutputConnection};

use crate::ok_or_continue;
use crate::MidiError;

fn guess_port<T: midir::MidiIO>(midi_io: &T, keyword: &str) -> Option<T::Port> {
    for port in midi_io.ports() {
        let name = ok_or_continue!(midi_io.port_name(&port));

        if name.contains(keyword) {
            return Some(port);
        }
    }

    None
}

pub trait OutputDevice
where
    Self: Sized,
{
    const MIDI_CONNECTION_NAME: &'static str;
    const MIDI_DEVICE_KEYWORD: &'static str;

    /// Initiate from an existing midir connection.
    fn from_connection(connection: MidiOutputConnection) -> Result<Self, MidiError>;

    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError>;

    /// Search the midi devices and choose the first output device matching
    /// `MIDI_DEVICE_KEYWORD`.
    fn guess() -> Result<Self, MidiError> {
        let midi_output = MidiOutput::new(crate::APPLICATION_NAME)?;

        let port = guess_port(&midi_output, Self::MIDI_DEVICE_KEYWORD).ok_or(
            MidiError::NoPortFound {
                keyword: Self::MIDI_DEVICE_KEYWORD,
            },
        )?;

        let connection = midi_output.connect(&port, Self::MIDI_CONNECTION_NAME)?;

        Self::from_connection(connection)
    }
}

pub struct InputDeviceHandler {
    // never explicitly used, but dropping it would sever the connection
    #[allow(dead_code)]
    connection: MidiInputConnection<()>,
}

pub struct InputDeviceHandlerPolling<Message> {
    #[allow(dead_code)]
    connection: MidiInputConnection<()>,
    receiver: std::sync::mpsc::Receiver<Message>,
}

impl<Message> MsgPollingWrapper for InputDeviceHandlerPolling<Message> {
    type Message = Message;

    fn receiver(&self) -> &std::sync::mpsc::Receiver<Self::Message> {
        &self.receiver
    }
}

pub trait MsgPollingWrapper {
    type Message;

    /// The [`std::sync::mpsc::Receiver`] that messages arrive on
    fn receiver(&self) -> &std::sync::mpsc::Receiver<Self::Message>;

    /// Wait for a message to arrive, and return that. For a non-blocking
    /// variant, see [`Self::try_recv`].
    fn recv(&self) -> Self::Message {
        self.receiver()
            .recv()
            .expect("Message sender has hung up - please report a bug")
    }

    /// If there is a pending message, return that. Otherwise, return `None`.
    ///
    /// This function does not block.
    fn try_recv(&self) -> Option<Self::Message> {
        use std::sync::mpsc::TryRecvError;

        match self.receiver().try_recv() {
            Ok(msg) => Some(msg),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                panic!("Message sender has hung up - please report a bug")
            }
        }
    }

    /// Receives a single message. If no message arrives within the timespan
    /// specified by `timeout`, `None` is returned.
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<Self::Message> {
        use std::sync::mpsc::RecvTimeoutError;

        match self.receiver().recv_timeout(timeout) {
            Ok(msg) => Some(msg),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                panic!("Message sender has hung up - please report a bug")
            }
        }
    }

    /// Returns an iterator over all arriving messages. The iterator will only
    /// return when the MIDI connection has been dropped.
    ///
    /// For an iteration method that doesn't block, but returns immediately
    /// when there are no more pending messages, see [`Self::iter_pending`].
    fn iter(&self) -> std::sync::mpsc::Iter<'_, Self::Message> {
        self.receiver().iter()
    }

    /// Returns an iterator over the currently pending messages. As soon as
    /// all pending messages have been iterated over, the iterator will
    /// return.
    ///
    /// For an iteration method that will block, waiting for new messages to
    /// arrive, see [`Self::iter`].
    fn iter_pending(&self) -> std::sync::mpsc::TryIter<'_, Self::Message> {
        self.receiver().try_iter()
    }

    /// Drain any pending messages. This is useful on startup - some grid
    /// controllers have the weird property that button inputs made while
    /// disconnected queue up and are all released at the same time as soon as
    /// someone connects. In most cases you don't want to deal with those
    /// stale messages - in those cases, call `drain()` after establishing
    /// the connection.
    ///
    /// This function returns the number of messages that were discarded.
    fn drain(&self) -> usize {
        self.iter_pending().count()
    }
}

pub trait InputDevice {
    const MIDI_CONNECTION_NAME: &'static str;
    const MIDI_DEVICE_KEYWORD: &'static str;
    type Message;

    /// Decode a raw MIDI message into this device's message type. Returns
    /// `None` for messages that don't concern the device, which are silently
    /// dropped.
    fn decode_message(timestamp: u64, data: &[u8]) -> Option<Self::Message>;

    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn from_port<F>(
        midi_input: MidiInput,
        port: &MidiInputPort,
        mut user_callback: F,
    ) -> Result<InputDeviceHandler, MidiError>
    where
        F: FnMut(Self::Message) + Send + 'static,
    {
        let midir_callback = move |timestamp: u64, data: &[u8], _: &mut _| {
            if let Some(msg) = Self::decode_message(timestamp, data) {
                (user_callback)(msg);
            }
        };

        let connection = midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

        Ok(InputDeviceHandler { connection })
    }

    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn from_port_polling(
        midi_input: MidiInput,
        port: &MidiInputPort,
    ) -> Result<InputDeviceHandlerPolling<Self::Message>, MidiError>
    where
        Self::Message: Send + 'static,
    {
        let (sender, receiver) = std::sync::mpsc::channel();

        let midir_callback = move |timestamp: u64, data: &[u8], _: &mut _| {
            if let Some(msg) = Self::decode_message(timestamp, data) {
                // The following statement can only panic when the receiver was
                // dropped but the connection is still alive. The user would
                // have to destructure the input device handler in order to get
                // the connection and the receiver separately, in order to drop
                // one but not the other - but if he does that it's his fault
                // that he gets a panic /shrug
                sender
                    .send(msg)
                    .expect("Message receiver has hung up (this shouldn't happen)");
            }
        };

        let connection = midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;

        Ok(InputDeviceHandlerPolling {
            connection,
            receiver,
        })
    }

    /// Search the midi devices and choose the first input device matching
    /// `MIDI_DEVICE_KEYWORD`.
    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn guess<F>(user_callback: F) -> Result<InputDeviceHandler, MidiError>
    where
        F: FnMut(Self::Message) + Send + 'static,
    {
        let midi_input = MidiInput::new(crate::APPLICATION_NAME)?;

        let port = guess_port(&midi_input, Self::MIDI_DEVICE_KEYWORD).ok_or(
            MidiError::NoPortFound {
                keyword: Self::MIDI_DEVICE_KEYWORD,
            },
        )?;

        Self::from_port(midi_input, &port, user_callback)
    }

    /// Search the midi devices and choose the first input device matching
    /// `MIDI_DEVICE_KEYWORD`.
    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn guess_polling() -> Result<InputDeviceHandlerPolling<Self::Message>, MidiError>
    where
        Self::Message: Send + 'static,
    {
        let midi_input = MidiInput::new(crate::APPLICATION_NAME)?;

        let port = guess_port(&midi_input, Self::MIDI_DEVICE_KEYWORD).ok_or(
            MidiError::NoPortFound {
                keyword: Self::MIDI_DEVICE_KEYWORD,
            },
        )?;

        Self::from_port_polling(midi_input, &port)
    }
}
