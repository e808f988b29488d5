use crate::Pad;

#[derive(Debug)]
pub enum MidiError {
    InputConnectError(midir::ConnectError<midir::MidiInput>),
    OutputConnectError(midir::ConnectError<midir::MidiOutput>),
    InitError(midir::InitError),
    PortInfoError(midir::PortInfoError),
    SendError(midir::SendError),
    NoPortFound {
        // The keyword that was searched for
        keyword: &'static str,
    },
    /// A pad coordinate outside the 8x9 grid was passed to an encode or
    /// state operation
    PadOutOfRange {
        pad: Pad,
    },
    /// A control button index outside 0..=8 was passed to an encode or state
    /// operation
    ControlOutOfRange {
        index: u8,
    },
}

impl std::fmt::Display for MidiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputConnectError(_) => f.write_str("connecting to MIDI input port failed"),
            Self::OutputConnectError(_) => f.write_str("connecting to MIDI output port failed"),
            Self::InitError(_) => f.write_str("MIDI context initialization failed"),
            Self::PortInfoError(_) => f.write_str("MIDI Port retrieval failed"),
            Self::SendError(_) => f.write_str("sending MIDI message failed"),
            Self::NoPortFound { keyword } => write!(f, "couldn't find a port for {:?}", keyword),
            Self::PadOutOfRange { pad } => {
                write!(f, "pad ({}, {}) is outside the grid", pad.row, pad.col)
            }
            Self::ControlOutOfRange { index } => {
                write!(f, "control button index {} is outside 0..=8", index)
            }
        }
    }
}

impl std::error::Error for MidiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputConnectError(e) => Some(e),
            Self::OutputConnectError(e) => Some(e),
            Self::InitError(e) => Some(e),
            Self::PortInfoError(e) => Some(e),
            Self::SendError(e) => Some(e),
            Self::NoPortFound { .. } => None,
            Self::PadOutOfRange { .. } => None,
            Self::ControlOutOfRange { .. } => None,
        }
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for MidiError {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Self::InputConnectError(e)
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for MidiError {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Self::OutputConnectError(e)
    }
}

impl From<midir::InitError> for MidiError {
    fn from(e: midir::InitError) -> Self {
        Self::InitError(e)
    }
}

impl From<midir::PortInfoError> for MidiError {
    fn from(e: midir::PortInfoError) -> Self {
        Self::PortInfoError(e)
    }
}

impl From<midir::SendError> for MidiError {
    fn from(e: midir::SendError) -> Self {
        Self::SendError(e)
    }
}
