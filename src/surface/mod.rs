/*!
The grid surface: message decoding, color encoding, and stateful tracking.

[`Input`] and [`Output`] are the low-level halves of the protocol - every
method on [`SurfaceOutput`] corresponds to exactly one MIDI message. The
[`Surface`] wrapper layers the per-cell button and color bookkeeping on top
and is what most applications want to talk to.
*/

mod input;
pub use input::*;

mod output;
pub use output::*;

mod state;
pub use state::*;

mod mock;
pub use mock::*;

// Status bytes of the three message kinds the surface speaks
pub(crate) const NOTE_ON: u8 = 0x90;
pub(crate) const NOTE_OFF: u8 = 0x80;
pub(crate) const CONTROLLER_CHANGE: u8 = 0xB0;
