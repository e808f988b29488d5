/*!
An interfacing library for grid-based MIDI pad controllers - an 8x8 pad
matrix addressed through a 9-wide note key space, plus a row of 9 control
buttons - providing message decoding/encoding, coordinate mapping, and
stateful tracking of every cell's button and LED color state.

# Stateful access through the Surface API

Most applications want the [`surface::Surface`] wrapper: it decodes input
into typed events, remembers the last-known velocity and color of every
cell, and encodes color writes back to the device.

```no_run
use padgrid::{Color, MsgPollingWrapper as _};

let (mut surface, input) = padgrid::surface::Surface::guess_polling()?;

for msg in input.iter() {
    if let padgrid::surface::Message::Pad { pad, velocity } = msg {
        let color = if velocity > 0 { Color::GreenHigh } else { Color::Off };
        surface.set_pad_color(pad, color)?;
    }
}
# Ok::<(), padgrid::MidiError>(())
```

Applications that want a reusable reaction hook instead of an inline match
can implement [`surface::SurfaceHandler`] and feed messages through
[`surface::Surface::dispatch`]; state recording always happens before the
hook runs.

# Low-level access

Low-level access is provided via the [`surface::Input`] and
[`surface::Output`] structs. Every method in the low-level API corresponds
to exactly one MIDI message, so the user has fine control over the data
that's actually being sent. Encoding never silently produces malformed
bytes: out-of-range coordinates are rejected with [`MidiError`] values
before anything reaches the wire.
*/

pub mod util;

mod errors;
pub use errors::*;

mod midi_io;
pub use midi_io::*;

mod grid;
pub use grid::*;

mod color;
pub use color::*;

pub mod surface;

pub mod prelude {
    pub use crate::midi_io::{InputDevice, MsgPollingWrapper, OutputDevice};
    pub use crate::surface::SurfaceOutput;
    pub use crate::{Color, Pad};
}

/// Identifier used for e.g. the midi port names etc.
const APPLICATION_NAME: &str = "Padgrid";
