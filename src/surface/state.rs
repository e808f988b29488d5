use super::{Input, Message, Output, SurfaceOutput};
use crate::grid::{CONTROL_COUNT, GRID_COLUMNS, GRID_ROWS};
use crate::util::Array2d;
use crate::{Color, InputDevice as _, InputDeviceHandlerPolling, MidiError, OutputDevice as _, Pad};

/// A stateful wrapper around an output endpoint that remembers the last-known
/// velocity and color of every pad and control button.
///
/// All state lives in this struct and is only touched through its methods;
/// everything starts out as released/[`Color::Off`] and is discarded when the
/// surface is dropped. Feed decoded [`Message`]s in through
/// [`Surface::handle_message`] or [`Surface::dispatch`], and paint through
/// the `set_*_color` methods.
pub struct Surface<O: SurfaceOutput> {
    output: O,
    pad_velocities: Array2d<u8>,
    pad_colors: Array2d<Color>,
    control_velocities: [u8; CONTROL_COUNT as usize],
    control_colors: [Color; CONTROL_COUNT as usize],
}

impl<O: SurfaceOutput> Surface<O> {
    /// Wrap an output endpoint. The surface assumes the device starts out
    /// with all LEDs off; call [`Surface::reset_colors`] first if it may not.
    pub fn new(output: O) -> Self {
        Self {
            output,
            pad_velocities: Array2d::new(GRID_COLUMNS as usize, GRID_ROWS as usize),
            pad_colors: Array2d::new(GRID_COLUMNS as usize, GRID_ROWS as usize),
            control_velocities: [0; CONTROL_COUNT as usize],
            control_colors: [Color::Off; CONTROL_COUNT as usize],
        }
    }

    /// Record an incoming pad event. Returns `true` iff the pad was pressed
    /// (nonzero velocity).
    pub fn pad_event(&mut self, pad: Pad, velocity: u8) -> Result<bool, MidiError> {
        if !pad.is_valid() {
            return Err(MidiError::PadOutOfRange { pad });
        }

        self.pad_velocities
            .set(pad.col as usize, pad.row as usize, velocity);
        Ok(velocity > 0)
    }

    /// Record an incoming control button event. Returns `true` iff the
    /// button was pressed (nonzero velocity).
    pub fn control_event(&mut self, index: u8, velocity: u8) -> Result<bool, MidiError> {
        if index >= CONTROL_COUNT {
            return Err(MidiError::ControlOutOfRange { index });
        }

        self.control_velocities[index as usize] = velocity;
        Ok(velocity > 0)
    }

    /// Record a decoded input message. This is the canonical state-update
    /// step; the returned flag is the press/release classification.
    pub fn handle_message(&mut self, msg: Message) -> Result<bool, MidiError> {
        match msg {
            Message::Pad { pad, velocity } => self.pad_event(pad, velocity),
            Message::Control { index, velocity } => self.control_event(index, velocity),
        }
    }

    /// Record a decoded input message, then hand it to `handler`. The state
    /// tables are up to date by the time the handler hook runs.
    pub fn dispatch<H>(&mut self, msg: Message, handler: &mut H) -> Result<bool, MidiError>
    where
        H: SurfaceHandler<O>,
    {
        match msg {
            Message::Pad { pad, velocity } => {
                let pressed = self.pad_event(pad, velocity)?;
                handler.on_pad(self, pad, velocity, pressed)?;
                Ok(pressed)
            }
            Message::Control { index, velocity } => {
                let pressed = self.control_event(index, velocity)?;
                handler.on_control(self, index, velocity, pressed)?;
                Ok(pressed)
            }
        }
    }

    /// Set a pad LED and record the color.
    pub fn set_pad_color(&mut self, pad: Pad, color: Color) -> Result<(), MidiError> {
        self.output.set_pad_color(pad, color)?;
        self.pad_colors.set(pad.col as usize, pad.row as usize, color);
        Ok(())
    }

    /// Set a control button LED and record the color.
    pub fn set_control_color(&mut self, index: u8, color: Color) -> Result<(), MidiError> {
        self.output.set_control_color(index, color)?;
        self.control_colors[index as usize] = color;
        Ok(())
    }

    /// Turn off every LED on the device and clear the recorded colors, so
    /// that recorded state keeps matching what the device shows.
    pub fn reset_colors(&mut self) -> Result<(), MidiError> {
        self.output.reset_colors()?;
        self.pad_colors.clear();
        self.control_colors = [Color::Off; CONTROL_COUNT as usize];
        Ok(())
    }

    /// Last recorded velocity of a pad, or `None` if the coordinate is
    /// outside the grid
    pub fn pad_velocity(&self, pad: Pad) -> Option<u8> {
        pad.is_valid()
            .then(|| self.pad_velocities.get(pad.col as usize, pad.row as usize))
    }

    /// Last color written to a pad, or `None` if the coordinate is outside
    /// the grid
    pub fn pad_color(&self, pad: Pad) -> Option<Color> {
        pad.is_valid()
            .then(|| self.pad_colors.get(pad.col as usize, pad.row as usize))
    }

    /// Last recorded velocity of a control button, or `None` if the index is
    /// out of range
    pub fn control_velocity(&self, index: u8) -> Option<u8> {
        self.control_velocities.get(index as usize).copied()
    }

    /// Last color written to a control button, or `None` if the index is out
    /// of range
    pub fn control_color(&self, index: u8) -> Option<Color> {
        self.control_colors.get(index as usize).copied()
    }

    /// The wrapped output endpoint, for raw protocol access. Colors set
    /// through it are not recorded.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}

impl Surface<Output> {
    /// Search the midi devices for an input/output endpoint pair matching
    /// the device keyword and construct a surface bound to the output,
    /// returning the input side as a polling handle.
    ///
    /// ```no_run
    /// use padgrid::MsgPollingWrapper as _;
    ///
    /// let (mut surface, input) = padgrid::surface::Surface::guess_polling()?;
    ///
    /// for msg in input.iter() {
    ///     let pressed = surface.handle_message(msg.clone())?;
    ///     println!("{:?} pressed={}", msg, pressed);
    /// }
    /// # Ok::<(), padgrid::MidiError>(())
    /// ```
    pub fn guess_polling() -> Result<(Self, InputDeviceHandlerPolling<Message>), MidiError> {
        let input = Input::guess_polling()?;
        let output = Output::guess()?;

        Ok((Self::new(output), input))
    }
}

/// Application hook for reacting to surface events, injected into
/// [`Surface::dispatch`].
///
/// The surface has already recorded the event when a hook runs, so reads
/// through the surface observe current state. Hooks may paint; send failures
/// propagate out of `dispatch`.
pub trait SurfaceHandler<O: SurfaceOutput> {
    fn on_pad(
        &mut self,
        surface: &mut Surface<O>,
        pad: Pad,
        velocity: u8,
        pressed: bool,
    ) -> Result<(), MidiError> {
        let _ = (surface, pad, velocity, pressed);
        Ok(())
    }

    fn on_control(
        &mut self,
        surface: &mut Surface<O>,
        index: u8,
        velocity: u8,
        pressed: bool,
    ) -> Result<(), MidiError> {
        let _ = (surface, index, velocity, pressed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MockOutput;

    fn surface() -> Surface<MockOutput> {
        Surface::new(MockOutput::new())
    }

    #[test]
    fn pad_events_record_velocity_and_classify() {
        let mut surface = surface();
        let pad = Pad::new(2, 3);

        assert!(surface.pad_event(pad, 100).unwrap());
        assert_eq!(surface.pad_velocity(pad), Some(100));

        assert!(!surface.pad_event(pad, 0).unwrap());
        assert_eq!(surface.pad_velocity(pad), Some(0));
    }

    #[test]
    fn control_events_record_velocity_and_classify() {
        let mut surface = surface();

        assert!(surface.control_event(8, 64).unwrap());
        assert_eq!(surface.control_velocity(8), Some(64));

        assert!(!surface.control_event(8, 0).unwrap());
        assert_eq!(surface.control_velocity(8), Some(0));
    }

    #[test]
    fn cells_are_independent() {
        let mut surface = surface();

        surface.pad_event(Pad::new(0, 0), 10).unwrap();
        surface.pad_event(Pad::new(7, 8), 20).unwrap();

        assert_eq!(surface.pad_velocity(Pad::new(0, 0)), Some(10));
        assert_eq!(surface.pad_velocity(Pad::new(7, 8)), Some(20));
        assert_eq!(surface.pad_velocity(Pad::new(3, 3)), Some(0));
    }

    #[test]
    fn set_colors_send_and_record() {
        let mut surface = surface();
        let pad = Pad::new(0, 0);

        surface.set_pad_color(pad, Color::RedHigh).unwrap();
        surface.set_control_color(4, Color::AmberHigh).unwrap();

        assert_eq!(surface.pad_color(pad), Some(Color::RedHigh));
        assert_eq!(surface.control_color(4), Some(Color::AmberHigh));
        assert_eq!(
            surface.output_mut().sent(),
            &[vec![0x90, 0x00, 0x0F], vec![0xB0, 0x6C, 0x3F]]
        );
    }

    #[test]
    fn failed_encodes_record_nothing() {
        let mut surface = surface();

        assert!(surface.set_pad_color(Pad::new(9, 9), Color::RedHigh).is_err());
        assert!(surface.set_control_color(9, Color::RedHigh).is_err());
        assert!(surface.output_mut().sent().is_empty());
    }

    #[test]
    fn reset_clears_recorded_colors() {
        let mut surface = surface();
        let pad = Pad::new(4, 2);

        surface.set_pad_color(pad, Color::GreenHigh).unwrap();
        surface.set_control_color(0, Color::RedLow).unwrap();
        surface.reset_colors().unwrap();

        assert_eq!(surface.pad_color(pad), Some(Color::Off));
        assert_eq!(surface.control_color(0), Some(Color::Off));
        assert_eq!(
            surface.output_mut().sent().last().unwrap(),
            &vec![0xB0, 0x00, 0x00]
        );
    }

    #[test]
    fn out_of_range_reads_and_events() {
        let mut surface = surface();

        assert_eq!(surface.pad_velocity(Pad::new(8, 0)), None);
        assert_eq!(surface.pad_color(Pad::new(0, 9)), None);
        assert_eq!(surface.control_velocity(9), None);
        assert_eq!(surface.control_color(9), None);

        assert!(matches!(
            surface.pad_event(Pad::new(8, 0), 1),
            Err(MidiError::PadOutOfRange { .. })
        ));
        assert!(matches!(
            surface.control_event(9, 1),
            Err(MidiError::ControlOutOfRange { index: 9 })
        ));
    }

    #[test]
    fn decoded_wire_messages_update_state() {
        use crate::surface::Input;
        use crate::InputDevice as _;

        let mut surface = surface();

        // key 0x23 = row 2, col 3
        let msg = Input::decode_message(0, &[0x90, 0x23, 64]).unwrap();
        assert_eq!(
            msg,
            Message::Pad {
                pad: Pad::new(2, 3),
                velocity: 64,
            }
        );
        assert!(surface.handle_message(msg).unwrap());
        assert_eq!(surface.pad_velocity(Pad::new(2, 3)), Some(64));
    }

    struct PaintOnPress {
        seen_velocity: Option<u8>,
    }

    impl SurfaceHandler<MockOutput> for PaintOnPress {
        fn on_pad(
            &mut self,
            surface: &mut Surface<MockOutput>,
            pad: Pad,
            velocity: u8,
            pressed: bool,
        ) -> Result<(), MidiError> {
            // state must be recorded before the hook runs
            self.seen_velocity = surface.pad_velocity(pad);

            if pressed {
                surface.set_pad_color(pad, Color::GreenHigh)?;
            }
            let _ = velocity;
            Ok(())
        }
    }

    #[test]
    fn dispatch_records_before_invoking_handler() {
        let mut surface = surface();
        let mut handler = PaintOnPress {
            seen_velocity: None,
        };

        let msg = Message::Pad {
            pad: Pad::new(1, 1),
            velocity: 90,
        };
        assert!(surface.dispatch(msg, &mut handler).unwrap());

        assert_eq!(handler.seen_velocity, Some(90));
        assert_eq!(surface.pad_color(Pad::new(1, 1)), Some(Color::GreenHigh));

        let release = Message::Pad {
            pad: Pad::new(1, 1),
            velocity: 0,
        };
        assert!(!surface.dispatch(release, &mut handler).unwrap());
        assert_eq!(handler.seen_velocity, Some(0));
    }
}
