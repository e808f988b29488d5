//! A tiny paint program: pads paint with the active color, control button 0
//! clears the canvas, and control buttons 1..=7 pick the active color from
//! the palette shown on their LEDs.

use padgrid::surface::{Surface, SurfaceHandler, SurfaceOutput};
use padgrid::{Color, MidiError, MsgPollingWrapper as _, Pad};

const PALETTE: [Color; 7] = [
    Color::RedHigh,
    Color::RedLow,
    Color::AmberHigh,
    Color::AmberLow,
    Color::GreenHigh,
    Color::GreenLow,
    Color::Off,
];

struct Paint {
    active_color: Color,
}

impl Paint {
    fn repaint_palette<O: SurfaceOutput>(surface: &mut Surface<O>) -> Result<(), MidiError> {
        surface.reset_colors()?;

        for (i, &color) in PALETTE.iter().enumerate() {
            surface.set_control_color(i as u8 + 1, color)?;
        }

        Ok(())
    }
}

impl<O: SurfaceOutput> SurfaceHandler<O> for Paint {
    fn on_pad(
        &mut self,
        surface: &mut Surface<O>,
        pad: Pad,
        _velocity: u8,
        pressed: bool,
    ) -> Result<(), MidiError> {
        if pressed {
            surface.set_pad_color(pad, self.active_color)?;
        }

        Ok(())
    }

    fn on_control(
        &mut self,
        surface: &mut Surface<O>,
        index: u8,
        _velocity: u8,
        pressed: bool,
    ) -> Result<(), MidiError> {
        if !pressed {
            return Ok(());
        }

        if index == 0 {
            Self::repaint_palette(surface)?;
            log::info!("canvas cleared");
        } else if let Some(&color) = PALETTE.get(index as usize - 1) {
            self.active_color = color;
            log::info!("active color: {}", color);
        }

        Ok(())
    }
}

fn main() -> Result<(), MidiError> {
    env_logger::init();

    let (mut surface, input) = Surface::guess_polling()?;

    // throw away any input that queued up while the device was disconnected
    input.drain();

    Paint::repaint_palette(&mut surface)?;

    let mut paint = Paint {
        active_color: Color::RedHigh,
    };

    for msg in input.iter() {
        surface.dispatch(msg, &mut paint)?;
    }

    Ok(())
}
