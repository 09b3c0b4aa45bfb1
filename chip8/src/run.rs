use std::thread;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, FrameBuffer, Keypad, Output, ToneFlag};
use chip8_display::Display;

use crate::keymap::keymap;

/// 60Hz
const FRAME_PERIOD: Duration = Duration::from_nanos(16_666_667);

pub type Machine = Chip8<Keypad, FrameBuffer, ToneFlag>;

/// Runs `chip8` in a window until it is closed or Escape is pressed.
///
/// Each frame samples the keypad, drains window events into it, ticks the
/// interpreter, presents the frame if it changed and then sleeps out the rest
/// of the frame period.
pub fn run(chip8: &mut Machine, scale: u32) -> anyhow::Result<()> {
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    display.render(chip8.output())?;
    let mut last_frame = Instant::now();

    'frame: loop {
        chip8.input_mut().sample();
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'frame,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(key) = keymap(key) {
                        chip8.input_mut().press(key);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(key) = keymap(key) {
                        chip8.input_mut().release(key);
                    }
                }
                _ => continue,
            };
        }

        chip8.tick();

        if chip8.output().is_dirty() {
            display.render(chip8.output())?;
            chip8.output_mut().set_dirty(false);
        }

        let elapsed = last_frame.elapsed();
        if elapsed < FRAME_PERIOD {
            thread::sleep(FRAME_PERIOD - elapsed);
        }
        last_frame = Instant::now();
    }

    info!("window closed");
    Ok(())
}

/// Runs `frames` ticks without a window and returns the final frame.
pub fn headless(chip8: &mut Machine, frames: u32) -> &FrameBuffer {
    for _ in 0..frames {
        chip8.input_mut().sample();
        chip8.tick();
    }
    chip8.output()
}
