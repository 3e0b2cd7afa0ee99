use std::time::{Duration, Instant};

use anyhow::Result;
use log::{info, trace};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8vm_core::{Chip8, Keypad};
use chip8vm_display::Display;

use crate::keymap::Layout;

/// How long a single CPU cycle should take (600Hz).
const CYCLE_TIME: Duration = Duration::from_nanos(1_000_000_000 / 600);
/// Frames are rendered at most at 60Hz.
const FRAME_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Drives the Chip-8 until the window is closed or the program faults.
///
/// # Arguments
/// * `chip8` a Chip-8 with a ROM loaded
/// * `scale` the size multiplier for each pixel
/// * `layout` the keys that stand in for the keypad
pub fn run(mut chip8: Chip8, scale: u32, layout: Layout) -> Result<()> {
    // Get SDL2 context
    let sdl = sdl2::init().map_err(anyhow::Error::msg)?;
    let mut display = Display::new(&sdl, scale)?;
    let mut events = sdl.event_pump().map_err(anyhow::Error::msg)?;

    let mut keypad = Keypad::new();
    let mut last_cycle = Instant::now();
    let mut last_frame = Instant::now();
    let mut sounding = false;

    'event: loop {
        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(k) = layout.keymap(key) {
                        keypad.press(k);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(k) = layout.keymap(key) {
                        keypad.release(k);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        chip8.step(&keypad)?;

        if chip8.sound_active() != sounding {
            sounding = chip8.sound_active();
            trace!("sound {}", if sounding { "on" } else { "off" });
        }

        // If the draw flag is set and a frame is due, unset it and render the current frame
        if last_frame.elapsed() >= FRAME_TIME {
            if let Some(frame) = chip8.get_frame() {
                display.render(&frame)?;
                last_frame = Instant::now();
            }
        }

        // Handle timing
        let elapsed_cycle_time = last_cycle.elapsed();
        if CYCLE_TIME > elapsed_cycle_time {
            std::thread::sleep(CYCLE_TIME - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("window closed");
    Ok(())
}
