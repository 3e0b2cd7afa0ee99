use rand::rngs::StdRng;

use crate::framebuffer::Framebuffer;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timers::Timers;

/// The Chip8's internal state
///
/// ## CPU
/// - `registers` V0..VF, I, the program counter and the call stack
/// - `timers` delay & sound
///
/// ## Memory
/// - 4096 bytes of addressable memory
/// - a 64x32 frame buffer that stores the contents of the next frame to be drawn
///
/// ## Input
/// - Emulation stalls on `Fx0A` until a key is pressed; meanwhile the register
///   waiting for it is held in `register_needing_key`
///
/// ## Randomness
/// - `rng` is seeded once when the state is created and advanced by every `Cxkk`
pub struct State {
    pub registers: Registers,
    pub memory: Memory,
    pub timers: Timers,
    pub frame_buffer: Framebuffer,
    pub register_needing_key: Option<u8>,
    pub rng: StdRng,
}

impl State {
    pub fn new(rng: StdRng) -> Self {
        State {
            registers: Registers::new(),
            memory: Memory::new(),
            timers: Timers::default(),
            frame_buffer: Framebuffer::new(),
            register_needing_key: None,
            rng,
        }
    }
}
