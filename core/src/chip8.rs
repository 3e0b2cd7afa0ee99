use std::io::Read;

use log::{debug, error, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::MAX_ROM_SIZE;
use crate::error::{Fault, RomError};
use crate::framebuffer::Framebuffer;
use crate::instruction;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::opcode::Opcode;
use crate::registers::Registers;
use crate::state::State;
use crate::timers::Timers;

/// What a single call to `Chip8::step` amounted to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// An instruction ran to completion.
    Executed,
    /// `Fx0A` is still waiting on a key; the same instruction runs again next cycle.
    AwaitingKey,
    /// Nothing in the instruction set matched; only the timers moved.
    UnknownOpcode(Opcode),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `fault` that halted it, if any
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU and its timers by one cycle
/// - inspecting its frame buffer for rendering by some display
/// - inspecting registers, memory and timers
///
/// Input isn't tracked here: the host owns a `Keypad` and passes it to every `step`.
pub struct Chip8 {
    state: State,
    fault: Option<Fault>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// A Chip-8 whose `Cxkk` results are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8 {
            state: State::new(rng),
            fault: None,
        }
    }

    /// Creates a Chip-8 with a rom already loaded
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM
    pub fn from_rom(reader: &mut dyn Read) -> Result<Self, RomError> {
        let mut chip8 = Self::new();
        chip8.load_rom(reader)?;
        Ok(chip8)
    }

    /// Load a rom from a source file
    /// The whole rom is read before memory is touched, so a failed load leaves memory as it was.
    /// At most one byte past the size limit is read, enough to tell that a rom is too large.
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), RomError> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader.take(MAX_ROM_SIZE as u64 + 1).read_to_end(&mut rom)?;
        self.load_program(&rom)
    }

    /// Copies a program image into memory at 0x200
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), RomError> {
        if program.len() > MAX_ROM_SIZE {
            return Err(RomError::TooLarge {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }
        self.state.memory.load_program(program);
        debug!("loaded {} byte ROM", program.len());
        Ok(())
    }

    /// Advances the CPU by a single cycle
    /// - gets, decodes and executes the next opcode
    /// - ticks the timers, whatever the opcode did
    ///
    /// Faults are fatal: once one has been returned every later call returns it again.
    ///
    /// # Arguments
    /// * `keypad` the keys that are held down during this cycle
    pub fn step(&mut self, keypad: &Keypad) -> Result<Cycle, Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let op = self.state.memory.read_opcode(self.state.registers.pc);
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.registers.v,
            self.state.registers.i,
            self.state.registers.pc
        );

        let cycle = match instruction::from_op(op) {
            Some(operation) => {
                if let Err(fault) = operation(op, &mut self.state, keypad) {
                    error!("halting on {}: {}", op, fault);
                    self.fault = Some(fault);
                    return Err(fault);
                }
                match self.state.register_needing_key {
                    Some(register) => {
                        trace!("V{:X} is waiting on a key press", register);
                        Cycle::AwaitingKey
                    }
                    None => Cycle::Executed,
                }
            }
            None => {
                warn!(
                    "unknown opcode {} at pc {:04X}",
                    op, self.state.registers.pc
                );
                Cycle::UnknownOpcode(op)
            }
        };

        self.state.timers.tick();
        Ok(cycle)
    }

    /// Returns a snapshot of the FrameBuffer if the display should be redrawn
    /// Taking the frame lowers the draw flag until the next change.
    pub fn get_frame(&mut self) -> Option<Framebuffer> {
        if self.state.frame_buffer.is_dirty() {
            self.state.frame_buffer.clear_dirty();
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn frame_buffer(&self) -> &Framebuffer {
        &self.state.frame_buffer
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn timers(&self) -> &Timers {
        &self.state.timers
    }

    /// Whether the host should currently be playing a tone.
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    /// The fault that halted the program, if there was one.
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chip8_with(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::with_seed(0);
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_new_chip8() {
        let chip8 = Chip8::new();
        assert_eq!(chip8.registers().pc, 0x200);
        assert_eq!(chip8.memory().as_slice()[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert!(chip8.memory().as_slice()[0x200..].iter().all(|b| *b == 0));
        assert!(!chip8.frame_buffer().is_dirty());
        assert_eq!(chip8.fault(), None);
    }

    #[test]
    fn test_cycles_while_no_register_needs_key() {
        // insert a cls opcode so there is something to execute
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        assert_eq!(chip8.step(&Keypad::new()), Ok(Cycle::Executed));
        assert_eq!(chip8.registers().pc, 0x202);
    }

    #[test]
    fn test_rejects_oversized_rom() {
        let mut chip8 = Chip8::with_seed(0);
        let result = chip8.load_program(&[0x1; MAX_ROM_SIZE + 1]);
        assert!(matches!(
            result,
            Err(RomError::TooLarge { size, max }) if size == MAX_ROM_SIZE + 1 && max == MAX_ROM_SIZE
        ));
        assert!(chip8.memory().as_slice()[0x200..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_stops_reading_past_max_rom_size() {
        let mut chip8 = Chip8::with_seed(0);
        let mut rom = std::io::repeat(0x1);
        let result = chip8.load_rom(&mut rom);
        assert!(matches!(result, Err(RomError::TooLarge { size, .. }) if size == MAX_ROM_SIZE + 1));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_read_error_leaves_memory_untouched() {
        let mut chip8 = Chip8::with_seed(0);
        let before = chip8.memory().as_slice().to_vec();
        let result = chip8.load_rom(&mut FailingReader);
        assert!(matches!(result, Err(RomError::Io(_))));
        assert_eq!(chip8.memory().as_slice(), &before[..]);
        assert!(matches!(Chip8::from_rom(&mut FailingReader), Err(RomError::Io(_))));
    }

    #[test]
    fn test_loads_rom_from_reader() {
        let mut rom: &[u8] = &[0x12, 0x00];
        let chip8 = Chip8::from_rom(&mut rom).unwrap();
        assert_eq!(chip8.memory().read_opcode(0x200), Opcode(0x1200));
    }

    #[test]
    fn test_doesnt_advance_while_register_needs_key() {
        let mut chip8 = chip8_with(&[0xF3, 0x0A]);
        assert_eq!(chip8.step(&Keypad::new()), Ok(Cycle::AwaitingKey));
        assert_eq!(chip8.step(&Keypad::new()), Ok(Cycle::AwaitingKey));
        assert!(chip8.awaiting_key());
        assert_eq!(chip8.registers().pc, 0x200);

        let mut keypad = Keypad::new();
        keypad.press(0x9);
        assert_eq!(chip8.step(&keypad), Ok(Cycle::Executed));
        assert!(!chip8.awaiting_key());
        assert_eq!(chip8.registers().v[0x3], 0x9);
        assert_eq!(chip8.registers().pc, 0x202);
    }

    #[test]
    fn test_timers_tick_while_waiting_on_key() {
        // V0 = 3; DT = V0; wait for a key in V1
        let mut chip8 = chip8_with(&[0x60, 0x03, 0xF0, 0x15, 0xF1, 0x0A]);
        let keypad = Keypad::new();
        chip8.step(&keypad).unwrap();
        chip8.step(&keypad).unwrap();
        // The delay timer is set and then ticked within the same cycle
        assert_eq!(chip8.timers().delay, 2);
        chip8.step(&keypad).unwrap();
        chip8.step(&keypad).unwrap();
        chip8.step(&keypad).unwrap();
        assert_eq!(chip8.timers().delay, 0);
    }

    #[test]
    fn test_unknown_opcode_only_ticks_timers() {
        let mut chip8 = chip8_with(&[0x81, 0x27]);
        chip8.state.timers.sound = 2;
        let registers = chip8.registers().clone();
        let keypad = Keypad::new();
        assert_eq!(chip8.step(&keypad), Ok(Cycle::UnknownOpcode(Opcode(0x8127))));
        assert_eq!(chip8.registers(), &registers);
        assert_eq!(chip8.timers().sound, 1);
        assert!(chip8.sound_active());
        assert_eq!(chip8.step(&keypad), Ok(Cycle::UnknownOpcode(Opcode(0x8127))));
        assert!(!chip8.sound_active());
    }

    #[test]
    fn test_fault_halts() {
        // RET with nothing on the stack
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        chip8.state.timers.delay = 5;
        let fault = Fault::StackUnderflow { pc: 0x200 };
        assert_eq!(chip8.step(&Keypad::new()), Err(fault));
        assert_eq!(chip8.step(&Keypad::new()), Err(fault));
        assert_eq!(chip8.fault(), Some(fault));
        assert_eq!(chip8.timers().delay, 5);
    }

    #[test]
    fn test_get_frame_lowers_draw_flag() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        assert!(chip8.get_frame().is_none());
        chip8.step(&Keypad::new()).unwrap();
        assert!(chip8.get_frame().is_some());
        assert!(chip8.get_frame().is_none());
    }
}
