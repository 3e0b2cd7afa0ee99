use crate::constants::{ADDRESS_MASK, INSTRUCTION_WIDTH, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH};
use crate::error::Fault;

/// # Register File
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry flag
/// - (i) a 16-bit memory address register, of which only 12 bits are used
///
/// Counter
/// - (pc) a 16-bit program counter
///
/// Stack
/// - (stack) 16 return addresses
/// - (sp) an 8-bit stack pointer to the next free slot
#[derive(Clone, Debug, PartialEq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub stack: [u16; STACK_DEPTH],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
        }
    }

    /// Moves on to the next instruction.
    pub fn advance(&mut self) {
        self.jump(self.pc.wrapping_add(INSTRUCTION_WIDTH));
    }

    /// Skips the next instruction if `condition` holds, otherwise just advances.
    pub fn skip_if(&mut self, condition: bool) {
        if condition {
            self.advance();
        }
        self.advance();
    }

    pub fn jump(&mut self, addr: u16) {
        self.pc = addr & ADDRESS_MASK;
    }

    pub fn set_i(&mut self, addr: u16) {
        self.i = addr & ADDRESS_MASK;
    }

    /// Writes the carry/borrow/collision flag.
    pub fn set_flag(&mut self, flag: bool) {
        self.v[0xF] = u8::from(flag);
    }

    /// Pushes a return address onto the stack.
    pub fn push(&mut self, addr: u16) -> Result<(), Fault> {
        let pc = self.pc;
        let slot = self
            .stack
            .get_mut(self.sp as usize)
            .ok_or(Fault::StackOverflow { pc })?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recently pushed return address.
    pub fn pop(&mut self) -> Result<u16, Fault> {
        let pc = self.pc;
        self.sp = self.sp.checked_sub(1).ok_or(Fault::StackUnderflow { pc })?;
        Ok(self.stack[self.sp as usize])
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_program_start() {
        let registers = Registers::new();
        assert_eq!(registers.pc, 0x200);
        assert_eq!(registers.sp, 0);
        assert_eq!(registers.v, [0; 16]);
    }

    #[test]
    fn test_skip_if() {
        let mut registers = Registers::new();
        registers.skip_if(false);
        assert_eq!(registers.pc, 0x202);
        registers.skip_if(true);
        assert_eq!(registers.pc, 0x206);
    }

    #[test]
    fn test_jump_and_i_are_masked() {
        let mut registers = Registers::new();
        registers.jump(0x1234);
        registers.set_i(0xFFFF);
        assert_eq!(registers.pc, 0x234);
        assert_eq!(registers.i, 0xFFF);
    }

    #[test]
    fn test_push_then_pop() {
        let mut registers = Registers::new();
        registers.push(0x300).unwrap();
        registers.push(0x400).unwrap();
        assert_eq!(registers.sp, 2);
        assert_eq!(registers.pop(), Ok(0x400));
        assert_eq!(registers.pop(), Ok(0x300));
        assert_eq!(registers.sp, 0);
    }

    #[test]
    fn test_stack_holds_sixteen_frames() {
        let mut registers = Registers::new();
        for frame in 0..STACK_DEPTH as u16 {
            assert_eq!(registers.push(frame), Ok(()));
        }
        assert_eq!(
            registers.push(0xABC),
            Err(Fault::StackOverflow { pc: 0x200 })
        );
        // The failed push leaves the stack untouched
        assert_eq!(registers.sp, 16);
        assert_eq!(registers.stack[15], 15);
    }

    #[test]
    fn test_pop_from_empty_stack() {
        let mut registers = Registers::new();
        assert_eq!(registers.pop(), Err(Fault::StackUnderflow { pc: 0x200 }));
        assert_eq!(registers.sp, 0);
    }
}
