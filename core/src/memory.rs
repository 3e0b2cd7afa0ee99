use crate::constants::{ADDRESS_MASK, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::opcode::Opcode;

/// # Memory
/// 4096 bytes of flat, byte-addressable memory.
///
/// ```text
/// 0x000 ┬ sprite sheet (80 bytes)
///       │ reserved
/// 0x200 ┼ program image
///       │
/// 0xFFF ┴
/// ```
///
/// Every access is masked to 12 bits, so addresses past the end wrap around
/// to the start rather than faulting.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zero-filled memory with the sprite sheet copied into the reserved area.
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        bytes[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[(addr & ADDRESS_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.bytes[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Gets the opcode at `addr`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn read_opcode(&self, addr: u16) -> Opcode {
        Opcode::from_bytes(self.read(addr), self.read(addr.wrapping_add(1)))
    }

    /// Copies a program image to `PROGRAM_START`.
    /// The caller is responsible for making sure that it fits.
    pub(crate) fn load_program(&mut self, program: &[u8]) {
        let start = PROGRAM_START as usize;
        self.bytes[start..start + program.len()].copy_from_slice(program);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_ROM_SIZE;

    #[test]
    fn test_new_memory_holds_sprite_sheet() {
        let memory = Memory::new();
        // First glyph: 0
        assert_eq!(memory.as_slice()[0..5], [0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // Last glyph: F
        assert_eq!(memory.as_slice()[75..80], [0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert!(memory.as_slice()[80..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_reads_and_writes_wrap_past_0xfff() {
        let mut memory = Memory::new();
        memory.write(0x1005, 0xAB);
        assert_eq!(memory.read(0x005), 0xAB);
        assert_eq!(memory.read(0xF005), 0xAB);
    }

    #[test]
    fn test_reads_opcode_high_byte_first() {
        let mut memory = Memory::new();
        memory.write(0x200, 0xAA);
        memory.write(0x201, 0xBB);
        assert_eq!(memory.read_opcode(0x200), Opcode(0xAABB));
    }

    #[test]
    fn test_opcode_at_end_of_memory_wraps() {
        let mut memory = Memory::new();
        memory.write(0xFFF, 0x12);
        // The second byte comes from 0x000, which is the first sprite byte
        assert_eq!(memory.read_opcode(0xFFF), Opcode(0x12F0));
    }

    #[test]
    fn test_loads_program_at_0x200() {
        let mut memory = Memory::new();
        memory.load_program(&[0x60, 0x05]);
        assert_eq!(memory.as_slice()[0x200..0x202], [0x60, 0x05]);
        assert_eq!(memory.as_slice()[0x1FF], 0x0);
    }

    #[test]
    fn test_loads_largest_program() {
        let mut memory = Memory::new();
        memory.load_program(&[0x1; MAX_ROM_SIZE]);
        assert_eq!(memory.read(0xFFF), 0x1);
    }
}
