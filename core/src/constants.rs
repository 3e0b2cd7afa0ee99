/// The frame buffer is 64 pixels wide
pub const DISPLAY_WIDTH: usize = 64;
/// and 32 pixels tall.
pub const DISPLAY_HEIGHT: usize = 32;

/// 4096 bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;
/// Every address the CPU computes is masked down to 12 bits.
pub const ADDRESS_MASK: u16 = 0x0FFF;
/// 0x200 is where ROMs are loaded into memory; everything below it is reserved.
pub const PROGRAM_START: u16 = 0x200;
/// The largest ROM that fits between `PROGRAM_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Opcodes are two bytes wide.
pub const INSTRUCTION_WIDTH: u16 = 0x2;
/// Number of nested subroutine calls the stack can hold.
pub const STACK_DEPTH: usize = 16;
/// V0..VF
pub const REGISTER_COUNT: usize = 16;
/// Keys 0..F on the hexadecimal keypad.
pub const KEY_COUNT: usize = 16;

/// Each glyph in the sprite sheet is 5 bytes tall.
pub const GLYPH_HEIGHT: u16 = 5;

/// # Sprite Sheet
/// Hexadecimal digits 0..F drawn as 4x5 sprites, stored at the very start of memory.
///
/// ```text
/// "0"     Binary   Hex
/// ****    11110000 0xF0
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// ****    11110000 0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
