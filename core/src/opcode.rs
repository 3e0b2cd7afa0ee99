use std::fmt;

/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each. Their behavior is cased on some combination of:
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(_, _, _, n)` specific behavior within a category
/// - `(_, _, n, n)` more specific behavior within a category
/// - `(_, n, n, n)` some fixed function that doesn't require variables (e.g. CLS; clear screen)
///
/// Nibbles not used to determine the operation often (but not always) carry important data.
/// - `(_, n, n, n)` represent a 12-bit address
/// - `(_, _, n, n)` encodes some data that is assigned to and/or compared with Vx
/// - `(_, n, _, _)` refers either to the register Vx or a range of registers V0..Vx
/// - `(_, _, n, _)` refers to the the register Vy
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Assembles an opcode from two consecutive bytes, most significant first.
    pub fn from_bytes(high: u8, low: u8) -> Self {
        Opcode(u16::from(high) << 8 | u16::from(low))
    }

    /// Returns the Opcode's component nibbles.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        (((self.0 & 0xF000) >> 12) as u8, self.x() as u8, self.y() as u8, self.n())
    }

    /// The Opcode's second nibble, as a register index.
    /// `[_x__]`
    pub fn x(self) -> usize {
        ((self.0 & 0x0F00) >> 8) as usize
    }

    /// The Opcode's third nibble, as a register index.
    /// `[__y_]`
    pub fn y(self) -> usize {
        ((self.0 & 0x00F0) >> 4) as usize
    }

    /// The Opcode's fourth nibble.
    /// `[___n]`
    pub fn n(self) -> u8 {
        (self.0 & 0x000F) as u8
    }

    /// The Opcode's least significant byte.
    /// `[__kk]`
    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    /// The Opcode without its most significant nibble.
    /// `[_adr]`
    pub fn addr(self) -> u16 {
        self.0 & 0x0FFF
    }
}

impl From<u16> for Opcode {
    fn from(raw: u16) -> Self {
        Opcode(raw)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(test)]
mod test_opcode {
    use super::*;

    const OP: Opcode = Opcode(0xABCD);

    #[test]
    fn test_from_bytes() {
        assert_eq!(Opcode::from_bytes(0xAB, 0xCD), OP);
    }

    #[test]
    fn test_nibbles() {
        assert_eq!(OP.nibbles(), (0xA, 0xB, 0xC, 0xD));
    }

    #[test]
    fn test_x() {
        assert_eq!(OP.x(), 0xB);
    }

    #[test]
    fn test_y() {
        assert_eq!(OP.y(), 0xC);
    }

    #[test]
    fn test_n() {
        assert_eq!(OP.n(), 0xD);
    }

    #[test]
    fn test_kk() {
        assert_eq!(OP.kk(), 0xCD);
    }

    #[test]
    fn test_addr() {
        assert_eq!(OP.addr(), 0x0BCD);
    }

    #[test]
    fn test_display_pads_to_four_digits() {
        assert_eq!(Opcode(0x00E0).to_string(), "00E0");
    }
}
