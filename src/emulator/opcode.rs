/// A raw 16-bit instruction word, split into the fields
/// the CHIP-8 instruction set is encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combine two bytes fetched from memory, big-endian.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode(((left as u16) << 8) | right as u16)
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// The instruction family, bits 12-15.
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8 & 0xF
    }

    /// First register operand, bits 8-11.
    pub fn x(self) -> u8 {
        (self.0 >> 8) as u8 & 0xF
    }

    /// Second register operand, bits 4-7.
    pub fn y(self) -> u8 {
        (self.0 >> 4) as u8 & 0xF
    }

    pub fn n(self) -> u8 {
        self.0 as u8 & 0xF
    }

    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}
