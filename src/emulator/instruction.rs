use crate::emulator::opcode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - KK: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen, // 00E0
    Return, // 00EE
    Goto(Addr), // 1NNN
    Call(Addr), // 2NNN
    IfRegEqConst(Reg, Const), // 3XKK
    IfRegNeqConst(Reg, Const), // 4XKK
    IfRegEqReg(Reg, Reg), // 5XY0
    SetRegToConst(Reg, Const), // 6XKK
    IncRegByConst(Reg, Const), // 7XKK
    SetRegToReg(Reg, Reg), // 8XY0
    BitwiseOr(Reg, Reg), // 8XY1
    BitwiseAnd(Reg, Reg), // 8XY2
    BitwiseXor(Reg, Reg), // 8XY3
    IncRegByReg(Reg, Reg), // 8XY4
    DecRegByReg(Reg, Reg), // 8XY5
    BitshiftRight(Reg, Reg), // 8XY6
    SetVxVyMinusVx(Reg, Reg), // 8XY7
    BitshiftLeft(Reg, Reg), // 8XYE
    IfRegNeqReg(Reg, Reg), // 9XY0
    SetI(Addr), // ANNN
    SetPcToV0PlusAddr(Addr), // BNNN
    SetVxRand(Reg, Const), // CXKK
    Draw(Reg, Reg, Const), // DXYN
    IfKeyEqVx(Reg), // EX9E
    IfKeyNeqVx(Reg), // EXA1
    SetRegToDelayTimer(Reg), // FX07
    SetRegToGetKey(Reg), // FX0A
    SetDelayTimerToReg(Reg), // FX15
    SetSoundTimerToReg(Reg), // FX18
    AddRegToI(Reg), // FX1E
    SetIToSpriteAddrVx(Reg), // FX29
    SetIToBcdOfReg(Reg), // FX33
    RegDump(Reg), // FX55
    RegLoad(Reg) // FX65
}

impl Instruction {

    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(Opcode(value))
    }

    /// Decode an opcode, or `None` if it isn't part of the instruction set.
    /// The family nibble picks a decoder, which picks at most one instruction.
    pub fn decode(opcode: Opcode) -> Option<Instruction> {
        let (x, y) = (Reg(opcode.x()), Reg(opcode.y()));
        let addr = Addr(opcode.nnn());
        let kk = Const(opcode.kk());

        match opcode.family() {
            0x0 => Self::decode_system(opcode),
            0x1 => Some(Instruction::Goto(addr)),
            0x2 => Some(Instruction::Call(addr)),
            0x3 => Some(Instruction::IfRegEqConst(x, kk)),
            0x4 => Some(Instruction::IfRegNeqConst(x, kk)),
            0x5 if opcode.n() == 0 => Some(Instruction::IfRegEqReg(x, y)),
            0x6 => Some(Instruction::SetRegToConst(x, kk)),
            0x7 => Some(Instruction::IncRegByConst(x, kk)),
            0x8 => Self::decode_arithmetic(opcode),
            0x9 if opcode.n() == 0 => Some(Instruction::IfRegNeqReg(x, y)),
            0xA => Some(Instruction::SetI(addr)),
            0xB => Some(Instruction::SetPcToV0PlusAddr(addr)),
            0xC => Some(Instruction::SetVxRand(x, kk)),
            0xD => Some(Instruction::Draw(x, y, Const(opcode.n()))),
            0xE => Self::decode_keys(opcode),
            0xF => Self::decode_misc(opcode),
            _ => None,
        }
    }

    fn decode_system(opcode: Opcode) -> Option<Instruction> {
        match opcode.nnn() {
            0x0E0 => Some(Instruction::ClearScreen),
            0x0EE => Some(Instruction::Return),
            _ => None,
        }
    }

    fn decode_arithmetic(opcode: Opcode) -> Option<Instruction> {
        let (x, y) = (Reg(opcode.x()), Reg(opcode.y()));
        match opcode.n() {
            0x0 => Some(Instruction::SetRegToReg(x, y)),
            0x1 => Some(Instruction::BitwiseOr(x, y)),
            0x2 => Some(Instruction::BitwiseAnd(x, y)),
            0x3 => Some(Instruction::BitwiseXor(x, y)),
            0x4 => Some(Instruction::IncRegByReg(x, y)),
            0x5 => Some(Instruction::DecRegByReg(x, y)),
            0x6 => Some(Instruction::BitshiftRight(x, y)),
            0x7 => Some(Instruction::SetVxVyMinusVx(x, y)),
            0xE => Some(Instruction::BitshiftLeft(x, y)),
            _ => None,
        }
    }

    fn decode_keys(opcode: Opcode) -> Option<Instruction> {
        let x = Reg(opcode.x());
        match opcode.kk() {
            0x9E => Some(Instruction::IfKeyEqVx(x)),
            0xA1 => Some(Instruction::IfKeyNeqVx(x)),
            _ => None,
        }
    }

    fn decode_misc(opcode: Opcode) -> Option<Instruction> {
        let x = Reg(opcode.x());
        match opcode.kk() {
            0x07 => Some(Instruction::SetRegToDelayTimer(x)),
            0x0A => Some(Instruction::SetRegToGetKey(x)),
            0x15 => Some(Instruction::SetDelayTimerToReg(x)),
            0x18 => Some(Instruction::SetSoundTimerToReg(x)),
            0x1E => Some(Instruction::AddRegToI(x)),
            0x29 => Some(Instruction::SetIToSpriteAddrVx(x)),
            0x33 => Some(Instruction::SetIToBcdOfReg(x)),
            0x55 => Some(Instruction::RegDump(x)),
            0x65 => Some(Instruction::RegLoad(x)),
            _ => None,
        }
    }
}
