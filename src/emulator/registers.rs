use crate::emulator::error::ExecError;
use crate::emulator::memory::PROGRAM_START;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;

/// VF doubles as the carry, borrow and collision flag.
pub const FLAG: usize = 0xF;

/// The general purpose registers V0-VF, the index register and the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; NUM_REGISTERS],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
}

impl Registers {
    pub fn new() -> Registers {
        Registers {
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
        }
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// Return addresses of the subroutines currently being executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stack {
    slots: [u16; STACK_SIZE],
    sp: usize,
}

impl Stack {
    pub fn new() -> Stack {
        Stack {
            slots: [0; STACK_SIZE],
            sp: 0,
        }
    }

    /// Save a return address. `pc` is only used for error reporting.
    pub fn push(&mut self, addr: u16, pc: u16) -> Result<(), ExecError> {
        if self.sp == STACK_SIZE {
            return Err(ExecError::StackOverflow { pc });
        }
        self.slots[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop(&mut self, pc: u16) -> Result<u16, ExecError> {
        if self.sp == 0 {
            return Err(ExecError::StackUnderflow { pc });
        }
        self.sp -= 1;
        Ok(self.slots[self.sp])
    }

    /// Number of saved return addresses.
    pub fn depth(&self) -> usize {
        self.sp
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_start_at_program() {
        let registers = Registers::new();
        assert_eq!(registers.pc, 0x200);
        assert_eq!(registers.v, [0; 16]);
        assert_eq!(registers.stack.depth(), 0);
    }

    #[test]
    fn push_then_pop_is_lifo() {
        let mut stack = Stack::new();
        stack.push(0x202, 0x200).unwrap();
        stack.push(0x304, 0x302).unwrap();
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop(0x400), Ok(0x304));
        assert_eq!(stack.pop(0x306), Ok(0x202));
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn sixteen_calls_fit_but_seventeen_overflow() {
        let mut stack = Stack::new();
        for k in 0..STACK_SIZE as u16 {
            stack.push(0x200 + 2 * k, 0x200).unwrap();
        }
        let before = stack.clone();
        assert_eq!(stack.push(0x300, 0x2AA), Err(ExecError::StackOverflow { pc: 0x2AA }));
        assert_eq!(stack, before);
    }

    #[test]
    fn pop_on_empty_underflows() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(0x250), Err(ExecError::StackUnderflow { pc: 0x250 }));
        assert_eq!(stack.depth(), 0);
    }
}
