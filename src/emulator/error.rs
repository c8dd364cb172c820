//! Errors raised while loading a program, configuring the emulator or executing.

use std::io;
use std::path::PathBuf;

/// Failures that prevent a program from being loaded. Nothing is executed when these occur.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("ROM not found at {0:?}")]
    RomNotFound(PathBuf),

    #[error("could not read ROM: {0}")]
    Io(#[from] io::Error),
}

/// Failures during execution. All of them halt the emulator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecError {
    #[error("unknown opcode {opcode:#06X} at address {pc:#05X}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: call at address {pc:#05X} exceeds 16 nested subroutines")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at address {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("clock speed must be at least one instruction per second")]
    ZeroClockSpeed,

    #[error("clock speed of {speed} instructions per second is above the maximum of {max}")]
    ClockSpeedTooHigh { speed: u32, max: u32 },
}
