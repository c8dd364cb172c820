//! The CHIP-8 virtual machine and the collaborators it talks to.

pub mod audio;
pub mod config;
pub mod display;
#[allow(clippy::module_inception)]
pub mod emulator;
pub mod error;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod registers;
pub mod runner;
pub mod timer;

pub use self::emulator::{CpuState, Emulator, StepReport};
