//! The 4 KiB address space, with the font at the bottom and programs from 0x200.

use crate::emulator::error::LoadError;
use std::io;
use std::path::Path;

pub const MEM_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PROGRAM_START as usize;
/// Addresses are 12 bits wide.
pub const ADDR_MASK: u16 = 0x0FFF;

/// Each glyph is 5 bytes tall, glyph `k` starts at `k * FONT_GLYPH_SIZE`.
pub const FONT_GLYPH_SIZE: u16 = 5;
pub const FONT: [u8; 80] = [
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

pub struct Memory {
    cells: [u8; MEM_SIZE],
}

impl Memory {
    /// Zeroed memory with the font installed.
    pub fn new() -> Memory {
        let mut memory = Memory { cells: [0; MEM_SIZE] };
        memory.load_font();
        memory
    }

    fn load_font(&mut self) {
        self.cells[..FONT.len()].copy_from_slice(&FONT);
    }

    /// Zero memory, install the font and copy a program to 0x200.
    /// Memory is left untouched if the program does not fit.
    pub fn load(&mut self, rom: &[u8]) -> Result<(), LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }

        self.cells = [0; MEM_SIZE];
        self.load_font();
        let start = PROGRAM_START as usize;
        self.cells[start..start + rom.len()].copy_from_slice(rom);
        log::info!("Loaded {} byte program at {:#05x}", rom.len(), PROGRAM_START);
        Ok(())
    }

    /// Addresses wrap at the top of memory.
    pub fn read(&self, addr: u16) -> u8 {
        self.cells[(addr & ADDR_MASK) as usize]
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.cells[(addr & ADDR_MASK) as usize] = value;
    }

    /// Read a big-endian word, as instructions are stored.
    pub fn read_word(&self, addr: u16) -> (u8, u8) {
        (self.read(addr), self.read(addr.wrapping_add(1)))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a ROM image from disk.
pub fn read_rom(path: &Path) -> Result<Vec<u8>, LoadError> {
    std::fs::read(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => LoadError::RomNotFound(path.to_path_buf()),
        _ => LoadError::Io(error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn new_memory_has_font() {
        let memory = Memory::new();
        assert_eq!(&memory.as_slice()[..80], &FONT[..]);
        assert!(memory.as_slice()[80..].iter().all(|&b| b == 0));
    }

    #[test]
    fn largest_rom_fills_memory() {
        let mut memory = Memory::new();
        let rom = vec![0xAB; MAX_ROM_SIZE];
        memory.load(&rom).unwrap();
        assert_eq!(memory.read(0xFFF), 0xAB);
    }

    #[test]
    fn too_large_rom_is_rejected_without_mutation() {
        let mut memory = Memory::new();
        let rom = vec![0xAB; MAX_ROM_SIZE + 1];
        let result = memory.load(&rom);
        assert!(matches!(
            result,
            Err(LoadError::RomTooLarge { size, max }) if size == MAX_ROM_SIZE + 1 && max == MAX_ROM_SIZE
        ));
        assert!(memory.as_slice()[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn second_load_clears_the_first_program() {
        let mut memory = Memory::new();
        memory.load(&[0x11; 8]).unwrap();
        memory.write(0x800, 0x22);
        memory.load(&[0x33; 2]).unwrap();
        assert_eq!(&memory.as_slice()[0x200..0x202], &[0x33, 0x33]);
        assert!(memory.as_slice()[0x202..].iter().all(|&b| b == 0));
        assert_eq!(&memory.as_slice()[..80], &FONT[..]);
    }

    #[test]
    fn addresses_wrap() {
        let mut memory = Memory::new();
        memory.write(0x1000, 7);
        assert_eq!(memory.read(0x000), 7);
        memory.write(0xFFF, 0x12);
        assert_eq!(memory.read_word(0xFFF), (0x12, 7));
    }

    #[test]
    fn missing_rom_is_reported() {
        let path = Path::new("this/rom/does/not/exist.ch8");
        match read_rom(path) {
            Err(LoadError::RomNotFound(missing)) => assert_eq!(missing, path),
            other => panic!("expected RomNotFound, got {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn loaded_rom_is_copied_verbatim(rom in proptest::collection::vec(any::<u8>(), 0..=MAX_ROM_SIZE)) {
            let mut memory = Memory::new();
            memory.load(&rom).unwrap();
            prop_assert_eq!(&memory.as_slice()[0x200..0x200 + rom.len()], &rom[..]);
            prop_assert_eq!(&memory.as_slice()[..80], &FONT[..]);
        }

        #[test]
        fn oversized_rom_never_mutates(extra in 1usize..512) {
            let mut memory = Memory::new();
            let rom = vec![0x5A; MAX_ROM_SIZE + extra];
            prop_assert!(memory.load(&rom).is_err());
            prop_assert!(memory.as_slice()[0x200..].iter().all(|&b| b == 0));
        }
    }
}
