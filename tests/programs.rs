use chyp8::emulator::audio::DummyAudio;
use chyp8::emulator::config::Config;
use chyp8::emulator::error::{ExecError, LoadError};
use chyp8::emulator::input::{DummyInput, ScriptedInput};
use chyp8::emulator::memory::{read_rom, MAX_ROM_SIZE};
use chyp8::emulator::output::DummyOutput;
use chyp8::emulator::runner::{Runner, StopReason};
use chyp8::emulator::{CpuState, Emulator};
use pretty_assertions::assert_eq;
use std::sync::mpsc::channel;

fn fast() -> Config {
    Config::new(1_000_000).unwrap()
}

/// The 8x5 block of pixels with its top left corner at (x, y).
fn glyph_at<I, O, A>(emulator: &Emulator<I, O, A>, x: usize, y: usize) -> Vec<u8>
where
    I: chyp8::emulator::input::EmulatorInput,
    O: chyp8::emulator::output::EmulatorOutput,
    A: chyp8::emulator::audio::EmulatorAudio,
{
    (0..5)
        .map(|dy| (0..8).fold(0, |row, dx| row << 1 | emulator.screen().get(x + dx, y + dy)))
        .collect()
}

#[test]
fn sum_with_subroutine() {
    let mut emulator = Emulator::new();
    emulator.load(&[
        0x60, 0x00, // 0x200: V0 = 0
        0x61, 0x00, // 0x202: V1 = 0
        0x70, 0x01, // 0x204: V0 += 1
        0x22, 0x10, // 0x206: call 0x210
        0x30, 0x0A, // 0x208: skip if V0 == 10
        0x12, 0x04, // 0x20A: goto 0x204
        0x12, 0x0C, // 0x20C: loop forever
        0x00, 0x00, // 0x20E
        0x81, 0x04, // 0x210: V1 += V0
        0x00, 0xEE, // 0x212: return
    ]).unwrap();

    let (_sender, shutdown) = channel();
    let summary = Runner::new(&fast()).with_cycle_limit(200).run(&mut emulator, &shutdown).unwrap();

    assert_eq!(summary.reason, StopReason::CycleLimit);
    assert_eq!(emulator.registers().v[1], 55);
    assert_eq!(emulator.registers().v[0xF], 0);
    assert_eq!(emulator.registers().pc, 0x20C);
    assert_eq!(emulator.registers().stack.depth(), 0);
}

#[test]
fn draw_digits_of_a_number() {
    let mut emulator = Emulator::new();
    emulator.load(&[
        0x60, 0x7B, // V0 = 123
        0xA3, 0x00, // I = 0x300
        0xF0, 0x33, // BCD of V0 at I
        0xF2, 0x65, // V0..V2 = 1, 2, 3
        0x63, 0x00, // V3 = 0
        0x64, 0x00, // V4 = 0
        0xF0, 0x29, // I = glyph of V0
        0xD3, 0x45, // draw at (V3, V4)
        0x63, 0x08, // V3 = 8
        0xF1, 0x29, // I = glyph of V1
        0xD3, 0x45, // draw at (V3, V4)
        0x12, 0x16, // loop forever
    ]).unwrap();

    for _ in 0..12 {
        emulator.step().unwrap();
    }
    emulator.render();

    assert_eq!(&emulator.registers().v[..3], &[1, 2, 3]);
    assert_eq!(glyph_at(&emulator, 0, 0), vec![0x20, 0x60, 0x20, 0x20, 0x70]);
    assert_eq!(glyph_at(&emulator, 8, 0), vec![0xF0, 0x10, 0xF0, 0x80, 0xF0]);
    assert_eq!(emulator.registers().v[0xF], 0);
    assert_eq!(emulator.output().frames_rendered(), 1);
    assert_eq!(&emulator.output().frame()[..], &emulator.screen().cells()[..]);
}

#[test]
fn wait_for_key_then_show_it() {
    let input = ScriptedInput::new(vec![
        ScriptedInput::held(&[]),
        ScriptedInput::held(&[0xA]),
    ]);
    let mut emulator = Emulator::with_io(Config::default(), input, DummyOutput::new(), DummyAudio);
    emulator.load(&[
        0xF0, 0x0A, // V0 = next key
        0xF0, 0x29, // I = glyph of V0
        0xD1, 0x15, // draw at (V1, V1)
        0x12, 0x06, // loop forever
    ]).unwrap();

    emulator.step().unwrap();
    assert_eq!(emulator.state(), &CpuState::AwaitingKey(chyp8::emulator::instruction::Reg(0)));
    emulator.step().unwrap();
    emulator.step().unwrap();
    assert_eq!(emulator.state(), &CpuState::Running);
    assert_eq!(emulator.registers().v[0], 0xA);

    emulator.step().unwrap();
    emulator.step().unwrap();
    assert_eq!(glyph_at(&emulator, 0, 0), vec![0xF0, 0x90, 0xF0, 0x90, 0x90]);
}

#[test]
fn runaway_program_halts() {
    let mut emulator = Emulator::with_io(fast(), DummyInput, DummyOutput::new(), DummyAudio);
    // Falls through into zeroed memory
    emulator.load(&[0x60, 0x01]).unwrap();

    let (_sender, shutdown) = channel();
    let result = Runner::new(&fast()).run(&mut emulator, &shutdown);

    assert_eq!(result, Err(ExecError::UnknownOpcode { opcode: 0x0000, pc: 0x202 }));
    assert_eq!(emulator.registers().pc, 0x202);
    assert_eq!(emulator.registers().v[0], 1);
}

#[test]
fn oversized_rom_is_refused() {
    let mut emulator = Emulator::new();
    let rom = vec![0x12; MAX_ROM_SIZE + 1];
    match emulator.load(&rom) {
        Err(LoadError::RomTooLarge { size, max }) => {
            assert_eq!(size, 3585);
            assert_eq!(max, 3584);
        }
        other => panic!("expected RomTooLarge, got {:?}", other),
    }
    assert!(emulator.memory().as_slice()[0x200..].iter().all(|&b| b == 0));
}

#[test]
fn rom_read_from_disk() {
    let path = std::env::temp_dir().join(format!("chyp8-test-{}.ch8", std::process::id()));
    std::fs::write(&path, [0x6A, 0x05, 0x7A, 0x03]).unwrap();

    let program = read_rom(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let mut emulator = Emulator::new();
    emulator.load(&program).unwrap();
    emulator.step().unwrap();
    emulator.step().unwrap();
    assert_eq!(emulator.registers().v[0xA], 8);
}
