/*!

A CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto the left hand side of the keyboard:

```text
CHIP-8 keypad    Keyboard
1 2 3 C          1 2 3 4
4 5 6 D          q w e r
7 8 9 E          a s d f
A 0 B F          z x c v
```

Press `Esc` to quit. Use `-c` to change how many instructions are executed per second.

# Library

If you are not interested in handling input (key presses and such),
then you can use `Emulator::new()` to get an emulator to work with.

The main way of running a program is to load instructions as bytes.

```rust
use chyp8::emulator::Emulator;

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display)?;
let report = emulator.step()?; // Will now clear the display
assert!(report.redraw);
# Ok(())
# }
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chyp8::emulator::Emulator;
use chyp8::emulator::instruction::{Instruction, Reg, Const, Addr};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen)?;

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
])?;
assert_eq!(emulator.registers().v[0xB], 35);
# Ok(())
# }
```

Programs that fail, such as by executing something that is not an instruction,
halt the emulator and report why.

```rust
use chyp8::emulator::Emulator;
use chyp8::emulator::error::ExecError;

let mut emulator = Emulator::new();
emulator.load(&[0xFF, 0xFF]).unwrap();
assert_eq!(emulator.step(), Err(ExecError::UnknownOpcode { opcode: 0xFFFF, pc: 0x200 }));
```

## Custom input and output

To get keypresses, make sound and show the screen, implement `EmulatorInput`,
`EmulatorOutput` and `EmulatorAudio`, which represent a keypad, a screen and a speaker.
Take a look at `src/emulator/input.rs`, `src/emulator/output.rs` and `src/emulator/audio.rs`
to see how to implement these, then do the following.

```ignore
use chyp8::emulator::{Emulator, config::Config};

let mut emulator = Emulator::with_io(Config::default(), MyInput::new(), MyOutput::new(), MyAudio::new());
```

A `Runner` then steps the emulator at the configured clock speed until it is told to stop,
as done in crossterm_frontend.
*/

pub mod emulator;
