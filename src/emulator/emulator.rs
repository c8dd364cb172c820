//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use crate::emulator::audio::{DummyAudio, EmulatorAudio};
use crate::emulator::config::Config;
use crate::emulator::display::Screen;
use crate::emulator::error::{ExecError, LoadError};
use crate::emulator::input::{DummyInput, EmulatorInput};
use crate::emulator::instruction::*;
use crate::emulator::keypad::Keypad;
use crate::emulator::memory::{Memory, ADDR_MASK, FONT_GLYPH_SIZE};
use crate::emulator::opcode::Opcode;
use crate::emulator::output::{DummyOutput, EmulatorOutput};
use crate::emulator::registers::{Registers, FLAG};
use crate::emulator::timer::{Schedule, Timers, ToneEvent, TIMER_HZ};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Sprites are at most 15 rows tall.
const MAX_SPRITE_ROWS: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CpuState {
    Running,
    /// Suspended by FX0A until a key is pressed, which is then stored in the register.
    AwaitingKey(Reg),
    /// Stopped by an error. Every further step reports the same error.
    Halted(ExecError),
}

/// What happened during a step that the host may want to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    pub redraw: bool,
}

pub struct Emulator<I: EmulatorInput, O: EmulatorOutput, A: EmulatorAudio> {
    // Machine state
    memory: Memory,
    registers: Registers,
    timers: Timers,
    keypad: Keypad,
    screen: Screen,
    opcode: Opcode,
    state: CpuState,

    timer_schedule: Schedule,
    step_duration: Duration,
    rng: StdRng,

    input: I,
    output: O,
    audio: A,
}

impl Emulator<DummyInput, DummyOutput, DummyAudio> {
    /// Create a new emulator with dummy input and output, running at the default clock speed
    pub fn new() -> Self {
        Emulator::with_io(Config::default(), DummyInput, DummyOutput::new(), DummyAudio)
    }
}

impl Default for Emulator<DummyInput, DummyOutput, DummyAudio> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: EmulatorInput, O: EmulatorOutput, A: EmulatorAudio> Emulator<I, O, A> {

    /// Create a new emulator with input, output and audio
    pub fn with_io(config: Config, input: I, output: O, audio: A) -> Emulator<I, O, A> {
        Emulator {
            memory: Memory::new(),
            registers: Registers::new(),
            timers: Timers::new(),
            keypad: Keypad::new(),
            screen: Screen::new(),
            opcode: Opcode(0),
            state: CpuState::Running,

            timer_schedule: Schedule::new(TIMER_HZ),
            step_duration: config.instruction_period(),
            rng: StdRng::from_entropy(),

            input,
            output,
            audio,
        }
    }

    /// Copy a program into memory at 0x200 and reset the machine, so it starts from scratch.
    /// Nothing changes if the program does not fit.
    pub fn load(&mut self, program: &[u8]) -> Result<(), LoadError> {
        self.memory.load(program)?;

        self.registers = Registers::new();
        self.timers.set_delay(0);
        if let Some(event) = self.timers.set_sound(0) {
            self.play(event);
        }
        self.timer_schedule = Schedule::new(TIMER_HZ);
        self.screen.clear();
        self.opcode = Opcode(0);
        self.state = CpuState::Running;
        Ok(())
    }

    /// Make CXKK produce a reproducible sequence.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Perform a single step: execute one instruction (or keep waiting for a key),
    /// sample the keypad, then let the timers catch up with the time one step
    /// takes at the configured clock speed.
    pub fn step(&mut self) -> Result<StepReport, ExecError> {
        self.step_elapsed(self.step_duration)
    }

    /// Like `step`, but the timers catch up with `elapsed`, the time that has
    /// actually passed since the previous step.
    pub fn step_elapsed(&mut self, elapsed: Duration) -> Result<StepReport, ExecError> {
        let result = match self.state {
            CpuState::Halted(ref error) => return Err(error.clone()),
            CpuState::AwaitingKey(reg) => {
                self.resume_key_wait(reg);
                Ok(())
            }
            CpuState::Running => self.fetch_and_execute(),
        };

        if let Err(error) = result {
            log::error!("Halting: {}", error);
            self.state = CpuState::Halted(error.clone());
            return Err(error);
        }

        let keys = self.input.poll_keys();
        self.keypad.update(keys);

        for _ in 0..self.timer_schedule.advance(elapsed) {
            self.tick_timers();
        }

        Ok(StepReport {
            redraw: self.screen.needs_redraw(),
        })
    }

    /// Decrement both timers once.
    pub fn tick_timers(&mut self) {
        self.timers.tick_delay();
        if let Some(event) = self.timers.tick_sound() {
            self.play(event);
        }
    }

    /// Hand the screen to the output if it changed since it was last rendered.
    pub fn render(&mut self) {
        if self.screen.take_redraw() {
            self.output.render(&self.screen);
        }
    }

    fn fetch_and_execute(&mut self) -> Result<(), ExecError> {
        let pc = self.registers.pc;

        // Each opcode is two bytes
        let (left, right) = self.memory.read_word(pc);
        self.opcode = Opcode::from_two_u8(left, right);

        let instruction = Instruction::decode(self.opcode).ok_or(ExecError::UnknownOpcode {
            opcode: self.opcode.as_u16(),
            pc,
        })?;
        log::trace!("{:#05x}: {:?}", pc, instruction);

        self.execute_single(instruction)
    }

    fn resume_key_wait(&mut self, Reg(x): Reg) {
        if let Some(key) = self.keypad.first_just_pressed() {
            log::debug!("Key {:X} pressed, resuming", key);
            self.registers.v[x as usize] = key;
            self.keypad.take_press(key);
            self.registers.pc = advance(self.registers.pc, 2);
            self.state = CpuState::Running;
        }
    }

    fn play(&mut self, event: ToneEvent) {
        log::debug!("Tone {:?}", event);
        self.audio.set_tone(event == ToneEvent::Start);
    }

    /// Execute a single instruction as if it was stored at the program counter.
    /// The program counter is left alone if the instruction fails.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), ExecError> {
        let pc = self.registers.pc;
        let next = advance(pc, 2);
        let skip_if = |condition: bool| if condition { advance(next, 2) } else { next };
        let v = &mut self.registers.v;

        let new_pc = match instruction {

            // Clear the screen
            Instruction::ClearScreen => {
                self.screen.clear();
                next
            }

            // Return to the previous call site via the stack.
            Instruction::Return => self.registers.stack.pop(pc)?,

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => addr,

            // Store the return address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.registers.stack.push(next, pc)?;
                addr
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => skip_if(v[x as usize] == n),

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => skip_if(v[x as usize] != n),

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => skip_if(v[x as usize] == v[y as usize]),

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                v[x as usize] = n;
                next
            }

            // Wraps, and leaves VF alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                v[x as usize] = v[x as usize].wrapping_add(n);
                next
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                v[x as usize] = v[y as usize];
                next
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                v[x as usize] |= v[y as usize];
                next
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                v[x as usize] &= v[y as usize];
                next
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                v[x as usize] ^= v[y as usize];
                next
            }

            // The flag is written last, so it wins when X is F
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = v[x as usize].overflowing_add(v[y as usize]);
                v[x as usize] = sum;
                v[FLAG] = carry as u8;
                next
            }

            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (v[x as usize], v[y as usize]);
                v[x as usize] = vx.wrapping_sub(vy);
                v[FLAG] = (vx > vy) as u8;
                next
            }

            // Shifts read VY, not VX
            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                let vy = v[y as usize];
                v[x as usize] = vy >> 1;
                v[FLAG] = vy & 1;
                next
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (v[x as usize], v[y as usize]);
                v[x as usize] = vy.wrapping_sub(vx);
                v[FLAG] = (vy > vx) as u8;
                next
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                let vy = v[y as usize];
                v[x as usize] = vy << 1;
                v[FLAG] = (vy >> 7) & 1;
                next
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => skip_if(v[x as usize] != v[y as usize]),

            Instruction::SetI(Addr(addr)) => {
                self.registers.i = addr;
                next
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => advance(addr, v[0] as u16),

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                v[x as usize] = self.rng.gen::<u8>() & n;
                next
            }

            Instruction::Draw(Reg(x), Reg(y), Const(height)) => {
                let (x_coord, y_coord) = (v[x as usize], v[y as usize]);

                // Get sprite, each row is 8 bits
                let height = (height as usize).min(MAX_SPRITE_ROWS);
                let mut sprite = [0; MAX_SPRITE_ROWS];
                for (row, byte) in sprite.iter_mut().take(height).enumerate() {
                    *byte = self.memory.read(self.registers.i.wrapping_add(row as u16));
                }

                let collision = self.screen.draw_sprite(x_coord, y_coord, &sprite[..height]);
                v[FLAG] = collision as u8;
                next
            }

            Instruction::IfKeyEqVx(Reg(x)) => skip_if(self.keypad.is_pressed(v[x as usize])),

            Instruction::IfKeyNeqVx(Reg(x)) => skip_if(!self.keypad.is_pressed(v[x as usize])),

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                v[x as usize] = self.timers.delay();
                next
            }

            // Suspend until a key goes down. Keys already held don't count.
            Instruction::SetRegToGetKey(Reg(x)) => {
                log::debug!("Waiting for a key press into V{:X}", x);
                self.state = CpuState::AwaitingKey(Reg(x));
                pc
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.set_delay(v[x as usize]);
                next
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                if let Some(event) = self.timers.set_sound(v[x as usize]) {
                    self.play(event);
                }
                next
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.registers.i = self.registers.i.wrapping_add(v[x as usize] as u16);
                next
            }

            // Set i to character address. Each font element is 5 bytes tall.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.registers.i = FONT_GLYPH_SIZE * v[x as usize] as u16;
                next
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let i = self.registers.i;
                let value = v[x as usize];
                self.memory.write(i, value / 100);
                self.memory.write(i.wrapping_add(1), value / 10 % 10);
                self.memory.write(i.wrapping_add(2), value % 10);
                next
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let i = self.registers.i;
                for reg_no in 0..=x as usize {
                    self.memory.write(i.wrapping_add(reg_no as u16), v[reg_no]);
                }
                next
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let i = self.registers.i;
                for reg_no in 0..=x as usize {
                    v[reg_no] = self.memory.read(i.wrapping_add(reg_no as u16));
                }
                next
            }
        };

        self.registers.pc = new_pc;
        Ok(())
    }

    /// Execute many instructions in sequence, stopping at the first failure.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), ExecError> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// The most recently fetched opcode.
    pub fn opcode(&self) -> Opcode {
        self.opcode
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

/// Move an address forward, wrapping at the top of memory.
fn advance(addr: u16, by: u16) -> u16 {
    addr.wrapping_add(by) & ADDR_MASK
}
