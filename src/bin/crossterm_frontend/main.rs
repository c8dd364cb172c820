use std::path::PathBuf;
use std::sync::mpsc::channel;

use structopt::StructOpt;

use chyp8::emulator::audio::ChannelAudio;
use chyp8::emulator::config::Config;
use chyp8::emulator::memory::read_rom;
use chyp8::emulator::runner::Runner;
use chyp8::emulator::Emulator;

mod beeper;
mod crossterm_io;
mod held_keys;
mod key_manager;
use crossterm_io::{CrosstermInput, CrosstermOutput};
use key_manager::KeyManager;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Instructions executed per second
    #[structopt(short, long, default_value = "500")]
    clock_speed: u32,
}

fn main() -> anyhow::Result<()> {

    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    let config = Config::new(opt.clock_speed)?;
    log::info!("Executing {:?} at {} instructions per second", &opt.input, config.clock_speed());
    let program = read_rom(&opt.input)?;

    let (shutdown_sender, shutdown) = channel();
    let (tone_sender, tones) = channel();
    let key_manager = KeyManager::new(shutdown_sender);
    let beeper = beeper::spawn(tones);

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_io(
        config,
        CrosstermInput::new(&key_manager),
        CrosstermOutput::new()?,
        ChannelAudio::new(tone_sender),
    );
    emulator.load(&program)?;

    // Start execution
    let result = Runner::new(&config).run(&mut emulator, &shutdown);

    // Restore the terminal before reporting anything, and hang up on the beeper
    drop(emulator);
    if beeper.join().is_err() {
        log::warn!("Audio thread panicked");
    }

    result?;
    Ok(())
}
