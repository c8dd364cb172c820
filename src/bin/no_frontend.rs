use std::path::PathBuf;
use std::sync::mpsc::channel;

use structopt::StructOpt;

use chyp8::emulator::audio::DummyAudio;
use chyp8::emulator::config::Config;
use chyp8::emulator::input::DummyInput;
use chyp8::emulator::memory::read_rom;
use chyp8::emulator::output::DummyOutput;
use chyp8::emulator::runner::Runner;
use chyp8::emulator::Emulator;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Instructions executed per second
    #[structopt(short, long, default_value = "500")]
    clock_speed: u32,

    /// Stop after this many instructions and print the screen
    #[structopt(long)]
    cycles: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    let config = Config::new(opt.clock_speed)?;
    log::info!("Executing {:?}", &opt.input);
    let program = read_rom(&opt.input)?;

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_io(config, DummyInput, DummyOutput::new(), DummyAudio);
    emulator.load(&program)?;

    let mut runner = Runner::new(&config);
    if let Some(cycles) = opt.cycles {
        runner = runner.with_cycle_limit(cycles);
    }

    // Nothing asks a headless run to stop, so keep the sender around
    let (_shutdown_sender, shutdown) = channel();
    let result = runner.run(&mut emulator, &shutdown);

    print!("{}", emulator.screen());
    let summary = result?;
    println!("Ran {} cycles", summary.cycles);
    Ok(())
}
