use std::error::Error;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use env_logger::Env;
use lifematrix::adc::{NoiseSampler, ADC_MAX};
use lifematrix::config::Config;
use lifematrix::display::{LogPanel, TermPanel};
use lifematrix::foreground::Foreground;
use lifematrix::input::{DummyInput, Input, KeyboardInput};
use lifematrix::machine::{seed_source, Halt, Machine};
use lifematrix::matrix::{MatrixRam, RamMatrix};
use lifematrix::scheduler::TickScheduler;
use lifematrix::seven_seg::NumericDisplay;
use lifematrix::snapshot::SnapshotChannel;
use lifematrix::watchdog::{SoftWatchdog, WatchdogState};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Game of Life on an emulated 32x8 LED matrix.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed the field (and the ADC noise) instead of reading a floating input.
    #[arg(long)]
    seed: Option<u64>,
    /// Milliseconds between generations; defaults to the board's timer overflow.
    #[arg(long = "tick-ms", value_name = "MILLISECONDS",
          value_parser = clap::value_parser!(u64).range(1..=60_000))]
    tick_ms: Option<u64>,
    /// Stop after this many generations.
    #[arg(long = "max-ticks", value_name = "TICKS")]
    max_ticks: Option<u64>,
    /// Position of the brightness pot, as a raw 10-bit reading.
    #[arg(long, value_name = "READING", default_value_t = 512,
          value_parser = clap::value_parser!(u16).range(0..=i64::from(ADC_MAX)))]
    brightness: u16,
    /// Log the generation count instead of drawing the panel.
    #[arg(long)]
    headless: bool,
    /// Leave the watchdog disarmed.
    #[arg(long = "no-watchdog")]
    no_watchdog: bool,
    /// Build without the generation-reset button.
    #[arg(long = "no-reset-button")]
    no_reset_button: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut config = Config {
        use_watchdog: !args.no_watchdog,
        reset_button: !args.no_reset_button,
        ..Config::default()
    };
    if let Some(ms) = args.tick_ms {
        config.tick_period = Duration::from_millis(ms);
    }
    config.validate()?;

    // the board: peripherals survive a watchdog reset, the firmware's state doesn't
    let ram = Arc::new(MatrixRam::new());
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut sampler = NoiseSampler::new(rng).with_level(config.brightness_channel, args.brightness);
    let mut display: Box<dyn NumericDisplay> = if args.headless {
        Box::new(LogPanel::new(config.digits, config.digit_delay))
    } else {
        Box::new(TermPanel::new(Arc::clone(&ram), config.digits, config.digit_delay)?)
    };
    let mut input: Box<dyn Input> = if args.headless {
        Box::new(DummyInput::new(&[]))
    } else {
        Box::new(KeyboardInput::new(config.reset_button)?)
    };
    let state = WatchdogState::new();

    loop {
        let mut matrix = RamMatrix::new(Arc::clone(&ram));
        let mut random = seed_source(&mut sampler, &config, args.seed);
        let mut watchdog = SoftWatchdog::new(&state);
        let channel = SnapshotChannel::new();

        let scheduler = TickScheduler::new(
            &config,
            &mut matrix,
            &mut sampler,
            &mut random,
            &channel,
        );
        let foreground = Foreground::new(&mut *display, &mut watchdog, &mut *input, &channel);
        let mut machine = Machine::new(&config, scheduler, foreground, &state);
        machine.boot(Instant::now());

        match machine.main_loop(args.max_ticks) {
            Halt::WatchdogReset => info!("rebooting"),
            halt => {
                info!("halted: {:?} after {} ticks", halt, machine.ticks());
                break;
            }
        }
    }

    // shove a line out so the shell prompt lands under the panel
    if !args.headless {
        println!();
    }
    Ok(())
}
