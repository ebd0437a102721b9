mod console;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use carillon_core::{
    CarillonCmd, CarillonFeedback, CarillonHandle, Config, LoopSetup, MonotonicClock,
};
use carillon_types::{tunes, BlinkerConfig, Tune};

use console::ConsoleBackend;

fn init_logging(verbose: bool) {
    use simplelog::*;

    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_path = dirs::config_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("carillon")
        .join("carillon.log");

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let log_file = File::create(&log_path)
        .unwrap_or_else(|_| File::create("/tmp/carillon.log").expect("Cannot create log file"));

    WriteLogger::init(log_level, simplelog::Config::default(), log_file)
        .expect("Failed to initialize logger");

    log::info!("carillon starting (log level: {:?})", log_level);
}

/// Load a slot's tune from the configured path, falling back to the
/// built-in when the path is unset or the file is bad.
fn resolve_tune(slot: &str, path: Option<&Path>, builtin: fn() -> Tune) -> Tune {
    let Some(path) = path else {
        return builtin();
    };
    match Tune::from_json_file(path) {
        Ok(tune) => {
            log::info!("slot {}: loaded '{}' from {}", slot, tune.name, path.display());
            tune
        }
        Err(e) => {
            log::warn!(
                "slot {}: could not load {} ({}); using the built-in tune",
                slot,
                path.display(),
                e
            );
            builtin()
        }
    }
}

fn print_feedback(feedback: &[CarillonFeedback]) {
    for entry in feedback {
        match entry {
            CarillonFeedback::StepStarted {
                slot,
                index,
                frequency,
            } => {
                if *frequency == 0 {
                    println!("[{}] step {}: rest", slot, index);
                } else {
                    println!("[{}] step {}: {} Hz", slot, index, frequency);
                }
            }
            CarillonFeedback::TuneFinished { slot } => println!("[{}] finished", slot),
            CarillonFeedback::Switched { active } => println!("now playing slot {}", active),
            CarillonFeedback::Toggled { level } => println!("led {}", level.name()),
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose);

    let config = Config::load();

    // CLI argument: optional tune file for slot A (skip flags like --verbose)
    let tune_arg = std::env::args().skip(1).find(|a| !a.starts_with('-'));

    let tune_a = match &tune_arg {
        Some(path) => resolve_tune("A", Some(Path::new(path)), tunes::chime_a),
        None => resolve_tune("A", config.tune_a_path(), tunes::chime_a),
    };
    let tune_b = resolve_tune("B", config.tune_b_path(), tunes::chime_b);

    // Context construction in explicit order: configuration first, then the
    // loop's components inside LoopThread::new, then the thread itself.
    let setup = LoopSetup {
        tone_channel: config.tone_channel(),
        switch_channel: config.switch_channel(),
        blink: config.blink(),
        tune_a: Arc::new(tune_a.steps),
        tune_b: Arc::new(tune_b.steps),
    };

    let handle = CarillonHandle::spawn(
        setup,
        Box::new(MonotonicClock::new()),
        Box::new(ConsoleBackend),
    );

    println!("carillon — playing. Commands: play, pause, rewind, blink <on_ms> <off_ms>, quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print_feedback(&handle.drain_feedback());
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF
        };
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => {}
            ["play"] => handle.send(CarillonCmd::SetPlaying { playing: true }),
            ["pause"] => handle.send(CarillonCmd::SetPlaying { playing: false }),
            ["rewind"] => handle.send(CarillonCmd::Rewind),
            ["blink", on, off] => match (on.parse(), off.parse()) {
                (Ok(on_ms), Ok(off_ms)) => {
                    handle.send(CarillonCmd::SetBlink {
                        config: BlinkerConfig { on_ms, off_ms },
                    });
                }
                _ => println!("blink takes two durations in milliseconds"),
            },
            ["quit"] | ["q"] => break,
            _ => println!("commands: play, pause, rewind, blink <on_ms> <off_ms>, quit"),
        }
    }

    handle.shutdown();
    Ok(())
}
