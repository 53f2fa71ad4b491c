//! Survivor Headless Balance Simulator
//!
//! Plays scripted runs through the same `step_frame()` the game uses and
//! prints what happened. Nothing is rendered.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --frames N      Frames to simulate per run (default: 36000 = 10 minutes)
//!   --dt SECONDS    Seconds per frame (default: 1/60)
//!   --seed N        RNG seed (default: 42)
//!   --runs N        Number of runs with incrementing seeds (default: 1)
//!   --config FILE   Load settings from a JSON file first
//!   --json          Print the report as JSON
//!   --verbose       Per-frame event logging
//!   --quiet         Only final summary line

use log::{Level, Log, Metadata, Record};
use survivor::build_info::{BUILD_COMMIT, BUILD_DATE};
use survivor::simulation::{
    run_single, FrameEvent, FrameResult, RunSummary, SimConfig, SimReport, World,
};

// ── CLI Configuration ────────────────────────────────────────────────

struct CliOptions {
    config: SimConfig,
    json: bool,
    verbose: bool,
    quiet: bool,
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(value) => value,
        None => {
            eprintln!("{flag} requires a value");
            print_usage();
            std::process::exit(1);
        }
    }
}

fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();

    // A config file sets the baseline; flags given alongside it override.
    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => {
            let path: String = parse_value(&args, i + 1, "--config");
            match SimConfig::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{path}: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => SimConfig::default(),
    };

    let mut options = CliOptions {
        config: SimConfig::default(),
        json: false,
        verbose: false,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" => {
                i += 1;
                config.frames = parse_value(&args, i, "--frames");
            }
            "--dt" => {
                i += 1;
                config.dt = parse_value(&args, i, "--dt");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(&args, i, "--seed");
            }
            "--runs" => {
                i += 1;
                config.runs = parse_value(&args, i, "--runs");
            }
            "--config" => i += 1,
            "--json" => options.json = true,
            "--verbose" => options.verbose = true,
            "--quiet" => options.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if let Err(e) = config.validate() {
        eprintln!("{e}");
        std::process::exit(1);
    }
    options.config = config;
    options
}

fn print_usage() {
    eprintln!(
        "Survivor Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --frames N      Frames to simulate per run (default: 36000 = 10 minutes)\n\
         \x20 --dt SECONDS    Seconds per frame (default: 1/60)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 1)\n\
         \x20 --config FILE   Load settings from a JSON file first\n\
         \x20 --json          Print the report as JSON\n\
         \x20 --verbose       Per-frame event logging\n\
         \x20 --quiet         Only final summary line\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Logging ──────────────────────────────────────────────────────────

struct StderrLogger {
    level: Level,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        Level::Debug
    } else if quiet {
        Level::Warn
    } else {
        Level::Info
    };
    let logger = Box::new(StderrLogger { level });
    if log::set_boxed_logger(logger).is_ok() {
        log::set_max_level(level.to_level_filter());
    }
}

// ── Output ───────────────────────────────────────────────────────────

fn print_frame_events(world: &World, result: &FrameResult) {
    let frame = world.frame();
    for event in &result.events {
        let label = match event {
            FrameEvent::EnemyKilled { variant, xp, gold, .. } => {
                format!("{} killed (+{xp} XP, +{gold} gold)", variant.name())
            }
            FrameEvent::LeveledUp { new_level } => format!("LEVEL UP -> {new_level}"),
            FrameEvent::TalentTreeUnlocked => "talent tree unlocked".to_string(),
            FrameEvent::PlayerDied => "PLAYER DIED".to_string(),
            FrameEvent::ShopRelocated { position } => {
                format!("shop moved to ({:.0}, {:.0})", position.x, position.y)
            }
            FrameEvent::HealthPackDropped { .. } => "health pack dropped".to_string(),
            _ => continue,
        };
        println!("[f={frame:>6}] {label}");
    }
}

fn print_header(config: &SimConfig) {
    println!(
        "survivor simulator {} ({})  frames={} dt={:.4} seed={} runs={}",
        BUILD_COMMIT, BUILD_DATE, config.frames, config.dt, config.seed, config.runs
    );
    println!();
}

fn main() {
    let options = parse_args();
    init_logging(options.verbose, options.quiet);
    let config = &options.config;

    if !options.quiet && !options.json {
        print_header(config);
    }

    let mut summaries: Vec<RunSummary> = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let seed = config.seed + run as u64;
        if config.runs > 1 && !options.quiet && !options.json {
            eprintln!("--- Run {}/{} (seed={seed}) ---", run + 1, config.runs);
        }

        let summary = if options.verbose && !options.json {
            run_single(config, seed, print_frame_events)
        } else {
            run_single(config, seed, |_, _| {})
        };

        if options.quiet {
            println!("{}", summary.to_line());
        } else if !options.json && config.runs == 1 {
            print!("{}", summary.to_text());
        }
        summaries.push(summary);
    }

    let report = SimReport::from_runs(summaries);
    if options.json {
        println!("{}", report.to_json());
    } else if !options.quiet && config.runs > 1 {
        print!("{}", report.to_text());
    }
}
