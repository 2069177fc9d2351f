//! CLI entrypoint for `wer-parser`.
//!
//! Parses command-line arguments, scans the input directory for `.wer` crash
//! reports through the library engine, prints a terminal summary, and writes
//! the aggregated CSV. Per-file failures are logged and recovered; only a
//! failure to produce the output CSV exits non-zero.
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::{LevelFilter, error, info};
use wer_parser::{
    engine::Engine,
    export::save_reports_csv,
    io::DEFAULT_MMAP_THRESHOLD_BYTES,
    progress::LogReporter,
    report::render_summary_with_top,
};

#[derive(Parser, Debug)]
#[command(
    name = "wer-parser",
    version,
    about = "Windows Error Reporting (WER) crash report triage (Rust)"
)]
struct Args {
    /// Directory to scan recursively for .wer report files
    input_dir: PathBuf,

    /// Output CSV file path
    output_file: PathBuf,

    /// Override mmap threshold in bytes. If zero, disable mmap.
    #[arg(long = "mmap-threshold", default_value_t = DEFAULT_MMAP_THRESHOLD_BYTES)]
    mmap_threshold: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Limit number of entries in "Top Crashing Applications"
    #[arg(long = "top", default_value_t = 10)]
    top_limit: usize,

    /// Control color output (auto, always, never)
    #[arg(long = "color", value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Suppress summary output (the CSV is still written)
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

const ASCII_TITLE: &str = r#"
__      _____ _ __ ______ _ __   __ _ _ __ ___  ___ _ __
\ \ /\ / / _ \ '__|______| '_ \ / _` | '__/ __|/ _ \ '__|
 \ V  V /  __/ |         | |_) | (_| | |  \__ \  __/ |
  \_/\_/ \___|_|         | .__/ \__,_|_|  |___/\___|_|
                         |_|
"#;

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    // Configure color policy
    match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
        }
        ColorChoice::Never => {
            colored::control::set_override(false);
        }
        ColorChoice::Auto => {}
    }

    let threshold = if args.mmap_threshold == 0 {
        u64::MAX
    } else {
        args.mmap_threshold
    };

    let mut engine = Engine::new();
    engine.scan_directory_with_threshold(&args.input_dir, threshold, &LogReporter);

    if !args.quiet {
        println!("{}", ASCII_TITLE.bold().green());
        println!("{}", render_summary_with_top(&engine, args.top_limit));
    }

    match save_reports_csv(&engine.reports, &args.output_file) {
        Ok(true) => info!("CSV file created at: {}", args.output_file.display()),
        Ok(false) => info!("no WER reports found to write to CSV"),
        Err(e) => {
            error!("failed to write {}: {}", args.output_file.display(), e);
            std::process::exit(4);
        }
    }
}
