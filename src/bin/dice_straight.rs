use std::env;
use std::io::{self, Read, Write};
use std::process;
use std::time::Instant;

use straight_match::input::{format_results, parse_instances, DEFAULT_FACES};
use straight_match::BatchRunner;

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("dice_straight: {err}");
            Options::print_help();
            process::exit(2);
        }
    };

    init_logging(options.verbose);

    let started = Instant::now();
    let mut text = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut text) {
        tracing::error!(%err, "failed to read stdin");
        process::exit(1);
    }

    let instances = match parse_instances(&text, options.faces) {
        Ok(instances) => instances,
        Err(err) => {
            tracing::error!(%err, "malformed input");
            process::exit(1);
        }
    };
    tracing::info!(cases = instances.len(), faces = options.faces, "input parsed");

    let mut runner = BatchRunner::new();
    if let Some(threads) = options.threads {
        runner = runner.with_threads(threads);
    }

    let mut lengths = Vec::with_capacity(instances.len());
    for (case, result) in runner.run(&instances).into_iter().enumerate() {
        match result {
            Ok(length) => lengths.push(length),
            Err(err) => {
                tracing::error!(case = case + 1, %err, "case failed");
                process::exit(1);
            }
        }
    }

    let out = format_results(&lengths);
    if let Err(err) = io::stdout().lock().write_all(out.as_bytes()) {
        tracing::error!(%err, "failed to write results");
        process::exit(1);
    }
    tracing::info!(
        elapsed_s = started.elapsed().as_secs_f64(),
        cases = lengths.len(),
        "done"
    );
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

struct Options {
    faces: usize,
    threads: Option<usize>,
    verbose: bool,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut faces = DEFAULT_FACES;
        let mut threads = None;
        let mut verbose = false;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                process::exit(0);
            } else if arg == "--verbose" || arg == "-v" {
                verbose = true;
            } else if let Some(value) = arg.strip_prefix("--faces=") {
                faces = parse_positive(value, "faces")?;
            } else if arg == "--faces" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --faces".to_string())?
                    .into();
                faces = parse_positive(&value, "faces")?;
            } else if let Some(value) = arg.strip_prefix("--threads=") {
                threads = Some(parse_positive(value, "threads")?);
            } else if arg == "--threads" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --threads".to_string())?
                    .into();
                threads = Some(parse_positive(&value, "threads")?);
            } else {
                return Err(format!("unknown argument '{arg}'"));
            }
        }

        Ok(Self {
            faces,
            threads,
            verbose,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: dice_straight [options] < input

Reads T cases from stdin (N resources per case, each with a fixed number of
values) and prints the longest straight of every case.

Options:
  --faces <N>       Values per resource (default: {DEFAULT_FACES})
  --threads <N>     Worker threads (default: one per hardware thread)
  -v, --verbose     Log scan progress to stderr (RUST_LOG overrides)
  -h, --help        Print this help message
"
        );
    }
}

fn parse_positive(value: &str, what: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("{what} must be a positive integer")),
    }
}
