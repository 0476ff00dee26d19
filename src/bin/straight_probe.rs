use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use rand::{rngs::StdRng, Rng, SeedableRng};
use straight_match::{NoopObserver, ResourceCatalog, ScanReport, StraightEngine};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("straight_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Straight Matching Scaling Probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!();
    eprintln!("Runs the window scanner over generated dice sets of growing size.");
    eprintln!(
        "Results are checked against a from-scratch matching baseline up to {} dice.",
        options.verify_limit
    );
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Sparse dice (values spread over 1..=2N)...");
    measurements.extend(run_family(&options, &mut sys, "sparse", |n, seed| {
        random_dice(n, 2 * n as i64, seed)
    }));
    eprintln!();

    eprintln!("[2/3] Dense dice (values crowded into a narrow band)...");
    measurements.extend(run_family(&options, &mut sys, "dense", |n, seed| {
        random_dice(n, (n as i64 / 4).max(8), seed)
    }));
    eprintln!();

    eprintln!("[3/3] Staircase dice (last value forces a full-length chain)...");
    measurements.extend(run_family(&options, &mut sys, "staircase", |n, _| {
        staircase_dice(n)
    }));
    eprintln!();

    print_summary(&measurements);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("straight_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 256usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else {
                return Err(format!("unknown argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin straight_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Largest dice count to verify via baseline (default: 256)
  -h, --help                    Print this help message
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    dice: usize,
    longest: i64,
    augmented: u64,
    longest_chain: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    status: VerificationStatus,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn run_family<G>(
    options: &Options,
    sys: &mut System,
    scenario: &'static str,
    generate: G,
) -> Vec<Measurement>
where
    G: Fn(usize, u64) -> Vec<Vec<i64>>,
{
    const SIZES: &[usize] = &[16, 64, 256, 1024, 4096, 16384];
    let total = SIZES.len();
    SIZES
        .iter()
        .enumerate()
        .map(|(idx, &n)| {
            eprint!("      [{}/{}] {} dice... ", idx + 1, total, n);
            let sets = generate(n, 0x9E37_79B9_7F4A_7C15 ^ n as u64);
            let catalog = ResourceCatalog::from_values(sets.clone());

            let before = rss_kib(sys);
            let start = Instant::now();
            let report: Option<ScanReport> = StraightEngine::new(&catalog)
                .ok()
                .map(|engine| engine.run_with(NoopObserver));
            let wall_s = start.elapsed().as_secs_f64();
            let after = rss_kib(sys);

            let Some(report) = report else {
                eprintln!("✗ catalog rejected");
                return Measurement {
                    scenario,
                    dice: n,
                    longest: 0,
                    augmented: 0,
                    longest_chain: 0,
                    wall_s,
                    rss_delta_kib: after.saturating_sub(before),
                    status: VerificationStatus::Failed,
                };
            };

            let status = if n <= options.verify_limit {
                if baseline_longest(&sets) == report.longest {
                    VerificationStatus::Passed
                } else {
                    VerificationStatus::Failed
                }
            } else {
                VerificationStatus::NotChecked
            };
            let icon = match status {
                VerificationStatus::Passed => "✓",
                VerificationStatus::Failed => "✗",
                VerificationStatus::NotChecked => "○",
            };
            eprintln!(
                "{} longest={}, augmented={}, chain={}, time={:.3}s",
                icon,
                report.longest,
                report.stats.augmented_assignments,
                report.stats.search.longest_chain,
                wall_s
            );
            Measurement {
                scenario,
                dice: n,
                longest: report.longest,
                augmented: report.stats.augmented_assignments,
                longest_chain: report.stats.search.longest_chain,
                wall_s,
                rss_delta_kib: after.saturating_sub(before),
                status,
            }
        })
        .collect()
}

fn print_summary(measurements: &[Measurement]) {
    let passed = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Passed)
        .count();
    let failed = measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Failed)
        .count();
    eprintln!("{}", "=".repeat(80));
    eprintln!(
        "Verified: {passed} passed, {failed} failed, {} not checked",
        measurements.len() - passed - failed
    );
    for m in measurements
        .iter()
        .filter(|m| m.status == VerificationStatus::Failed)
    {
        eprintln!("  ✗ {} ({} dice)", m.scenario, m.dice);
    }
    eprintln!("{}", "=".repeat(80));
    eprintln!();
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,dice,longest,augmented,longest_chain,wall_s,rss_delta_kib,verification_status");
    for m in measurements {
        println!(
            "{},{},{},{},{},{:.3},{},{}",
            m.scenario,
            m.dice,
            m.longest,
            m.augmented,
            m.longest_chain,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label()
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    println!(
        "{:<10}  {:>6}  {:>8}  {:>10}  {:>6}  {:>10}  {:>14}  status",
        "scenario", "dice", "longest", "augmented", "chain", "wall_s", "rss_delta_kib"
    );
    println!("{:-<90}", "");
    for m in measurements {
        println!(
            "{:<10}  {:>6}  {:>8}  {:>10}  {:>6}  {:>10.3}  {:>14}  {}",
            m.scenario,
            m.dice,
            m.longest,
            m.augmented,
            m.longest_chain,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label()
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        println!(
            "  {{\"scenario\":\"{}\",\"dice\":{},\"longest\":{},\"augmented\":{},\"longest_chain\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"status\":\"{}\"}}{}",
            m.scenario,
            m.dice,
            m.longest,
            m.augmented,
            m.longest_chain,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory() / 1024
    } else {
        0
    }
}

fn random_dice(n: usize, max_value: i64, seed: u64) -> Vec<Vec<i64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..6).map(|_| rng.gen_range(1..=max_value)).collect())
        .collect()
}

/// Die `k` offers `k - 1` and `k`, the first die also offers the value just
/// past the top, and the last die only `n - 1`. First-fit hands every value
/// its lower die, so the final value forces a chain through every die.
fn staircase_dice(n: usize) -> Vec<Vec<i64>> {
    let top = n.max(2) as i64 - 1;
    let mut dice = Vec::with_capacity(top as usize + 1);
    dice.push(vec![1, top + 1]);
    for k in 2..=top {
        dice.push(vec![k - 1, k]);
    }
    dice.push(vec![top]);
    for die in &mut dice {
        while die.len() < 6 {
            let last = die[die.len() - 1];
            die.push(last);
        }
    }
    dice
}

/// Longest run recomputed with a fresh matching per window start.
fn baseline_longest(sets: &[Vec<i64>]) -> i64 {
    let mut by_value: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (die, values) in sets.iter().enumerate() {
        for &v in values {
            let dice = by_value.entry(v).or_default();
            if !dice.contains(&die) {
                dice.push(die);
            }
        }
    }
    let values: Vec<(i64, Vec<usize>)> = by_value.into_iter().collect();

    let mut best = 0;
    for begin in 0..values.len() {
        let mut owner: Vec<Option<usize>> = vec![None; sets.len()];
        let mut len = 0;
        for key in begin..values.len() {
            if values[key].0 != values[begin].0 + (key - begin) as i64 {
                break;
            }
            let mut seen = vec![false; sets.len()];
            if !kuhn(key, &values, &mut owner, &mut seen) {
                break;
            }
            len += 1;
        }
        best = best.max(len);
    }
    best
}

fn kuhn(
    key: usize,
    values: &[(i64, Vec<usize>)],
    owner: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    for &die in &values[key].1 {
        if seen[die] {
            continue;
        }
        seen[die] = true;
        let free = match owner[die] {
            None => true,
            Some(other) => kuhn(other, values, owner, seen),
        };
        if free {
            owner[die] = Some(key);
            return true;
        }
    }
    false
}
