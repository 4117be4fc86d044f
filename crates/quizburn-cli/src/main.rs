use std::io::{self, BufReader};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use quizburn_core::{RunConfig, DEFAULT_SOURCE_PATH};
use quizburn_runner::{load_problem_set, RaceCoordinator, SharedOutput};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "quizburn")]
#[command(about = "QuizBurn - timed quiz from a CSV file", long_about = None)]
struct Cli {
    /// CSV file that contains the quiz questions
    #[arg(short, long, default_value = DEFAULT_SOURCE_PATH)]
    filename: PathBuf,

    /// Time limit once the timer starts (e.g. 30s, 1m30s, 500ms, or plain seconds)
    #[arg(short, long, default_value = "30s", value_parser = parse_duration)]
    time: Duration,

    /// Also print the final report as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig::new(self.filename.clone(), self.time)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.run_config();
    tracing::debug!("Run config: {:?}", config);

    let problems = load_problem_set(&config.source_path).context("failed to load problems")?;

    // The collector thread may still be blocked on stdin when this returns;
    // it is detached and does not hold up exit.
    let report = RaceCoordinator::from_config(&config)
        .run(problems, BufReader::new(io::stdin()), SharedOutput::stdout())
        .await
        .context("quiz aborted")?;

    if cli.json {
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}

/// Parse a duration like `30s`, `1m30s`, `1.5h`, `250ms` or bare seconds.
///
/// Units are `ns`, `us` (or `µs`), `ms`, `s`, `m` and `h`.
fn parse_duration(raw: &str) -> std::result::Result<Duration, String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err("duration is empty".to_string());
    }
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let is_number = |c: char| c.is_ascii_digit() || c == '.';
    let mut total = Duration::ZERO;
    let mut rest = s;

    while !rest.is_empty() {
        let num_len = rest.find(|c| !is_number(c)).unwrap_or(rest.len());
        if num_len == 0 {
            return Err(format!("invalid duration '{}'", raw));
        }
        let number = &rest[..num_len];
        rest = &rest[num_len..];

        let unit_len = rest.find(is_number).unwrap_or(rest.len());
        let nanos_per_unit: u64 = match &rest[..unit_len] {
            "ns" => 1,
            "us" | "µs" | "μs" => 1_000,
            "ms" => 1_000_000,
            "s" => 1_000_000_000,
            "m" => 60_000_000_000,
            "h" => 3_600_000_000_000,
            "" => return Err(format!("missing unit in duration '{}'", raw)),
            unit => return Err(format!("unknown unit '{}' in duration '{}'", unit, raw)),
        };
        rest = &rest[unit_len..];

        let out_of_range = || format!("duration '{}' is out of range", raw);
        let part = match number.parse::<u64>() {
            Ok(n) => n
                .checked_mul(nanos_per_unit)
                .map(Duration::from_nanos)
                .ok_or_else(out_of_range)?,
            Err(_) => {
                let value: f64 = number
                    .parse()
                    .map_err(|_| format!("invalid number in duration '{}'", raw))?;
                Duration::try_from_secs_f64(value * nanos_per_unit as f64 / 1e9)
                    .map_err(|_| out_of_range())?
            }
        };
        total = total.checked_add(part).ok_or_else(out_of_range)?;
    }

    Ok(total)
}
