mod fixture;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::warn;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use fixture::{DemoHost, demo_config};
use mercstart_engine::{CampaignInitializer, InitReport, StartConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Human-readable summary with per-run detail
    Console,
    /// Machine-readable run records
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "mercstart-tester", version = "0.1.0")]
#[command(about = "Seeded campaign start runs against a built-in demo host")]
struct Args {
    /// Path to a settings JSON file; the built-in demo settings when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Base seed; run N uses seed + N
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Number of runs to execute
    #[arg(long, default_value_t = 1)]
    runs: u64,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Everything one seeded run produced, flattened for reporting.
#[derive(Debug, Serialize)]
struct RunRecord {
    seed: u64,
    report: InitReport,
    roster: Vec<String>,
    bays: Vec<BayLine>,
    bench: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BayLine {
    slot: usize,
    def_id: String,
    instance_id: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    println!("{}", "⚙ Mercstart Campaign Start Tester".bright_cyan().bold());
    println!("{}", "=================================".cyan());

    let cfg = load_settings(args.settings.as_deref())?;
    let start_time = Instant::now();

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for offset in 0..args.runs {
        let seed = args.seed + offset;
        let record = run_once(cfg.clone(), seed)?;
        failures.extend(validate_run(&record));
        records.push(record);
    }

    write_report(&args, &records, start_time)?;

    if !failures.is_empty() {
        for failure in &failures {
            eprintln!("❌ {}", failure.red());
        }
        std::process::exit(1);
    }
    Ok(())
}

fn load_settings(path: Option<&std::path::Path>) -> Result<StartConfig> {
    let Some(path) = path else {
        return Ok(demo_config());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let load = StartConfig::load_or_default(&raw);
    if let Some(err) = load.error() {
        warn!("settings unusable ({err}); running with defaults");
    }
    Ok(load.into_config())
}

fn run_once(cfg: StartConfig, seed: u64) -> Result<RunRecord> {
    let mut host = DemoHost::new();
    let mut init = CampaignInitializer::new(cfg, seed);
    let report = init.run(&mut host)?;

    let roster = host.roster().iter().map(|p| p.id.clone()).collect();
    let bays = host
        .active_bays()
        .into_iter()
        .map(|(slot, unit)| BayLine {
            slot,
            def_id: unit.def_id.clone(),
            instance_id: unit.instance_id.clone(),
        })
        .collect();
    let bench = host.bench().iter().map(|u| u.def_id.clone()).collect();

    Ok(RunRecord {
        seed,
        report,
        roster,
        bays,
        bench,
    })
}

/// Cross-check the host's final state against the run report.
fn validate_run(record: &RunRecord) -> Vec<String> {
    let mut failures = Vec::new();
    if record.roster.len() != record.report.pilots_added() {
        failures.push(format!(
            "seed {}: roster holds {} pilots but the report counted {}",
            record.seed,
            record.roster.len(),
            record.report.pilots_added()
        ));
    }
    if record.bench.len() != record.report.units_benched {
        failures.push(format!(
            "seed {}: bench holds {} units but the report counted {}",
            record.seed,
            record.bench.len(),
            record.report.units_benched
        ));
    }
    let mut instance_ids: Vec<_> = record.bays.iter().map(|b| &b.instance_id).collect();
    instance_ids.sort();
    let before = instance_ids.len();
    instance_ids.dedup();
    if instance_ids.len() != before {
        failures.push(format!("seed {}: duplicate instance ids in bays", record.seed));
    }
    failures
}

fn write_report(args: &Args, records: &[RunRecord], start_time: Instant) -> Result<()> {
    let mut target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut target, records)?;
            writeln!(&mut target)?;
        }
        ReportFormat::Console => {
            for record in records {
                writeln!(
                    &mut target,
                    "seed {:>6}: {} pilots ({} rerolled), {} placed, {} benched",
                    record.seed,
                    record.report.pilots_added(),
                    record.report.rerolled_pilots,
                    record.report.units_placed,
                    record.report.units_benched
                )?;
                if args.verbose {
                    writeln!(&mut target, "  roster: {}", record.roster.join(", "))?;
                    for bay in &record.bays {
                        writeln!(
                            &mut target,
                            "  bay {}: {} ({})",
                            bay.slot, bay.def_id, bay.instance_id
                        )?;
                    }
                    if !record.bench.is_empty() {
                        writeln!(&mut target, "  bench: {}", record.bench.join(", "))?;
                    }
                }
            }
        }
    }

    let duration = start_time.elapsed();
    writeln!(&mut target)?;
    writeln!(&mut target, "🏁 {} runs in {duration:?}", records.len())?;
    target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            settings: None,
            seed: 1337,
            runs: 1,
            report: ReportFormat::Console,
            output: None,
            verbose: false,
        }
    }

    #[test]
    fn demo_run_fills_roster_and_bays() {
        let record = run_once(demo_config(), 1337).expect("run succeeds");
        // 1 guarantee + 3 random + 2 procedural.
        assert_eq!(record.report.pilots_added(), 6);
        assert_eq!(record.roster[0], "ronin-medusa");
        assert!(!record.roster.contains(&"ronin-ozone".to_string()));
        // 6 units into slots 1..=5 with the ancestral kept: one overflows.
        assert_eq!(record.report.units_placed, 5);
        assert_eq!(record.report.units_benched, 1);
        assert_eq!(record.bays[0].def_id, "ancestral-blackjack");
        assert!(validate_run(&record).is_empty());
    }

    #[test]
    fn validate_run_flags_count_mismatches() {
        let mut record = run_once(demo_config(), 7).expect("run succeeds");
        record.roster.pop();
        let failures = validate_run(&record);
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("roster"));
    }

    #[test]
    fn load_settings_defaults_without_a_path() {
        let cfg = load_settings(None).expect("demo settings load");
        assert_eq!(cfg.number_random_ronin, 3);
    }

    #[test]
    fn load_settings_falls_back_on_bad_json() {
        let temp = std::env::temp_dir().join("mercstart-bad-settings.json");
        std::fs::write(&temp, "{not json").expect("write temp settings");
        let cfg = load_settings(Some(&temp)).expect("fallback succeeds");
        assert_eq!(cfg, StartConfig::default());
    }

    #[test]
    fn write_report_emits_json_records() {
        let temp = std::env::temp_dir().join("mercstart-report.json");
        let args = Args {
            report: ReportFormat::Json,
            output: Some(temp.clone()),
            ..base_args()
        };
        let record = run_once(demo_config(), 42).expect("run succeeds");
        write_report(&args, &[record], Instant::now()).expect("report writes");
        let content = std::fs::read_to_string(temp).expect("report readable");
        assert!(content.contains("\"seed\": 42"));
        assert!(content.contains("units_placed"));
    }

    #[test]
    fn write_report_console_lists_runs() {
        let temp = std::env::temp_dir().join("mercstart-report.txt");
        let args = Args {
            output: Some(temp.clone()),
            verbose: true,
            ..base_args()
        };
        let record = run_once(demo_config(), 9).expect("run succeeds");
        write_report(&args, &[record], Instant::now()).expect("report writes");
        let content = std::fs::read_to_string(temp).expect("report readable");
        assert!(content.contains("benched"));
        assert!(content.contains("bay 0: ancestral-blackjack"));
    }
}
