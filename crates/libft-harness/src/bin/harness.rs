//! CLI entrypoint for the libft conformance harness.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use libft_harness::fixtures::{self, FixtureFile};
use libft_harness::report::{ConformanceReport, FixtureDigest};
use libft_harness::structured_log::{self, LogEmitter, LogEntry, LogLevel, Outcome};
use libft_harness::{TestRunner, VerificationResult, VerificationSummary};
use libft_membrane::{global_healing_policy, safety_level};

const MODES: [&str; 2] = ["strict", "hardened"];

/// Conformance tooling for libft.
#[derive(Debug, Parser)]
#[command(name = "libft-harness")]
#[command(about = "Conformance testing harness for libft")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Verify the implementation against fixture files.
    Verify {
        /// Directory containing fixture JSON files.
        #[arg(long)]
        fixture: PathBuf,
        /// Output report path (markdown; a `.json` sibling is written too).
        #[arg(long)]
        report: Option<PathBuf>,
        /// Structured JSONL log output path.
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Validate a structured JSONL log file.
    ValidateLog {
        /// Path to the JSONL file.
        #[arg(long)]
        log: PathBuf,
    },
    /// Print the runtime mode and healing counters of this process as JSON.
    HealingSnapshot,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Verify {
            fixture,
            report,
            log,
        } => verify(&fixture, report.as_deref(), log.as_deref())?,
        Command::ValidateLog { log } => {
            let (lines, errors) = structured_log::validate_log_file(&log)?;
            for err in &errors {
                eprintln!("{err}");
            }
            eprintln!(
                "Validated {lines} line(s) in {}: {} error(s)",
                log.display(),
                errors.len()
            );
            if !errors.is_empty() {
                return Err("Structured log validation failed".into());
            }
        }
        Command::HealingSnapshot => {
            let snapshot = global_healing_policy().snapshot();
            let recent: Vec<_> = global_healing_policy()
                .recent()
                .iter()
                .map(|r| serde_json::json!({"symbol": r.symbol, "action": r.action.as_str()}))
                .collect();
            let doc = serde_json::json!({
                "mode": safety_level().as_str(),
                "total_heals": snapshot.total_heals,
                "safe_defaults": snapshot.safe_defaults,
                "variant_upgrades": snapshot.variant_upgrades,
                "recent": recent,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

fn verify(
    dir: &Path,
    report: Option<&Path>,
    log: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Verifying against fixtures in {}", dir.display());
    let (files, skipped) = fixtures::load_dir(dir)?;
    for err in &skipped {
        eprintln!("Skipping fixture: {err}");
    }

    let run_id = format!("run-{}", std::process::id());
    let mut emitter = match log {
        Some(path) => Some(LogEmitter::to_file(path, "verify", &run_id)?),
        None => None,
    };

    let started = Instant::now();
    let mut results = Vec::new();
    for mode in MODES {
        let runner = TestRunner::new("fixture-verify", mode);
        for file in &files {
            let batch = runner.run(&file.set);
            if let Some(emitter) = emitter.as_mut() {
                log_results(emitter, file, mode, &batch)?;
            }
            results.extend(batch);
        }
    }

    let summary = VerificationSummary::from_results(results);
    let report_doc = ConformanceReport {
        title: String::from("libft Conformance Report"),
        mode: MODES.join("+"),
        timestamp: structured_log::now_utc(),
        fixtures: files.iter().map(FixtureDigest::from).collect(),
        healing: global_healing_policy().snapshot().into(),
        summary,
    };

    eprintln!(
        "Verification complete: total={}, passed={}, failed={}",
        report_doc.summary.total, report_doc.summary.passed, report_doc.summary.failed
    );
    for failure in report_doc.summary.failures() {
        eprintln!(
            "FAIL {}: expected {}, got {}",
            failure.case_name, failure.expected, failure.actual
        );
    }

    if let Some(emitter) = emitter.as_mut() {
        let outcome = if report_doc.summary.all_passed() {
            Outcome::Pass
        } else {
            Outcome::Fail
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        emitter.emit_entry(
            LogEntry::new("", LogLevel::Info, "verify_complete")
                .with_outcome(outcome)
                .with_duration_ms(elapsed_ms)
                .with_details(serde_json::json!({
                    "total": report_doc.summary.total,
                    "passed": report_doc.summary.passed,
                    "failed": report_doc.summary.failed,
                    "heals": report_doc.healing.total_heals,
                })),
        )?;
        emitter.flush()?;
    }

    if let Some(report_path) = report {
        eprintln!("Writing report to {}", report_path.display());
        std::fs::write(report_path, report_doc.to_markdown())?;
        std::fs::write(report_path.with_extension("json"), report_doc.to_json())?;
    }

    if !report_doc.summary.all_passed() {
        return Err("Conformance verification failed".into());
    }
    Ok(())
}

fn log_results(
    emitter: &mut LogEmitter,
    file: &FixtureFile,
    mode: &str,
    results: &[VerificationResult],
) -> std::io::Result<()> {
    for r in results {
        let (level, outcome) = if r.passed {
            (LogLevel::Info, Outcome::Pass)
        } else {
            (LogLevel::Error, Outcome::Fail)
        };
        let mut entry = LogEntry::new("", level, "case_result")
            .with_mode(mode)
            .with_api(&file.set.family, format!("ft_{}", r.function))
            .with_outcome(outcome)
            .with_details(serde_json::json!({
                "case": r.case_name,
                "fixture_sha256": file.sha256,
            }));
        if let Some(action) = &r.healing_action {
            entry = entry.with_healing_action(action.as_str());
        }
        if let Some(diff) = &r.diff {
            entry = entry.with_details(serde_json::json!({
                "case": r.case_name,
                "fixture_sha256": file.sha256,
                "expected": r.expected,
                "actual": r.actual,
                "diff": diff,
            }));
        }
        emitter.emit_entry(entry)?;
    }
    Ok(())
}
