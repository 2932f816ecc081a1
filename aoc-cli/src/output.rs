//! Output formatting for answers, golden checks and submissions

use crate::executor::CheckResult;
use aoc_http_client::SubmissionResult;
use aoc_solver::{FactoryInfo, GoldenOutcome, SolveError, SolveResult};
use chrono::TimeDelta;
use std::path::Path;

/// Counts printed at the end of `verify`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VerifySummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl VerifySummary {
    pub fn tally(results: &[CheckResult]) -> Self {
        results
            .iter()
            .fold(VerifySummary::default(), |mut summary, r| {
                match &r.outcome {
                    Ok(GoldenOutcome::Passed) => summary.passed += 1,
                    Ok(GoldenOutcome::Skipped(_)) => summary.skipped += 1,
                    Ok(GoldenOutcome::Failed { .. }) | Err(_) => summary.failed += 1,
                }
                summary
            })
    }
}

/// Output formatter for solver results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Announce which file a group of parts is solved from
    pub fn print_input_source(&self, path: &Path) {
        if !self.quiet {
            println!("Using data from {}", path.display());
        }
    }

    /// Print the answer of one part from `run`
    pub fn print_answer(
        &self,
        day: u8,
        part: u8,
        parse_duration: TimeDelta,
        result: &Result<SolveResult, SolveError>,
    ) {
        match (result, self.quiet) {
            (Ok(solved), true) => println!("{}", solved.answer),
            (Ok(solved), false) => println!(
                "Day {day} - Part {part}: {} (parse: {}, solve: {})",
                solved.answer,
                format_duration(parse_duration),
                format_duration(solved.duration())
            ),
            (Err(e), _) => eprintln!("Day {day} - Part {part}: Error - {e}"),
        }
    }

    /// Print a single golden check
    pub fn print_check(&self, result: &CheckResult) {
        let prefix = format!(
            "{}/{:02} {} part {}",
            result.year, result.day, result.data_set, result.part
        );
        let timing = format_duration(result.duration);

        match &result.outcome {
            Ok(GoldenOutcome::Passed) if !self.quiet => println!("{prefix}: PASS ({timing})"),
            Ok(GoldenOutcome::Passed) => {}
            Ok(GoldenOutcome::Skipped(reason)) if !self.quiet => {
                println!("{prefix}: SKIP ({reason})")
            }
            Ok(GoldenOutcome::Skipped(_)) => {}
            Ok(GoldenOutcome::Failed { expected, actual }) => {
                println!("{prefix}: FAIL expected {expected}, got {actual} ({timing})")
            }
            Err(e) => eprintln!("{prefix}: Error - {e}"),
        }
    }

    /// Print a summary after all checks
    /// Shows total check time (sum of durations) next to elapsed wall-clock time
    pub fn print_verify_summary(&self, summary: VerifySummary, results: &[CheckResult]) {
        if self.quiet {
            return;
        }

        let total_check_time: TimeDelta = results.iter().map(|r| r.duration).sum();
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Checks: {} passed, {} failed, {} skipped",
            summary.passed, summary.failed, summary.skipped
        );
        println!("Total check time: {}", format_duration(total_check_time));
        println!(
            "Elapsed wall-clock time: {}",
            format_std_duration(elapsed_time)
        );
        if !elapsed_time.is_zero() {
            let total_secs = total_check_time.num_microseconds().unwrap_or(0) as f64 / 1_000_000.0;
            println!(
                "Speedup factor: {:.2}x",
                total_secs / elapsed_time.as_secs_f64()
            );
        }
    }

    /// Print the website's verdict on a submitted answer
    pub fn print_submission(
        &self,
        answer: &str,
        outcome: &SubmissionResult,
        waited: std::time::Duration,
    ) {
        let waited = if waited.is_zero() {
            String::new()
        } else {
            format!(" after waiting {}", format_std_duration(waited))
        };
        println!(
            "Submitted {answer} at {}{waited}: {}",
            chrono::Local::now().format("%H:%M:%S"),
            format_outcome(outcome)
        );
    }

    /// Print one registry entry for `list`
    pub fn print_solver_info(&self, info: &FactoryInfo) {
        if self.quiet {
            println!("{}/{:02}", info.year, info.day);
            return;
        }
        let recorded = info.expected.map_or(0, |e| e.recorded());
        let tags = if info.tags.is_empty() {
            "-".to_string()
        } else {
            info.tags.join(", ")
        };
        println!(
            "{}/{:02}  parts: {}  answers: {recorded}/{}  tags: {tags}",
            info.year,
            info.day,
            info.parts,
            usize::from(info.parts) * 2
        );
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

/// Format a submission outcome for display
fn format_outcome(outcome: &SubmissionResult) -> String {
    match outcome {
        SubmissionResult::Correct => "✓ Correct".to_string(),
        SubmissionResult::Incorrect => "✗ Incorrect".to_string(),
        SubmissionResult::AlreadyCompleted => "⏭ Already completed".to_string(),
        SubmissionResult::Throttled { wait_time } => match wait_time {
            Some(d) => format!("⏳ Throttled (wait {})", humantime::format_duration(*d)),
            None => "⏳ Throttled".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{DataSet, SolverError};
    use std::time::Duration;

    fn check(outcome: Result<GoldenOutcome, SolverError>) -> CheckResult {
        CheckResult {
            year: 2023,
            day: 1,
            data_set: DataSet::Sample,
            part: 1,
            outcome,
            duration: TimeDelta::zero(),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(TimeDelta::microseconds(12)), "12µs");
        assert_eq!(format_duration(TimeDelta::microseconds(1500)), "1.50ms");
        assert_eq!(format_duration(TimeDelta::milliseconds(2500)), "2.50s");
        assert_eq!(format_duration(TimeDelta::microseconds(-3)), "-3µs");
    }

    #[test]
    fn test_format_outcome() {
        assert_eq!(format_outcome(&SubmissionResult::Correct), "✓ Correct");
        assert_eq!(
            format_outcome(&SubmissionResult::Throttled {
                wait_time: Some(Duration::from_secs(125))
            }),
            "⏳ Throttled (wait 2m 5s)"
        );
        assert_eq!(
            format_outcome(&SubmissionResult::Throttled { wait_time: None }),
            "⏳ Throttled"
        );
    }

    #[test]
    fn test_tally_counts_errors_as_failures() {
        let results = vec![
            check(Ok(GoldenOutcome::Passed)),
            check(Ok(GoldenOutcome::Passed)),
            check(Ok(GoldenOutcome::Skipped("no answer".into()))),
            check(Ok(GoldenOutcome::Failed {
                expected: "1".into(),
                actual: "2".into(),
            })),
            check(Err(SolverError::NotFound(2023, 1))),
        ];
        assert_eq!(
            VerifySummary::tally(&results),
            VerifySummary {
                passed: 2,
                failed: 2,
                skipped: 1
            }
        );
    }
}
