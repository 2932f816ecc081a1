//! Subcommand handlers

use crate::aggregator::{ResultAggregator, ResultKey};
use crate::cli::{ListArgs, NewDayArgs, RunArgs, SubmitArgs, VerifyArgs};
use crate::config::{self, Config};
use crate::error::{ArcExecutorError, CliError};
use crate::executor::{Executor, VerifyFilter};
use crate::output::{OutputFormatter, VerifySummary};
use crate::scaffold::{self, DataFileStatus, NewDay, PuzzleSource, WebPuzzleSource};
use aoc_http_client::{AocClient, AocError, SubmissionResult};
use aoc_solver::{
    DataSet, InputProvider, SingleFileInputProvider, SmartFileInputProvider, SolverError,
    SolverRegistry, group_parts_by_input, parse_part,
};
use std::path::Path;
use std::time::Duration;

/// Explicit year if it has a solver for `day`, else the latest year that does
fn resolve_year(registry: &SolverRegistry, day: u8, year: Option<u16>) -> Result<u16, CliError> {
    match year {
        Some(year) if registry.contains(year, day) => Ok(year),
        Some(_) => Err(CliError::NotSolved { day }),
        None => registry
            .latest_year_for(day)
            .ok_or(CliError::NotSolved { day }),
    }
}

/// `run`: solve every part of a day, on sample data first when asked
pub fn run(args: &RunArgs, config: &Config, registry: &SolverRegistry) -> Result<(), CliError> {
    let day = args.day;
    let year = resolve_year(registry, day, args.year)?;
    let parts: Vec<u8> = registry
        .get_info(year, day)
        .map_or(1..=0, |info| 1..=info.parts)
        .collect();
    let formatter = OutputFormatter::new(config.quiet);

    if let Some(path) = &args.input {
        let provider = SingleFileInputProvider::new(path);
        return solve_all(registry, year, day, &provider, &parts, &formatter);
    }

    let data_sets: &[DataSet] = if args.test_data {
        &[DataSet::Sample, DataSet::Real]
    } else {
        &[DataSet::Real]
    };
    for &data_set in data_sets {
        let provider = SmartFileInputProvider::new(&config.data_dir, year, day, data_set);
        solve_all(registry, year, day, &provider, &parts, &formatter)?;
    }
    Ok(())
}

/// Solve `parts`, parsing each distinct input file once
fn solve_all(
    registry: &SolverRegistry,
    year: u16,
    day: u8,
    provider: &dyn InputProvider,
    parts: &[u8],
    formatter: &OutputFormatter,
) -> Result<(), CliError> {
    for (path, group) in group_parts_by_input(provider, parts)? {
        formatter.print_input_source(&path);
        let input = std::fs::read_to_string(&path)?;
        let mut solver = registry.create_solver(year, day, &input)?;
        let parse_duration = solver.parse_duration();
        for part in group {
            formatter.print_answer(day, part, parse_duration, &solver.solve(part));
        }
    }
    Ok(())
}

/// `verify`: golden checks streamed in (year, day, data set, part) order
pub fn verify(args: VerifyArgs, config: &Config, registry: SolverRegistry) -> Result<(), CliError> {
    let year = match (args.day, args.year) {
        (Some(day), None) => Some(resolve_year(&registry, day, None)?),
        (_, year) => year,
    };
    let filter = VerifyFilter {
        year,
        day: args.day,
        part: args.part_filter(),
        tags: args.tags,
        sample_only: args.test_data_only,
    };

    let executor = Executor::new(
        registry,
        config.data_dir.clone(),
        args.parallelize_by,
        config::thread_count(args.threads),
    )
    .map_err(ArcExecutorError::from)?;

    let work_items = executor.collect_work_items(&filter);
    if work_items.is_empty() {
        if let Some(day) = args.day {
            return Err(CliError::NotSolved { day });
        }
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }
    if !config.quiet {
        println!("Verifying {} solver(s)...", work_items.len());
    }

    let expected_keys = ResultKey::all_for(&work_items);
    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(work_items, tx));

    // Print results as soon as everything before them has arrived
    let formatter = OutputFormatter::new(config.quiet);
    let mut aggregator = ResultAggregator::new(expected_keys);
    let mut results = Vec::new();
    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_check(&ready);
            results.push(ready);
        }
    }
    for ready in aggregator.drain() {
        formatter.print_check(&ready);
        results.push(ready);
    }
    if !aggregator.is_complete() {
        log::warn!("not all expected check results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    let summary = VerifySummary::tally(&results);
    formatter.print_verify_summary(summary, &results);
    match summary.failed {
        0 => Ok(()),
        failed => Err(CliError::VerifyFailed(failed)),
    }
}

/// `submit`: solve one part on real data and post the answer
pub fn submit(args: &SubmitArgs, config: &Config, registry: &SolverRegistry) -> Result<(), CliError> {
    let part = parse_part(&args.part)?;
    let day = args.day;
    let year = resolve_year(registry, day, args.year)?;

    let provider = SmartFileInputProvider::new(&config.data_dir, year, day, DataSet::Real);
    let path = provider.locate(Some(part))?;
    let formatter = OutputFormatter::new(config.quiet);
    formatter.print_input_source(&path);

    let input = std::fs::read_to_string(&path)?;
    let mut solver = registry.create_solver(year, day, &input)?;
    let solved = solver.solve(part).map_err(SolverError::from)?;
    formatter.print_answer(day, part, solver.parse_duration(), &Ok(solved.clone()));

    let session =
        config::require_session("Session token required to submit answers to adventofcode.com")?;
    let client = AocClient::new()?;
    let user_id = config::verify_session(&client, &session)?;
    log::info!("submitting {year} day {day} part {part} as user {user_id}");
    let (outcome, waited) = submit_with_retry(
        &client,
        year,
        day,
        part,
        &solved.answer,
        &session,
        args.auto_retry,
    )?;
    formatter.print_submission(&solved.answer, &outcome, waited);
    Ok(())
}

/// Submit, sleeping out throttling with a known wait when `auto_retry` is set.
/// Returns the final verdict and the total time spent waiting.
fn submit_with_retry(
    client: &AocClient,
    year: u16,
    day: u8,
    part: u8,
    answer: &str,
    session: &str,
    auto_retry: bool,
) -> Result<(SubmissionResult, Duration), AocError> {
    let mut total_wait = Duration::ZERO;

    loop {
        match client.submit_answer(year, day, part, answer, session)? {
            SubmissionResult::Throttled {
                wait_time: Some(wait),
            } if auto_retry => {
                log::info!(
                    "submission throttled, retrying in {}",
                    humantime::format_duration(wait)
                );
                std::thread::sleep(wait);
                total_wait += wait;
            }
            outcome => return Ok((outcome, total_wait)),
        }
    }
}

/// `new-day`: scaffold a solution module and its input files
pub fn new_day(args: &NewDayArgs, config: &Config) -> Result<(), CliError> {
    let year = args
        .year
        .unwrap_or_else(|| config::current_aoc_year(chrono::Local::now()));

    let source = match config::session_from_env() {
        Some(session) => Some(WebPuzzleSource::new(AocClient::new()?, session)),
        None => {
            log::info!("AOC_SESSION is not set, input files are created empty");
            None
        }
    };
    let request = NewDay {
        year,
        day: args.day,
        directory: &args.directory,
        data_dir: &config.data_dir,
        template: args.template.as_deref(),
        force: args.force,
    };
    let report = scaffold::scaffold(&request, source.as_ref().map(|s| s as &dyn PuzzleSource))?;

    let day = args.day;
    println!(
        "Created solution module for day {day} at {}.",
        report.module.display()
    );
    print_data_status("Input data", day, &report.input.0, &report.input.1);
    print_data_status("Test input data", day, &report.test_input.0, &report.test_input.1);
    Ok(())
}

fn print_data_status(label: &str, day: u8, path: &Path, status: &DataFileStatus) {
    match status {
        DataFileStatus::AlreadyExists => println!("{label} already exists for day {day}."),
        DataFileStatus::Created { filled: true } => {
            println!("Created {} for day {day}.", label.to_lowercase())
        }
        DataFileStatus::Created { filled: false } => {
            println!("Created empty {} for day {day}.", label.to_lowercase())
        }
        DataFileStatus::Locked => println!(
            "Warning: day {day} is not unlocked yet; created empty {}.",
            path.display()
        ),
        DataFileStatus::FetchFailed(reason) => println!(
            "Warning: could not download {} ({reason}); created it empty.",
            path.display()
        ),
    }
}

/// `list`: registered solvers with tags and recorded answers
pub fn list(args: &ListArgs, config: &Config, registry: &SolverRegistry) -> Result<(), CliError> {
    let formatter = OutputFormatter::new(config.quiet);
    let mut found = 0;
    for info in registry
        .iter_info()
        .filter(|info| args.year.is_none_or(|y| info.year == y))
        .filter(|info| args.tags.iter().all(|t| info.tags.contains(&t.as_str())))
    {
        formatter.print_solver_info(&info);
        found += 1;
    }
    if found == 0 {
        println!("No solvers found matching the specified filters.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{AocParser, ParseError, PartSolver, RegistryBuilder, SolveError};

    #[derive(aoc_solver::AocSolver)]
    #[aoc_solver(max_parts = 1)]
    struct Echo;

    impl AocParser for Echo {
        type SharedData<'a> = &'a str;

        fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
            Ok(input)
        }
    }

    impl PartSolver<1> for Echo {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared.to_string())
        }
    }

    fn registry() -> SolverRegistry {
        RegistryBuilder::new()
            .register_solver::<Echo>(2022, 5, &[], None)
            .unwrap()
            .register_solver::<Echo>(2023, 5, &[], None)
            .unwrap()
            .register_solver::<Echo>(2021, 6, &[], None)
            .unwrap()
            .build()
    }

    fn client_for(server: &mockito::Server) -> AocClient {
        AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_resolve_year() {
        let registry = registry();
        assert_eq!(resolve_year(&registry, 5, None).unwrap(), 2023);
        assert_eq!(resolve_year(&registry, 5, Some(2022)).unwrap(), 2022);
        assert_eq!(resolve_year(&registry, 6, None).unwrap(), 2021);
        assert!(matches!(
            resolve_year(&registry, 5, Some(2021)),
            Err(CliError::NotSolved { day: 5 })
        ));
        assert_eq!(
            resolve_year(&registry, 7, None).unwrap_err().to_string(),
            "You have not solved day 7 yet. Start it using 'new-day' command"
        );
    }

    #[test]
    fn test_submit_reports_throttle_without_retry() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/2023/day/5/answer")
            .with_status(200)
            .with_body(
                "<html><body><main>You gave an answer too recently. \
                 You have 1m 5s left to wait.</main></body></html>",
            )
            .expect(1)
            .create();

        let (outcome, waited) =
            submit_with_retry(&client_for(&server), 2023, 5, 1, "42", "s", false).unwrap();
        assert_eq!(
            outcome,
            SubmissionResult::Throttled {
                wait_time: Some(Duration::from_secs(65))
            }
        );
        assert_eq!(waited, Duration::ZERO);
        mock.assert();
    }

    #[test]
    fn test_submit_does_not_retry_unknown_wait() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/2023/day/5/answer")
            .with_status(200)
            .with_body("<html><body><main>You gave an answer too recently.</main></body></html>")
            .expect(1)
            .create();

        let (outcome, _) =
            submit_with_retry(&client_for(&server), 2023, 5, 2, "42", "s", true).unwrap();
        assert_eq!(outcome, SubmissionResult::Throttled { wait_time: None });
        mock.assert();
    }

    #[test]
    fn test_submit_correct() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/2023/day/5/answer")
            .with_status(200)
            .with_body("<html><body><main>That's the right answer!</main></body></html>")
            .create();

        let (outcome, waited) =
            submit_with_retry(&client_for(&server), 2023, 5, 1, "42", "s", true).unwrap();
        assert_eq!(outcome, SubmissionResult::Correct);
        assert_eq!(waited, Duration::ZERO);
        mock.assert();
    }
}
