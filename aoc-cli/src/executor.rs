//! Parallel executor for golden checks

use crate::cli::ParallelizeBy;
use crate::error::{ArcExecutorError, ExecutorError};
use aoc_solver::{DataSet, Expected, GoldenOutcome, SolverError, SolverRegistry, verify_part};
use chrono::{TimeDelta, Utc};
use itertools::Itertools;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// Which checks `verify` should run
#[derive(Debug, Clone, Default)]
pub struct VerifyFilter {
    pub year: Option<u16>,
    pub day: Option<u8>,
    pub part: Option<u8>,
    pub tags: Vec<String>,
    pub sample_only: bool,
}

/// One golden check: a part of a day against one data set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub data_set: DataSet,
    pub part: u8,
}

/// Work item representing the checks of one solver
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub expected: &'static Expected,
    /// Ordered by data set, then part
    pub checks: Vec<Check>,
}

/// Result from a single golden check
#[derive(Debug)]
pub struct CheckResult {
    pub year: u16,
    pub day: u8,
    pub data_set: DataSet,
    pub part: u8,
    pub outcome: Result<GoldenOutcome, SolverError>,
    pub duration: TimeDelta,
}

/// Parallel executor for running golden checks
pub struct Executor {
    context: CheckContext,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker thread needs to run a check
struct CheckContext {
    registry: SolverRegistry,
    data_dir: PathBuf,
    parallelize_by: ParallelizeBy,
}

impl Executor {
    pub fn new(
        registry: SolverRegistry,
        data_dir: PathBuf,
        parallelize_by: ParallelizeBy,
        thread_count: usize,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            context: CheckContext {
                registry,
                data_dir,
                parallelize_by,
            },
            thread_pool,
        })
    }

    /// Collect work items by filtering registry metadata, ordered by (year, day)
    pub fn collect_work_items(&self, filter: &VerifyFilter) -> Vec<WorkItem> {
        let data_sets: &[DataSet] = if filter.sample_only {
            &[DataSet::Sample]
        } else {
            &[DataSet::Sample, DataSet::Real]
        };

        self.context
            .registry
            .iter_info()
            .filter(|info| filter.year.is_none_or(|y| info.year == y))
            .filter(|info| filter.day.is_none_or(|d| info.day == d))
            .filter(|info| filter.tags.iter().all(|t| info.tags.contains(&t.as_str())))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                expected: info.expected.unwrap_or(&Expected::EMPTY),
                checks: data_sets
                    .iter()
                    .cartesian_product(1..=info.parts)
                    .filter(|&(_, part)| filter.part.is_none_or(|p| p == part))
                    .map(|(&data_set, part)| Check { data_set, part })
                    .collect(),
            })
            .filter(|w| !w.checks.is_empty())
            .collect()
    }

    /// Execute all work items and send results to channel
    pub fn execute(
        &self,
        work_items: Vec<WorkItem>,
        tx: Sender<CheckResult>,
    ) -> Result<(), ArcExecutorError> {
        let context = &self.context;
        match context.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected_error: Option<ArcExecutorError> = None;
                for work in &work_items {
                    if let Err(e) = run_work_item(work, &tx, context) {
                        collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
                    }
                }
                collected_error.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map(|items| {
                            let mut err = None;
                            for work in &items {
                                if let Err(e) = run_work_item(work, &tx, context) {
                                    err = Some(ArcExecutorError::combine_opt(err, e));
                                }
                            }
                            err
                        })
                        .reduce_with(merge_errors)
                        .unwrap_or_default()
                        .map_or(Ok(()), Err)
                })
            }
            ParallelizeBy::Day => self.thread_pool.install(|| {
                work_items
                    .par_iter()
                    .map(|work| run_work_item(work, &tx, context).err())
                    .reduce_with(merge_errors)
                    .unwrap_or_default()
                    .map_or(Ok(()), Err)
            }),
            ParallelizeBy::Part => {
                let checks: Vec<(&WorkItem, Check)> = work_items
                    .iter()
                    .flat_map(|w| w.checks.iter().map(move |&c| (w, c)))
                    .collect();
                self.thread_pool.install(|| {
                    checks
                        .into_par_iter()
                        .map_with(tx.clone(), |tx, (work, check)| {
                            tx.send(run_check(work, check, context))
                                .map_err(|_| ArcExecutorError::from(ExecutorError::ChannelSend))
                                .err()
                        })
                        .reduce_with(merge_errors)
                        .unwrap_or_default()
                        .map_or(Ok(()), Err)
                })
            }
        }
    }
}

fn merge_errors(
    err1: Option<ArcExecutorError>,
    err2: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (err1, err2) {
        (Some(e1), e2) => Some(ArcExecutorError::combine_opt(e2, e1)),
        (None, e2) => e2,
    }
}

/// Run every check of one solver in order
fn run_work_item(
    work: &WorkItem,
    tx: &Sender<CheckResult>,
    context: &CheckContext,
) -> Result<(), ArcExecutorError> {
    for &check in &work.checks {
        tx.send(run_check(work, check, context))
            .map_err(|_| ExecutorError::ChannelSend)?;
    }
    Ok(())
}

/// Solve one part on one data set through the registry and compare to the recorded answer
fn run_check(work: &WorkItem, check: Check, context: &CheckContext) -> CheckResult {
    let (year, day) = (work.year, work.day);
    let start = Utc::now();
    let outcome = verify_part(
        &context.data_dir,
        year,
        day,
        check.data_set,
        check.part,
        work.expected,
        |input| {
            let mut solver = context.registry.create_solver(year, day, input)?;
            Ok(solver.solve(check.part)?.answer)
        },
    );
    log::debug!(
        "{year}/{day:02} {} part {}: {:?}",
        check.data_set,
        check.part,
        outcome
    );

    CheckResult {
        year,
        day,
        data_set: check.data_set,
        part: check.part,
        outcome,
        duration: Utc::now() - start,
    }
}
