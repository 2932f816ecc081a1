//! CLI argument parsing using clap

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Parallelization level for `verify`
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// No parallelization; check everything in order
    Sequential,
    /// Parallelize across years; days run sequentially within each year
    Year,
    /// Parallelize across year/day combinations (default)
    #[default]
    Day,
    /// Parallelize across every year/day/data set/part check
    Part,
}

/// Advent of Code solving harness
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run, verify and scaffold Advent of Code solutions", version)]
pub struct Cli {
    /// Directory holding puzzle inputs as `<year>/<day>_input.txt` (default: $AOC_DATA_DIR or ./data)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Quiet mode - only output answers
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve both parts of a day
    Run(RunArgs),
    /// Check solutions against their recorded answers
    Verify(VerifyArgs),
    /// Solve one part on real data and submit the answer
    Submit(SubmitArgs),
    /// Scaffold a solution module and input files for a new day
    NewDay(NewDayArgs),
    /// List registered solvers
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Day of the challenge to run
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: u8,

    /// Year of the challenge (defaults to the latest year solved for that day)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Run the challenge on sample data too
    #[arg(short, long)]
    pub test_data: bool,

    /// Read input from this file instead of the data directory
    #[arg(long, conflicts_with = "test_data")]
    pub input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Day to verify (verifies every registered day if omitted)
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Year to verify (all years if omitted; with a day, the latest year solved for it)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Verify only part one
    #[arg(short = '1', long)]
    pub part_one: bool,

    /// Verify only part two
    #[arg(short = '2', long)]
    pub part_two: bool,

    /// Only check sample data
    #[arg(short, long)]
    pub test_data_only: bool,

    /// Tags to filter solvers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Number of threads for parallel execution
    #[arg(long)]
    pub threads: Option<usize>,

    /// Parallelization level: sequential, year, day, or part
    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,
}

impl VerifyArgs {
    /// Part restriction: only when exactly one of `-1`/`-2` is given
    pub fn part_filter(&self) -> Option<u8> {
        match (self.part_one, self.part_two) {
            (true, false) => Some(1),
            (false, true) => Some(2),
            _ => None,
        }
    }
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Day of the challenge
    #[arg(value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: u8,

    /// Which part to submit: 1/2 or a/b
    pub part: String,

    /// Year of the challenge (defaults to the latest year solved for that day)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Wait out throttling and retry instead of giving up
    #[arg(long)]
    pub auto_retry: bool,
}

#[derive(Args, Debug)]
pub struct NewDayArgs {
    /// Day for which to create the solution module (1-25)
    pub day: u8,

    /// Year of the puzzle (defaults to the current Advent of Code year)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Directory holding the `year_YYYY` solution modules
    #[arg(short, long, default_value = "aoc-solutions/src/my_solutions")]
    pub directory: PathBuf,

    /// Template for the solution module (built-in template if omitted)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Overwrite the solution module if it already exists
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list solvers for this year
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Only list solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,
}
