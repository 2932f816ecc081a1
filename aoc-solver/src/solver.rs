//! Core solver traits and part identification

use crate::error::{InvalidPart, ParseError, SolveError};

/// Trait for parsing AOC puzzle input into shared data
///
/// This trait defines the shared data type and parsing logic for a solver,
/// providing clean separation between parsing and solving concerns.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Day1;
///
/// impl AocParser for Day1 {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat("bad int".into())))
///             .collect()
///     }
/// }
///
/// assert_eq!(Day1::parse("1\n2").unwrap(), vec![1, 2]);
/// ```
pub trait AocParser {
    /// The shared data structure that holds parsed input and intermediate results.
    ///
    /// Use any ownership strategy:
    /// - `Vec<T>` or custom structs for owned data (simplest, supports mutation)
    /// - `&'a str` or `Vec<&'a [u8]>` for zero-copy borrowed data
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Trait for solving a specific part of an AOC puzzle.
///
/// The const generic `N` is the part number, so a missing part is a compile
/// error in the `#[derive(AocSolver)]` dispatch rather than a runtime surprise.
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle using (and possibly updating) the shared data.
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Core trait that all Advent of Code solvers implement.
///
/// Usually derived with `#[derive(AocSolver)]`, which dispatches `solve_part`
/// to the matching [`PartSolver`] implementation.
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}

/// Parse a part identifier as typed on the command line.
///
/// Accepts `1`/`2` as well as the `a`/`b` letters used by the submission form.
///
/// ```
/// assert_eq!(aoc_solver::parse_part("b"), Ok(2));
/// assert!(aoc_solver::parse_part("3").is_err());
/// ```
pub fn parse_part(value: &str) -> Result<u8, InvalidPart> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "a" => Ok(1),
        "2" | "b" => Ok(2),
        _ => Err(InvalidPart(value.to_string())),
    }
}

/// Submission-form letter for a part number (`1` → `a`, `2` → `b`).
pub fn part_letter(part: u8) -> Option<char> {
    match part {
        1 => Some('a'),
        2 => Some('b'),
        _ => None,
    }
}
