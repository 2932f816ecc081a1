use crate::utils::grid::Grid;
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("405"), Some("400")],
    real: [Some("34772"), Some("35554")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["grid"], expected = EXPECTED)]
pub struct Solver;

/// Number of mismatching cells when folding between `lines[split - 1]` and `lines[split]`
fn fold_mismatches<L: AsRef<[u8]>>(lines: &[L], split: usize) -> usize {
    lines[..split]
        .iter()
        .rev()
        .zip(&lines[split..])
        .map(|(a, b)| {
            a.as_ref()
                .iter()
                .zip(b.as_ref())
                .filter(|(x, y)| x != y)
                .count()
        })
        .sum()
}

/// First fold position (counted in lines before it) with exactly `smudges` mismatches
fn find_fold<L: AsRef<[u8]>>(lines: &[L], smudges: usize) -> Option<usize> {
    (1..lines.len()).find(|&split| fold_mismatches(lines, split) == smudges)
}

/// Rows are scored first (times 100), then columns
fn summarize(pattern: &Grid, smudges: usize) -> Result<usize, SolveError> {
    let rows: Vec<&[u8]> = pattern.rows().collect();
    if let Some(above) = find_fold(&rows, smudges) {
        return Ok(100 * above);
    }
    let cols: Vec<Vec<u8>> = (0..pattern.width())
        .map(|c| pattern.column(c).collect())
        .collect();
    find_fold(&cols, smudges).ok_or_else(|| {
        SolveError::SolveFailed(format!("no reflection with {smudges} smudges in\n{pattern:?}").into())
    })
}

fn summarize_all(patterns: &[Grid], smudges: usize) -> Result<String, SolveError> {
    let mut total = 0;
    for pattern in patterns {
        total += summarize(pattern, smudges)?;
    }
    Ok(total.to_string())
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Grid>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .replace("\r\n", "\n")
            .split("\n\n")
            .filter(|block| !block.trim().is_empty())
            .map(Grid::parse)
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize_all(shared, 0)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize_all(shared, 1)
    }
}
