use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("114"), Some("2")],
    real: [Some("1782868781"), Some("1057")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["math"], expected = EXPECTED)]
pub struct Solver;

/// Next value of a sequence by repeated differencing.
///
/// The extrapolated value is the sum of the last element of every
/// difference row, down to the all-zero row.
pub fn extrapolate(values: &[i64]) -> i64 {
    let mut row = values.to_vec();
    let mut next = 0;
    while row.iter().any(|&v| v != 0) {
        next += row[row.len() - 1];
        row = row.windows(2).map(|w| w[1] - w[0]).collect();
    }
    next
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                line.split_whitespace()
                    .map(|n| n.parse::<i64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e}", idx + 1)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|h| extrapolate(h)).sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Extrapolating backwards is extrapolating the reversed history
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter_mut()
            .map(|h| {
                h.reverse();
                let prev = extrapolate(h);
                h.reverse();
                prev
            })
            .sum::<i64>()
            .to_string())
    }
}
