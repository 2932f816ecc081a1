use crate::utils::grid::Grid;
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("374"), Some("82000210")],
    real: [Some("9627977"), Some("644248339497")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["grid", "math"], expected = EXPECTED)]
pub struct Solver;

/// Galaxy coordinates split per axis, since distances are Manhattan
#[derive(Debug)]
pub struct Universe {
    rows: Vec<u64>,
    cols: Vec<u64>,
    empty_rows: Vec<bool>,
    empty_cols: Vec<bool>,
}

/// Sum of pairwise distances along one axis after each empty line grows to `factor` lines.
///
/// With the coordinates sorted, the `i`-th one contributes `i` times
/// positively and `n - 1 - i` times negatively.
fn axis_distance(coords: &[u64], empty: &[bool], factor: u64) -> u64 {
    let mut expanded_before = Vec::with_capacity(empty.len());
    let mut extra = 0;
    for &is_empty in empty {
        expanded_before.push(extra);
        if is_empty {
            extra += factor - 1;
        }
    }
    let mut expanded: Vec<u64> = coords
        .iter()
        .map(|&c| c + expanded_before[c as usize])
        .collect();
    expanded.sort_unstable();

    let mut total = 0;
    let mut prefix = 0;
    for (i, &c) in expanded.iter().enumerate() {
        total += c * i as u64 - prefix;
        prefix += c;
    }
    total
}

impl Universe {
    fn total_distance(&self, factor: u64) -> u64 {
        axis_distance(&self.rows, &self.empty_rows, factor)
            + axis_distance(&self.cols, &self.empty_cols, factor)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Universe;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let (rows, cols) = grid
            .positions()
            .filter(|&pos| grid[pos] == b'#')
            .map(|(r, c)| (r as u64, c as u64))
            .unzip();
        Ok(Universe {
            rows,
            cols,
            empty_rows: grid.rows().map(|row| !row.contains(&b'#')).collect(),
            empty_cols: (0..grid.width())
                .map(|col| grid.column(col).all(|cell| cell != b'#'))
                .collect(),
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.total_distance(2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.total_distance(1_000_000).to_string())
    }
}
