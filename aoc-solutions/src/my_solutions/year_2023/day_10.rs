use crate::utils::grid::{Grid, ORTHOGONAL};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("8"), Some("10")],
    real: [Some("6846"), Some("325")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "geometry"], expected = EXPECTED)]
pub struct Solver;

const UP: (isize, isize) = (-1, 0);
const RIGHT: (isize, isize) = (0, 1);
const DOWN: (isize, isize) = (1, 0);
const LEFT: (isize, isize) = (0, -1);

/// The two directions a pipe tile opens towards
fn openings(tile: u8) -> Option<[(isize, isize); 2]> {
    match tile {
        b'|' => Some([UP, DOWN]),
        b'-' => Some([LEFT, RIGHT]),
        b'L' => Some([UP, RIGHT]),
        b'J' => Some([UP, LEFT]),
        b'7' => Some([DOWN, LEFT]),
        b'F' => Some([DOWN, RIGHT]),
        _ => None,
    }
}

fn connects(tile: u8, towards: (isize, isize)) -> bool {
    openings(tile).is_some_and(|o| o.contains(&towards))
}

/// Cells of the main loop in walking order, starting at `S`
fn trace_loop(grid: &Grid) -> Result<Vec<(usize, usize)>, ParseError> {
    let start = grid
        .find(b'S')
        .ok_or_else(|| ParseError::MissingData("no start tile".to_string()))?;
    let mut heading = ORTHOGONAL
        .into_iter()
        .find(|&dir| {
            grid.step(start, dir)
                .is_some_and(|next| connects(grid[next], (-dir.0, -dir.1)))
        })
        .ok_or_else(|| ParseError::InvalidFormat("start tile has no connecting pipe".to_string()))?;

    let mut path = vec![start];
    let mut pos = start;
    loop {
        pos = grid.step(pos, heading).ok_or_else(|| {
            ParseError::InvalidFormat(format!("loop leaves the grid at {pos:?}"))
        })?;
        if pos == start {
            return Ok(path);
        }
        let came_from = (-heading.0, -heading.1);
        let [a, b] = openings(grid[pos])
            .filter(|o| o.contains(&came_from))
            .ok_or_else(|| ParseError::InvalidFormat(format!("loop broken at {pos:?}")))?;
        heading = if a == came_from { b } else { a };
        path.push(pos);
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<(usize, usize)>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        trace_loop(&Grid::parse(input)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((shared.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Shoelace area of the loop, then Pick's theorem for the interior points
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let twice_area: i64 = shared
            .iter()
            .zip(shared.iter().cycle().skip(1))
            .map(|(&(r1, c1), &(r2, c2))| (c1 * r2) as i64 - (c2 * r1) as i64)
            .sum();
        let boundary = shared.len() as i64;
        Ok((twice_area.abs() / 2 - boundary / 2 + 1).to_string())
    }
}
