use crate::utils::grid::Grid;
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

pub const EXPECTED: Expected = Expected {
    sample: [Some("102"), Some("94")],
    real: [Some("1263"), Some("1411")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "dijkstra"], expected = EXPECTED)]
pub struct Solver;

/// Heat loss digits, one per block
#[derive(Debug)]
pub struct City {
    grid: Grid,
}

/// The axis a crucible arrived on; it must turn onto the other one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Axis {
    Vertical,
    Horizontal,
}

impl Axis {
    fn turns(self) -> [(isize, isize); 2] {
        match self {
            Axis::Vertical => [(0, 1), (0, -1)],
            Axis::Horizontal => [(1, 0), (-1, 0)],
        }
    }

    fn of(dir: (isize, isize)) -> Axis {
        if dir.0 == 0 { Axis::Horizontal } else { Axis::Vertical }
    }
}

impl City {
    fn heat(&self, pos: (usize, usize)) -> u32 {
        u32::from(self.grid[pos] - b'0')
    }

    /// Least heat loss from the top-left to the bottom-right block when each
    /// straight run is `min_run..=max_run` blocks long
    fn least_heat_loss(&self, min_run: usize, max_run: usize) -> Option<u32> {
        let start = (0, 0);
        let end = (self.grid.height() - 1, self.grid.width() - 1);
        let mut queue = BinaryHeap::new();
        let mut settled = HashSet::new();
        // either first move is allowed
        queue.push(Reverse((0, start, Axis::Vertical)));
        queue.push(Reverse((0, start, Axis::Horizontal)));

        while let Some(Reverse((loss, pos, axis))) = queue.pop() {
            if pos == end {
                return Some(loss);
            }
            if !settled.insert((pos, axis)) {
                continue;
            }
            for dir in axis.turns() {
                let mut next = pos;
                let mut run_loss = loss;
                for run in 1..=max_run {
                    let Some(step) = self.grid.step(next, dir) else {
                        break;
                    };
                    next = step;
                    run_loss += self.heat(next);
                    if run >= min_run {
                        queue.push(Reverse((run_loss, next, Axis::of(dir))));
                    }
                }
            }
        }
        None
    }
}

fn solve_with(city: &City, min_run: usize, max_run: usize) -> Result<String, SolveError> {
    city.least_heat_loss(min_run, max_run)
        .map(|loss| loss.to_string())
        .ok_or_else(|| SolveError::SolveFailed("factory is unreachable".into()))
}

impl AocParser for Solver {
    type SharedData<'a> = City;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        if let Some(pos) = grid.positions().find(|&pos| !grid[pos].is_ascii_digit()) {
            return Err(ParseError::InvalidFormat(format!(
                "block at {pos:?} is not a digit"
            )));
        }
        Ok(City { grid })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, 1, 3)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(shared, 4, 10)
    }
}
