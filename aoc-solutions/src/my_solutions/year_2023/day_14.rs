use crate::utils::grid::Grid;
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

pub const EXPECTED: Expected = Expected {
    sample: [Some("136"), Some("64")],
    real: [Some("113456"), Some("118747")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle-detection"], expected = EXPECTED)]
pub struct Solver;

const SPIN_CYCLES: usize = 1_000_000_000;

const ROUND: u8 = b'O';
const CUBE: u8 = b'#';
const EMPTY: u8 = b'.';

#[derive(Debug, Clone, Copy)]
enum Tilt {
    North,
    West,
    South,
    East,
}

/// Roll every round rock as far as it goes in `tilt` direction
fn tilt(grid: &mut Grid, tilt: Tilt) {
    let (lanes, len) = match tilt {
        Tilt::North | Tilt::South => (grid.width(), grid.height()),
        Tilt::West | Tilt::East => (grid.height(), grid.width()),
    };
    for lane in 0..lanes {
        // position `i` along the lane, walking in the direction rocks fall
        let cell = |i: usize| match tilt {
            Tilt::North => (i, lane),
            Tilt::South => (len - 1 - i, lane),
            Tilt::West => (lane, i),
            Tilt::East => (lane, len - 1 - i),
        };
        let mut free = 0;
        for i in 0..len {
            let (row, col) = cell(i);
            match grid[(row, col)] {
                CUBE => free = i + 1,
                ROUND => {
                    grid.set(row, col, EMPTY);
                    let (r, c) = cell(free);
                    grid.set(r, c, ROUND);
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

fn spin(grid: &mut Grid) {
    for direction in [Tilt::North, Tilt::West, Tilt::South, Tilt::East] {
        tilt(grid, direction);
    }
}

/// Load on the north beams: each rock counts its distance from the south edge
fn north_load(grid: &Grid) -> usize {
    grid.rows()
        .enumerate()
        .map(|(r, row)| (grid.height() - r) * row.iter().filter(|&&c| c == ROUND).count())
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Grid;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Grid::parse(input)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        tilt(&mut grid, Tilt::North);
        Ok(north_load(&grid).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// The platform falls into a loop after a few hundred cycles; skip ahead
    /// once a layout repeats
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut grid = shared.clone();
        let mut seen = HashMap::new();
        let mut done = 0;
        while done < SPIN_CYCLES {
            if let Some(first) = seen.insert(grid.clone(), done) {
                let period = done - first;
                let remaining = (SPIN_CYCLES - done) % period;
                for _ in 0..remaining {
                    spin(&mut grid);
                }
                break;
            }
            spin(&mut grid);
            done += 1;
        }
        Ok(north_load(&grid).to_string())
    }
}
