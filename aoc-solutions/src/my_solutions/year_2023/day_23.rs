use crate::utils::grid::{Grid, ORTHOGONAL};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

pub const EXPECTED: Expected = Expected {
    sample: [Some("94"), Some("154")],
    real: [Some("2166"), Some("6378")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["grid", "graph", "dfs"], expected = EXPECTED)]
pub struct Solver;

const FOREST: u8 = b'#';

/// Junction graph of the trail map. Node 0 is the start, node 1 the exit.
#[derive(Debug)]
pub struct Trails {
    /// Corridors walkable without climbing a slope
    downhill: Vec<Vec<(usize, u32)>>,
    /// Every corridor, in both directions
    any: Vec<Vec<(usize, u32)>>,
}

fn slope_allows(cell: u8, dir: (isize, isize)) -> bool {
    match cell {
        b'>' => dir == (0, 1),
        b'v' => dir == (1, 0),
        b'<' => dir == (0, -1),
        b'^' => dir == (-1, 0),
        _ => true,
    }
}

fn gap_in_row(grid: &Grid, row: usize) -> Result<(usize, usize), ParseError> {
    grid.row(row)
        .iter()
        .position(|&c| c != FOREST)
        .map(|col| (row, col))
        .ok_or_else(|| ParseError::InvalidFormat(format!("no opening in row {}", row + 1)))
}

fn build_trails(grid: &Grid) -> Result<Trails, ParseError> {
    let open = |pos: (usize, usize)| grid[pos] != FOREST;
    let start = gap_in_row(grid, 0)?;
    let exit = gap_in_row(grid, grid.height() - 1)?;

    let mut junctions = vec![start, exit];
    junctions.extend(grid.positions().filter(|&pos| {
        open(pos) && grid.neighbours(pos, &ORTHOGONAL).filter(|&n| open(n)).count() >= 3
    }));
    if junctions.len() > 64 {
        return Err(ParseError::InvalidFormat(format!(
            "{} junctions, at most 64 supported",
            junctions.len()
        )));
    }
    let index: HashMap<_, _> = junctions.iter().enumerate().map(|(i, &p)| (p, i)).collect();

    let mut trails = Trails {
        downhill: vec![Vec::new(); junctions.len()],
        any: vec![Vec::new(); junctions.len()],
    };
    for (from, &origin) in junctions.iter().enumerate() {
        for first in ORTHOGONAL {
            let Some(mut pos) = grid.step(origin, first).filter(|&p| open(p)) else {
                continue;
            };
            let mut prev = origin;
            let mut length = 1;
            let mut downhill = slope_allows(grid[pos], first);
            // follow the corridor to the next junction; dead ends yield nothing
            let reached = loop {
                if let Some(&to) = index.get(&pos) {
                    break Some(to);
                }
                let Some(dir) = ORTHOGONAL.into_iter().find(|&d| {
                    grid.step(pos, d).is_some_and(|n| n != prev && open(n))
                }) else {
                    break None;
                };
                let Some(next) = grid.step(pos, dir) else {
                    break None;
                };
                downhill &= slope_allows(grid[next], dir);
                (prev, pos) = (pos, next);
                length += 1;
            };
            if let Some(to) = reached {
                trails.any[from].push((to, length));
                if downhill {
                    trails.downhill[from].push((to, length));
                }
            }
        }
    }
    Ok(trails)
}

/// Longest simple path from `node` to node 1, if any
fn longest_hike(edges: &[Vec<(usize, u32)>], node: usize, visited: u64) -> Option<u32> {
    if node == 1 {
        return Some(0);
    }
    let visited = visited | 1 << node;
    edges[node]
        .iter()
        .filter(|&&(next, _)| visited & (1 << next) == 0)
        .filter_map(|&(next, length)| {
            longest_hike(edges, next, visited).map(|rest| rest + length)
        })
        .max()
}

fn hike(edges: &[Vec<(usize, u32)>]) -> Result<String, SolveError> {
    longest_hike(edges, 0, 0)
        .map(|steps| steps.to_string())
        .ok_or_else(|| SolveError::SolveFailed("exit is unreachable".into()))
}

impl AocParser for Solver {
    type SharedData<'a> = Trails;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        build_trails(&Grid::parse(input)?)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        hike(&shared.downhill)
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        hike(&shared.any)
    }
}
