use crate::utils::grid::{Grid, SURROUNDING};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::{BTreeSet, HashMap};

pub const EXPECTED: Expected = Expected {
    sample: [Some("4361"), Some("467835")],
    real: [Some("537832"), Some("81939900")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["grid"], expected = EXPECTED)]
pub struct Solver;

/// A run of digits on one row together with the symbols touching it
#[derive(Debug)]
pub struct PartNumber {
    value: u64,
    symbols: BTreeSet<(usize, usize)>,
}

fn is_symbol(cell: u8) -> bool {
    cell != b'.' && !cell.is_ascii_digit()
}

/// Scan every row for numbers and record the symbol cells adjacent to any of their digits
fn scan_numbers(grid: &Grid) -> Vec<PartNumber> {
    let mut numbers = Vec::new();
    for row in 0..grid.height() {
        let mut current: Option<PartNumber> = None;
        // one extra column flushes a number that touches the right edge
        for col in 0..=grid.width() {
            match grid.get(row, col) {
                Some(cell) if cell.is_ascii_digit() => {
                    let number = current.get_or_insert_with(|| PartNumber {
                        value: 0,
                        symbols: BTreeSet::new(),
                    });
                    number.value = number.value * 10 + u64::from(cell - b'0');
                    number.symbols.extend(
                        grid.neighbours((row, col), &SURROUNDING)
                            .filter(|&pos| is_symbol(grid[pos])),
                    );
                }
                _ => numbers.extend(current.take()),
            }
        }
    }
    numbers
}

impl AocParser for Solver {
    type SharedData<'a> = (Grid, Vec<PartNumber>);

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let grid = Grid::parse(input)?;
        let numbers = scan_numbers(&grid);
        Ok((grid, numbers))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (_, numbers) = shared;
        Ok(numbers
            .iter()
            .filter(|n| !n.symbols.is_empty())
            .map(|n| n.value)
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (grid, numbers) = shared;
        let mut gears: HashMap<(usize, usize), Vec<u64>> = HashMap::new();
        for number in numbers.iter() {
            for &pos in number.symbols.iter().filter(|&&pos| grid[pos] == b'*') {
                gears.entry(pos).or_default().push(number.value);
            }
        }
        Ok(gears
            .values()
            .filter(|adjacent| adjacent.len() == 2)
            .map(|adjacent| adjacent[0] * adjacent[1])
            .sum::<u64>()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    aoc_solver::golden_tests!(Solver, 2023, 3, EXPECTED);

    #[test]
    fn test_number_at_right_edge() {
        let grid = Grid::parse("..*\n.12").unwrap();
        let numbers = scan_numbers(&grid);
        assert_eq!(numbers.len(), 1);
        assert_eq!(numbers[0].value, 12);
        assert_eq!(numbers[0].symbols.len(), 1);
    }
}
