use anyhow::{Context, anyhow};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashSet;

pub const EXPECTED: Expected = Expected {
    sample: [Some("13"), Some("30")],
    real: [Some("17782"), Some("8477787")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["parsing"], expected = EXPECTED)]
pub struct Solver;

fn parse_numbers(s: &str) -> anyhow::Result<HashSet<u32>> {
    s.split_whitespace()
        .map(|n| n.parse().with_context(|| format!("bad number {n:?}")))
        .collect()
}

/// Number of card numbers that also appear among the winning numbers
fn matches(line: &str) -> anyhow::Result<usize> {
    let (_, numbers) = line.split_once(':').ok_or_else(|| anyhow!("missing ':'"))?;
    let (winning, got) = numbers.split_once('|').ok_or_else(|| anyhow!("missing '|'"))?;
    Ok(parse_numbers(winning)?
        .intersection(&parse_numbers(got)?)
        .count())
}

impl AocParser for Solver {
    /// Match count per card, in card order
    type SharedData<'a> = Vec<usize>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                matches(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", idx + 1)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|&&m| m > 0)
            .map(|&m| 1u64 << (m - 1))
            .sum::<u64>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut copies = vec![1u64; shared.len()];
        for (card, &m) in shared.iter().enumerate() {
            let won = copies[card];
            // wins never reach past the last card
            let last = (card + m).min(copies.len() - 1);
            for next in card + 1..=last {
                copies[next] += won;
            }
        }
        Ok(copies.iter().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    aoc_solver::golden_tests!(Solver, 2023, 4, EXPECTED);

    #[test]
    fn test_matches() {
        assert_eq!(
            matches("Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53").unwrap(),
            4
        );
        assert_eq!(matches("Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11").unwrap(), 0);
    }

    #[test]
    fn test_copies_stop_at_last_card() {
        let mut cards = vec![3, 0];
        assert_eq!(
            <Solver as PartSolver<2>>::solve(&mut cards).unwrap(),
            "3"
        );
    }
}
