use anyhow::{Context, anyhow, ensure};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("288"), Some("71503")],
    real: [None, None],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["math"], expected = EXPECTED)]
pub struct Solver;

/// Time and distance rows, kept as their whitespace-separated tokens
#[derive(Debug)]
pub struct Races<'a> {
    times: Vec<&'a str>,
    records: Vec<&'a str>,
}

fn row<'a>(line: Option<&'a str>, label: &str) -> anyhow::Result<Vec<&'a str>> {
    let line = line.ok_or_else(|| anyhow!("missing {label} row"))?;
    let (_, values) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':' in {label} row"))?;
    Ok(values.split_whitespace().collect())
}

fn parse_races(input: &str) -> anyhow::Result<Races<'_>> {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());
    let times = row(lines.next(), "time")?;
    let records = row(lines.next(), "distance")?;
    ensure!(
        times.len() == records.len(),
        "{} times but {} distances",
        times.len(),
        records.len()
    );
    Ok(Races { times, records })
}

/// Number of hold times in `0..=time` whose distance beats `record`.
///
/// Distance `t * (time - t)` peaks at `time / 2`, so binary search for the
/// first winning hold and mirror it.
pub fn ways_to_win(time: u64, record: u64) -> u64 {
    let beats = |t: u64| u128::from(t) * u128::from(time - t) > u128::from(record);
    let half = time / 2;
    if !beats(half) {
        return 0;
    }
    let (mut lo, mut hi) = (0, half);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if beats(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    time - 2 * lo + 1
}

fn number(token: &str) -> Result<u64, SolveError> {
    token
        .parse()
        .with_context(|| format!("bad number {token:?}"))
        .map_err(|e| SolveError::SolveFailed(e.into()))
}

impl AocParser for Solver {
    type SharedData<'a> = Races<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_races(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut product = 1;
        for (time, record) in shared.times.iter().zip(&shared.records) {
            product *= ways_to_win(number(time)?, number(record)?);
        }
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        // the spaces between numbers are bad kerning
        let time = number(&shared.times.concat())?;
        let record = number(&shared.records.concat())?;
        Ok(ways_to_win(time, record).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    aoc_solver::golden_tests!(Solver, 2023, 6, EXPECTED);

    #[test]
    fn test_ways_to_win() {
        assert_eq!(ways_to_win(7, 9), 4);
        assert_eq!(ways_to_win(15, 40), 8);
        assert_eq!(ways_to_win(30, 200), 9);
        assert_eq!(ways_to_win(4, 4), 0);
    }

    proptest! {
        #[test]
        fn prop_matches_brute_force(time in 0u64..200, record in 0u64..10_000) {
            let brute = (0..=time).filter(|t| t * (time - t) > record).count() as u64;
            prop_assert_eq!(ways_to_win(time, record), brute);
        }
    }
}
