use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("35"), Some("46")],
    real: [Some("600279879"), Some("20191102")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 5, tags = ["ranges"], expected = EXPECTED)]
pub struct Solver;

/// Inclusive range of ids `begin..=end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    begin: i64,
    end: i64,
}

impl Range {
    pub fn new(begin: i64, end: i64) -> Self {
        Self { begin, end }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.begin <= value && value <= self.end
    }

    pub fn overlaps(&self, other: &Range) -> bool {
        self.begin <= other.end && other.begin <= self.end
    }

    pub fn intersection(&self, other: &Range) -> Option<Range> {
        self.overlaps(other)
            .then(|| Range::new(self.begin.max(other.begin), self.end.min(other.end)))
    }

    /// Parts of `self` not covered by `other`: zero, one or two ranges
    pub fn diff(&self, other: &Range) -> Vec<Range> {
        let Some(common) = self.intersection(other) else {
            return vec![*self];
        };
        let mut rest = Vec::with_capacity(2);
        if self.begin < common.begin {
            rest.push(Range::new(self.begin, common.begin - 1));
        }
        if common.end < self.end {
            rest.push(Range::new(common.end + 1, self.end));
        }
        rest
    }

    fn shift(self, by: i64) -> Range {
        Range::new(self.begin + by, self.end + by)
    }
}

/// One line of a map block: ids in `source` move by `offset`
#[derive(Debug, Clone, Copy)]
pub struct Mapping {
    source: Range,
    offset: i64,
}

#[derive(Debug)]
pub struct Almanac {
    seeds: Vec<i64>,
    /// Map blocks in the order they are applied
    stages: Vec<Vec<Mapping>>,
}

impl Almanac {
    fn map_value(&self, seed: i64) -> i64 {
        self.stages.iter().fold(seed, |value, stage| {
            stage
                .iter()
                .find(|m| m.source.contains(value))
                .map_or(value, |m| value + m.offset)
        })
    }

    fn map_ranges(&self, seeds: Vec<Range>) -> Vec<Range> {
        self.stages.iter().fold(seeds, |mut pending, stage| {
            let mut mapped = Vec::new();
            for mapping in stage {
                let mut unmatched = Vec::new();
                for range in pending.drain(..) {
                    match range.intersection(&mapping.source) {
                        Some(common) => {
                            mapped.push(common.shift(mapping.offset));
                            unmatched.extend(range.diff(&mapping.source));
                        }
                        None => unmatched.push(range),
                    }
                }
                pending = unmatched;
            }
            // ids no mapping claims keep their value
            mapped.extend(pending);
            mapped
        })
    }
}

fn parse_numbers(s: &str) -> anyhow::Result<Vec<i64>> {
    s.split_whitespace()
        .map(|n| n.parse().with_context(|| format!("bad number {n:?}")))
        .collect()
}

fn parse_almanac(input: &str) -> anyhow::Result<Almanac> {
    let normalized = input.replace("\r\n", "\n");
    let mut blocks = normalized.trim().split("\n\n");
    let seeds = blocks
        .next()
        .and_then(|b| b.strip_prefix("seeds:"))
        .ok_or_else(|| anyhow!("missing 'seeds:' line"))?;
    let seeds = parse_numbers(seeds)?;

    let stages = blocks
        .map(|block| {
            block
                .lines()
                .skip(1)
                .map(|line| match parse_numbers(line)?.as_slice() {
                    &[dest, src, len] => Ok(Mapping {
                        source: Range::new(src, src + len - 1),
                        offset: dest - src,
                    }),
                    _ => bail!("expected 3 numbers in {line:?}"),
                })
                .collect::<anyhow::Result<Vec<_>>>()
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Almanac { seeds, stages })
}

impl AocParser for Solver {
    type SharedData<'a> = Almanac;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_almanac(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .seeds
            .iter()
            .map(|&seed| shared.map_value(seed))
            .min()
            .map(|v| v.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no seeds".into()))
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.seeds.len() % 2 != 0 {
            return Err(SolveError::SolveFailed(
                "seed ranges must come in (start, length) pairs".into(),
            ));
        }
        let seeds = shared
            .seeds
            .chunks_exact(2)
            .map(|pair| Range::new(pair[0], pair[0] + pair[1] - 1))
            .collect();
        shared
            .map_ranges(seeds)
            .iter()
            .map(|r| r.begin)
            .min()
            .map(|v| v.to_string())
            .ok_or_else(|| SolveError::SolveFailed("no seeds".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    aoc_solver::golden_tests!(Solver, 2023, 5, EXPECTED);

    #[test]
    fn test_overlaps() {
        assert!(Range::new(0, 3).overlaps(&Range::new(3, 5)));
        assert!(Range::new(2, 4).overlaps(&Range::new(0, 10)));
        assert!(!Range::new(0, 2).overlaps(&Range::new(3, 5)));
    }

    #[test]
    fn test_diff() {
        assert_eq!(Range::new(0, 3).diff(&Range::new(2, 3)), vec![Range::new(0, 1)]);
        assert_eq!(Range::new(0, 3).diff(&Range::new(2, 4)), vec![Range::new(0, 1)]);
        assert_eq!(
            Range::new(0, 3).diff(&Range::new(1, 2)),
            vec![Range::new(0, 0), Range::new(3, 3)]
        );
        assert_eq!(
            Range::new(0, 4).diff(&Range::new(2, 2)),
            vec![Range::new(0, 1), Range::new(3, 4)]
        );
        assert_eq!(Range::new(1, 2).diff(&Range::new(0, 5)), vec![]);
        assert_eq!(Range::new(0, 1).diff(&Range::new(5, 6)), vec![Range::new(0, 1)]);
    }

    #[test]
    fn test_odd_seed_count_fails_part_2() {
        let mut almanac = parse_almanac("seeds: 1 2 3\n\nmap:\n0 0 1").unwrap();
        assert!(<Solver as PartSolver<2>>::solve(&mut almanac).is_err());
    }
}
