use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("8"), Some("2286")],
    real: [Some("2720"), Some("71535")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 2, tags = ["parsing"], expected = EXPECTED)]
pub struct Solver;

/// Cubes shown in one handful
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    fn max(self, other: Cubes) -> Cubes {
        Cubes {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_in(self, bag: Cubes) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn power(self) -> u32 {
        self.red * self.green * self.blue
    }
}

#[derive(Debug)]
pub struct Game {
    id: u32,
    rounds: Vec<Cubes>,
}

impl Game {
    fn minimal_set(&self) -> Cubes {
        self.rounds.iter().fold(Cubes::default(), |acc, &r| acc.max(r))
    }
}

const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

fn parse_round(round: &str) -> anyhow::Result<Cubes> {
    let mut cubes = Cubes::default();
    for entry in round.split(',') {
        let (count, color) = entry
            .trim()
            .split_once(' ')
            .ok_or_else(|| anyhow!("expected `<count> <color>`, got {entry:?}"))?;
        let count: u32 = count.parse().with_context(|| format!("bad count {count:?}"))?;
        match color {
            "red" => cubes.red = count,
            "green" => cubes.green = count,
            "blue" => cubes.blue = count,
            other => bail!("unknown color {other:?}"),
        }
    }
    Ok(cubes)
}

fn parse_game(line: &str) -> anyhow::Result<Game> {
    let (header, rounds) = line
        .split_once(':')
        .ok_or_else(|| anyhow!("missing ':'"))?;
    let id = header
        .trim()
        .strip_prefix("Game ")
        .ok_or_else(|| anyhow!("missing 'Game' prefix"))?
        .parse()?;
    let rounds = rounds.split(';').map(parse_round).collect::<anyhow::Result<_>>()?;
    Ok(Game { id, rounds })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Game>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                parse_game(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", idx + 1)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .filter(|game| game.rounds.iter().all(|r| r.fits_in(BAG)))
            .map(|game| game.id)
            .sum::<u32>()
            .to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared
            .iter()
            .map(|game| game.minimal_set().power())
            .sum::<u32>()
            .to_string())
    }
}
