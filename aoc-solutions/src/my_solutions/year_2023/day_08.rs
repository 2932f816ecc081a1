use anyhow::{anyhow, bail, ensure};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::collections::HashMap;

pub const EXPECTED: Expected = Expected {
    sample: [Some("6"), Some("6")],
    real: [Some("17263"), Some("14631604759649")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["graph", "math"], expected = EXPECTED)]
pub struct Solver;

#[derive(Debug)]
pub struct Network<'a> {
    /// `true` for right turns
    turns: Vec<bool>,
    nodes: HashMap<&'a str, (&'a str, &'a str)>,
}

impl<'a> Network<'a> {
    /// Steps from `start` until `done` holds for the current node
    fn steps_until(&self, start: &'a str, done: impl Fn(&str) -> bool) -> Result<u64, SolveError> {
        let mut node = start;
        for (steps, &right) in (0u64..).zip(self.turns.iter().cycle()) {
            if done(node) {
                return Ok(steps);
            }
            let &(left_node, right_node) = self
                .nodes
                .get(node)
                .ok_or_else(|| SolveError::SolveFailed(format!("unknown node {node}").into()))?;
            node = if right { right_node } else { left_node };
        }
        unreachable!("cycled turn sequence is never empty")
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn lcm(a: u64, b: u64) -> u64 {
    a / gcd(a, b) * b
}

fn parse_network(input: &str) -> anyhow::Result<Network<'_>> {
    let mut lines = input.lines().filter(|l| !l.trim().is_empty());
    let turns = lines
        .next()
        .ok_or_else(|| anyhow!("missing turn sequence"))?
        .trim()
        .bytes()
        .map(|b| match b {
            b'L' => Ok(false),
            b'R' => Ok(true),
            other => bail!("unknown turn {:?}", other as char),
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    ensure!(!turns.is_empty(), "empty turn sequence");

    let mut nodes = HashMap::new();
    for line in lines {
        let (name, next) = line
            .split_once('=')
            .ok_or_else(|| anyhow!("missing '=' in {line:?}"))?;
        let (left, right) = next
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split_once(',')
            .ok_or_else(|| anyhow!("missing ',' in {line:?}"))?;
        nodes.insert(name.trim(), (left.trim(), right.trim()));
    }
    Ok(Network { turns, nodes })
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        parse_network(input).map_err(|e| ParseError::InvalidFormat(format!("{e:#}")))
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        shared
            .steps_until("AAA", |node| node == "ZZZ")
            .map(|steps| steps.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Every ghost loops back onto its exit with the same period, so the
    /// answer is the lcm of the first-exit step counts
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut starts: Vec<&str> = shared
            .nodes
            .keys()
            .copied()
            .filter(|n| n.ends_with('A'))
            .collect();
        starts.sort();
        if starts.is_empty() {
            return Err(SolveError::SolveFailed("no start nodes".into()));
        }
        let mut total = 1;
        for start in starts {
            total = lcm(total, shared.steps_until(start, |node| node.ends_with('Z'))?);
        }
        Ok(total.to_string())
    }
}
