use anyhow::{Context, bail};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use std::ops::RangeInclusive;

pub const EXPECTED: Expected = Expected {
    sample: [Some("2"), Some("47")],
    real: [Some("18098"), Some("886858737029295")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["math", "geometry"], expected = EXPECTED)]
pub struct Solver;

const SAMPLE_AREA: RangeInclusive<i128> = 7..=27;
const REAL_AREA: RangeInclusive<i128> = 200_000_000_000_000..=400_000_000_000_000;

/// Largest rock velocity component tried on each axis
const VELOCITY_SEARCH: i128 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pos: [i128; 3],
    vel: [i128; 3],
}

impl Hailstone {
    /// The same stone seen from something moving at `(vx, vy)` in the XY plane
    fn relative_to(&self, vx: i128, vy: i128) -> Hailstone {
        Hailstone {
            pos: self.pos,
            vel: [self.vel[0] - vx, self.vel[1] - vy, self.vel[2]],
        }
    }

    /// Time at which the XY path of `self` crosses the XY path of `other`,
    /// as a fraction `(numerator, denominator)` with a positive denominator
    fn crossing_time(&self, other: &Hailstone) -> Option<(i128, i128)> {
        let [vx, vy, _] = self.vel;
        let [ox, oy, _] = other.vel;
        let cross = vx * oy - vy * ox;
        if cross == 0 {
            return None;
        }
        let dx = other.pos[0] - self.pos[0];
        let dy = other.pos[1] - self.pos[1];
        let numerator = dx * oy - dy * ox;
        Some(if cross < 0 {
            (-numerator, -cross)
        } else {
            (numerator, cross)
        })
    }

    /// Time at which this stone reaches `(x, y)`, when it does so at a whole time
    fn time_at(&self, x: i128, y: i128) -> Option<i128> {
        let [px, py, _] = self.pos;
        let [vx, vy, _] = self.vel;
        match (vx, vy) {
            (0, 0) => (px == x && py == y).then_some(0),
            (0, _) => (px == x && (y - py) % vy == 0).then(|| (y - py) / vy),
            (_, _) => {
                let t = (x - px) / vx;
                ((x - px) % vx == 0 && py + vy * t == y).then_some(t)
            }
        }
    }
}

/// Whether the XY paths of `a` and `b` cross inside `area` at a non-negative time for both
pub fn paths_cross_within(a: &Hailstone, b: &Hailstone, area: &RangeInclusive<i128>) -> bool {
    let (Some((ta, da)), Some((tb, _))) = (a.crossing_time(b), b.crossing_time(a)) else {
        return false;
    };
    if ta < 0 || tb < 0 {
        return false;
    }
    // compare positions scaled by the denominator to stay exact
    let x = a.pos[0] * da + a.vel[0] * ta;
    let y = a.pos[1] * da + a.vel[1] * ta;
    let scaled = area.start() * da..=area.end() * da;
    scaled.contains(&x) && scaled.contains(&y)
}

/// Test area for part 1: the sample works on a tiny window, real inputs on a huge one
fn test_area(stones: &[Hailstone]) -> RangeInclusive<i128> {
    let small = stones
        .iter()
        .all(|s| s.pos.iter().all(|p| p.abs() <= 1_000));
    if small { SAMPLE_AREA } else { REAL_AREA }
}

/// Rock throw hitting every stone, for a fixed rock XY velocity.
///
/// Relative to the rock all stones meet at its start point, so the first two
/// stones fix that point and the rest confirm it. Returns the start position.
fn throw_with(stones: &[Hailstone], vx: i128, vy: i128) -> Option<[i128; 3]> {
    let a = stones[0].relative_to(vx, vy);
    let b = stones[1].relative_to(vx, vy);
    let (num, den) = a.crossing_time(&b)?;
    if num < 0 || num % den != 0 {
        return None;
    }
    let ta = num / den;
    let x = a.pos[0] + a.vel[0] * ta;
    let y = a.pos[1] + a.vel[1] * ta;
    let tb = b.time_at(x, y).filter(|&t| t >= 0 && t != ta)?;

    // z at the two hit times pins down the rock's z velocity and start
    let za = a.pos[2] + a.vel[2] * ta;
    let zb = b.pos[2] + b.vel[2] * tb;
    if (zb - za) % (tb - ta) != 0 {
        return None;
    }
    let vz = (zb - za) / (tb - ta);
    let z = za - vz * ta;

    stones[2..]
        .iter()
        .all(|stone| {
            let rel = stone.relative_to(vx, vy);
            rel.time_at(x, y)
                .is_some_and(|t| t >= 0 && rel.pos[2] + rel.vel[2] * t == z + vz * t)
        })
        .then_some([x, y, z])
}

fn parse_stone(line: &str) -> anyhow::Result<Hailstone> {
    let numbers = line
        .split(|c: char| c == ',' || c == '@' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|n| n.parse::<i128>().with_context(|| format!("bad number {n:?}")))
        .collect::<anyhow::Result<Vec<_>>>()?;
    match numbers.as_slice() {
        &[px, py, pz, vx, vy, vz] => Ok(Hailstone {
            pos: [px, py, pz],
            vel: [vx, vy, vz],
        }),
        other => bail!("expected 6 numbers, got {}", other.len()),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                parse_stone(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", idx + 1)))
            })
            .collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let area = test_area(shared);
        let mut crossings = 0;
        for (i, a) in shared.iter().enumerate() {
            for b in &shared[i + 1..] {
                if paths_cross_within(a, b, &area) {
                    crossings += 1;
                }
            }
        }
        Ok(crossings.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if shared.len() < 3 {
            return Err(SolveError::SolveFailed("need at least 3 hailstones".into()));
        }
        for vx in -VELOCITY_SEARCH..=VELOCITY_SEARCH {
            for vy in -VELOCITY_SEARCH..=VELOCITY_SEARCH {
                if let Some([x, y, z]) = throw_with(shared, vx, vy) {
                    log::debug!("rock thrown from ({x}, {y}, {z}) at xy velocity ({vx}, {vy})");
                    return Ok((x + y + z).to_string());
                }
            }
        }
        Err(SolveError::SolveFailed(
            "no rock velocity within the search range hits every hailstone".into(),
        ))
    }
}
