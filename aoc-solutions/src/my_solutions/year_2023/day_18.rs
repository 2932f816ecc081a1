use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("62"), Some("952408144115")],
    real: [Some("36679"), Some("88007104020978")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry"], expected = EXPECTED)]
pub struct Solver;

/// One dig instruction: a unit direction and a length
type Step = ((i64, i64), i64);

/// Both readings of the dig plan
#[derive(Debug)]
pub struct DigPlan {
    plain: Vec<Step>,
    /// Instructions hidden in the colour codes
    decoded: Vec<Step>,
}

fn direction(code: u8) -> anyhow::Result<(i64, i64)> {
    Ok(match code {
        b'R' | b'0' => (0, 1),
        b'D' | b'1' => (1, 0),
        b'L' | b'2' => (0, -1),
        b'U' | b'3' => (-1, 0),
        other => bail!("unknown direction {:?}", other as char),
    })
}

fn parse_line(line: &str) -> anyhow::Result<(Step, Step)> {
    let mut parts = line.split_whitespace();
    let (Some(dir), Some(len), Some(color)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("expected `<dir> <len> (#rrggbb)`");
    };
    let plain = (
        direction(*dir.as_bytes().first().ok_or_else(|| anyhow!("empty direction"))?)?,
        len.parse().with_context(|| format!("bad length {len:?}"))?,
    );

    let hex = color
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|c| c.len() == 6 && c.is_ascii())
        .ok_or_else(|| anyhow!("bad colour {color:?}"))?;
    let decoded = (
        direction(hex.as_bytes()[5])?,
        i64::from_str_radix(&hex[..5], 16).with_context(|| format!("bad hex {hex:?}"))?,
    );
    Ok((plain, decoded))
}

/// Cells covered by the trench outline and its interior.
///
/// Shoelace gives the polygon area through cell centres; Pick's theorem
/// turns that into interior points, and adding the boundary gives the total.
pub fn lagoon_size(steps: &[Step]) -> i64 {
    let (mut row, mut col) = (0i64, 0i64);
    let mut twice_area = 0;
    let mut boundary = 0;
    for &((dr, dc), len) in steps {
        let (next_row, next_col) = (row + dr * len, col + dc * len);
        twice_area += col * next_row - next_col * row;
        boundary += len;
        (row, col) = (next_row, next_col);
    }
    twice_area.abs() / 2 + boundary / 2 + 1
}

impl AocParser for Solver {
    type SharedData<'a> = DigPlan;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let (plain, decoded) = input
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(idx, line)| {
                parse_line(line)
                    .map_err(|e| ParseError::InvalidFormat(format!("(line {}) {e:#}", idx + 1)))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .unzip();
        Ok(DigPlan { plain, decoded })
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_size(&shared.plain).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon_size(&shared.decoded).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    aoc_solver::golden_tests!(Solver, 2023, 18, EXPECTED);

    #[test]
    fn test_colour_decoding() {
        let (plain, decoded) = parse_line("R 6 (#70c710)").unwrap();
        assert_eq!(plain, ((0, 1), 6));
        assert_eq!(decoded, ((0, 1), 461937));
    }

    #[test]
    fn test_square_lagoon() {
        let square = [((0, 1), 2), ((1, 0), 2), ((0, -1), 2), ((-1, 0), 2)];
        assert_eq!(lagoon_size(&square), 9);
    }

    #[test]
    fn test_bad_lines() {
        assert!(parse_line("X 6 (#70c710)").is_err());
        assert!(parse_line("R 6 (#70c71)").is_err());
        assert!(parse_line("R 6").is_err());
    }
}
