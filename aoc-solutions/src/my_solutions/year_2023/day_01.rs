use aoc_solver::{AocParser, Expected, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

pub const EXPECTED: Expected = Expected {
    sample: [Some("142"), Some("281")],
    real: [Some("55017"), Some("53539")],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["strings"], expected = EXPECTED)]
pub struct Solver;

const SPELLED: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        Ok(input.lines().filter(|l| !l.trim().is_empty()).collect())
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_calibration(shared, |line, i| {
            line.as_bytes()[i].is_ascii_digit().then(|| u32::from(line.as_bytes()[i] - b'0'))
        })
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        sum_calibration(shared, digit_or_word_at)
    }
}

/// Digit starting at byte `i`, written either as a numeral or as an English word.
/// Words may overlap ("eightwo" holds both 8 and 2).
fn digit_or_word_at(line: &str, i: usize) -> Option<u32> {
    let b = line.as_bytes()[i];
    if b.is_ascii_digit() {
        return Some(u32::from(b - b'0'));
    }
    let rest = &line.as_bytes()[i..];
    SPELLED
        .iter()
        .position(|word| rest.starts_with(word.as_bytes()))
        .map(|idx| idx as u32 + 1)
}

fn sum_calibration(
    lines: &[&str],
    digit_at: impl Fn(&str, usize) -> Option<u32>,
) -> Result<String, SolveError> {
    let mut total = 0;
    for (n, line) in lines.iter().enumerate() {
        let first = (0..line.len()).find_map(|i| digit_at(line, i));
        let last = (0..line.len()).rev().find_map(|i| digit_at(line, i));
        match first.zip(last) {
            Some((first, last)) => total += first * 10 + last,
            None => {
                return Err(SolveError::SolveFailed(
                    format!("line {} has no digit", n + 1).into(),
                ));
            }
        }
    }
    Ok(total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    aoc_solver::golden_tests!(Solver, 2023, 1, EXPECTED);

    #[test]
    fn test_overlapping_words() {
        let lines = vec!["eightwo", "twone3"];
        assert_eq!(sum_calibration(&lines, digit_or_word_at).unwrap(), "105");
    }

    #[test]
    fn test_line_without_digit_fails() {
        let lines = vec!["abc"];
        assert!(sum_calibration(&lines, digit_or_word_at).is_err());
    }
}
