//! Recorded answers and golden-value checks against them

use crate::error::{InputError, SolverError};
use crate::input::{DataSet, InputProvider, SmartFileInputProvider};
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;
use std::path::{Path, PathBuf};

/// Known answers for a day, indexed by part (`[part 1, part 2]`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expected {
    pub sample: [Option<&'static str>; 2],
    pub real: [Option<&'static str>; 2],
}

impl Expected {
    /// No answers recorded yet
    pub const EMPTY: Expected = Expected {
        sample: [None, None],
        real: [None, None],
    };

    pub fn get(&self, data_set: DataSet, part: u8) -> Option<&'static str> {
        let answers = match data_set {
            DataSet::Sample => &self.sample,
            DataSet::Real => &self.real,
        };
        answers.get(usize::from(part).checked_sub(1)?).copied().flatten()
    }

    /// Number of answers recorded across both data sets
    pub fn recorded(&self) -> usize {
        self.sample.iter().chain(&self.real).flatten().count()
    }
}

/// Outcome of comparing one part's answer with its recorded value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoldenOutcome {
    Passed,
    Failed { expected: String, actual: String },
    Skipped(String),
}

/// Check one part against its recorded answer, solving through `solve`.
///
/// Personal inputs are not committed, so a missing real input file is a skip.
/// Sample inputs are committed alongside the code, so a missing sample file is
/// an error.
pub fn verify_part<F>(
    data_dir: &Path,
    year: u16,
    day: u8,
    data_set: DataSet,
    part: u8,
    expected: &Expected,
    solve: F,
) -> Result<GoldenOutcome, SolverError>
where
    F: FnOnce(&str) -> Result<String, SolverError>,
{
    let Some(want) = expected.get(data_set, part) else {
        return Ok(GoldenOutcome::Skipped(format!(
            "no {data_set} answer recorded for part {part}"
        )));
    };

    let provider = SmartFileInputProvider::new(data_dir, year, day, data_set);
    let input = match provider.provide_input(Some(part)) {
        Ok(input) => input,
        Err(InputError::NotFound(path)) if data_set == DataSet::Real => {
            return Ok(GoldenOutcome::Skipped(format!(
                "{} does not exist",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let actual = solve(&input)?;
    if actual == want {
        Ok(GoldenOutcome::Passed)
    } else {
        Ok(GoldenOutcome::Failed {
            expected: want.to_string(),
            actual,
        })
    }
}

/// [`verify_part`] for a concrete solver type
pub fn check_part<S: Solver>(
    data_dir: &Path,
    year: u16,
    day: u8,
    data_set: DataSet,
    part: u8,
    expected: &Expected,
) -> Result<GoldenOutcome, SolverError> {
    verify_part(data_dir, year, day, data_set, part, expected, |input| {
        let mut instance = SolverInstance::<S>::new(year, day, input)?;
        Ok(instance.solve(part)?.answer)
    })
}

/// Data directory used by `golden_tests!`: `AOC_DATA_DIR`, else `data/` next to the crate
pub fn test_data_dir(manifest_dir: &str) -> PathBuf {
    std::env::var_os("AOC_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(manifest_dir).join("..").join("data"))
}

/// Set to a non-empty value other than `0` to fail skipped golden tests
pub const REQUIRE_INPUTS_ENV: &str = "AOC_REQUIRE_INPUTS";

fn inputs_required() -> bool {
    std::env::var(REQUIRE_INPUTS_ENV).is_ok_and(|v| !v.is_empty() && v != "0")
}

/// Decide what a golden test does with an outcome.
///
/// `Ok(None)` passes silently, `Ok(Some(note))` passes with a skip note to print,
/// `Err(message)` is a failure.
fn settle(
    label: &str,
    outcome: Result<GoldenOutcome, SolverError>,
    require_inputs: bool,
) -> Result<Option<String>, String> {
    match outcome {
        Ok(GoldenOutcome::Passed) => Ok(None),
        Ok(GoldenOutcome::Skipped(reason)) if require_inputs => Err(format!(
            "{label}: skipped while {REQUIRE_INPUTS_ENV} is set: {reason}"
        )),
        Ok(GoldenOutcome::Skipped(reason)) => Ok(Some(format!(
            "SKIPPED {label}: {reason} (nothing was verified; set {REQUIRE_INPUTS_ENV}=1 to fail instead)"
        ))),
        Ok(GoldenOutcome::Failed { expected, actual }) => {
            Err(format!("{label}: expected {expected}, got {actual}"))
        }
        Err(e) => Err(format!("{label}: {e}")),
    }
}

/// Test helper behind `golden_tests!`: panics unless the part passes or is skipped.
///
/// Skips print a `SKIPPED` line (visible with `--nocapture`) and become failures
/// when [`REQUIRE_INPUTS_ENV`] is set.
pub fn assert_golden<S: Solver>(
    manifest_dir: &str,
    year: u16,
    day: u8,
    data_set: DataSet,
    part: u8,
    expected: &Expected,
) {
    let data_dir = test_data_dir(manifest_dir);
    let label = format!("{year}/{day:02} {data_set} part {part}");
    let outcome = check_part::<S>(&data_dir, year, day, data_set, part, expected);
    match settle(&label, outcome, inputs_required()) {
        Ok(None) => {}
        Ok(Some(note)) => {
            log::warn!("{note}");
            eprintln!("{note}");
        }
        Err(message) => panic!("{message}"),
    }
}

/// Generate the four golden-value tests of a day module.
///
/// ```ignore
/// #[cfg(test)]
/// mod tests {
///     use super::*;
///     aoc_solver::golden_tests!(Solver, 2023, 7, EXPECTED);
/// }
/// ```
#[macro_export]
macro_rules! golden_tests {
    ($solver:ty, $year:expr, $day:expr, $expected:expr) => {
        #[test]
        fn sample_data_part_1() {
            $crate::golden::assert_golden::<$solver>(
                env!("CARGO_MANIFEST_DIR"),
                $year,
                $day,
                $crate::DataSet::Sample,
                1,
                &$expected,
            );
        }

        #[test]
        fn sample_data_part_2() {
            $crate::golden::assert_golden::<$solver>(
                env!("CARGO_MANIFEST_DIR"),
                $year,
                $day,
                $crate::DataSet::Sample,
                2,
                &$expected,
            );
        }

        #[test]
        fn real_data_part_1() {
            $crate::golden::assert_golden::<$solver>(
                env!("CARGO_MANIFEST_DIR"),
                $year,
                $day,
                $crate::DataSet::Real,
                1,
                &$expected,
            );
        }

        #[test]
        fn real_data_part_2() {
            $crate::golden::assert_golden::<$solver>(
                env!("CARGO_MANIFEST_DIR"),
                $year,
                $day,
                $crate::DataSet::Real,
                2,
                &$expected,
            );
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ParseError, SolveError};
    use crate::solver::AocParser;
    use std::fs;
    use tempfile::TempDir;

    struct LineCount;

    impl AocParser for LineCount {
        type SharedData<'a> = Vec<&'a str>;

        fn parse<'a>(input: &'a str) -> Result<Vec<&'a str>, ParseError> {
            Ok(input.lines().collect())
        }
    }

    impl Solver for LineCount {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Vec<&str>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.len().to_string()),
                2 => Ok(shared.iter().map(|l| l.len()).sum::<usize>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    const EXPECTED: Expected = Expected {
        sample: [Some("2"), Some("5")],
        real: [Some("3"), None],
    };

    fn data_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let year_dir = tmp.path().join("2023");
        fs::create_dir_all(&year_dir).unwrap();
        fs::write(year_dir.join("04_test_input.txt"), "ab\ncde\n").unwrap();
        tmp
    }

    #[test]
    fn test_expected_lookup() {
        assert_eq!(EXPECTED.get(DataSet::Sample, 2), Some("5"));
        assert_eq!(EXPECTED.get(DataSet::Real, 2), None);
        assert_eq!(EXPECTED.get(DataSet::Real, 0), None);
        assert_eq!(EXPECTED.get(DataSet::Real, 3), None);
        assert_eq!(EXPECTED.recorded(), 3);
        assert_eq!(Expected::EMPTY.recorded(), 0);
    }

    #[test]
    fn test_sample_parts_pass() {
        let tmp = data_dir();
        for part in 1..=2 {
            let outcome =
                check_part::<LineCount>(tmp.path(), 2023, 4, DataSet::Sample, part, &EXPECTED)
                    .unwrap();
            assert_eq!(outcome, GoldenOutcome::Passed);
        }
    }

    #[test]
    fn test_wrong_answer_fails() {
        let tmp = data_dir();
        let wrong = Expected {
            sample: [Some("7"), None],
            real: [None, None],
        };
        let outcome =
            check_part::<LineCount>(tmp.path(), 2023, 4, DataSet::Sample, 1, &wrong).unwrap();
        assert_eq!(
            outcome,
            GoldenOutcome::Failed {
                expected: "7".to_string(),
                actual: "2".to_string()
            }
        );
    }

    #[test]
    fn test_missing_real_input_skips() {
        let tmp = data_dir();
        let outcome =
            check_part::<LineCount>(tmp.path(), 2023, 4, DataSet::Real, 1, &EXPECTED).unwrap();
        assert!(matches!(outcome, GoldenOutcome::Skipped(_)));
    }

    #[test]
    fn test_missing_expected_skips() {
        let tmp = data_dir();
        let outcome =
            check_part::<LineCount>(tmp.path(), 2023, 4, DataSet::Real, 2, &EXPECTED).unwrap();
        assert!(matches!(outcome, GoldenOutcome::Skipped(_)));
    }

    #[test]
    fn test_skip_is_reported_not_silent() {
        let tmp = data_dir();
        let outcome = check_part::<LineCount>(tmp.path(), 2023, 4, DataSet::Real, 1, &EXPECTED);
        let note = settle("2023/04 real part 1", outcome, false)
            .unwrap()
            .expect("a skip carries a note");
        assert!(note.starts_with("SKIPPED 2023/04 real part 1: "));
        assert!(note.contains("04_input.txt does not exist"));
    }

    #[test]
    fn test_skip_fails_when_inputs_required() {
        let tmp = data_dir();
        let outcome = check_part::<LineCount>(tmp.path(), 2023, 4, DataSet::Real, 1, &EXPECTED);
        let message = settle("2023/04 real part 1", outcome, true).unwrap_err();
        assert!(message.contains(REQUIRE_INPUTS_ENV));
    }

    #[test]
    fn test_settle_pass_and_fail() {
        assert_eq!(settle("x", Ok(GoldenOutcome::Passed), true), Ok(None));
        let failed = GoldenOutcome::Failed {
            expected: "7".into(),
            actual: "2".into(),
        };
        assert_eq!(
            settle("x", Ok(failed), false),
            Err("x: expected 7, got 2".to_string())
        );
    }

    #[test]
    fn test_missing_sample_input_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = check_part::<LineCount>(tmp.path(), 2023, 4, DataSet::Sample, 1, &EXPECTED);
        assert!(matches!(
            result,
            Err(SolverError::Input(InputError::NotFound(_)))
        ));
    }
}
