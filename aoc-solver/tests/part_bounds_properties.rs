//! Property-based tests for solver part bounds validation
//!
//! **Feature: solver-part-bounds**

use aoc_solver::{AocParser, ParseError, SolveError, Solver, SolverExt, parse_part};
use proptest::prelude::*;

/// Test solver with configurable PARTS
struct TestSolver<const N: u8>;

impl<const N: u8> AocParser for TestSolver<N> {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl<const N: u8> Solver for TestSolver<N> {
    const PARTS: u8 = N;

    fn solve_part(_shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
        Ok(format!("part{part}"))
    }
}

fn checked(max_parts: u8, part: u8) -> Result<String, SolveError> {
    match max_parts {
        1 => TestSolver::<1>::solve_part_checked_range(&mut (), part),
        2 => TestSolver::<2>::solve_part_checked_range(&mut (), part),
        _ => TestSolver::<3>::solve_part_checked_range(&mut (), part),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// **Feature: solver-part-bounds, Property 1: Out-of-range rejection**
    /// Part 0 and parts above PARTS return `PartOutOfRange(part)`.
    #[test]
    fn prop_out_of_range_rejection(max_parts in 1u8..=3, part in 0u8..=255) {
        let result = checked(max_parts, part);

        if part == 0 || part > max_parts {
            match result {
                Err(SolveError::PartOutOfRange(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "Expected PartOutOfRange, got {:?}", other),
            }
        } else {
            prop_assert_eq!(result.unwrap(), format!("part{part}"));
        }
    }

    /// **Feature: solver-part-bounds, Property 2: Part identifiers**
    /// Only `1`, `2`, `a`, `b` (any case, surrounding whitespace ignored) parse.
    #[test]
    fn prop_part_identifiers(value in "\\PC{0,3}") {
        let expected = match value.trim().to_ascii_lowercase().as_str() {
            "1" | "a" => Some(1),
            "2" | "b" => Some(2),
            _ => None,
        };
        prop_assert_eq!(parse_part(&value).ok(), expected);
    }
}

#[test]
fn test_valid_parts_delegate() {
    assert_eq!(checked(2, 1).unwrap(), "part1");
    assert_eq!(checked(2, 2).unwrap(), "part2");
    assert!(matches!(checked(2, 3), Err(SolveError::PartOutOfRange(3))));
}
