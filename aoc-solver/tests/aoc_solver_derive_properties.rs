//! Property-based tests for the AocSolver derive macro

use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, SolveError, Solver, SolverInstance,
};
use proptest::prelude::*;

fn parse_numbers(input: &str) -> Result<Vec<i64>, ParseError> {
    input
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| {
            l.parse()
                .map_err(|_| ParseError::InvalidFormat(format!("bad int: {l}")))
        })
        .collect()
}

fn to_input(numbers: &[i64]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct SumProduct;

impl AocParser for SumProduct {
    type SharedData<'a> = Vec<i64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        parse_numbers(input)
    }
}

impl PartSolver<1> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().sum::<i64>().to_string())
    }
}

impl PartSolver<2> for SumProduct {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().product::<i64>().to_string())
    }
}

/// **Feature: part dispatch, Property 1: derived solve_part matches PartSolver<N>**
mod property_1_part_dispatch {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn solve_part_dispatches_to_correct_part_solver(
            numbers in prop::collection::vec(1i64..10, 1..6),
            part in 1u8..=2
        ) {
            let input = to_input(&numbers);
            let mut shared1 = <SumProduct as AocParser>::parse(&input).unwrap();
            let mut shared2 = <SumProduct as AocParser>::parse(&input).unwrap();

            let derived = <SumProduct as Solver>::solve_part(&mut shared1, part).unwrap();
            let direct = match part {
                1 => <SumProduct as PartSolver<1>>::solve(&mut shared2),
                2 => <SumProduct as PartSolver<2>>::solve(&mut shared2),
                _ => unreachable!(),
            }
            .unwrap();

            prop_assert_eq!(derived, direct);
        }

        #[test]
        fn unknown_part_is_not_implemented(part in prop_oneof![Just(0u8), 3u8..=255]) {
            let mut shared = <SumProduct as AocParser>::parse("1\n2\n3").unwrap();
            match <SumProduct as Solver>::solve_part(&mut shared, part) {
                Err(SolveError::PartNotImplemented(p)) => prop_assert_eq!(p, part),
                other => prop_assert!(false, "expected PartNotImplemented, got {:?}", other),
            }
        }
    }

    #[test]
    fn parts_constant_follows_attribute() {
        assert_eq!(<SumProduct as Solver>::PARTS, 2);
    }
}

/// **Feature: part dispatch, Property 2: parts share one parsed instance**
///
/// Part 2 may reuse what part 1 stored in the shared data.
mod property_2_shared_state {
    use super::*;

    struct Cached {
        numbers: Vec<i64>,
        sum: Option<i64>,
    }

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 2)]
    struct Caching;

    impl AocParser for Caching {
        type SharedData<'a> = Cached;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(Cached {
                numbers: parse_numbers(input)?,
                sum: None,
            })
        }
    }

    impl PartSolver<1> for Caching {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum = shared.numbers.iter().sum::<i64>();
            shared.sum = Some(sum);
            Ok(sum.to_string())
        }
    }

    impl PartSolver<2> for Caching {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            let sum = shared.sum.ok_or_else(|| {
                SolveError::SolveFailed("part 1 has not run on this instance".into())
            })?;
            Ok((sum * 2).to_string())
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        #[test]
        fn later_part_sees_earlier_results(numbers in prop::collection::vec(-50i64..50, 1..8)) {
            let input = to_input(&numbers);
            let sum: i64 = numbers.iter().sum();

            let mut instance = SolverInstance::<Caching>::new(2023, 1, &input).unwrap();
            prop_assert_eq!(instance.solve(1).unwrap().answer, sum.to_string());
            prop_assert_eq!(instance.shared().sum, Some(sum));
            prop_assert_eq!(instance.solve(2).unwrap().answer, (sum * 2).to_string());
        }
    }

    #[test]
    fn fresh_instance_does_not_see_cache() {
        let mut instance = SolverInstance::<Caching>::new(2023, 1, "1\n2").unwrap();
        assert!(matches!(instance.solve(2), Err(SolveError::SolveFailed(_))));
    }
}

/// **Feature: part dispatch, Property 3: borrowed shared data**
///
/// Shared data may borrow from the input text without copying it.
mod property_3_borrowed {
    use super::*;

    #[derive(AocSolver)]
    #[aoc_solver(max_parts = 1)]
    struct LongestLine;

    impl AocParser for LongestLine {
        type SharedData<'a> = Vec<&'a str>;

        fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
            Ok(input.lines().collect())
        }
    }

    impl PartSolver<1> for LongestLine {
        fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
            Ok(shared
                .iter()
                .max_by_key(|l| l.len())
                .map(|l| l.to_string())
                .unwrap_or_default())
        }
    }

    proptest! {
        #[test]
        fn answer_is_a_slice_of_the_input(lines in prop::collection::vec("[a-z]{1,8}", 1..6)) {
            let input = lines.join("\n");
            let mut instance = SolverInstance::<LongestLine>::new(2023, 2, &input).unwrap();
            let answer = instance.solve(1).unwrap().answer;
            let longest = lines.iter().map(|l| l.len()).max().unwrap();
            prop_assert_eq!(answer.len(), longest);
            prop_assert!(lines.contains(&answer));
            prop_assert!(matches!(instance.solve(2), Err(SolveError::PartOutOfRange(2))));
        }
    }
}
