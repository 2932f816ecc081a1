//! Plugins submitted by `#[derive(AutoRegisterSolver)]` reach the registry

use aoc_solver::{
    AocParser, AocSolver, AutoRegisterSolver, DataSet, Expected, ParseError, PartSolver,
    RegistryBuilder, SolveError,
};

pub const WORDS_EXPECTED: Expected = Expected {
    sample: [Some("3"), Some("11")],
    real: [None, None],
};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2016, day = 4, tags = ["macro-test", "strings"], expected = WORDS_EXPECTED)]
pub struct Words;

impl AocParser for Words {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(input.split_whitespace().collect())
    }
}

impl PartSolver<1> for Words {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Words {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|w| w.len()).sum::<usize>().to_string())
    }
}

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2016, day = 5, tags = ["macro-test"])]
pub struct OnlyOne;

impl AocParser for OnlyOne {
    type SharedData<'a> = ();

    fn parse(_input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(())
    }
}

impl PartSolver<1> for OnlyOne {
    fn solve(_shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok("one".to_string())
    }
}

fn registry() -> aoc_solver::SolverRegistry {
    RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"macro-test"))
        .unwrap()
        .build()
}

#[test]
fn test_plugins_are_registered_with_metadata() {
    let registry = registry();
    assert_eq!(registry.len(), 2);

    let words = registry.get_info(2016, 4).unwrap();
    assert_eq!(words.parts, 2);
    assert_eq!(words.tags, &["macro-test", "strings"]);
    assert_eq!(
        words.expected.and_then(|e| e.get(DataSet::Sample, 2)),
        Some("11")
    );

    let only_one = registry.get_info(2016, 5).unwrap();
    assert_eq!(only_one.parts, 1);
    assert!(only_one.expected.is_none());
}

#[test]
fn test_registered_solver_runs() {
    let registry = registry();
    let mut solver = registry.create_solver(2016, 4, "abc de fghijk").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert_eq!(solver.solve(2).unwrap().answer, "11");

    let mut solver = registry.create_solver(2016, 5, "").unwrap();
    assert_eq!(solver.solve(1).unwrap().answer, "one");
    assert!(matches!(solver.solve(2), Err(SolveError::PartOutOfRange(2))));
}

#[test]
fn test_filter_excludes_plugins() {
    let registry = RegistryBuilder::new()
        .register_solver_plugins(|plugin| plugin.tags.contains(&"strings"))
        .unwrap()
        .build();
    assert!(registry.contains(2016, 4));
    assert!(!registry.contains(2016, 5));
}
