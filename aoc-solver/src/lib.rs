//! Advent of Code Solver Library
//!
//! A type-safe framework for solving Advent of Code problems across multiple years and days.
//! Each problem is implemented as a solver with custom input parsing and produces
//! an answer per part.
//!
//! # Overview
//!
//! This library provides:
//! - A trait-based interface for defining solvers ([`AocParser`], [`PartSolver`], [`Solver`])
//! - A registry of solver factories, filled by hand or from `inventory` plugins
//! - Input providers that find a day's input by file-naming convention
//! - Recorded answers ([`Expected`]) and golden checks against them
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, RegistryBuilder, SolveError};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! struct Day1;
//!
//! impl AocParser for Day1 {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.into())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Day1 {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().max().copied().unwrap_or_default().to_string())
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register_solver::<Day1>(2023, 1, &[], None)
//!     .unwrap()
//!     .build();
//!
//! let mut solver = registry.create_solver(2023, 1, "1\n2\n3").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "6");
//! assert_eq!(solver.solve(2).unwrap().answer, "3");
//! ```
//!
//! # Plugin registration
//!
//! `#[derive(AutoRegisterSolver)]` submits a [`SolverPlugin`] so the solver is
//! picked up by [`RegistryBuilder::register_all_plugins`]:
//!
//! ```ignore
//! #[derive(AocSolver, AutoRegisterSolver)]
//! #[aoc_solver(max_parts = 2)]
//! #[aoc(year = 2023, day = 1, tags = ["strings"], expected = EXPECTED)]
//! pub struct Solver;
//! ```

// Lets the derive output (which names `::aoc_solver`) compile inside this crate's own tests.
extern crate self as aoc_solver;

mod error;
pub mod golden;
mod input;
mod instance;
mod registry;
mod solver;

// Re-export public API
pub use error::{InputError, InvalidPart, ParseError, RegistrationError, SolveError, SolverError};
pub use golden::{Expected, GoldenOutcome, check_part, verify_part};
pub use input::{
    DataSet, InputProvider, SingleFileInputProvider, SmartFileInputProvider, group_parts_by_input,
};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    BASE_YEAR, DAYS_PER_YEAR, FactoryInfo, MAX_YEARS, RegisterableSolver, RegistryBuilder,
    SolverFactory, SolverPlugin, SolverRegistry, boxed_factory,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt, parse_part, part_letter};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macros
pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
