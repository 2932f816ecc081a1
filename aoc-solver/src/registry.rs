//! Solver registry for managing and creating solver instances

use crate::error::{ParseError, RegistrationError, SolverError};
use crate::golden::Expected;
use crate::instance::{DynSolver, SolverInstance};
use crate::solver::Solver;

// ============================================================================
// Storage Constants and Index Calculation
// ============================================================================

/// Base year for AoC (first year of Advent of Code)
pub const BASE_YEAR: u16 = 2015;
/// Maximum number of years supported (2015-2034)
pub const MAX_YEARS: usize = 20;
/// Days per year in AoC (1-25)
pub const DAYS_PER_YEAR: usize = 25;
/// Total capacity of the flat storage
pub const CAPACITY: usize = MAX_YEARS * DAYS_PER_YEAR;

/// Calculate flat index from year/day, returning None if out of bounds
#[inline]
fn calc_index(year: u16, day: u8) -> Option<usize> {
    if year < BASE_YEAR || year >= BASE_YEAR + MAX_YEARS as u16 {
        return None;
    }
    if day == 0 || day > DAYS_PER_YEAR as u8 {
        return None;
    }
    let y = (year - BASE_YEAR) as usize;
    let d = (day - 1) as usize;
    Some(y * DAYS_PER_YEAR + d)
}

/// Reconstruct year/day from flat index
#[inline]
fn from_index(index: usize) -> (u16, u8) {
    let year = BASE_YEAR + (index / DAYS_PER_YEAR) as u16;
    let day = (index % DAYS_PER_YEAR) as u8 + 1;
    (year, day)
}

// ============================================================================
// Factory Types
// ============================================================================

/// Thread-safe factory function type for creating solver instances
pub type SolverFactory =
    Box<dyn for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync>;

/// Box a factory closure.
///
/// Passing the closure through this bound lets the compiler infer its
/// higher-ranked signature, which `Box::new` alone cannot do.
pub fn boxed_factory<F>(factory: F) -> SolverFactory
where
    F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError> + Send + Sync + 'static,
{
    Box::new(factory)
}

/// Metadata about a registered solver factory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactoryInfo {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// Number of parts this solver supports
    pub parts: u8,
    /// Tags attached at registration
    pub tags: &'static [&'static str],
    /// Recorded answers, if the day has any
    pub expected: Option<&'static Expected>,
}

struct SolverFactoryEntry {
    factory: SolverFactory,
    parts: u8,
    tags: &'static [&'static str],
    expected: Option<&'static Expected>,
}

/// Builder for constructing a [`SolverRegistry`] with flat Vec storage
///
/// Registration rejects duplicates and year/day pairs outside 2015..=2034 / 1..=25.
pub struct RegistryBuilder {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder with pre-allocated storage
    pub fn new() -> Self {
        Self {
            entries: (0..CAPACITY).map(|_| None).collect(),
        }
    }

    /// Register a solver factory with explicit parts count
    ///
    /// # Returns
    /// * `Ok(Self)` - Builder with the solver registered, ready for chaining
    /// * `Err(RegistrationError)` - Duplicate or out-of-range year/day
    pub fn register<F>(
        self,
        year: u16,
        day: u8,
        parts: u8,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: for<'a> Fn(&'a str) -> Result<Box<dyn DynSolver + 'a>, ParseError>
            + Send
            + Sync
            + 'static,
    {
        self.insert(year, day, parts, &[], None, Box::new(factory))
    }

    /// Register a concrete [`Solver`] type, building its factory from the type
    pub fn register_solver<S>(
        self,
        year: u16,
        day: u8,
        tags: &'static [&'static str],
        expected: Option<&'static Expected>,
    ) -> Result<Self, RegistrationError>
    where
        S: Solver + Sync + 'static,
    {
        self.insert(year, day, S::PARTS, tags, expected, factory_for::<S>(year, day))
    }

    fn insert(
        mut self,
        year: u16,
        day: u8,
        parts: u8,
        tags: &'static [&'static str],
        expected: Option<&'static Expected>,
        factory: SolverFactory,
    ) -> Result<Self, RegistrationError> {
        let index = calc_index(year, day).ok_or(RegistrationError::InvalidYearDay(year, day))?;

        if self.entries[index].is_some() {
            return Err(RegistrationError::DuplicateSolver(year, day));
        }

        self.entries[index] = Some(SolverFactoryEntry {
            factory,
            parts,
            tags,
            expected,
        });
        Ok(self)
    }

    /// Register all collected solver plugins
    ///
    /// ```no_run
    /// # use aoc_solver::RegistryBuilder;
    /// let registry = RegistryBuilder::new()
    ///     .register_all_plugins()
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_solver_plugins(|_| true)
    }

    /// Register solver plugins that match the given filter predicate
    ///
    /// ```no_run
    /// # use aoc_solver::RegistryBuilder;
    /// // Register only solvers tagged as "grid"
    /// let registry = RegistryBuilder::new()
    ///     .register_solver_plugins(|plugin| plugin.tags.contains(&"grid"))
    ///     .unwrap()
    ///     .build();
    /// ```
    pub fn register_solver_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolverPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolverPlugin>() {
            if filter(plugin) {
                self = self.register_plugin(plugin)?;
            }
        }
        Ok(self)
    }

    fn register_plugin(self, plugin: &SolverPlugin) -> Result<Self, RegistrationError> {
        log::trace!("registering plugin {}/{:02}", plugin.year, plugin.day);
        self.insert(
            plugin.year,
            plugin.day,
            plugin.solver.parts(),
            plugin.tags,
            plugin.expected,
            plugin.solver.factory(plugin.year, plugin.day),
        )
    }

    /// Build the immutable registry
    pub fn build(self) -> SolverRegistry {
        SolverRegistry {
            entries: self.entries,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry for looking up and creating solvers
pub struct SolverRegistry {
    entries: Vec<Option<SolverFactoryEntry>>,
}

impl SolverRegistry {
    /// Create a solver instance by invoking the factory for a specific year/day
    ///
    /// # Returns
    /// * `Ok(Box<dyn DynSolver>)` - Successfully created solver
    /// * `Err(SolverError)` - Invalid year/day, solver not found, or parsing failed
    pub fn create_solver<'a>(
        &self,
        year: u16,
        day: u8,
        input: &'a str,
    ) -> Result<Box<dyn DynSolver + 'a>, SolverError> {
        let index = calc_index(year, day).ok_or(SolverError::InvalidYearDay(year, day))?;

        let entry = self
            .entries
            .get(index)
            .and_then(|e| e.as_ref())
            .ok_or(SolverError::NotFound(year, day))?;

        (entry.factory)(input).map_err(SolverError::ParseError)
    }

    /// Iterate over metadata for all registered factories, ordered by (year, day)
    pub fn iter_info(&self) -> impl Iterator<Item = FactoryInfo> + '_ {
        self.entries.iter().enumerate().filter_map(|(i, entry)| {
            entry.as_ref().map(|e| {
                let (year, day) = from_index(i);
                e.info(year, day)
            })
        })
    }

    /// Get metadata for a specific factory
    pub fn get_info(&self, year: u16, day: u8) -> Option<FactoryInfo> {
        calc_index(year, day)
            .and_then(|i| self.entries.get(i)?.as_ref())
            .map(|e| e.info(year, day))
    }

    /// Check if a factory exists for year/day
    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.get_info(year, day).is_some()
    }

    /// Most recent registered year that has a solver for `day`
    pub fn latest_year_for(&self, day: u8) -> Option<u16> {
        self.iter_info()
            .filter(|info| info.day == day)
            .map(|info| info.year)
            .max()
    }

    /// Get the number of registered factories
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}

impl SolverFactoryEntry {
    fn info(&self, year: u16, day: u8) -> FactoryInfo {
        FactoryInfo {
            year,
            day,
            parts: self.parts,
            tags: self.tags,
            expected: self.expected,
        }
    }
}

fn factory_for<S>(year: u16, day: u8) -> SolverFactory
where
    S: Solver + Sync + 'static,
{
    boxed_factory(move |input| Ok(Box::new(SolverInstance::<S>::new(year, day, input)?)))
}

/// Trait for solvers that can register themselves with a registry builder
///
/// Unlike [`Solver`], this trait has no associated types, so different solver
/// types can sit behind `&'static dyn RegisterableSolver` in a [`SolverPlugin`].
/// Every `Solver + Sync + 'static` type gets it through a blanket impl.
pub trait RegisterableSolver: Sync {
    /// Number of parts the solver implements
    fn parts(&self) -> u8;

    /// Build a factory creating instances tagged with `year` and `day`
    fn factory(&self, year: u16, day: u8) -> SolverFactory;
}

impl<S> RegisterableSolver for S
where
    S: Solver + Sync + 'static,
{
    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn factory(&self, year: u16, day: u8) -> SolverFactory {
        factory_for::<S>(year, day)
    }
}

/// Plugin information for automatic solver registration
///
/// Normally submitted by `#[derive(AutoRegisterSolver)]`; can also be
/// submitted by hand with `inventory::submit!`.
pub struct SolverPlugin {
    /// The Advent of Code year
    pub year: u16,
    /// The day number (1-25)
    pub day: u8,
    /// The solver instance (type-erased)
    pub solver: &'static dyn RegisterableSolver,
    /// Optional tags for filtering (e.g., "grid", "graph", "parsing")
    pub tags: &'static [&'static str],
    /// Recorded answers for golden checks
    pub expected: Option<&'static Expected>,
}

inventory::collect!(SolverPlugin);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use crate::solver::AocParser;

    struct Sum;

    impl AocParser for Sum {
        type SharedData<'a> = Vec<i64>;

        fn parse(input: &str) -> Result<Vec<i64>, ParseError> {
            input
                .split_whitespace()
                .map(|t| {
                    t.parse()
                        .map_err(|_| ParseError::InvalidFormat(format!("not a number: {t}")))
                })
                .collect()
        }
    }

    impl Solver for Sum {
        const PARTS: u8 = 2;

        fn solve_part(shared: &mut Vec<i64>, part: u8) -> Result<String, SolveError> {
            match part {
                1 => Ok(shared.iter().sum::<i64>().to_string()),
                2 => Ok(shared.iter().product::<i64>().to_string()),
                _ => Err(SolveError::PartNotImplemented(part)),
            }
        }
    }

    static SUM_EXPECTED: Expected = Expected {
        sample: [Some("6"), Some("6")],
        real: [None, None],
    };

    #[test]
    fn test_index_round_trip_covers_capacity() {
        for index in 0..CAPACITY {
            let (year, day) = from_index(index);
            assert_eq!(calc_index(year, day), Some(index));
        }
        assert_eq!(calc_index(2014, 1), None);
        assert_eq!(calc_index(2035, 1), None);
        assert_eq!(calc_index(2023, 0), None);
        assert_eq!(calc_index(2023, 26), None);
    }

    #[test]
    fn test_register_and_create() {
        let registry = RegistryBuilder::new()
            .register_solver::<Sum>(2023, 1, &["math"], Some(&SUM_EXPECTED))
            .unwrap()
            .build();

        let mut solver = registry.create_solver(2023, 1, "1 2 3").unwrap();
        assert_eq!(solver.year(), 2023);
        assert_eq!(solver.day(), 1);
        assert_eq!(solver.parts(), 2);
        assert_eq!(solver.solve(1).unwrap().answer, "6");
        assert_eq!(solver.solve(2).unwrap().answer, "6");
        assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
    }

    #[test]
    fn test_register_closure_factory() {
        let registry = RegistryBuilder::new()
            .register(2022, 5, 2, |input| {
                Ok(Box::new(SolverInstance::<Sum>::new(2022, 5, input)?))
            })
            .unwrap()
            .build();

        assert!(registry.contains(2022, 5));
        let info = registry.get_info(2022, 5).unwrap();
        assert_eq!(info.parts, 2);
        assert!(info.tags.is_empty());
        assert!(info.expected.is_none());
    }

    #[test]
    fn test_duplicate_and_out_of_range_registration() {
        let builder = RegistryBuilder::new()
            .register_solver::<Sum>(2023, 1, &[], None)
            .unwrap();
        assert!(matches!(
            builder.register_solver::<Sum>(2023, 1, &[], None),
            Err(RegistrationError::DuplicateSolver(2023, 1))
        ));

        assert!(matches!(
            RegistryBuilder::new().register_solver::<Sum>(2023, 26, &[], None),
            Err(RegistrationError::InvalidYearDay(2023, 26))
        ));
    }

    #[test]
    fn test_lookup_errors() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.create_solver(2023, 2, ""),
            Err(SolverError::NotFound(2023, 2))
        ));
        assert!(matches!(
            registry.create_solver(1999, 2, ""),
            Err(SolverError::InvalidYearDay(1999, 2))
        ));
    }

    #[test]
    fn test_parse_error_propagates() {
        let registry = RegistryBuilder::new()
            .register_solver::<Sum>(2023, 1, &[], None)
            .unwrap()
            .build();
        assert!(matches!(
            registry.create_solver(2023, 1, "1 x"),
            Err(SolverError::ParseError(ParseError::InvalidFormat(_)))
        ));
    }

    #[test]
    fn test_iter_info_is_ordered_and_latest_year() {
        let registry = RegistryBuilder::new()
            .register_solver::<Sum>(2023, 3, &[], None)
            .unwrap()
            .register_solver::<Sum>(2021, 3, &[], None)
            .unwrap()
            .register_solver::<Sum>(2021, 1, &[], None)
            .unwrap()
            .build();

        let keys: Vec<_> = registry.iter_info().map(|i| (i.year, i.day)).collect();
        assert_eq!(keys, vec![(2021, 1), (2021, 3), (2023, 3)]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.latest_year_for(3), Some(2023));
        assert_eq!(registry.latest_year_for(1), Some(2021));
        assert_eq!(registry.latest_year_for(2), None);
    }
}
