//! Input providers: resolve a day/part to the file holding its puzzle input

use crate::error::InputError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Which input a solver is fed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DataSet {
    /// The example from the puzzle description, committed with the code
    Sample,
    /// The personal puzzle input
    Real,
}

impl DataSet {
    fn file_stem(self) -> &'static str {
        match self {
            DataSet::Sample => "test_input",
            DataSet::Real => "input",
        }
    }

    /// Array index used by [`Expected`](crate::Expected)
    pub(crate) fn index(self) -> usize {
        match self {
            DataSet::Sample => 0,
            DataSet::Real => 1,
        }
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSet::Sample => write!(f, "sample"),
            DataSet::Real => write!(f, "real"),
        }
    }
}

/// Resolves puzzle input for a part
pub trait InputProvider {
    /// Path of the file holding the input for `part` (or for the whole day when `None`)
    fn locate(&self, part: Option<u8>) -> Result<PathBuf, InputError>;

    /// Read the input for `part`
    fn provide_input(&self, part: Option<u8>) -> Result<String, InputError> {
        let path = self.locate(part)?;
        read_input(&path)
    }
}

fn read_input(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Looks up input by the naming convention of the data directory:
///
/// ```text
/// {data_dir}/{year}/{day:02}_input.txt              real input
/// {data_dir}/{year}/{day:02}_input_part_{p}.txt     real input for one part only
/// {data_dir}/{year}/{day:02}_test_input.txt         sample input
/// {data_dir}/{year}/{day:02}_test_input_part_{p}.txt
/// ```
///
/// A part-specific file wins when present; otherwise the shared file is used.
#[derive(Debug, Clone)]
pub struct SmartFileInputProvider {
    data_dir: PathBuf,
    year: u16,
    day: u8,
    data_set: DataSet,
}

impl SmartFileInputProvider {
    pub fn new(data_dir: impl Into<PathBuf>, year: u16, day: u8, data_set: DataSet) -> Self {
        Self {
            data_dir: data_dir.into(),
            year,
            day,
            data_set,
        }
    }

    pub fn data_set(&self) -> DataSet {
        self.data_set
    }

    fn base_name(&self) -> String {
        format!("{:02}_{}", self.day, self.data_set.file_stem())
    }

    fn year_dir(&self) -> PathBuf {
        self.data_dir.join(self.year.to_string())
    }

    /// Path of the shared (not part-specific) input file, whether or not it exists
    pub fn default_path(&self) -> PathBuf {
        self.year_dir().join(format!("{}.txt", self.base_name()))
    }

    /// Path of the part-specific input file, whether or not it exists
    pub fn part_path(&self, part: u8) -> PathBuf {
        self.year_dir()
            .join(format!("{}_part_{}.txt", self.base_name(), part))
    }
}

impl InputProvider for SmartFileInputProvider {
    fn locate(&self, part: Option<u8>) -> Result<PathBuf, InputError> {
        let default = self.default_path();

        if let Some(part) = part {
            let specific = self.part_path(part);
            if specific.is_file() {
                log::debug!("Using part-specific input {}", specific.display());
                return Ok(specific);
            }
            log::info!(
                "{} not found, falling back to {}",
                specific.display(),
                default.display()
            );
        }

        if default.is_file() {
            Ok(default)
        } else {
            Err(InputError::NotFound(default))
        }
    }
}

/// Always serves the same file, regardless of part
#[derive(Debug, Clone)]
pub struct SingleFileInputProvider {
    path: PathBuf,
}

impl SingleFileInputProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl InputProvider for SingleFileInputProvider {
    fn locate(&self, _part: Option<u8>) -> Result<PathBuf, InputError> {
        if self.path.is_file() {
            Ok(self.path.clone())
        } else {
            Err(InputError::NotFound(self.path.clone()))
        }
    }
}

/// Group parts by the file their input comes from.
///
/// Parts sharing a file are solved on a single parsed instance. Groups keep
/// the order in which their first part appears in `parts`.
pub fn group_parts_by_input<P>(
    provider: &P,
    parts: &[u8],
) -> Result<Vec<(PathBuf, Vec<u8>)>, InputError>
where
    P: InputProvider + ?Sized,
{
    let mut groups: Vec<(PathBuf, Vec<u8>)> = Vec::new();
    for &part in parts {
        let path = provider.locate(Some(part))?;
        match groups.iter_mut().find(|(p, _)| *p == path) {
            Some((_, members)) => members.push(part),
            None => groups.push((path, vec![part])),
        }
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, contents: &str) {
        let year_dir = dir.join("2023");
        fs::create_dir_all(&year_dir).unwrap();
        fs::write(year_dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_locate_shared_file() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "07_input.txt", "real");

        let provider = SmartFileInputProvider::new(tmp.path(), 2023, 7, DataSet::Real);
        let expected = tmp.path().join("2023").join("07_input.txt");
        assert_eq!(provider.locate(None).unwrap(), expected);
        assert_eq!(provider.locate(Some(2)).unwrap(), expected);
        assert_eq!(provider.provide_input(Some(1)).unwrap(), "real");
    }

    #[test]
    fn test_part_specific_file_wins() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "01_test_input.txt", "shared");
        write(tmp.path(), "01_test_input_part_2.txt", "second");

        let provider = SmartFileInputProvider::new(tmp.path(), 2023, 1, DataSet::Sample);
        assert_eq!(provider.provide_input(Some(1)).unwrap(), "shared");
        assert_eq!(provider.provide_input(Some(2)).unwrap(), "second");
    }

    #[test]
    fn test_part_specific_without_shared() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "08_test_input_part_1.txt", "one");

        let provider = SmartFileInputProvider::new(tmp.path(), 2023, 8, DataSet::Sample);
        assert_eq!(provider.provide_input(Some(1)).unwrap(), "one");
        match provider.locate(Some(2)) {
            Err(InputError::NotFound(path)) => {
                assert_eq!(path, tmp.path().join("2023").join("08_test_input.txt"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let provider = SmartFileInputProvider::new(tmp.path(), 2023, 3, DataSet::Real);
        let err = provider.provide_input(None).unwrap_err();
        assert!(err.to_string().ends_with("does not exist."));
    }

    #[test]
    fn test_single_file_provider() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.txt");
        fs::write(&path, "abc").unwrap();

        let provider = SingleFileInputProvider::new(&path);
        assert_eq!(provider.provide_input(Some(1)).unwrap(), "abc");
        assert_eq!(provider.locate(Some(2)).unwrap(), path);

        let missing = SingleFileInputProvider::new(tmp.path().join("nope.txt"));
        assert!(matches!(missing.locate(None), Err(InputError::NotFound(_))));
    }

    #[test]
    fn test_grouping_by_path() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "10_test_input.txt", "shared");
        let provider = SmartFileInputProvider::new(tmp.path(), 2023, 10, DataSet::Sample);
        let groups = group_parts_by_input(&provider, &[1, 2]).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].1, vec![1, 2]);

        write(tmp.path(), "10_test_input_part_2.txt", "other");
        let groups = group_parts_by_input(&provider, &[1, 2]).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].1, vec![1]);
        assert_eq!(groups[1].1, vec![2]);
    }

    #[test]
    fn test_data_set_display() {
        assert_eq!(DataSet::Sample.to_string(), "sample");
        assert_eq!(DataSet::Real.to_string(), "real");
        assert!(DataSet::Sample < DataSet::Real);
    }
}
