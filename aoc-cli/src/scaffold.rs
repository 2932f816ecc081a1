//! `new-day`: solution module and input files for a day

use crate::error::ScaffoldError;
use aoc_http_client::{AocClient, AocError};
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const DEFAULT_TEMPLATE: &str = include_str!("../../templates/day_template.rs");

/// Where puzzle text comes from when input files are created
pub trait PuzzleSource {
    fn input(&self, year: u16, day: u8) -> Result<String, AocError>;

    /// First example block of the puzzle description, if any
    fn example(&self, year: u16, day: u8) -> Result<Option<String>, AocError>;
}

/// Fetches puzzle text from adventofcode.com with the user's session
pub struct WebPuzzleSource {
    client: AocClient,
    session: Zeroizing<String>,
}

impl WebPuzzleSource {
    pub fn new(client: AocClient, session: Zeroizing<String>) -> Self {
        Self { client, session }
    }
}

impl PuzzleSource for WebPuzzleSource {
    fn input(&self, year: u16, day: u8) -> Result<String, AocError> {
        self.client.get_input(year, day, &self.session)
    }

    fn example(&self, year: u16, day: u8) -> Result<Option<String>, AocError> {
        self.client.get_example(year, day, &self.session)
    }
}

/// A `new-day` request
#[derive(Debug, Clone)]
pub struct NewDay<'a> {
    pub year: u16,
    pub day: u8,
    /// Directory holding the `year_YYYY` modules
    pub directory: &'a Path,
    pub data_dir: &'a Path,
    pub template: Option<&'a Path>,
    pub force: bool,
}

/// What happened to one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataFileStatus {
    /// Present and non-empty, left alone
    AlreadyExists,
    /// Written; `filled` is false when it was created empty
    Created { filled: bool },
    /// Puzzle not released yet, created empty
    Locked,
    /// Download failed, created empty
    FetchFailed(String),
}

/// Files touched by `new-day`
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub module: PathBuf,
    pub input: (PathBuf, DataFileStatus),
    pub test_input: (PathBuf, DataFileStatus),
}

pub fn validate_day(day: u8) -> Result<u8, ScaffoldError> {
    if (1..=25).contains(&day) {
        Ok(day)
    } else {
        Err(ScaffoldError::InvalidDay(day))
    }
}

/// Fill the `{{year}}`, `{{day}}` and `{{day_padded}}` placeholders
pub fn render_template(template: &str, year: u16, day: u8) -> String {
    template
        .replace("{{year}}", &year.to_string())
        .replace("{{day_padded}}", &format!("{day:02}"))
        .replace("{{day}}", &day.to_string())
}

/// `{directory}/year_{year}/day_{day:02}.rs`
pub fn module_path(directory: &Path, year: u16, day: u8) -> PathBuf {
    directory
        .join(format!("year_{year}"))
        .join(format!("day_{day:02}.rs"))
}

/// Create the solution module and input files for a day
pub fn scaffold(
    request: &NewDay<'_>,
    source: Option<&dyn PuzzleSource>,
) -> Result<ScaffoldReport, ScaffoldError> {
    let (year, day) = (request.year, validate_day(request.day)?);

    let module = module_path(request.directory, year, day);
    if module.exists() && !request.force {
        return Err(ScaffoldError::AlreadyExists(day));
    }

    let template = match request.template {
        Some(path) => fs::read_to_string(path).map_err(|source| ScaffoldError::Template {
            path: path.to_path_buf(),
            source,
        })?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    let year_dir = request.directory.join(format!("year_{year}"));
    create_dir(&year_dir)?;
    write(&module, &render_template(&template, year, day))?;
    log::info!("created {}", module.display());

    let year_mod = year_dir.join("mod.rs");
    if !year_mod.exists() {
        write(&year_mod, &format!("//! Advent of Code {year}\n\n"))?;
        add_mod_line(&request.directory.join("mod.rs"), &format!("year_{year}"))?;
    }
    add_mod_line(&year_mod, &format!("day_{day:02}"))?;

    let data_dir = request.data_dir.join(year.to_string());
    let input = data_dir.join(format!("{day:02}_input.txt"));
    let input_status = create_data_file(&input, || match source {
        Some(s) => s.input(year, day).map(Some),
        None => Ok(None),
    })?;
    let test_input = data_dir.join(format!("{day:02}_test_input.txt"));
    let test_input_status = create_data_file(&test_input, || match source {
        Some(s) => s.example(year, day),
        None => Ok(None),
    })?;

    Ok(ScaffoldReport {
        module,
        input: (input, input_status),
        test_input: (test_input, test_input_status),
    })
}

/// Append `pub mod {name};` unless the file already declares it
fn add_mod_line(mod_rs: &Path, name: &str) -> Result<(), ScaffoldError> {
    let line = format!("pub mod {name};");
    let mut contents = match fs::read_to_string(mod_rs) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ScaffoldError::Write {
                path: mod_rs.to_path_buf(),
                source,
            });
        }
    };
    if contents.lines().any(|l| l.trim() == line) {
        return Ok(());
    }
    if !contents.is_empty() && !contents.ends_with('\n') {
        contents.push('\n');
    }
    contents.push_str(&line);
    contents.push('\n');
    write(mod_rs, &contents)
}

fn create_data_file<F>(path: &Path, fetch: F) -> Result<DataFileStatus, ScaffoldError>
where
    F: FnOnce() -> Result<Option<String>, AocError>,
{
    if fs::metadata(path).is_ok_and(|m| m.len() > 0) {
        return Ok(DataFileStatus::AlreadyExists);
    }
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }

    let (contents, status) = match fetch() {
        Ok(Some(text)) => (text, DataFileStatus::Created { filled: true }),
        Ok(None) => (String::new(), DataFileStatus::Created { filled: false }),
        Err(AocError::PuzzleLocked { year, day }) => {
            log::warn!("{year} day {day} is locked, leaving {} empty", path.display());
            (String::new(), DataFileStatus::Locked)
        }
        Err(e) => {
            log::warn!("could not download {}: {e}", path.display());
            (String::new(), DataFileStatus::FetchFailed(e.to_string()))
        }
    };
    write(path, &contents)?;
    Ok(status)
}

fn create_dir(path: &Path) -> Result<(), ScaffoldError> {
    fs::create_dir_all(path).map_err(|source| ScaffoldError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<(), ScaffoldError> {
    fs::write(path, contents).map_err(|source| ScaffoldError::Write {
        path: path.to_path_buf(),
        source,
    })
}
