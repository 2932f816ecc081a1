//! Configuration resolution from CLI args and the environment

use crate::cli::Cli;
use crate::error::CliError;
use aoc_http_client::AocClient;
use chrono::Datelike;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

const DATA_DIR_ENV: &str = "AOC_DATA_DIR";
const SESSION_ENV: &str = "AOC_SESSION";

/// Resolved options shared by every subcommand
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the `<year>/<day>_input.txt` tree
    pub data_dir: PathBuf,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from the global CLI flags
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            data_dir: resolve_data_dir(cli.data_dir.as_deref(), std::env::var_os(DATA_DIR_ENV)),
            quiet: cli.quiet,
        }
    }
}

/// Explicit flag, else the environment value, else `./data`; `~` is expanded
pub fn resolve_data_dir(flag: Option<&Path>, env: Option<OsString>) -> PathBuf {
    let raw = match (flag, env) {
        (Some(path), _) => path.to_path_buf(),
        (None, Some(env)) if !env.is_empty() => PathBuf::from(env),
        _ => PathBuf::from("data"),
    };
    expand_tilde(&raw)
}

/// Expand ~ to home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Requested thread count, else the number of available CPUs
pub fn thread_count(requested: Option<usize>) -> usize {
    requested.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    })
}

/// The event year in progress: this year once December starts, last year before that
pub fn current_aoc_year(today: impl Datelike) -> u16 {
    let year = if today.month() == 12 {
        today.year()
    } else {
        today.year() - 1
    };
    u16::try_from(year).unwrap_or(aoc_solver::BASE_YEAR)
}

/// Session token from `AOC_SESSION`, if set and non-empty
pub fn session_from_env() -> Option<Zeroizing<String>> {
    std::env::var(SESSION_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(Zeroizing::new)
}

/// Prompt user for session token (input hidden)
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{}", reason);
    let s = rpassword::prompt_password("Enter AOC session key: ")
        .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?;
    if s.is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(Zeroizing::new(s))
}

/// Session from the environment, prompting when it is absent
pub fn require_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    match session_from_env() {
        Some(session) => Ok(session),
        None => prompt_session(reason),
    }
}

/// Check the session against the website and return the user ID it belongs to
pub fn verify_session(client: &AocClient, session: &str) -> Result<u64, CliError> {
    client
        .verify_session(session)?
        .user_id
        .ok_or_else(|| CliError::Config("Invalid session: could not fetch user ID".to_string()))
}
