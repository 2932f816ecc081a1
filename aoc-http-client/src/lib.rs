//! AOC HTTP Client Library
//!
//! Blocking client for the Advent of Code website: session validation, puzzle
//! input and example download, and answer submission. TLS is provided by
//! rustls; session cookies are sent as sensitive headers and zeroized after use.
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::{AocClient, SubmissionResult};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new()?;
//! let session = "your_session_cookie_here";
//!
//! let input = client.get_input(2023, 1, session)?;
//!
//! match client.submit_answer(2023, 1, 1, "42", session)? {
//!     SubmissionResult::Correct => println!("Correct!"),
//!     SubmissionResult::Incorrect => println!("Incorrect"),
//!     SubmissionResult::AlreadyCompleted => println!("Already done"),
//!     SubmissionResult::Throttled { wait_time } => println!("Throttled: {:?}", wait_time),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod parser;

pub use client::{AocClient, AocClientBuilder, SessionInfo, SubmissionResult};
pub use error::AocError;
