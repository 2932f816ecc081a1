//! AOC HTTP client implementation

use crate::error::AocError;
use crate::parser::ResponseParser;
use reqwest::StatusCode;
use reqwest::blocking::Response;
use reqwest::header::{COOKIE, HeaderValue, USER_AGENT};
use std::time::Duration;
use zeroize::Zeroize;

const DEFAULT_BASE_URL: &str = "https://adventofcode.com";
const DEFAULT_USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION")
);

/// Result of session verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// User ID if session is valid, None otherwise
    pub user_id: Option<u64>,
}

/// Result of an answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Answer was correct
    Correct,
    /// Answer was incorrect
    Incorrect,
    /// Problem was already completed
    AlreadyCompleted,
    /// Submission was throttled
    Throttled {
        /// Optional wait time before next submission
        wait_time: Option<Duration>,
    },
}

/// Blocking client for adventofcode.com
///
/// Every request carries the session cookie as a sensitive header. Redirects
/// are never followed, so an expired session shows up as a 3xx instead of a
/// silently fetched login page.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let session = "your_session_cookie";
///
/// if client.verify_session(session)?.user_id.is_some() {
///     let input = client.get_input(2023, 1, session)?;
///     let example = client.get_example(2023, 1, session)?;
///     println!("{} bytes of input, example: {:?}", input.len(), example);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    parser: ResponseParser,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and no redirect policy
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// Create a sensitive cookie header value, zeroizing the temporary string
    fn create_cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={session}");
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes());
        cookie_string.zeroize();

        let mut header_value = header_value
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()))?;
        header_value.set_sensitive(true);
        Ok(header_value)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(segments);
        Ok(url)
    }

    fn day_endpoint(&self, year: u16, day: u8, tail: Option<&str>) -> Result<reqwest::Url, AocError> {
        let year = year.to_string();
        let day = day.to_string();
        let mut segments = vec![year.as_str(), "day", day.as_str()];
        segments.extend(tail);
        self.endpoint(&segments)
    }

    fn get(&self, url: reqwest::Url, session: &str) -> Result<Response, AocError> {
        log::debug!("GET {url}");
        Ok(self
            .client
            .get(url)
            .header(COOKIE, Self::create_cookie_header(session)?)
            .send()?)
    }

    /// Read a puzzle page body; 404 means the day is not unlocked yet
    fn puzzle_body(response: Response, year: u16, day: u8) -> Result<String, AocError> {
        match response.status() {
            status if status.is_success() => response.text().map_err(|_| AocError::Encoding),
            StatusCode::NOT_FOUND => Err(AocError::PuzzleLocked { year, day }),
            status => Err(AocError::InvalidStatus { status }),
        }
    }

    /// Verify if a session cookie is valid and retrieve user ID
    ///
    /// A 200 from the settings page means the session is valid and the user ID
    /// is read from the page. Redirects and error statuses mean it is not.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionInfo { user_id: Some(id) })` - Session is valid with user ID
    /// * `Ok(SessionInfo { user_id: None })` - Session is invalid
    /// * `Err` - Network error or URL construction error occurred
    pub fn verify_session(&self, session: &str) -> Result<SessionInfo, AocError> {
        let response = self.get(self.endpoint(&["settings"])?, session)?;

        if !response.status().is_success() {
            log::debug!("session rejected with status {}", response.status());
            return Ok(SessionInfo { user_id: None });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        Ok(SessionInfo {
            user_id: self.parser.extract_user_id(&html),
        })
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::PuzzleLocked` - The puzzle is not available yet (404)
    /// * `AocError::InvalidStatus` - Any other non-success status
    /// * `AocError::Encoding` - Response is not valid UTF-8
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        let response = self.get(self.day_endpoint(year, day, Some("input"))?, session)?;
        Self::puzzle_body(response, year, day)
    }

    /// Fetch the example input from the puzzle description
    ///
    /// Returns the text of the first `<pre><code>` block of the puzzle page,
    /// or `None` when the page has no such block.
    pub fn get_example(
        &self,
        year: u16,
        day: u8,
        session: &str,
    ) -> Result<Option<String>, AocError> {
        let response = self.get(self.day_endpoint(year, day, None)?, session)?;
        let html = Self::puzzle_body(response, year, day)?;
        Ok(self.parser.extract_example(&html))
    }

    /// Submit an answer for a puzzle part
    ///
    /// # Returns
    ///
    /// A `SubmissionResult` indicating the outcome:
    /// * `Correct` - Answer was correct
    /// * `Incorrect` - Answer was incorrect
    /// * `AlreadyCompleted` - Problem was already solved
    /// * `Throttled` - Submission was rate-limited (includes optional wait time)
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error
    /// * `AocError::Encoding` - Response is not valid UTF-8
    /// * `AocError::HtmlParse` - Failed to parse HTML response
    pub fn submit_answer(
        &self,
        year: u16,
        day: u8,
        part: u8,
        answer: &str,
        session: &str,
    ) -> Result<SubmissionResult, AocError> {
        let url = self.day_endpoint(year, day, Some("answer"))?;
        let form = [("level", part.to_string()), ("answer", answer.to_string())];
        log::debug!("POST {url} level={part}");

        let response = self
            .client
            .post(url)
            .header(COOKIE, Self::create_cookie_header(session)?)
            .form(&form)
            .send()?;

        if !response.status().is_success() {
            return Err(AocError::InvalidStatus {
                status: response.status(),
            });
        }

        let html = response.text().map_err(|_| AocError::Encoding)?;
        self.parser.parse_submission_response(&html)
    }
}

/// Builder for configuring an AOC HTTP client
///
/// The redirect policy is always forced to `Policy::none()`, whatever client
/// builder is supplied.
///
/// ```no_run
/// use aoc_http_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .client_builder(reqwest::blocking::Client::builder().timeout(Duration::from_secs(10)))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
    user_agent: Option<String>,
}

impl AocClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL for the client (mock servers in tests)
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder (timeouts, proxies, ...)
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Override the User-Agent sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the AOC client with the configured settings
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let user_agent = self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|_| AocError::ClientInit(format!("Invalid user agent: {user_agent}")))?,
        );

        let client = builder
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            parser: ResponseParser::new(),
        })
    }
}
