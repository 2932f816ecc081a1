//! HTML response parsing utilities

use crate::{SubmissionResult, error::AocError};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use std::time::Duration;

/// Parser for AOC HTML responses with cached regex patterns and selectors
#[derive(Clone, Debug, Default)]
pub(crate) struct ResponseParser {
    user_id_regex: OnceLock<Regex>,
    throttle_regex: OnceLock<Regex>,
    main_selector: OnceLock<Selector>,
    example_selector: OnceLock<Selector>,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::default()
    }

    fn user_id_regex(&self) -> &Regex {
        self.user_id_regex
            .get_or_init(|| Regex::new(r"\(anonymous user #(\d+)\)").expect("user id pattern"))
    }

    fn throttle_regex(&self) -> &Regex {
        self.throttle_regex
            .get_or_init(|| Regex::new(r"You have (.+?) left to wait\.").expect("throttle pattern"))
    }

    fn main_selector(&self) -> &Selector {
        self.main_selector
            .get_or_init(|| Selector::parse("main").expect("main selector"))
    }

    fn example_selector(&self) -> &Selector {
        self.example_selector
            .get_or_init(|| Selector::parse("pre > code").expect("example selector"))
    }

    /// Extract user ID from settings page HTML
    pub fn extract_user_id(&self, html: &str) -> Option<u64> {
        let captures = self.user_id_regex().captures(html)?;
        captures.get(1)?.as_str().parse::<u64>().ok()
    }

    /// Extract text content from the main element of an HTML document
    pub fn extract_main_text(&self, html: &str) -> Result<String, AocError> {
        let document = Html::parse_document(html);
        let main_element = document
            .select(self.main_selector())
            .next()
            .ok_or(AocError::HtmlParse)?;

        Ok(main_element.text().collect::<String>())
    }

    /// Text of the first `<pre><code>` block of a puzzle page, which is the
    /// example input on almost every day
    pub fn extract_example(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let code = document.select(self.example_selector()).next()?;
        let text = code.text().collect::<String>();
        (!text.trim().is_empty()).then_some(text)
    }

    fn extract_throttle_duration(&self, text: &str) -> Option<Duration> {
        let captures = self.throttle_regex().captures(text)?;
        humantime::parse_duration(captures.get(1)?.as_str()).ok()
    }

    /// Parse submission response and determine the result
    pub fn parse_submission_response(&self, html: &str) -> Result<SubmissionResult, AocError> {
        let text = self.extract_main_text(html)?;

        if text.contains("not the right answer") {
            return Ok(SubmissionResult::Incorrect);
        }

        if text.contains("already complete it") {
            return Ok(SubmissionResult::AlreadyCompleted);
        }

        if text.contains("gave an answer too recently") {
            let wait_time = self.extract_throttle_duration(&text);
            return Ok(SubmissionResult::Throttled { wait_time });
        }

        Ok(SubmissionResult::Correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn main_page(text: &str) -> String {
        format!("<html><body><main>{text}</main></body></html>")
    }

    #[test]
    fn test_malformed_html() {
        let parser = ResponseParser::new();
        // scraper is lenient and will still parse this
        assert!(parser.extract_main_text("<html><body><main>Unclosed tag").is_ok());
    }

    #[test]
    fn test_throttled_without_duration() {
        let parser = ResponseParser::new();
        let html = main_page("You gave an answer too recently.");
        assert_eq!(
            parser.parse_submission_response(&html).unwrap(),
            SubmissionResult::Throttled { wait_time: None }
        );
    }

    #[test]
    fn test_invalid_duration_string() {
        let parser = ResponseParser::new();
        let html = main_page("You gave an answer too recently. You have forever left to wait.");
        assert_eq!(
            parser.parse_submission_response(&html).unwrap(),
            SubmissionResult::Throttled { wait_time: None }
        );
    }

    #[test]
    fn test_empty_main_element_is_correct() {
        let parser = ResponseParser::new();
        assert_eq!(
            parser.parse_submission_response(&main_page("")).unwrap(),
            SubmissionResult::Correct
        );
    }

    #[test]
    fn test_extract_first_example() {
        let parser = ResponseParser::new();
        let html = r#"<html><body><main><article class="day-desc">
<p>For example:</p>
<pre><code>1abc2
pqr3stu8vwx
</code></pre>
<p>Later:</p>
<pre><code>second block</code></pre>
</article></main></body></html>"#;
        assert_eq!(
            parser.extract_example(html).as_deref(),
            Some("1abc2\npqr3stu8vwx\n")
        );
    }

    #[test]
    fn test_extract_example_ignores_inline_code() {
        let parser = ResponseParser::new();
        let html = "<html><body><main><p>Use <code>AAA</code>.</p></main></body></html>";
        assert_eq!(parser.extract_example(html), None);
    }

    // **Feature: aoc-http-client, Property 1: main element extraction strips markup**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_html_main_element_extraction(
            text_content in "[a-zA-Z0-9 .,!?\\n]{1,200}",
            has_nested_tags in prop::bool::ANY,
        ) {
            let html = if has_nested_tags {
                main_page(&format!("<p>{text_content}</p><div><span>nested</span></div>"))
            } else {
                main_page(&text_content)
            };

            let extracted = ResponseParser::new().extract_main_text(&html).unwrap();
            prop_assert!(extracted.contains(text_content.trim()));
            prop_assert!(!extracted.contains('<') && !extracted.contains('>'));
            if has_nested_tags {
                prop_assert!(extracted.contains("nested"));
            }
        }

        #[test]
        fn prop_html_without_main_element_fails(text_content in "[a-zA-Z0-9 .,!?\\n]{1,200}") {
            let html = format!("<html><body><div>{text_content}</div></body></html>");
            let result = ResponseParser::new().extract_main_text(&html);
            prop_assert!(matches!(result, Err(AocError::HtmlParse)));
        }
    }

    // **Feature: aoc-http-client, Property 2: submission outcome detection**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_submission_outcome_detection(
            prefix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
            suffix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
            (phrase, expected) in prop::sample::select(vec![
                ("That's not the right answer.", SubmissionResult::Incorrect),
                ("You gave an answer too recently", SubmissionResult::Throttled { wait_time: None }),
                ("That's the right answer!", SubmissionResult::Correct),
            ]),
        ) {
            let html = main_page(&format!("{prefix} {phrase} {suffix}"));
            let result = ResponseParser::new().parse_submission_response(&html).unwrap();
            prop_assert_eq!(result, expected);
        }

        #[test]
        fn prop_already_completed_detection(
            prefix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
            suffix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
        ) {
            let html = main_page(&format!(
                "{prefix} You don't seem to be solving the right level.  Did you already complete it? {suffix}"
            ));
            let result = ResponseParser::new().parse_submission_response(&html).unwrap();
            prop_assert_eq!(result, SubmissionResult::AlreadyCompleted);
        }
    }

    // **Feature: aoc-http-client, Property 3: throttle duration parsing**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_throttle_duration_extraction(
            minutes in 0u64..60u64,
            seconds in 0u64..60u64,
        ) {
            prop_assume!(minutes > 0 || seconds > 0);

            let duration_str = match (minutes, seconds) {
                (0, s) => format!("{s}s"),
                (m, 0) => format!("{m}m"),
                (m, s) => format!("{m}m {s}s"),
            };
            let html = main_page(&format!(
                "You gave an answer too recently. You have {duration_str} left to wait."
            ));

            match ResponseParser::new().parse_submission_response(&html).unwrap() {
                SubmissionResult::Throttled { wait_time: Some(wait) } => {
                    prop_assert_eq!(wait.as_secs(), minutes * 60 + seconds);
                }
                other => prop_assert!(false, "Expected Throttled with duration, got {:?}", other),
            }
        }
    }

    // **Feature: aoc-http-client, Property 4: user id extraction**
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(10))]

        #[test]
        fn prop_user_id_extraction(
            user_id in 100000u64..9999999u64,
            prefix in "[a-zA-Z0-9 .,!?\\n]{0,100}",
        ) {
            let html = format!("<html><body>{prefix} (anonymous user #{user_id})</body></html>");
            prop_assert_eq!(ResponseParser::new().extract_user_id(&html), Some(user_id));
        }

        #[test]
        fn prop_user_id_extraction_missing_pattern(text_content in "[a-zA-Z0-9 .,!?\\n]{1,200}") {
            let html = format!("<html><body>{text_content}</body></html>");
            prop_assert!(ResponseParser::new().extract_user_id(&html).is_none());
        }
    }
}
