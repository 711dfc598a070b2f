//! Regular-expression checks
//!
//! [`Matcher`] tests one input string against patterns. Length rules count
//! characters, not bytes, and record the same error as a failed pattern.

use regex::Regex;

use super::Assertion;
use crate::error::{code, Error, StateError};

/// Pattern checks bound to one input string.
///
/// Obtained from [`Assertion::validate`]. Each failing rule records one
/// [`ErrorKind::Validation`](crate::ErrorKind::Validation) error whose
/// description names the pattern or bound that was violated.
///
/// # Panics
///
/// Methods that take a pattern panic if it does not compile, and the length
/// rules panic on an inverted range. Both are defects in the calling code.
///
/// # Example
///
/// ```
/// use assertive::Outcome;
///
/// let outcome = Outcome::new().assert(|a| {
///     a.validate("hunter2")
///         .min_length(3)
///         .matches(r"^[a-z0-9]+$")
///         .matches_illegal(r"(?i)password");
/// });
///
/// assert!(outcome.is_success());
/// ```
#[derive(Debug)]
pub struct Matcher<'a> {
    assertion: &'a mut Assertion,
    input: &'a str,
}

impl<'a> Matcher<'a> {
    pub(super) fn new(assertion: &'a mut Assertion, input: &'a str) -> Self {
        Matcher { assertion, input }
    }

    /// The string under test.
    pub fn input(&self) -> &str {
        self.input
    }

    /// Passes when `pattern` matches the input.
    pub fn matches(self, pattern: &str) -> Self {
        let description = format!(
            "String does not match the regular expression '{}'.",
            pattern
        );
        self.check(pattern, false, description)
    }

    /// Passes when `pattern` does not match the input.
    ///
    /// Used for denylists: characters, words or shapes the input must not
    /// contain.
    pub fn matches_illegal(self, pattern: &str) -> Self {
        let description = format!(
            "String matches the illegal regular expression '{}'.",
            pattern
        );
        self.check(pattern, true, description)
    }

    /// Passes when the input is between `min` and `max` characters long,
    /// both inclusive.
    ///
    /// # Panics
    ///
    /// Panics with [`StateError::InvalidRange`] if `max < min`.
    pub fn length(self, min: usize, max: usize) -> Self {
        if max < min {
            panic!("{}", StateError::InvalidRange { min, max });
        }
        let description = format!(
            "String length must be between {} and {} characters.",
            min, max
        );
        self.check_length(min, max, description)
    }

    /// Passes when the input is at least `min` characters long.
    pub fn min_length(self, min: usize) -> Self {
        let description = format!("String must be at least {} characters long.", min);
        self.check_length(min, usize::MAX, description)
    }

    /// Passes when the input is at most `max` characters long.
    pub fn max_length(self, max: usize) -> Self {
        let description = format!("String must be at most {} characters long.", max);
        self.check_length(0, max, description)
    }

    /// Passes when `pattern` matches; records `error` otherwise.
    pub fn matches_with(self, pattern: &str, error: Error) -> Self {
        let passed = is_match(pattern, self.input);
        self.require(passed, error)
    }

    /// Passes when every pattern matches; records `error` once otherwise.
    ///
    /// ```
    /// use assertive::{Error, Outcome};
    ///
    /// let outcome = Outcome::new().assert(|a| {
    ///     a.validate("abc").matches_all_with(
    ///         &["[a-z]", "[0-9]"],
    ///         Error::validation("Token.Validation", "Needs a letter and a digit."),
    ///     );
    /// });
    ///
    /// assert_eq!(outcome.error_count(), 1);
    /// ```
    pub fn matches_all_with(self, patterns: &[&str], error: Error) -> Self {
        let passed = patterns.iter().all(|pattern| is_match(pattern, self.input));
        self.require(passed, error)
    }

    /// Records `error` unless `passed`.
    pub(super) fn require(self, passed: bool, error: Error) -> Self {
        if !passed {
            self.assertion.fail(error);
        }
        self
    }

    fn check(self, pattern: &str, illegal: bool, description: String) -> Self {
        let passed = is_match(pattern, self.input) != illegal;
        self.require(
            passed,
            Error::validation(code::REGULAR_EXPRESSION, description),
        )
    }

    fn check_length(self, min: usize, max: usize, description: String) -> Self {
        let len = self.input.chars().count();
        self.require(
            len >= min && len <= max,
            Error::validation(code::REGULAR_EXPRESSION, description),
        )
    }
}

fn is_match(pattern: &str, input: &str) -> bool {
    compile(pattern).is_match(input)
}

pub(super) fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(err) => panic!(
            "{}",
            StateError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: err.to_string(),
            }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(check: impl FnOnce(Matcher<'_>)) -> Vec<Error> {
        let mut assertion = Assertion::new();
        check(assertion.validate("abcd"));
        assertion.into_errors()
    }

    #[test]
    fn test_matches() {
        assert!(run(|m| {
            m.matches("^ab");
        })
        .is_empty());

        let errors = run(|m| {
            m.matches("^z");
        });
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), code::REGULAR_EXPRESSION);
        assert_eq!(
            errors[0].description(),
            "String does not match the regular expression '^z'."
        );
    }

    #[test]
    fn test_matches_illegal() {
        assert!(run(|m| {
            m.matches_illegal("[0-9]");
        })
        .is_empty());

        let errors = run(|m| {
            m.matches_illegal("bc");
        });
        assert_eq!(
            errors[0].description(),
            "String matches the illegal regular expression 'bc'."
        );
    }

    #[test]
    fn test_min_length() {
        let mut a = Assertion::new();
        a.validate("abcd").min_length(5);
        a.validate("abcde").min_length(5);
        assert_eq!(a.errors().len(), 1);
        assert_eq!(
            a.errors()[0].description(),
            "String must be at least 5 characters long."
        );
    }

    #[test]
    fn test_max_length() {
        let mut a = Assertion::new();
        a.validate("abcd").max_length(4);
        a.validate("abcde").max_length(4);
        assert_eq!(a.errors().len(), 1);
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let errors = run(|m| {
            m.length(4, 4).length(1, 3).length(5, 9);
        });
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0].description(),
            "String length must be between 1 and 3 characters."
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let mut a = Assertion::new();
        a.validate("héllo").length(5, 5);
        a.validate("a\nb").length(3, 3);
        assert!(!a.has_failed());
    }

    #[test]
    fn test_large_length_bounds_are_checked_not_compiled() {
        let long = "a".repeat(60_000);
        let mut a = Assertion::new();
        a.validate("short").max_length(100_000);
        a.validate("short").min_length(50_000);
        a.validate(&long).length(50_000, 100_000);
        a.validate(&long).max_length(50_000);

        let descriptions: Vec<&str> = a.errors().iter().map(|e| e.description()).collect();
        assert_eq!(
            descriptions,
            vec![
                "String must be at least 50000 characters long.",
                "String must be at most 50000 characters long.",
            ]
        );
        assert!(a
            .errors()
            .iter()
            .all(|e| e.code() == code::REGULAR_EXPRESSION));
    }

    #[test]
    fn test_input_is_exposed() {
        let mut a = Assertion::new();
        assert_eq!(a.validate("abcd").input(), "abcd");
    }

    #[test]
    #[should_panic(expected = "invalid length range: min 5 max 2")]
    fn test_inverted_length_panics() {
        run(|m| {
            m.length(5, 2);
        });
    }

    #[test]
    #[should_panic(expected = "invalid pattern '('")]
    fn test_bad_pattern_panics() {
        run(|m| {
            m.matches("(");
        });
    }

    #[test]
    fn test_matches_all_with_records_once() {
        let errors = run(|m| {
            m.matches_all_with(&["[0-9]", "[A-Z]"], Error::validation("X", "y"));
        });
        assert_eq!(errors, vec![Error::validation("X", "y")]);
    }
}
