//! Pre-built format checks: username, password strength, email address

use std::sync::OnceLock;

use regex::Regex;

use super::pattern::compile;
use super::Matcher;
use crate::error::{code, Error, StateError};

const EMAIL_ADDRESS: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

const LOWERCASE: &str = "[a-z]";
const UPPERCASE: &str = "[A-Z]";
const DIGIT: &str = "[0-9]";
const SPECIAL: &str = "[^A-Za-z0-9]";
const EIGHT_OR_MORE: &str = "(?s)^.{8,}$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static STANDARD_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
static COMPLEX_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
static MAXIMUM_REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| compile(EMAIL_ADDRESS))
}

/// How demanding [`Matcher::strong_password`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PasswordStrength {
    /// A lowercase letter and a digit, at least 8 characters.
    #[default]
    Standard,
    /// Standard plus an uppercase letter.
    Complex,
    /// Complex plus a character that is neither a letter nor a digit.
    Maximum,
}

impl PasswordStrength {
    /// Patterns that must all match for a password to reach this tier.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            PasswordStrength::Standard => &[LOWERCASE, DIGIT, EIGHT_OR_MORE],
            PasswordStrength::Complex => &[LOWERCASE, UPPERCASE, DIGIT, EIGHT_OR_MORE],
            PasswordStrength::Maximum => &[LOWERCASE, UPPERCASE, DIGIT, SPECIAL, EIGHT_OR_MORE],
        }
    }

    fn regexes(self) -> &'static [Regex] {
        let cell = match self {
            PasswordStrength::Standard => &STANDARD_REGEXES,
            PasswordStrength::Complex => &COMPLEX_REGEXES,
            PasswordStrength::Maximum => &MAXIMUM_REGEXES,
        };
        cell.get_or_init(|| self.patterns().iter().map(|p| compile(p)).collect())
    }

    fn description(self) -> &'static str {
        match self {
            PasswordStrength::Standard => {
                "Password must contain 1 lowercase letter, 1 number, and be at least 8 characters long."
            }
            PasswordStrength::Complex => {
                "Password must contain 1 lowercase letter, 1 uppercase letter, 1 number, and be at least 8 characters long."
            }
            PasswordStrength::Maximum => {
                "Password must contain 1 lowercase letter, 1 uppercase letter, 1 number, 1 special character, and be at least 8 characters long."
            }
        }
    }
}

impl<'a> Matcher<'a> {
    /// Passes when the input is a username of `min..=max` letters, digits or
    /// underscores.
    ///
    /// Records `Username.Validation` on failure.
    ///
    /// # Panics
    ///
    /// Panics with [`StateError::InvalidRange`] if `max <= min`.
    ///
    /// ```
    /// use assertive::Outcome;
    ///
    /// let outcome = Outcome::new().assert(|a| {
    ///     a.validate("ab").username(3, 10);
    /// });
    ///
    /// assert_eq!(outcome.first_error().unwrap().code(), "Username.Validation");
    /// ```
    pub fn username(self, min: usize, max: usize) -> Self {
        if max <= min {
            panic!("{}", StateError::InvalidRange { min, max });
        }
        let pattern = format!("^[A-Za-z0-9_]{{{},{}}}$", min, max);
        self.matches_with(
            &pattern,
            Error::validation(code::USERNAME, "Invalid username format."),
        )
    }

    /// [`username`](Self::username) with the usual bounds of 1 to 32.
    pub fn default_username(self) -> Self {
        self.username(1, 32)
    }

    /// Passes when the input meets the given password tier.
    ///
    /// Records `PasswordStrength.Validation` on failure, with a description
    /// that lists what the tier requires.
    pub fn strong_password(self, strength: PasswordStrength) -> Self {
        let input = self.input();
        let passed = strength.regexes().iter().all(|regex| regex.is_match(input));
        self.require(
            passed,
            Error::validation(code::PASSWORD_STRENGTH, strength.description()),
        )
    }

    /// Passes when the input looks like `local@domain.tld`.
    ///
    /// Records `Email.Validation` on failure.
    pub fn email_address(self) -> Self {
        let passed = email_regex().is_match(self.input());
        self.require(
            passed,
            Error::validation(code::EMAIL, "Invalid email address format."),
        )
    }
}
