//! Assertion context and check families
//!
//! An [`Assertion`] is created fresh for every [`Outcome::assert`] call and
//! handed to the caller's callback. Checks issued on it never fail loudly:
//! each failing check appends one [`Error`] to the context and evaluation
//! carries on, so a single callback reports every problem it finds.
//!
//! Checks are grouped by family:
//!
//! - [`Assertion::should`]: conditions, presence, emptiness, equality,
//!   ordering-based equality and reference identity.
//! - [`Assertion::validate`]: regular-expression and length rules against a
//!   string, plus the pre-built username, password and email formats.
//! - [`Assertion::exception`]: runs fallible or panicking code and records
//!   what went wrong instead of propagating it.
//!
//! # Example
//!
//! ```
//! use assertive::Outcome;
//!
//! let outcome = Outcome::new().assert(|a| {
//!     a.should().equal("pwd", "pwd").not_empty(&[1, 2, 3]);
//!     a.validate("jane@example.com").email_address();
//! });
//!
//! assert!(outcome.is_success());
//! ```
//!
//! [`Outcome::assert`]: crate::Outcome::assert

mod exception;
mod format;
mod pattern;

pub use exception::Guard;
pub use format::PasswordStrength;
pub use pattern::Matcher;

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::{code, Error};

/// Collects the failures of one batch of checks.
///
/// The context lives for the duration of a single `assert` callback. Once the
/// callback returns, its errors are merged into the owning outcome and the
/// context is dropped.
#[derive(Debug, Default)]
pub struct Assertion {
    errors: Vec<Error>,
}

impl Assertion {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Equality, identity, presence and emptiness checks.
    pub fn should(&mut self) -> Should<'_> {
        Should { assertion: self }
    }

    /// Pattern checks against `input`.
    pub fn validate<'a>(&'a mut self, input: &'a str) -> Matcher<'a> {
        Matcher::new(self, input)
    }

    /// Translate failures of guarded code into recorded errors.
    pub fn exception(&mut self) -> Guard<'_> {
        Guard::new(self)
    }

    /// Record an error built by the caller.
    ///
    /// ```
    /// use assertive::{Error, Outcome};
    ///
    /// let outcome = Outcome::new().assert(|a| {
    ///     a.fail(Error::not_found("User.Missing", "No such user."));
    /// });
    ///
    /// assert_eq!(outcome.first_error().unwrap().code(), "User.Missing");
    /// ```
    pub fn fail(&mut self, error: Error) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Whether any check in this context has failed so far.
    pub fn has_failed(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors recorded so far, in the order the checks failed.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub(crate) fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn record(&mut self, passed: bool, error: impl FnOnce() -> Error) {
        if !passed {
            self.errors.push(error());
        }
    }
}

/// Equality, identity, presence and emptiness checks.
///
/// Every method records at most one error and returns the family for
/// chaining; a failing check never stops the ones after it.
#[derive(Debug)]
pub struct Should<'a> {
    assertion: &'a mut Assertion,
}

impl<'a> Should<'a> {
    /// Passes when `condition` is true.
    pub fn satisfy(self, condition: bool) -> Self {
        self.assertion.record(condition, || {
            Error::validation(code::SATISFY, "Condition was expected to be satisfied.")
        });
        self
    }

    /// Passes when `condition` is false.
    pub fn not_satisfy(self, condition: bool) -> Self {
        self.assertion.record(!condition, || {
            Error::validation(
                code::NOT_SATISFY,
                "Condition was expected not to be satisfied.",
            )
        });
        self
    }

    /// Passes when `value` is absent.
    pub fn null<T>(self, value: &Option<T>) -> Self {
        self.assertion.record(value.is_none(), || {
            Error::validation(code::NULL, "Value was expected to be absent.")
        });
        self
    }

    /// Passes when `value` is present.
    pub fn not_null<T>(self, value: &Option<T>) -> Self {
        self.assertion.record(value.is_some(), || {
            Error::validation(code::NOT_NULL, "Value was expected to be present.")
        });
        self
    }

    /// Passes when `collection` yields no elements.
    ///
    /// Only the first element is pulled, so borrowed collections are the
    /// usual argument (`&vec`, `&map`, `"text".chars()`).
    pub fn empty<I: IntoIterator>(self, collection: I) -> Self {
        let is_empty = collection.into_iter().next().is_none();
        self.assertion.record(is_empty, || {
            Error::validation(code::EMPTY, "Collection was expected to be empty.")
        });
        self
    }

    /// Passes when `collection` yields at least one element.
    pub fn not_empty<I: IntoIterator>(self, collection: I) -> Self {
        let has_any = collection.into_iter().next().is_some();
        self.assertion.record(has_any, || {
            Error::validation(
                code::NOT_EMPTY,
                "Collection was expected to contain at least one element.",
            )
        });
        self
    }

    /// Passes when `former == latter`.
    pub fn equal<T: PartialEq + Debug>(self, former: T, latter: T) -> Self {
        self.assertion.record(former == latter, || {
            Error::validation(
                code::EQUAL,
                format!("Expected {:?} to equal {:?}.", former, latter),
            )
        });
        self
    }

    /// Passes when `former != latter`.
    pub fn not_equal<T: PartialEq + Debug>(self, former: T, latter: T) -> Self {
        self.assertion.record(former != latter, || {
            Error::validation(
                code::NOT_EQUAL,
                format!("Expected {:?} to differ from {:?}.", former, latter),
            )
        });
        self
    }

    /// Passes when the two values compare as [`Ordering::Equal`].
    ///
    /// Unlike [`equal`](Self::equal) this goes through the three-way
    /// comparison, so values that are unordered (such as `NaN`) never pass.
    pub fn strict_equal<T: PartialOrd + Debug>(self, former: T, latter: T) -> Self {
        let passed = former.partial_cmp(&latter) == Some(Ordering::Equal);
        self.assertion.record(passed, || {
            Error::validation(
                code::STRICT_EQUAL,
                format!("Expected {:?} to compare equal to {:?}.", former, latter),
            )
        });
        self
    }

    /// Passes when the two values do not compare as [`Ordering::Equal`].
    pub fn not_strict_equal<T: PartialOrd + Debug>(self, former: T, latter: T) -> Self {
        let passed = former.partial_cmp(&latter) != Some(Ordering::Equal);
        self.assertion.record(passed, || {
            Error::validation(
                code::NOT_STRICT_EQUAL,
                format!("Expected {:?} not to compare equal to {:?}.", former, latter),
            )
        });
        self
    }

    /// Passes when both references point at the same place in memory.
    pub fn same<T: ?Sized>(self, former: &T, latter: &T) -> Self {
        self.assertion.record(std::ptr::eq(former, latter), || {
            Error::validation(
                code::SAME,
                "References were expected to point to the same value.",
            )
        });
        self
    }

    /// Passes when the references point at different places in memory.
    pub fn not_same<T: ?Sized>(self, former: &T, latter: &T) -> Self {
        self.assertion.record(!std::ptr::eq(former, latter), || {
            Error::validation(
                code::NOT_SAME,
                "References were expected to point to different values.",
            )
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn codes(assertion: &Assertion) -> Vec<&str> {
        assertion.errors().iter().map(Error::code).collect()
    }

    #[test]
    fn test_passing_checks_record_nothing() {
        let mut a = Assertion::new();
        let present = Some(1);
        let absent: Option<i32> = None;
        let value = 7;

        a.should()
            .satisfy(true)
            .not_satisfy(false)
            .null(&absent)
            .not_null(&present)
            .empty(Vec::<i32>::new())
            .not_empty(&[1])
            .equal(1, 1)
            .not_equal("a", "b")
            .strict_equal(2.5, 2.5)
            .not_strict_equal(1, 2)
            .same(&value, &value)
            .not_same(&value, &8);

        assert!(!a.has_failed());
    }

    #[test]
    fn test_every_failure_is_recorded_in_order() {
        let mut a = Assertion::new();
        a.should()
            .satisfy(false)
            .equal("&pwd", "&pwd5")
            .not_null(&None::<u8>);

        assert_eq!(
            codes(&a),
            vec![code::SATISFY, code::EQUAL, code::NOT_NULL]
        );
        assert!(a
            .errors()
            .iter()
            .all(|e| e.kind() == ErrorKind::Validation));
    }

    #[test]
    fn test_equal_description_embeds_values() {
        let mut a = Assertion::new();
        a.should().equal(1, 2);
        assert_eq!(a.errors()[0].description(), "Expected 1 to equal 2.");
    }

    #[test]
    fn test_empty_checks() {
        let mut a = Assertion::new();
        a.should().empty("ab".chars()).not_empty(&Vec::<u8>::new());
        assert_eq!(codes(&a), vec![code::EMPTY, code::NOT_EMPTY]);
    }

    #[test]
    fn test_strict_equal_rejects_unordered() {
        let mut a = Assertion::new();
        a.should().strict_equal(f64::NAN, f64::NAN);
        assert_eq!(codes(&a), vec![code::STRICT_EQUAL]);
    }

    #[test]
    fn test_same_is_identity_not_equality() {
        let first = String::from("same");
        let second = String::from("same");
        let mut a = Assertion::new();
        a.should().same(&first, &second).not_same(&first, &first);
        assert_eq!(codes(&a), vec![code::SAME, code::NOT_SAME]);
    }

    #[test]
    fn test_fail_appends_custom_error() {
        let mut a = Assertion::new();
        a.fail(Error::conflict("User.Duplicate", "User already exists."))
            .fail(Error::failure("Db.Down", "Database unavailable."));
        assert_eq!(codes(&a), vec!["User.Duplicate", "Db.Down"]);
    }

    #[test]
    fn test_families_share_one_error_list() {
        let mut a = Assertion::new();
        a.should().satisfy(false);
        a.validate("abcd").min_length(5);
        a.exception().capture(|| Err::<(), _>("boom"));
        assert_eq!(
            codes(&a),
            vec![
                code::SATISFY,
                code::REGULAR_EXPRESSION,
                code::EXCEPTION_FAILURE
            ]
        );
    }
}
