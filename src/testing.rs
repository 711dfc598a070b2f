//! Testing helpers for code built on outcomes
//!
//! # Examples
//!
//! ```rust
//! use assertive::{assert_error_codes, assert_failure, assert_success, Outcome};
//!
//! let ok = Outcome::new().assert(|a| {
//!     a.validate("a@b.com").email_address();
//! });
//! assert_success!(ok);
//!
//! let bad = Outcome::new().assert(|a| {
//!     a.validate("ab").username(3, 10);
//!     a.validate("nope").email_address();
//! });
//! assert_failure!(bad);
//! assert_error_codes!(bad, ["Username.Validation", "Email.Validation"]);
//! ```

/// Assert that an outcome holds no errors.
///
/// Panics with the recorded errors otherwise.
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {{
        let outcome = &$outcome;
        if outcome.is_failure() {
            panic!("Expected Success, got Failure: {:?}", &*outcome.errors());
        }
    }};
}

/// Assert that an outcome holds at least one error.
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {{
        let outcome = &$outcome;
        if outcome.is_success() {
            panic!("Expected Failure, got Success");
        }
    }};
}

/// Assert that an outcome holds exactly the given error codes, in order.
#[macro_export]
macro_rules! assert_error_codes {
    ($outcome:expr, $expected:expr) => {{
        let outcome = &$outcome;
        let actual: ::std::vec::Vec<::std::string::String> = outcome
            .errors()
            .iter()
            .map(|error| error.code().to_string())
            .collect();
        let expected: ::std::vec::Vec<::std::string::String> = $expected
            .iter()
            .map(|code| code.to_string())
            .collect();
        assert_eq!(actual, expected, "error codes differ");
    }};
}
