//! # Assertive
//!
//! Accumulating assertions with a railway-shaped outcome.
//!
//! Build up named checks against values, collect every failure as a
//! structured [`Error`] without returning early, then resolve once into
//! either a computed value or the full list of errors.
//!
//! ## Pipeline
//!
//! - [`Outcome::assert`] runs a batch of checks on a fresh [`Assertion`].
//!   All failing checks of the batch are recorded; once any batch has
//!   failed, later batches are skipped.
//! - [`Outcome::resolve`] computes the value only while the outcome is
//!   error-free. [`ResolveBehavior::Control`] runs it regardless.
//! - [`Outcome::match_with`] branches on the final state.
//!
//! ## Quick Example
//!
//! ```rust
//! use assertive::{Outcome, PasswordStrength};
//!
//! struct Signup<'a> {
//!     username: &'a str,
//!     password: &'a str,
//!     email: &'a str,
//! }
//!
//! let form = Signup {
//!     username: "ab",
//!     password: "abcdefgh",
//!     email: "jane@example.com",
//! };
//!
//! let outcome = Outcome::new()
//!     .assert(|a| {
//!         a.validate(form.username).username(3, 10);
//!         a.validate(form.password).strong_password(PasswordStrength::Standard);
//!         a.validate(form.email).email_address();
//!     })
//!     .resolve(|_| form.username.to_string());
//!
//! let codes = outcome.match_with(
//!     |_| Vec::new(),
//!     |errors| errors.iter().map(|e| e.code().to_string()).collect(),
//! );
//! assert_eq!(codes, ["Username.Validation", "PasswordStrength.Validation"]);
//! ```
//!
//! ## Features
//!
//! - `tracing`: debug events for skipped asserts, recorded failures and
//!   skipped resolves.
//! - `serde`: serialization of errors and reports.
//! - `proptest`: `Arbitrary` for [`Error`] and [`ErrorKind`].

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod assertion;
pub mod error;
pub mod outcome;
pub mod testing;

// Re-exports
pub use assertion::{Assertion, Guard, Matcher, PasswordStrength, Should};
pub use error::{Error, ErrorKind, StateError};
pub use outcome::{MetadataValue, Outcome, Report, ResolveBehavior};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::assertion::{Assertion, PasswordStrength};
    pub use crate::error::{Error, ErrorKind, StateError};
    pub use crate::outcome::{Outcome, Report, ResolveBehavior};
}
