//! Accumulating outcome of a validation pipeline
//!
//! An [`Outcome`] collects the errors of any number of [`assert`] calls,
//! carries arbitrary metadata, and finally resolves into a value or into
//! the list of everything that went wrong.
//!
//! The pipeline is railway-shaped: as soon as one `assert` has recorded an
//! error, every later `assert` is skipped and guarded resolves do not run.
//! Within a single `assert` every check runs, so one callback can report
//! several problems at once.
//!
//! # Example
//!
//! ```
//! use assertive::{Outcome, PasswordStrength};
//!
//! let outcome = Outcome::new()
//!     .with_metadata("request", 17)
//!     .assert(|a| {
//!         a.validate("jane_doe").username(3, 16);
//!         a.validate("s3cretpass").strong_password(PasswordStrength::Standard);
//!     })
//!     .assert(|a| {
//!         a.validate("jane@example.com").email_address();
//!     })
//!     .resolve(|_| String::from("jane_doe"));
//!
//! let message = outcome.match_with(
//!     |name| format!("registered {}", name),
//!     |errors| format!("{} problem(s)", errors.len()),
//! );
//! assert_eq!(message, "registered jane_doe");
//! assert_eq!(outcome.metadata::<i32>("request"), Some(17));
//! ```
//!
//! # Sharing
//!
//! The errors and metadata live in a reference-counted store. Views derived
//! with [`retype`], [`retype_with`] or [`share`] point at the same store, so
//! an error recorded through one view is visible through all of them. A
//! view's value is hidden while the store holds errors, unless it came from
//! a [`ResolveBehavior::Control`] resolve. The store is single-threaded: an outcome is meant to belong to one unit of
//! work and is neither `Send` nor `Sync`.
//!
//! [`assert`]: Outcome::assert
//! [`retype`]: Outcome::retype
//! [`retype_with`]: Outcome::retype_with
//! [`share`]: Outcome::share

mod ledger;
mod report;

pub use ledger::MetadataValue;
pub use report::Report;

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::assertion::Assertion;
use crate::error::{Error, StateError};
use ledger::Ledger;

/// Whether a resolve step runs regardless of recorded errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResolveBehavior {
    /// Run only while the outcome is error-free.
    #[default]
    Guarded,
    /// Always run, e.g. for cleanup, logging or producing a fallback value.
    Control,
}

/// Errors, metadata and an optional value accumulated by a pipeline.
///
/// `Outcome<()>` (the default) is the untyped pipeline; its value is the
/// unit value, present from the start. [`resolve`] moves it to a typed
/// `Outcome<T>` carrying a value.
///
/// [`resolve`]: Outcome::resolve
#[derive(Debug)]
pub struct Outcome<T = ()> {
    ledger: Rc<RefCell<Ledger>>,
    value: Option<T>,
    // set by a Control resolve; the value stays visible alongside errors
    fallback: bool,
}

impl Outcome<()> {
    /// Create an empty, error-free outcome.
    pub fn new() -> Self {
        Outcome {
            ledger: Rc::new(RefCell::new(Ledger::default())),
            value: Some(()),
            fallback: false,
        }
    }
}

impl Default for Outcome<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Outcome<T> {
    /// Run a batch of checks.
    ///
    /// If the outcome already holds errors the callback is not invoked and
    /// the outcome is returned unchanged. Otherwise the callback receives a
    /// fresh [`Assertion`]; every error it records is appended, in order.
    /// A value resolved earlier is hidden once this call records errors.
    ///
    /// ```
    /// use assertive::Outcome;
    ///
    /// let mut calls = 0;
    /// let outcome = Outcome::new()
    ///     .assert(|a| {
    ///         a.should().satisfy(false).equal(1, 2);
    ///     })
    ///     .assert(|_| calls += 1);
    ///
    /// assert_eq!(outcome.error_count(), 2);
    /// assert_eq!(calls, 0);
    /// ```
    pub fn assert<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Assertion),
    {
        if self.has_error() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                errors = self.error_count(),
                "assert skipped, outcome already failed"
            );
            return self;
        }

        let mut assertion = Assertion::new();
        f(&mut assertion);

        if assertion.has_failed() {
            let errors = assertion.into_errors();
            #[cfg(feature = "tracing")]
            tracing::debug!(failed = errors.len(), "assert recorded errors");
            self.ledger.borrow_mut().errors.extend(errors);
            self.fallback = false;
        }
        self
    }

    /// Attach metadata. The first write for a key wins; later writes for
    /// the same key are ignored.
    pub fn with_metadata(self, key: impl Into<String>, value: impl MetadataValue) -> Self {
        self.insert_metadata(key, value);
        self
    }

    /// Attach metadata through a shared reference, e.g. from inside a
    /// resolve continuation. Returns `false` if the key was already set.
    pub fn insert_metadata(&self, key: impl Into<String>, value: impl MetadataValue) -> bool {
        self.ledger
            .borrow_mut()
            .insert_metadata(key.into(), Box::new(value))
    }

    /// The metadata stored under `key`, if it is present and a `V`.
    pub fn metadata<V: Any + Clone>(&self, key: &str) -> Option<V> {
        self.ledger.borrow().metadata(key)
    }

    /// Whether any metadata was attached.
    pub fn has_metadata(&self) -> bool {
        self.ledger.borrow().has_metadata()
    }

    /// Metadata keys in sorted order.
    pub fn metadata_keys(&self) -> Vec<String> {
        self.ledger.borrow().metadata_keys()
    }

    /// Clear every recorded error and return how many there were.
    ///
    /// Metadata is kept. After purging, `assert` runs callbacks again, which
    /// makes this the reset point for retry loops.
    ///
    /// ```
    /// use assertive::Outcome;
    ///
    /// let outcome = Outcome::new()
    ///     .with_metadata("attempt", 1)
    ///     .assert(|a| {
    ///         a.should().satisfy(false);
    ///     });
    ///
    /// assert_eq!(outcome.purge_errors(), 1);
    /// assert!(outcome.is_success());
    /// assert!(outcome.has_metadata());
    /// ```
    pub fn purge_errors(&self) -> usize {
        let cleared = self.ledger.borrow_mut().purge_errors();
        #[cfg(feature = "tracing")]
        tracing::debug!(cleared, "purged errors");
        cleared
    }

    /// Recorded errors in the order they occurred.
    ///
    /// The returned guard borrows the shared store; drop it before changing
    /// the outcome through any view.
    pub fn errors(&self) -> Ref<'_, [Error]> {
        Ref::map(self.ledger.borrow(), |ledger| ledger.errors.as_slice())
    }

    /// Number of recorded errors.
    pub fn error_count(&self) -> usize {
        self.ledger.borrow().errors.len()
    }

    /// At least one error was recorded.
    pub fn has_error(&self) -> bool {
        self.error_count() > 0
    }

    /// No errors were recorded.
    pub fn is_success(&self) -> bool {
        !self.has_error()
    }

    /// At least one error was recorded.
    pub fn is_failure(&self) -> bool {
        self.has_error()
    }

    /// The earliest recorded error.
    ///
    /// Returns [`StateError::NoErrors`] on an error-free outcome.
    pub fn first_error(&self) -> Result<Error, StateError> {
        self.ledger
            .borrow()
            .errors
            .first()
            .cloned()
            .ok_or(StateError::NoErrors)
    }

    /// The most recently recorded error.
    ///
    /// Returns [`StateError::NoErrors`] on an error-free outcome.
    pub fn last_error(&self) -> Result<Error, StateError> {
        self.ledger
            .borrow()
            .errors
            .last()
            .cloned()
            .ok_or(StateError::NoErrors)
    }

    /// A read-only snapshot of success, errors and metadata.
    pub fn report(&self) -> Report {
        let ledger = self.ledger.borrow();
        Report::new(ledger.errors.clone(), ledger.rendered_metadata())
    }

    /// Run `continuation` if the outcome is error-free.
    pub fn resolve_with<F>(self, continuation: F) -> Self
    where
        F: FnOnce(&Self),
    {
        self.resolve_with_behavior(ResolveBehavior::Guarded, continuation)
    }

    /// Run `continuation` according to `behavior`.
    ///
    /// With [`ResolveBehavior::Control`] it always runs, which suits logging
    /// and cleanup that must happen on failure too.
    pub fn resolve_with_behavior<F>(self, behavior: ResolveBehavior, continuation: F) -> Self
    where
        F: FnOnce(&Self),
    {
        if behavior == ResolveBehavior::Control || self.is_success() {
            continuation(&self);
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("resolve skipped, outcome failed");
        }
        self
    }

    /// Compute the value if the outcome is error-free.
    ///
    /// With errors present the producer is never called and the resulting
    /// outcome has no value. Errors and metadata carry over unchanged.
    pub fn resolve<U, F>(self, producer: F) -> Outcome<U>
    where
        F: FnOnce(&Self) -> U,
    {
        self.resolve_as(ResolveBehavior::Guarded, producer)
    }

    /// Compute the value according to `behavior`.
    ///
    /// [`ResolveBehavior::Control`] always calls the producer and stores its
    /// result, even when errors are present. This is how a fallback value is
    /// produced; [`match_with`](Outcome::match_with) still takes the error
    /// branch while errors exist.
    ///
    /// ```
    /// use assertive::{Outcome, ResolveBehavior};
    ///
    /// let outcome = Outcome::new()
    ///     .assert(|a| {
    ///         a.validate("").min_length(1);
    ///     })
    ///     .resolve_as(ResolveBehavior::Control, |_| "anonymous");
    ///
    /// assert!(outcome.is_failure());
    /// assert_eq!(outcome.value(), Some(&"anonymous"));
    /// ```
    pub fn resolve_as<U, F>(self, behavior: ResolveBehavior, producer: F) -> Outcome<U>
    where
        F: FnOnce(&Self) -> U,
    {
        let fallback = behavior == ResolveBehavior::Control;
        let value = if fallback || self.is_success() {
            Some(producer(&self))
        } else {
            #[cfg(feature = "tracing")]
            tracing::debug!("resolve skipped, outcome failed");
            None
        };
        Outcome {
            ledger: self.ledger,
            value,
            fallback,
        }
    }

    /// Branch on the final state: `on_error` if any error was recorded,
    /// `on_value` with the resolved value otherwise.
    ///
    /// Each call looks at the current state, so calling it again after
    /// further changes may take the other branch.
    ///
    /// # Panics
    ///
    /// Panics with [`StateError::Unresolved`] if a typed view is error-free
    /// but no value was ever resolved into it. The untyped outcome always
    /// holds its unit value.
    ///
    /// ```
    /// use assertive::Outcome;
    ///
    /// let outcome = Outcome::new().resolve(|_| 42);
    /// let seen = outcome.match_with(|value| *value, |_| -1);
    /// assert_eq!(seen, 42);
    ///
    /// let checked = Outcome::new().assert(|a| {
    ///     a.should().satisfy(true);
    /// });
    /// assert_eq!(checked.match_with(|_| "ok", |_| "rejected"), "ok");
    /// ```
    pub fn match_with<R, V, E>(&self, on_value: V, on_error: E) -> R
    where
        V: FnOnce(&T) -> R,
        E: FnOnce(&[Error]) -> R,
    {
        let errors = self.ledger.borrow().errors.clone();
        if !errors.is_empty() {
            return on_error(&errors);
        }
        match &self.value {
            Some(value) => on_value(value),
            None => panic!("{}", StateError::Unresolved),
        }
    }

    /// The resolved value, if any.
    ///
    /// Absent while errors are recorded, unless it was produced by a
    /// [`ResolveBehavior::Control`] resolve.
    pub fn value(&self) -> Option<&T> {
        if self.is_visible() {
            self.value.as_ref()
        } else {
            None
        }
    }

    /// Consume the outcome, returning the resolved value, if any.
    ///
    /// Follows the same visibility rule as [`value`](Outcome::value).
    pub fn into_value(self) -> Option<T> {
        if self.is_visible() {
            self.value
        } else {
            None
        }
    }

    fn is_visible(&self) -> bool {
        self.fallback || self.is_success()
    }

    /// `Err` with every recorded error, or `Ok` with the value (absent if
    /// nothing was resolved).
    pub fn into_result(self) -> Result<Option<T>, Vec<Error>> {
        let errors = self.ledger.borrow().errors.clone();
        if errors.is_empty() {
            Ok(self.value)
        } else {
            Err(errors)
        }
    }

    /// Switch the value type, dropping the current value.
    ///
    /// The new outcome shares this outcome's errors and metadata.
    pub fn retype<U>(self) -> Outcome<U> {
        self.retype_with().0
    }

    /// Switch the value type, handing back the current value.
    ///
    /// ```
    /// use assertive::Outcome;
    ///
    /// let typed = Outcome::new().with_metadata("id", 9).resolve(|_| 3);
    /// let (names, count): (Outcome<String>, _) = typed.retype_with();
    ///
    /// assert_eq!(count, Some(3));
    /// assert_eq!(names.value(), None);
    /// assert_eq!(names.metadata::<i32>("id"), Some(9));
    /// ```
    pub fn retype_with<U>(self) -> (Outcome<U>, Option<T>) {
        let value = if self.is_visible() { self.value } else { None };
        let outcome = Outcome {
            ledger: self.ledger,
            value: None,
            fallback: false,
        };
        (outcome, value)
    }

    /// Another view of the same errors and metadata, without a value.
    ///
    /// Asserts and metadata written through either view are visible through
    /// both, so an error recorded through one view also hides the other
    /// view's guarded value.
    ///
    /// ```
    /// use assertive::Outcome;
    ///
    /// let outcome = Outcome::new();
    /// let audit: Outcome<u32> = outcome.share();
    /// let outcome = outcome.assert(|a| {
    ///     a.should().satisfy(false);
    /// });
    ///
    /// assert!(audit.is_failure());
    /// assert_eq!(outcome.error_count(), audit.error_count());
    /// ```
    pub fn share<U>(&self) -> Outcome<U> {
        Outcome {
            ledger: Rc::clone(&self.ledger),
            value: None,
            fallback: false,
        }
    }
}


#[cfg(all(test, feature = "tracing"))]
mod tracing_tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_logs_short_circuit() {
        Outcome::new()
            .assert(|a| {
                a.should().satisfy(false);
            })
            .assert(|_| {});
        assert!(logs_contain("assert recorded errors"));
        assert!(logs_contain("assert skipped, outcome already failed"));
    }

    #[traced_test]
    #[test]
    fn test_logs_skipped_resolve() {
        Outcome::new()
            .assert(|a| {
                a.should().satisfy(false);
            })
            .resolve(|_| 1);
        assert!(logs_contain("resolve skipped, outcome failed"));
    }

    #[traced_test]
    #[test]
    fn test_logs_caught_panic() {
        Outcome::new().assert(|a| {
            a.exception().catch(|| panic!("boom"));
        });
        assert!(logs_contain("guarded code panicked"));
    }
}
