//! Translating failures of guarded code into recorded errors

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use super::Assertion;
use crate::error::{code, Error};

/// Runs code that may fail and records the failure instead of propagating it.
///
/// Obtained from [`Assertion::exception`].
///
/// # Example
///
/// ```
/// use assertive::{ErrorKind, Outcome};
///
/// let outcome = Outcome::new().assert(|a| {
///     let port = a.exception().capture(|| "80x".parse::<u16>());
///     assert!(port.is_none());
/// });
///
/// let error = outcome.first_error().unwrap();
/// assert_eq!(error.kind(), ErrorKind::Failure);
/// assert_eq!(error.description(), "invalid digit found in string");
/// ```
#[derive(Debug)]
pub struct Guard<'a> {
    assertion: &'a mut Assertion,
}

impl<'a> Guard<'a> {
    pub(super) fn new(assertion: &'a mut Assertion) -> Self {
        Guard { assertion }
    }

    /// Run `f`, recording an `Exception.Failure` error if it returns `Err`.
    ///
    /// The error's `Display` output becomes the description.
    pub fn capture<T, E, F>(self, f: F) -> Option<T>
    where
        E: Display,
        F: FnOnce() -> Result<T, E>,
    {
        match f() {
            Ok(value) => Some(value),
            Err(err) => {
                self.assertion
                    .fail(Error::failure(code::EXCEPTION_FAILURE, err.to_string()));
                None
            }
        }
    }

    /// Run `f`, recording an `Exception.Unexpected` error if it panics.
    ///
    /// The panic is caught, so the rest of the pipeline keeps running. The
    /// global panic hook still fires.
    pub fn catch<T, F>(self, f: F) -> Option<T>
    where
        F: FnOnce() -> T,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(value) => Some(value),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                #[cfg(feature = "tracing")]
                tracing::warn!(message = %message, "guarded code panicked");
                self.assertion
                    .fail(Error::unexpected(code::EXCEPTION_UNEXPECTED, message));
                None
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_capture_ok_returns_value() {
        let mut a = Assertion::new();
        let value = a.exception().capture(|| Ok::<_, String>(5));
        assert_eq!(value, Some(5));
        assert!(!a.has_failed());
    }

    #[test]
    fn test_capture_err_records_failure() {
        let mut a = Assertion::new();
        let value = a
            .exception()
            .capture(|| Err::<i32, _>(std::io::Error::other("disk full")));
        assert_eq!(value, None);
        assert_eq!(
            a.errors(),
            &[Error::failure(code::EXCEPTION_FAILURE, "disk full")]
        );
    }

    #[test]
    fn test_catch_records_panic() {
        let mut a = Assertion::new();
        let value: Option<i32> = a.exception().catch(|| panic!("index out of range"));
        assert_eq!(value, None);
        assert_eq!(a.errors()[0].kind(), ErrorKind::Unexpected);
        assert_eq!(a.errors()[0].description(), "index out of range");
    }

    #[test]
    fn test_catch_formatted_panic() {
        let mut a = Assertion::new();
        a.exception().catch(|| panic!("bad value {}", 3));
        assert_eq!(a.errors()[0].description(), "bad value 3");
    }

    #[test]
    fn test_catch_without_panic() {
        let mut a = Assertion::new();
        assert_eq!(a.exception().catch(|| 1 + 1), Some(2));
        assert!(!a.has_failed());
    }
}
