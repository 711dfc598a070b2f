//! Structured errors recorded by assertions
//!
//! Every failing check produces one [`Error`]: an immutable value made of a
//! [`ErrorKind`], a short machine-readable code and a human-readable
//! description. Errors carry no identity beyond their fields, so two errors
//! with the same fields are interchangeable.
//!
//! Misuse of the API itself (asking for the first error of a clean outcome,
//! passing an inverted length range) is not recorded. It is reported through
//! [`StateError`] instead, because it is a defect in the calling code rather
//! than a property of the data being validated.
//!
//! # Examples
//!
//! ```
//! use assertive::{Error, ErrorKind};
//!
//! let err = Error::validation("Email.Validation", "Invalid email address format.");
//!
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert_eq!(err.code(), "Email.Validation");
//! assert_eq!(
//!     err.to_string(),
//!     "[Validation] Email.Validation: Invalid email address format."
//! );
//! ```

use std::borrow::Cow;
use std::fmt;

/// Codes attached to the errors produced by the built-in checks.
pub mod code {
    /// `satisfy` received `false`.
    pub const SATISFY: &str = "Assertion.Satisfy";
    /// `not_satisfy` received `true`.
    pub const NOT_SATISFY: &str = "Assertion.NotSatisfy";
    /// `null` received a present value.
    pub const NULL: &str = "Assertion.Null";
    /// `not_null` received an absent value.
    pub const NOT_NULL: &str = "Assertion.NotNull";
    /// `empty` received a collection with elements.
    pub const EMPTY: &str = "Assertion.Empty";
    /// `not_empty` received a collection without elements.
    pub const NOT_EMPTY: &str = "Assertion.NotEmpty";
    /// `equal` received different values.
    pub const EQUAL: &str = "Assertion.Equal";
    /// `not_equal` received equal values.
    pub const NOT_EQUAL: &str = "Assertion.NotEqual";
    /// `strict_equal` received values that do not compare as equal.
    pub const STRICT_EQUAL: &str = "Assertion.StrictEqual";
    /// `not_strict_equal` received values that compare as equal.
    pub const NOT_STRICT_EQUAL: &str = "Assertion.NotStrictEqual";
    /// `same` received two distinct references.
    pub const SAME: &str = "Assertion.Same";
    /// `not_same` received the same reference twice.
    pub const NOT_SAME: &str = "Assertion.NotSame";
    /// A regular-expression or length rule failed.
    pub const REGULAR_EXPRESSION: &str = "Assertion.RegularExpression";
    /// The username format check failed.
    pub const USERNAME: &str = "Username.Validation";
    /// The password strength check failed.
    pub const PASSWORD_STRENGTH: &str = "PasswordStrength.Validation";
    /// The email address format check failed.
    pub const EMAIL: &str = "Email.Validation";
    /// A guarded operation returned an error.
    pub const EXCEPTION_FAILURE: &str = "Exception.Failure";
    /// A guarded operation panicked.
    pub const EXCEPTION_UNEXPECTED: &str = "Exception.Unexpected";
}

/// The category of a recorded error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// A check against a value failed.
    Validation,
    /// An operation reported a failure.
    Failure,
    /// Something that was looked up does not exist.
    NotFound,
    /// The value conflicts with existing state.
    Conflict,
    /// A fault nobody planned for, such as a panic.
    Unexpected,
}

impl ErrorKind {
    /// Name of the kind, as used in `Display` output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "Validation",
            ErrorKind::Failure => "Failure",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::Unexpected => "Unexpected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured error produced by a failed check.
///
/// Errors are immutable once built. Codes and descriptions of the built-in
/// checks are static strings; formatted descriptions are owned.
///
/// # Examples
///
/// ```
/// use assertive::{Error, ErrorKind};
///
/// let a = Error::new(ErrorKind::Conflict, "User.Duplicate", "User already exists.");
/// let b = Error::conflict("User.Duplicate", "User already exists.");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Error {
    kind: ErrorKind,
    code: Cow<'static, str>,
    description: Cow<'static, str>,
}

impl Error {
    /// Create an error of any kind.
    pub fn new(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Error {
            kind,
            code: code.into(),
            description: description.into(),
        }
    }

    /// Create a [`ErrorKind::Validation`] error.
    pub fn validation(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Validation, code, description)
    }

    /// Create a [`ErrorKind::Failure`] error.
    pub fn failure(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Failure, code, description)
    }

    /// Create a [`ErrorKind::NotFound`] error.
    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::NotFound, code, description)
    }

    /// Create a [`ErrorKind::Conflict`] error.
    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Conflict, code, description)
    }

    /// Create a [`ErrorKind::Unexpected`] error.
    pub fn unexpected(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new(ErrorKind::Unexpected, code, description)
    }

    /// The error category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The machine-readable code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.code, self.description)
    }
}

impl std::error::Error for Error {}

/// Misuse of the pipeline API by the caller.
///
/// These never enter an outcome's error list. Accessors return them as
/// `Err`; check methods that have no error channel panic with their
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The outcome holds no errors, so there is no first or last one.
    NoErrors,
    /// The outcome is error-free but no value was ever resolved into it.
    Unresolved,
    /// A length range whose bounds are inverted or empty.
    InvalidRange {
        /// Lower bound that was passed.
        min: usize,
        /// Upper bound that was passed.
        max: usize,
    },
    /// A caller-supplied regular expression failed to compile.
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Compiler diagnostic.
        reason: String,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::NoErrors => write!(f, "outcome has no errors"),
            StateError::Unresolved => write!(f, "outcome has no value; resolve it first"),
            StateError::InvalidRange { min, max } => {
                write!(f, "invalid length range: min {} max {}", min, max)
            }
            StateError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern '{}': {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for StateError {}

#[cfg(feature = "proptest")]
mod arbitrary {
    use super::{Error, ErrorKind};
    use proptest::prelude::*;

    impl Arbitrary for ErrorKind {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            prop_oneof![
                Just(ErrorKind::Validation),
                Just(ErrorKind::Failure),
                Just(ErrorKind::NotFound),
                Just(ErrorKind::Conflict),
                Just(ErrorKind::Unexpected),
            ]
            .boxed()
        }
    }

    impl Arbitrary for Error {
        type Parameters = ();
        type Strategy = BoxedStrategy<Self>;

        fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
            (any::<ErrorKind>(), "[A-Z][a-z]{0,8}\\.[A-Z][a-z]{0,8}", ".{0,32}")
                .prop_map(|(kind, code, description)| Error::new(kind, code, description))
                .boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_kind() {
        assert_eq!(Error::validation("a", "b").kind(), ErrorKind::Validation);
        assert_eq!(Error::failure("a", "b").kind(), ErrorKind::Failure);
        assert_eq!(Error::not_found("a", "b").kind(), ErrorKind::NotFound);
        assert_eq!(Error::conflict("a", "b").kind(), ErrorKind::Conflict);
        assert_eq!(Error::unexpected("a", "b").kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn test_equal_fields_are_interchangeable() {
        let owned = Error::validation(String::from("Code"), format!("desc {}", 1));
        let borrowed = Error::validation("Code", "desc 1");
        assert_eq!(owned, borrowed);
    }

    #[test]
    fn test_display() {
        let err = Error::not_found("User.Missing", "No such user.");
        assert_eq!(err.to_string(), "[NotFound] User.Missing: No such user.");
    }

    #[test]
    fn test_state_error_display() {
        assert_eq!(StateError::NoErrors.to_string(), "outcome has no errors");
        assert_eq!(
            StateError::InvalidRange { min: 5, max: 2 }.to_string(),
            "invalid length range: min 5 max 2"
        );
    }

    #[test]
    fn test_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(Error::failure("X", "y"));
        assert_eq!(err.to_string(), "[Failure] X: y");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_shape() {
        let err = Error::validation("Email.Validation", "Invalid email address format.");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "Validation",
                "code": "Email.Validation",
                "description": "Invalid email address format."
            })
        );
        let back: Error = serde_json::from_value(json).unwrap();
        assert_eq!(back, err);
    }
}
