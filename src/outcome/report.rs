//! Read-only snapshot of an outcome

use std::collections::BTreeMap;
use std::fmt;

use crate::error::Error;

/// The state of an outcome at the moment [`Outcome::report`] was called.
///
/// A report owns its data, so it stays valid however the outcome changes
/// afterwards. Metadata values appear in their `Debug` rendering.
///
/// [`Outcome::report`]: crate::Outcome::report
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Report {
    success: bool,
    errors: Vec<Error>,
    metadata: BTreeMap<String, String>,
}

impl Report {
    pub(crate) fn new(errors: Vec<Error>, metadata: BTreeMap<String, String>) -> Self {
        Report {
            success: errors.is_empty(),
            errors,
            metadata,
        }
    }

    /// No errors were recorded.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// At least one error was recorded.
    pub fn is_failure(&self) -> bool {
        !self.success
    }

    /// Recorded errors in the order they occurred.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Whether any metadata was attached.
    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }

    /// Metadata keys and rendered values, ordered by key.
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.success { "Success" } else { "Failed" };
        write!(f, "Status: {}\nError(s): {}", status, self.errors.len())?;

        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        for (key, value) in &self.metadata {
            write!(f, "\n  [{}]: {}", key, value)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_success() {
        let report = Report::new(Vec::new(), BTreeMap::new());
        assert_eq!(report.to_string(), "Status: Success\nError(s): 0");
    }

    #[test]
    fn test_display_failure_lists_errors_and_metadata() {
        let mut metadata = BTreeMap::new();
        metadata.insert("request".to_string(), "7".to_string());
        let report = Report::new(vec![Error::validation("A.B", "Broken.")], metadata);

        assert_eq!(report.to_string().lines().count(), 4);
        assert_eq!(
            report.to_string(),
            "Status: Failed\nError(s): 1\n  [Validation] A.B: Broken.\n  [request]: 7"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialize_report() {
        let mut metadata = BTreeMap::new();
        metadata.insert("user".to_string(), "\"jane\"".to_string());
        let report = Report::new(vec![Error::conflict("User.Duplicate", "Taken.")], metadata);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0]["code"], "User.Duplicate");
        assert_eq!(json["metadata"]["user"], "\"jane\"");
    }
}
