use crate::error::FilterError;
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Feedback for the user after a filter command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn records_found(count: usize) -> Self {
        Notification::info(format!("Found records: {count}"))
    }

    pub fn filters_cleared(count: usize) -> Self {
        Notification::info(format!("Filters cleared, showing {count} records"))
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl From<FilterError> for Notification {
    fn from(e: FilterError) -> Self {
        Notification::warning(e.to_string())
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
