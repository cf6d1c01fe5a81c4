//! Shared error classification.
//!
//! Error enums live next to the code that raises them
//! ([`StatError`](crate::stats::StatError),
//! [`CatalogError`](crate::env::CatalogError)) and implement [`GameError`].
//!
//! Simulation operations themselves do not fail: unknown names, full holds
//! and bad targets log a warning and report a zero result. Errors only come
//! out of setup, when the stat table or the loaded content is inconsistent.

/// How bad an error is for the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The input names something that does not exist or is duplicated.
    /// Fix the content and retry.
    Validation,

    /// The simulation cannot start (stat table out of order, empty content).
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Implemented by every error enum of the crate.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the variant, suitable for logs.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_names() {
        assert!(ErrorSeverity::Fatal.is_fatal());
        assert!(!ErrorSeverity::Validation.is_fatal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
