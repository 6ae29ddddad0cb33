//! Error types for the wizard configuration pipeline.
//!
//! The pipeline distinguishes three tiers of failure:
//!
//! 1. **Skippable descriptor errors**: a single template fails
//!    introspection or is disabled. These never become a [`WizardError`];
//!    the file is skipped with a warning and the run continues.
//! 2. **Recoverable page errors**: a recognized failure while aggregating
//!    one page's configuration ([`WizardError::PageConfiguration`],
//!    [`WizardError::RecordSource`]). The page loop catches these, logs
//!    them, and lets the page contribute an empty block.
//! 3. **Everything else**: propagated to the caller unchanged. The pipeline
//!    provides no blanket suppression.
//!
//! Most functions return [`anyhow::Result`]; the page loop recognizes the
//! recoverable tier by downcasting to [`WizardError`] and consulting
//! [`WizardError::is_recoverable`].

use std::path::PathBuf;
use thiserror::Error;

/// Recognized failure categories of the fluidcontent pipeline.
#[derive(Error, Debug)]
pub enum WizardError {
    /// Aggregating the wizard configuration for a single page failed.
    ///
    /// Callers enumerating multiple root pages treat this as recoverable:
    /// the page contributes nothing and processing continues.
    #[error("wizard configuration failed for page {page_id}: {reason}")]
    PageConfiguration {
        /// Root page whose aggregation failed.
        page_id: u64,
        /// Human-readable failure description.
        reason: String,
    },

    /// The record source could not deliver configuration-template records.
    #[error("record source failed during {operation}: {reason}")]
    RecordSource {
        /// The lookup that failed (e.g. "root template enumeration").
        operation: String,
        /// Human-readable failure description.
        reason: String,
    },

    /// Template introspection rejected a template file outright.
    ///
    /// Normally surfaced as a skipped descriptor, not an error; retained as
    /// a typed variant for parser implementations that need one.
    #[error("template introspection failed for {path}: {reason}")]
    TemplateParse {
        /// The template file that failed.
        path: PathBuf,
        /// Parser-supplied failure description.
        reason: String,
    },

    /// The cache backend failed to read or write an entry.
    #[error("cache backend error: {0}")]
    Cache(String),

    /// An I/O error escaped the scanner or icon resolution.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WizardError {
    /// Whether the page-enumeration loop may contain this error and carry
    /// on with the next page.
    ///
    /// Only failures scoped to a single page's aggregation are recoverable;
    /// anything else propagates to the caller.
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::PageConfiguration { .. } | Self::RecordSource { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_configuration_is_recoverable() {
        let err = WizardError::PageConfiguration {
            page_id: 3,
            reason: "template roots unresolvable".to_string(),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_record_source_is_recoverable() {
        let err = WizardError::RecordSource {
            operation: "rootline lookup".to_string(),
            reason: "connection lost".to_string(),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_cache_and_io_propagate() {
        assert!(!WizardError::Cache("backend gone".to_string()).is_recoverable());
        let io = WizardError::from(std::io::Error::other("boom"));
        assert!(!io.is_recoverable());
    }

    #[test]
    fn test_display_includes_page_id() {
        let err = WizardError::PageConfiguration {
            page_id: 42,
            reason: "x".to_string(),
        };
        assert!(err.to_string().contains("page 42"));
    }
}
