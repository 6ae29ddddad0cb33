//! Core types shared by the pipeline: the error taxonomy and the page scope.
//!
//! The page scope replaces the host framework's ambient "current page"
//! resolution context with an explicit immutable value threaded through
//! every pipeline call, so nothing has to be saved and restored around a
//! page's run.

pub mod error;

pub use error::WizardError;

/// The page-tree root one pipeline run is scoped to.
///
/// Template root paths, and therefore the discovered element set, may differ
/// per page tree. Passing the scope explicitly keeps a failing page from
/// affecting resolution for any other page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageScope {
    page_id: u64,
}

impl PageScope {
    /// Scope the pipeline to the page tree rooted at `page_id`.
    pub const fn new(page_id: u64) -> Self {
        Self { page_id }
    }

    /// The root page id this scope refers to.
    pub const fn page_id(&self) -> u64 {
        self.page_id
    }
}

impl std::fmt::Display for PageScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {}", self.page_id)
    }
}
