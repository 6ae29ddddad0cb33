//! Configuration-template records and page-tree capabilities.
//!
//! The host stores one configuration-template record per site root. The
//! pipeline enumerates them to learn which page trees need a wizard
//! configuration block, filtering by soft-delete, visibility and the
//! record's active time window.

use anyhow::Result;

/// One configuration-template record as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRecord {
    /// Record id.
    pub uid: u64,
    /// Page the record is attached to.
    pub pid: u64,
    /// Soft-delete flag.
    pub deleted: bool,
    /// Visibility flag.
    pub hidden: bool,
    /// Unix timestamp the record becomes active at; 0 means "always was".
    pub starttime: i64,
    /// Unix timestamp the record expires at; 0 means "never".
    pub endtime: i64,
}

impl TemplateRecord {
    /// Whether the record is visible at `access_time`: not deleted, not
    /// hidden, started, and not yet ended (an endtime of 0 is open-ended).
    pub fn is_live(&self, access_time: i64) -> bool {
        !self.deleted
            && !self.hidden
            && self.starttime <= access_time
            && (self.endtime == 0 || self.endtime > access_time)
    }
}

/// One page record on a rootline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Page id.
    pub uid: u64,
    /// Parent page id; 0 at the tree root.
    pub pid: u64,
}

/// Capability fetching configuration-template records.
///
/// Implementations return records unfiltered; the pipeline applies the
/// visibility predicate itself so the time-window semantics live in one
/// place.
pub trait RecordSource {
    /// Every configuration-template record known to the host.
    fn configuration_templates(&self) -> Result<Vec<TemplateRecord>>;
}

/// Capability resolving a page's rootline (the page and its ancestors up to
/// the tree root).
pub trait PageTree {
    /// Rootline of `page_id`, ordered from the page towards the root.
    fn rootline(&self, page_id: u64) -> Result<Vec<PageRecord>>;
}
