//! Constants shared across the fluidcontent pipeline.
//!
//! Several of these are wire-contract literals: the generated page TSconfig
//! is parsed literally by the consuming backend, so the block paths, the
//! `CType` discriminator and the icon identifier prefix must not change.

use std::time::Duration;

/// Cache key under which the aggregated page TSconfig text is stored.
pub const PAGE_TS_CACHE_KEY: &str = "pageTsConfig";

/// Cache tag applied to every persisted icon registration so the whole set
/// can be fetched (replayed on a cache hit) or flushed in bulk.
pub const ICON_CACHE_TAG: &str = "icon";

/// Prefix for synthesized icon identifiers; the element id is appended.
pub const ICON_IDENTIFIER_PREFIX: &str = "icon-fluidcontent-";

/// Content-type discriminator written into every element's default values.
pub const CONTENT_TYPE: &str = "fluidcontent_content";

/// Group name assigned to descriptors that declare none.
pub const DEFAULT_GROUP: &str = "Content";

/// Subdirectory of each template root that is scanned for templates.
pub const TEMPLATE_SUBDIR: &str = "Content";

/// File extension of content-element template files.
pub const TEMPLATE_EXTENSION: &str = "html";

/// Nominal lifetime of the cached page TSconfig (24 hours).
pub const PAGE_TS_CACHE_TTL: Duration = Duration::from_secs(86_400);

/// Locale key prefix for wizard-tab group titles; the group name is appended
/// and the key is looked up in the contributing extension's catalog.
pub const GROUP_LABEL_PREFIX: &str = "fluidcontent.newContentWizard.group.";

/// Core catalog reference prefix used as the second tier of the tab-title
/// fallback chain. The group name is appended after the `:`.
pub const CORE_GROUP_LABEL_PREFIX: &str =
    "LLL:EXT:backend/Resources/Private/Language/locallang_db_new_content_el.xlf:";

/// Catalog scope for the core-catalog title fallback.
pub const CORE_LABEL_CATALOG: &str = "backend";

/// Default icon width, in the host's icon dimension syntax.
pub const DEFAULT_ICON_WIDTH: &str = "24m";

/// Default icon height, in the host's icon dimension syntax.
pub const DEFAULT_ICON_HEIGHT: &str = "24m";
