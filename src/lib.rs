//! Fluidcontent: content-element wizard configuration pipeline.
//!
//! This crate discovers content-element template files registered by
//! extensions, introspects each into a typed descriptor, groups the
//! descriptors into wizard tabs, and serializes the aggregate into the
//! host CMS's nested page-TSconfig grammar, the text the backend's "new
//! content element" wizard is configured from. The whole pipeline sits
//! behind a get-or-compute cache with a tagged side channel for icon
//! registrations.
//!
//! # Architecture Overview
//!
//! The pipeline is synchronous and request-scoped. Every host-framework
//! concern is an injected capability trait, so the crate carries no
//! database, page-tree, icon or localization machinery of its own:
//!
//! ```text
//! ConfigurationService (cache orchestration, root-page enumeration)
//!   └─ per page scope:
//!        scanner   - walk template roots' Content/ directories
//!        form      - introspect templates via FormParser, tag descriptors
//!        wizard    - sort, group into tabs, resolve titles and icons
//!        tsconfig  - render the typed block tree to page TSconfig
//! ```
//!
//! A page's run is scoped by an explicit immutable [`PageScope`] value
//! instead of ambient mutable state, so a failing page can never corrupt
//! resolution for the next one.
//!
//! # Core Modules
//!
//! - [`service`] - Cache orchestration and root-page enumeration
//! - [`scanner`] - Template discovery under `Content/` directories
//! - [`form`] - Content-element descriptors and the descriptor builder
//! - [`wizard`] - Tab grouping, sorting and title resolution
//! - [`tsconfig`] - Typed block tree and the page-TSconfig renderer
//! - [`icons`] - Icon classification, registration and cache replay
//!
//! ## Capabilities and Supporting Modules
//!
//! - [`registry`] - Registered template sources ([`ConfigurationSource`])
//! - [`records`] - Configuration-template records and rootlines
//! - [`cache`] - Cache capability plus an in-memory backend
//! - [`locale`] - Label translation capability
//! - [`config`] - Extension settings (default icon, icon dimensions)
//! - [`core`] - Error taxonomy and the page scope
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use std::sync::Arc;
//! use fluidcontent::{
//!     ConfigurationService, ContentForm, ExtensionConfiguration, FormParser,
//!     IconRegistration, IconRegistrar, MemoryCache, NoLocalization, PageRecord,
//!     PageTree, RecordSource, StaticConfigurationSource, TemplateContext,
//!     TemplateRecord,
//! };
//!
//! struct HostParser;
//! impl FormParser for HostParser {
//!     fn parse(&self, _t: &Path, _c: &TemplateContext) -> anyhow::Result<Option<ContentForm>> {
//!         // Delegate to the host's template-introspection facility.
//!         Ok(None)
//!     }
//! }
//!
//! struct HostIcons;
//! impl IconRegistrar for HostIcons {
//!     fn register(&self, _r: &IconRegistration) {}
//! }
//!
//! struct HostRecords;
//! impl RecordSource for HostRecords {
//!     fn configuration_templates(&self) -> anyhow::Result<Vec<TemplateRecord>> {
//!         Ok(vec![])
//!     }
//! }
//! impl PageTree for HostRecords {
//!     fn rootline(&self, _page_id: u64) -> anyhow::Result<Vec<PageRecord>> {
//!         Ok(vec![])
//!     }
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! let records = Arc::new(HostRecords);
//! let service = ConfigurationService::new(
//!     Arc::new(StaticConfigurationSource::new(vec![ExtensionConfiguration::new(
//!         "my_ext",
//!         vec![PathBuf::from("typo3conf/ext/my_ext/Resources/Private/Templates")],
//!     )])),
//!     Arc::new(HostParser),
//!     Arc::new(NoLocalization),
//!     Arc::new(HostIcons),
//!     records.clone(),
//!     records,
//! )
//! .with_cache(Arc::new(MemoryCache::new()));
//!
//! let page_ts_config = service.page_ts_config()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! Broken or disabled templates are skipped with a warning; they
//! disappear from the wizard instead of breaking the backend. Recognized
//! page-scoped failures ([`WizardError::is_recoverable`]) cost only that
//! page's contribution; anything else propagates to the caller.

// Pipeline stages
pub mod form;
pub mod scanner;
pub mod service;
pub mod tsconfig;
pub mod wizard;

// Capabilities and supporting modules
pub mod cache;
pub mod config;
pub mod constants;
pub mod core;
pub mod icons;
pub mod locale;
pub mod records;
pub mod registry;
pub mod utils;

pub use cache::{ConfigCache, MemoryCache};
pub use config::WizardSettings;
pub use core::{PageScope, WizardError};
pub use form::{ContentElement, ContentForm, ExtensionElements, FormParser, TemplateContext};
pub use icons::{IconProviderKind, IconRegistrar, IconRegistration};
pub use locale::{Localizer, NoLocalization};
pub use records::{PageRecord, PageTree, RecordSource, TemplateRecord};
pub use registry::{ConfigurationSource, ExtensionConfiguration, StaticConfigurationSource};
pub use service::{ConfigurationService, SelectorItem};
pub use wizard::{WizardElement, WizardTab};
