//! The configuration service: cache orchestration and root-page
//! enumeration around the wizard pipeline.
//!
//! All host capabilities are injected; the service itself is synchronous
//! and request-scoped. Cache state is decided once per call:
//!
//! - **Uncached**: no cache backend was injected (bootstrap,
//!   installation). The configuration is recomputed and never persisted.
//! - **Miss**: backend present, key absent. Recompute, persist with a
//!   24-hour lifetime; icon registrations resolved along the way are
//!   persisted under the `icon` tag.
//! - **Hit**: return the stored text and replay the tagged icon entries
//!   into the registrar, which is not persistent across requests.
//!
//! No locking happens around the cache. Two callers racing on a miss both
//! recompute and the last write wins; the value is a pure function of
//! persistent state, so the race is benign.

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::cache::ConfigCache;
use crate::config::WizardSettings;
use crate::constants::{PAGE_TS_CACHE_KEY, PAGE_TS_CACHE_TTL};
use crate::core::{PageScope, WizardError};
use crate::form::{ExtensionElements, FormParser, collect_elements};
use crate::icons::{IconRegistrar, IconResolver, replay_cached_icons};
use crate::locale::Localizer;
use crate::records::{PageTree, RecordSource, TemplateRecord};
use crate::registry::ConfigurationSource;
use crate::tsconfig::{page_scope_block, render_tabs};
use crate::wizard::build_wizard_tabs;

/// One entry of the content-type selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorItem {
    /// Divider labeled with the contributing extension's registered key.
    Divider {
        /// Registered key of the extension the following items belong to.
        group: String,
    },
    /// One selectable content element.
    Element {
        /// Display label.
        label: String,
        /// Element identity (`<registeredKey>:<relativeFile>`).
        identity: String,
        /// Declared or default icon path, if any.
        icon: Option<PathBuf>,
    },
}

/// Aggregates wizard configuration across all site roots, memoized through
/// the injected cache.
pub struct ConfigurationService {
    configuration: Arc<dyn ConfigurationSource>,
    parser: Arc<dyn FormParser>,
    localizer: Arc<dyn Localizer>,
    icons: Arc<dyn IconRegistrar>,
    records: Arc<dyn RecordSource>,
    pages: Arc<dyn PageTree>,
    cache: Option<Arc<dyn ConfigCache>>,
    settings: WizardSettings,
    access_time: Option<i64>,
}

impl ConfigurationService {
    /// Builds a service over the injected capabilities, without a cache and
    /// with default settings.
    pub fn new(
        configuration: Arc<dyn ConfigurationSource>,
        parser: Arc<dyn FormParser>,
        localizer: Arc<dyn Localizer>,
        icons: Arc<dyn IconRegistrar>,
        records: Arc<dyn RecordSource>,
        pages: Arc<dyn PageTree>,
    ) -> Self {
        Self {
            configuration,
            parser,
            localizer,
            icons,
            records,
            pages,
            cache: None,
            settings: WizardSettings::default(),
            access_time: None,
        }
    }

    /// Attaches a cache backend. Without one the service stays in the
    /// uncached state and recomputes on every call.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<dyn ConfigCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Overrides the default settings.
    #[must_use]
    pub fn with_settings(mut self, settings: WizardSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Pins the access time used for record time-window checks. Defaults
    /// to the current time; tests pin it for reproducibility.
    #[must_use]
    pub fn with_access_time(mut self, access_time: i64) -> Self {
        self.access_time = Some(access_time);
        self
    }

    fn access_time(&self) -> i64 {
        self.access_time.unwrap_or_else(|| Utc::now().timestamp())
    }

    /// Returns the aggregated page TSconfig for every site root.
    ///
    /// Serves from the cache when possible (replaying persisted icon
    /// registrations), otherwise recomputes and, when a backend is
    /// attached, persists the result.
    pub fn page_ts_config(&self) -> Result<String> {
        let cache = self.cache.as_deref();
        if let Some(cache) = cache {
            if let Some(cached) = cache.get(PAGE_TS_CACHE_KEY) {
                debug!("page TSconfig cache hit, replaying icons");
                replay_cached_icons(cache, self.icons.as_ref());
                return Ok(cached);
            }
            debug!("page TSconfig cache miss");
        } else {
            debug!("no cache backend attached, recomputing page TSconfig");
        }

        let text = self.compute_page_ts_config()?;
        if let Some(cache) = cache {
            cache.set(PAGE_TS_CACHE_KEY, &text, &[], PAGE_TS_CACHE_TTL);
        }
        Ok(text)
    }

    /// Ensures the cached configuration exists, computing it if necessary.
    ///
    /// Safe to call while the cache backend is not provisioned yet (e.g.
    /// during installation); the result is simply discarded then.
    pub fn warm_cache(&self) -> Result<()> {
        self.page_ts_config().map(|_| ())
    }

    fn compute_page_ts_config(&self) -> Result<String> {
        let records = self
            .records
            .configuration_templates()
            .context("enumerating configuration-template records")?;
        let access_time = self.access_time();

        let mut processed: HashSet<u64> = HashSet::new();
        let mut out = String::new();
        for record in records.iter().filter(|r| r.is_live(access_time)) {
            if !processed.insert(record.pid) {
                continue;
            }
            let scope = PageScope::new(record.pid);
            match self.render_page(scope) {
                Ok(block) => out.push_str(&block),
                Err(err) => {
                    let recoverable = err
                        .downcast_ref::<WizardError>()
                        .is_some_and(WizardError::is_recoverable);
                    if recoverable {
                        warn!(page_id = record.pid, %err, "page contributes no configuration");
                    } else {
                        return Err(err);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Runs the full pipeline for one page scope and wraps the result in
    /// its guard lines.
    fn render_page(&self, scope: PageScope) -> Result<String> {
        let configurations = self
            .configuration
            .content_configuration(scope)
            .with_context(|| format!("resolving template configuration for {scope}"))?;
        let collected = collect_elements(self.parser.as_ref(), &configurations, scope);
        let resolver =
            IconResolver::new(self.icons.as_ref(), self.cache.as_deref(), &self.settings);
        let tabs = build_wizard_tabs(&collected, self.localizer.as_ref(), &resolver);
        debug!(%scope, tabs = tabs.len(), "rendered wizard configuration");
        Ok(page_scope_block(scope.page_id(), &render_tabs(&tabs)))
    }

    /// Discovers and introspects every registered template under `scope`,
    /// without touching the cache.
    pub fn content_element_forms(&self, scope: PageScope) -> Result<Vec<ExtensionElements>> {
        let configurations = self
            .configuration
            .content_configuration(scope)
            .with_context(|| format!("resolving template configuration for {scope}"))?;
        Ok(collect_elements(self.parser.as_ref(), &configurations, scope))
    }

    /// Flat selector list of all enabled elements: one divider per
    /// contributing extension, followed by its elements.
    pub fn content_type_selector_items(&self, scope: PageScope) -> Result<Vec<SelectorItem>> {
        let mut items = Vec::new();
        for extension in self.content_element_forms(scope)? {
            if extension.elements.is_empty() {
                continue;
            }
            items.push(SelectorItem::Divider {
                group: extension.registered_key.clone(),
            });
            for element in &extension.elements {
                items.push(SelectorItem::Element {
                    label: element.form.label.clone(),
                    identity: element.identity.clone(),
                    icon: element
                        .form
                        .icon
                        .clone()
                        .or_else(|| self.settings.default_icon.clone()),
                });
            }
        }
        Ok(items)
    }

    /// Live configuration-template records restricted to the pages on the
    /// scope's rootline. An empty rootline yields an empty set.
    pub fn templates_in_rootline(&self, scope: PageScope) -> Result<Vec<TemplateRecord>> {
        let rootline = self
            .pages
            .rootline(scope.page_id())
            .with_context(|| format!("resolving rootline for {scope}"))?;
        let page_ids: HashSet<u64> = rootline.iter().map(|p| p.uid).collect();
        if page_ids.is_empty() {
            return Ok(Vec::new());
        }
        let access_time = self.access_time();
        let records = self
            .records
            .configuration_templates()
            .context("enumerating configuration-template records")?;
        Ok(records
            .into_iter()
            .filter(|r| r.is_live(access_time) && page_ids.contains(&r.pid))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::constants::ICON_CACHE_TAG;
    use crate::form::{ContentForm, TemplateContext};
    use crate::icons::{IconProviderKind, IconRegistration};
    use crate::locale::NoLocalization;
    use crate::records::PageRecord;
    use crate::registry::{ExtensionConfiguration, StaticConfigurationSource};
    use std::path::Path;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Parser fake: accepts every template, counts invocations.
    #[derive(Default)]
    struct CountingParser {
        calls: AtomicUsize,
    }

    impl FormParser for CountingParser {
        fn parse(&self, template: &Path, _context: &TemplateContext) -> Result<Option<ContentForm>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let label = template.file_stem().unwrap().to_string_lossy().to_string();
            Ok(Some(ContentForm {
                label,
                enabled: true,
                ..ContentForm::default()
            }))
        }
    }

    #[derive(Default)]
    struct RecordingRegistrar {
        registered: Mutex<Vec<IconRegistration>>,
    }

    impl IconRegistrar for RecordingRegistrar {
        fn register(&self, registration: &IconRegistration) {
            self.registered.lock().unwrap().push(registration.clone());
        }
    }

    struct FixedRecords(Vec<TemplateRecord>);

    impl RecordSource for FixedRecords {
        fn configuration_templates(&self) -> Result<Vec<TemplateRecord>> {
            Ok(self.0.clone())
        }
    }

    struct FixedRootline(Vec<PageRecord>);

    impl PageTree for FixedRootline {
        fn rootline(&self, _page_id: u64) -> Result<Vec<PageRecord>> {
            Ok(self.0.clone())
        }
    }

    /// Configuration source that fails for selected pages.
    struct FlakySource {
        good: Vec<ExtensionConfiguration>,
        failing_pages: Vec<u64>,
        recoverable: bool,
    }

    impl ConfigurationSource for FlakySource {
        fn content_configuration(&self, scope: PageScope) -> Result<Vec<ExtensionConfiguration>> {
            if self.failing_pages.contains(&scope.page_id()) {
                if self.recoverable {
                    return Err(WizardError::PageConfiguration {
                        page_id: scope.page_id(),
                        reason: "template roots unresolvable".to_string(),
                    }
                    .into());
                }
                anyhow::bail!("configuration backend exploded");
            }
            Ok(self.good.clone())
        }
    }

    fn live_record(uid: u64, pid: u64) -> TemplateRecord {
        TemplateRecord {
            uid,
            pid,
            deleted: false,
            hidden: false,
            starttime: 0,
            endtime: 0,
        }
    }

    fn write_template(root: &Path, relative: &str) {
        let path = root.join("Content").join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "<f:section name=\"Configuration\" />").unwrap();
    }

    struct Harness {
        service: ConfigurationService,
        parser: Arc<CountingParser>,
        registrar: Arc<RecordingRegistrar>,
        _dir: tempfile::TempDir,
    }

    fn harness(records: Vec<TemplateRecord>, cache: Option<Arc<dyn ConfigCache>>) -> Harness {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "Standard.html");
        let parser = Arc::new(CountingParser::default());
        let registrar = Arc::new(RecordingRegistrar::default());
        let configuration = Arc::new(StaticConfigurationSource::new(vec![
            ExtensionConfiguration::new("my_ext", vec![dir.path().to_path_buf()]),
        ]));
        let mut service = ConfigurationService::new(
            configuration,
            parser.clone(),
            Arc::new(NoLocalization),
            registrar.clone(),
            Arc::new(FixedRecords(records)),
            Arc::new(FixedRootline(Vec::new())),
        )
        .with_access_time(1_000);
        if let Some(cache) = cache {
            service = service.with_cache(cache);
        }
        Harness {
            service,
            parser,
            registrar,
            _dir: dir,
        }
    }

    #[test]
    fn test_uncached_state_recomputes_every_call() {
        let h = harness(vec![live_record(1, 10)], None);
        let first = h.service.page_ts_config().unwrap();
        let second = h.service.page_ts_config().unwrap();
        assert_eq!(first, second);
        assert!(first.contains("[PIDinRootline = 10]"));
        assert!(first.contains("my_ext_Standard_html"));
        // No cache: the parser ran once per call.
        assert_eq!(h.parser.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_miss_persists_then_hit_serves_from_cache() {
        let cache = Arc::new(MemoryCache::new());
        let h = harness(vec![live_record(1, 10)], Some(cache.clone()));

        let first = h.service.page_ts_config().unwrap();
        assert_eq!(cache.get(PAGE_TS_CACHE_KEY).as_deref(), Some(first.as_str()));

        let second = h.service.page_ts_config().unwrap();
        assert_eq!(first, second);
        // Hit: no second recompute.
        assert_eq!(h.parser.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hit_replays_icons_without_recompute() {
        let cache = Arc::new(MemoryCache::new());
        cache.set(PAGE_TS_CACHE_KEY, "cached text", &[], PAGE_TS_CACHE_TTL);
        for name in ["alpha", "beta"] {
            let registration = IconRegistration {
                identifier: format!("icon-fluidcontent-{name}"),
                provider: IconProviderKind::Vector,
                source: PathBuf::from(format!("/icons/{name}.svg")),
                width: "24m".to_string(),
                height: "24m".to_string(),
            };
            cache.set(
                &registration.identifier,
                &serde_json::to_string(&registration).unwrap(),
                &[ICON_CACHE_TAG],
                PAGE_TS_CACHE_TTL,
            );
        }

        let h = harness(vec![live_record(1, 10)], Some(cache));
        let text = h.service.page_ts_config().unwrap();
        assert_eq!(text, "cached text");
        assert_eq!(h.parser.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.registrar.registered.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_duplicate_and_dead_records_are_skipped() {
        let records = vec![
            live_record(1, 10),
            live_record(2, 10), // duplicate pid, first wins
            TemplateRecord {
                hidden: true,
                ..live_record(3, 20)
            },
            TemplateRecord {
                starttime: 5_000,
                ..live_record(4, 30)
            },
        ];
        let h = harness(records, None);
        let text = h.service.page_ts_config().unwrap();
        assert_eq!(text.matches("[PIDinRootline = 10]").count(), 1);
        assert!(!text.contains("[PIDinRootline = 20]"));
        assert!(!text.contains("[PIDinRootline = 30]"));
    }

    fn flaky_service(recoverable: bool) -> (ConfigurationService, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path(), "Standard.html");
        let configuration = Arc::new(FlakySource {
            good: vec![ExtensionConfiguration::new(
                "my_ext",
                vec![dir.path().to_path_buf()],
            )],
            failing_pages: vec![10],
            recoverable,
        });
        let service = ConfigurationService::new(
            configuration,
            Arc::new(CountingParser::default()),
            Arc::new(NoLocalization),
            Arc::new(RecordingRegistrar::default()),
            Arc::new(FixedRecords(vec![live_record(1, 10), live_record(2, 20)])),
            Arc::new(FixedRootline(Vec::new())),
        )
        .with_access_time(1_000);
        (service, dir)
    }

    #[test]
    fn test_recoverable_page_failure_contributes_nothing() {
        let (service, _dir) = flaky_service(true);
        let text = service.page_ts_config().unwrap();
        // The failing page is absent entirely; the next page still renders.
        assert!(!text.contains("[PIDinRootline = 10]"));
        assert!(text.contains("[PIDinRootline = 20]"));
        assert!(text.contains("my_ext_Standard_html"));
    }

    #[test]
    fn test_unrecognized_failure_propagates() {
        let (service, _dir) = flaky_service(false);
        let err = service.page_ts_config().unwrap_err();
        assert!(err.to_string().contains("page 10"));
    }

    #[test]
    fn test_successful_empty_page_still_gets_guard_block() {
        let dir = tempfile::tempdir().unwrap();
        // No templates on disk at all.
        let service = ConfigurationService::new(
            Arc::new(StaticConfigurationSource::new(vec![
                ExtensionConfiguration::new("my_ext", vec![dir.path().join("missing")]),
            ])),
            Arc::new(CountingParser::default()),
            Arc::new(NoLocalization),
            Arc::new(RecordingRegistrar::default()),
            Arc::new(FixedRecords(vec![live_record(1, 10)])),
            Arc::new(FixedRootline(Vec::new())),
        )
        .with_access_time(1_000);
        let text = service.page_ts_config().unwrap();
        assert_eq!(text, "[PIDinRootline = 10]\n[GLOBAL]\n");
    }

    #[test]
    fn test_templates_in_rootline_filters_by_rootline_pages() {
        let rootline = vec![
            PageRecord { uid: 5, pid: 2 },
            PageRecord { uid: 2, pid: 1 },
            PageRecord { uid: 1, pid: 0 },
        ];
        let records = vec![
            live_record(1, 1),
            live_record(2, 3), // not on the rootline
            TemplateRecord {
                hidden: true,
                ..live_record(3, 2)
            },
        ];
        let service = ConfigurationService::new(
            Arc::new(StaticConfigurationSource::new(Vec::new())),
            Arc::new(CountingParser::default()),
            Arc::new(NoLocalization),
            Arc::new(RecordingRegistrar::default()),
            Arc::new(FixedRecords(records)),
            Arc::new(FixedRootline(rootline)),
        )
        .with_access_time(1_000);

        let found = service.templates_in_rootline(PageScope::new(5)).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].uid, 1);
    }

    #[test]
    fn test_empty_rootline_yields_no_templates() {
        let h = harness(vec![live_record(1, 10)], None);
        let found = h.service.templates_in_rootline(PageScope::new(5)).unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_selector_items_divider_then_elements() {
        let h = harness(vec![live_record(1, 10)], None);
        let items = h
            .service
            .content_type_selector_items(PageScope::new(10))
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            SelectorItem::Divider {
                group: "my_ext".to_string()
            }
        );
        match &items[1] {
            SelectorItem::Element { label, identity, icon } => {
                assert_eq!(label, "Standard");
                assert_eq!(identity, "my_ext:Standard.html");
                assert!(icon.is_none());
            }
            other => panic!("expected element, got {other:?}"),
        }
    }
}
