//! Registered sources of content-element templates.
//!
//! Each extension that ships content elements registers one
//! [`ExtensionConfiguration`]: its key plus the template root paths its
//! elements live under. Template roots are defined in host configuration
//! and may differ per page tree, so the full set is supplied per
//! [`PageScope`] by a [`ConfigurationSource`].

use anyhow::Result;
use std::path::PathBuf;

use crate::core::PageScope;

/// One registered source of content-element templates.
///
/// The registered key may carry a vendor prefix (`Vendor.MyExt`); the bare
/// extension key is the part after the last dot and scopes locale catalogs
/// and tab ownership. Element ids and identities keep the registered key as
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionConfiguration {
    registered_key: String,
    template_roots: Vec<PathBuf>,
}

impl ExtensionConfiguration {
    /// Registers `registered_key` with an ordered list of template roots.
    pub fn new(registered_key: impl Into<String>, template_roots: Vec<PathBuf>) -> Self {
        Self {
            registered_key: registered_key.into(),
            template_roots,
        }
    }

    /// The key exactly as registered, vendor prefix included.
    pub fn registered_key(&self) -> &str {
        &self.registered_key
    }

    /// The bare extension key, with any `Vendor.` prefix stripped.
    pub fn extension_key(&self) -> &str {
        self.registered_key
            .rsplit('.')
            .next()
            .unwrap_or(&self.registered_key)
    }

    /// Ordered template root paths. Templates are discovered under each
    /// root's `Content/` subdirectory.
    pub fn template_roots(&self) -> &[PathBuf] {
        &self.template_roots
    }
}

/// Capability resolving the registered extension configurations visible
/// under a page scope.
pub trait ConfigurationSource {
    /// All extension template configurations active under `scope`, in
    /// registration order.
    fn content_configuration(&self, scope: PageScope) -> Result<Vec<ExtensionConfiguration>>;
}

/// A [`ConfigurationSource`] that returns the same registrations for every
/// page scope. Sufficient for hosts without per-tree template overrides,
/// and for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigurationSource {
    configurations: Vec<ExtensionConfiguration>,
}

impl StaticConfigurationSource {
    /// Builds a source over a fixed registration list.
    pub fn new(configurations: Vec<ExtensionConfiguration>) -> Self {
        Self { configurations }
    }
}

impl ConfigurationSource for StaticConfigurationSource {
    fn content_configuration(&self, _scope: PageScope) -> Result<Vec<ExtensionConfiguration>> {
        Ok(self.configurations.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_key_strips_vendor_prefix() {
        let config = ExtensionConfiguration::new("Acme.my_ext", vec![]);
        assert_eq!(config.registered_key(), "Acme.my_ext");
        assert_eq!(config.extension_key(), "my_ext");
    }

    #[test]
    fn test_extension_key_without_vendor() {
        let config = ExtensionConfiguration::new("my_ext", vec![]);
        assert_eq!(config.extension_key(), "my_ext");
    }

    #[test]
    fn test_static_source_ignores_scope() {
        let source = StaticConfigurationSource::new(vec![ExtensionConfiguration::new(
            "my_ext",
            vec![PathBuf::from("/tmp/templates")],
        )]);
        let a = source.content_configuration(PageScope::new(1)).unwrap();
        let b = source.content_configuration(PageScope::new(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }
}
