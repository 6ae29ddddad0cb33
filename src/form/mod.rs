//! Content-element descriptors and the descriptor builder.
//!
//! A template file by itself says nothing about the element it defines;
//! the injected [`FormParser`] capability introspects it and returns a
//! [`ContentForm`]. The builder here walks every registered template root,
//! runs the parser over each discovered file, and tags accepted forms with
//! their derived id and element identity. Files without a form, disabled
//! forms and parser failures are skipped with a warning: a broken template
//! silently disappears from the wizard instead of breaking the backend.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::core::PageScope;
use crate::registry::ExtensionConfiguration;
use crate::scanner::find_content_templates;
use crate::utils::sanitize_identifier;

/// One content-element descriptor as returned by template introspection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContentForm {
    /// Display label of the element.
    pub label: String,
    /// Wizard description text.
    pub description: String,
    /// Wizard tab group; `None` falls back to the default group.
    pub group: Option<String>,
    /// Sort value within the extension's element set. Compared numerically
    /// when possible, lexicographically otherwise; absent sorts first.
    pub sorting: Option<String>,
    /// Disabled forms are excluded before grouping.
    pub enabled: bool,
    /// Ordered default field values for new records.
    pub default_values: Vec<(String, String)>,
    /// Icon source path declared by the template, if any.
    pub icon: Option<PathBuf>,
}

/// Context handed to the parser alongside the template path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateContext {
    /// Extension key as registered (vendor prefix included).
    pub registered_key: String,
    /// Bare extension key.
    pub extension_key: String,
    /// Template path relative to the `Content/` directory.
    pub relative: String,
    /// Page scope of the current pipeline run.
    pub scope: PageScope,
}

/// Template-introspection capability.
///
/// `Ok(None)` means the file defines no content element; `Err` means the
/// parser could not process it at all. Both lead to the file being skipped.
pub trait FormParser {
    /// Introspects `template` and returns its form, if it defines one.
    fn parse(&self, template: &Path, context: &TemplateContext) -> Result<Option<ContentForm>>;
}

/// An accepted descriptor, tagged for downstream use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentElement {
    /// Stable id, unique within one aggregation run. Derived by sanitizing
    /// `<registeredKey>/<relativeFile>`.
    pub id: String,
    /// Opaque identity `<registeredKey>:<relativeFile>`, resolved by the
    /// renderer at content-display time.
    pub identity: String,
    /// Extension key as registered.
    pub registered_key: String,
    /// Bare extension key (locale catalogs, tab ownership).
    pub extension_key: String,
    /// The introspected form.
    pub form: ContentForm,
}

/// All accepted elements of one registered extension, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionElements {
    /// Extension key as registered.
    pub registered_key: String,
    /// Bare extension key.
    pub extension_key: String,
    /// Accepted elements in template discovery order.
    pub elements: Vec<ContentElement>,
}

/// Discovers and introspects every template of every registered extension.
///
/// Per-extension results keep registration order; elements keep discovery
/// order. Skipped files (no form, disabled, parser error) are logged at
/// warn level and never abort the run.
pub fn collect_elements(
    parser: &dyn FormParser,
    configurations: &[ExtensionConfiguration],
    scope: PageScope,
) -> Vec<ExtensionElements> {
    let mut collected = Vec::with_capacity(configurations.len());
    for configuration in configurations {
        let mut elements = Vec::new();
        for root in configuration.template_roots() {
            for template in find_content_templates(root) {
                let context = TemplateContext {
                    registered_key: configuration.registered_key().to_string(),
                    extension_key: configuration.extension_key().to_string(),
                    relative: template.relative.clone(),
                    scope,
                };
                let form = match parser.parse(&template.path, &context) {
                    Ok(Some(form)) => form,
                    Ok(None) => {
                        warn!(template = %template.path.display(), "template defines no content element, skipping");
                        continue;
                    }
                    Err(err) => {
                        warn!(template = %template.path.display(), %err, "template introspection failed, skipping");
                        continue;
                    }
                };
                if !form.enabled {
                    warn!(template = %template.path.display(), "content element is disabled, skipping");
                    continue;
                }
                elements.push(ContentElement {
                    id: element_id(configuration.registered_key(), &template.relative),
                    identity: element_identity(configuration.registered_key(), &template.relative),
                    registered_key: configuration.registered_key().to_string(),
                    extension_key: configuration.extension_key().to_string(),
                    form,
                });
            }
        }
        collected.push(ExtensionElements {
            registered_key: configuration.registered_key().to_string(),
            extension_key: configuration.extension_key().to_string(),
            elements,
        });
    }
    collected
}

/// Derived element id: sanitized `<registeredKey>/<relativeFile>`.
pub fn element_id(registered_key: &str, relative: &str) -> String {
    sanitize_identifier(&format!("{registered_key}/{relative}"))
}

/// Element identity `<registeredKey>:<relativeFile>`, the reference the
/// rendering side uses to find the template again.
pub fn element_identity(registered_key: &str, relative: &str) -> String {
    format!("{registered_key}:{relative}")
}
