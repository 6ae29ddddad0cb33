//! Wizard-tab grouping, sorting and title resolution.
//!
//! Takes the per-extension element sets from the descriptor builder, sorts
//! each set by its declared sort value, and distributes the elements into
//! named tabs. Tab titles go through a three-tier fallback so a tab never
//! renders without one.

use std::cmp::Ordering;

use crate::constants::{
    CORE_GROUP_LABEL_PREFIX, CORE_LABEL_CATALOG, DEFAULT_GROUP, GROUP_LABEL_PREFIX,
};
use crate::form::{ContentElement, ExtensionElements};
use crate::icons::IconResolver;
use crate::locale::Localizer;
use crate::utils::sanitize_identifier;

/// One element as it appears in a wizard tab, icon already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardElement {
    /// Element id, unique within the run.
    pub id: String,
    /// Synthesized icon identifier, when an icon file resolved on disk.
    pub icon_identifier: Option<String>,
    /// Display title.
    pub title: String,
    /// Wizard description text.
    pub description: String,
    /// Ordered default field values.
    pub default_values: Vec<(String, String)>,
    /// Element identity reference (`<registeredKey>:<relativeFile>`).
    pub identity: String,
}

/// A named group of wizard elements.
///
/// Elements keep the order they were assigned in (sorted within each
/// extension, extensions in registration order). When several extensions
/// contribute to the same group, `title` and `key` reflect the last
/// contributor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardTab {
    /// Tab id, a valid TSconfig path segment.
    pub id: String,
    /// Localized tab title; never empty.
    pub title: String,
    /// Owning extension key as registered.
    pub key: String,
    /// Member elements in assignment order.
    pub elements: Vec<WizardElement>,
}

/// Maps a group name to its tab id.
///
/// The default group and group names already in lowercase-slug form keep
/// their name; everything else is prefixed with `group_` and sanitized so
/// the id is always a valid path segment.
pub fn tab_identifier(group: &str) -> String {
    let is_slug = !group.is_empty()
        && group
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if group == DEFAULT_GROUP || is_slug {
        group.to_string()
    } else {
        format!("group_{}", sanitize_identifier(group))
    }
}

/// Resolves a tab title through the three-tier fallback chain:
/// extension-catalog label, then core-catalog label (rejecting the
/// no-translation sentinel of the key echoed back), then the raw group
/// name. Empty translations count as misses, so a title is never empty.
pub fn resolve_tab_title(localizer: &dyn Localizer, group: &str, extension_key: &str) -> String {
    if let Some(title) = localizer.translate(&format!("{GROUP_LABEL_PREFIX}{group}"), extension_key)
    {
        if !title.is_empty() {
            return title;
        }
    }
    let core_key = format!("{CORE_GROUP_LABEL_PREFIX}{group}");
    if let Some(title) = localizer.translate(&core_key, CORE_LABEL_CATALOG) {
        if !title.is_empty() && title != core_key {
            return title;
        }
    }
    group.to_string()
}

/// Groups the collected elements into wizard tabs.
///
/// Each extension's element set is stable-sorted by sort value first, so
/// ties keep discovery order; grouping itself preserves the sorted order.
/// Tabs appear in first-contribution order.
pub fn build_wizard_tabs(
    extensions: &[ExtensionElements],
    localizer: &dyn Localizer,
    icons: &IconResolver<'_>,
) -> Vec<WizardTab> {
    let mut tabs: Vec<WizardTab> = Vec::new();
    for extension in extensions {
        let mut elements: Vec<&ContentElement> = extension.elements.iter().collect();
        elements.sort_by(|a, b| {
            compare_sort_values(
                a.form.sorting.as_deref().unwrap_or(""),
                b.form.sorting.as_deref().unwrap_or(""),
            )
        });
        for element in elements {
            let group = element.form.group.as_deref().unwrap_or(DEFAULT_GROUP);
            let tab_id = tab_identifier(group);
            let title = resolve_tab_title(localizer, group, &element.extension_key);
            let icon_identifier = icons.resolve(&element.id, element.form.icon.as_deref());

            let index = match tabs.iter().position(|t| t.id == tab_id) {
                Some(index) => index,
                None => {
                    tabs.push(WizardTab {
                        id: tab_id,
                        title: String::new(),
                        key: String::new(),
                        elements: Vec::new(),
                    });
                    tabs.len() - 1
                }
            };
            let tab = &mut tabs[index];
            // Last contributor wins for title and owning key, matching the
            // observed multi-extension behavior.
            tab.title = title;
            tab.key = element.registered_key.clone();
            tab.elements.push(WizardElement {
                id: element.id.clone(),
                icon_identifier,
                title: element.form.label.clone(),
                description: element.form.description.clone(),
                default_values: element.form.default_values.clone(),
                identity: element.identity.clone(),
            });
        }
    }
    tabs
}

/// Ascending comparison of sort values: numeric when both parse as
/// numbers, lexicographic otherwise.
fn compare_sort_values(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}
