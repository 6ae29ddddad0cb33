//! Page-TSconfig serialization.
//!
//! The aggregation side builds a typed block tree; this module is the only
//! place that turns it into text. The rendered block paths and property
//! names are a wire contract (the consuming backend parses the output
//! literally), so changes to the grammar happen here and nowhere else.

use crate::constants::CONTENT_TYPE;
use crate::wizard::{WizardElement, WizardTab};

/// Path all wizard blocks live under.
pub const WIZARD_ITEMS_PATH: &str = "mod.wizards.newContentElement.wizardItems";

/// Property assignment operators known to the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsOperator {
    /// `key = value`
    Assign,
    /// `key := addToList(value)`
    AddToList,
}

/// One property line inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProperty {
    key: String,
    value: String,
    operator: TsOperator,
}

/// A named block holding properties and nested blocks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TsBlock {
    name: String,
    properties: Vec<TsProperty>,
    children: Vec<TsBlock>,
}

impl TsBlock {
    /// Creates an empty block. `name` may be a dotted path for top-level
    /// blocks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds a `key = value` property.
    pub fn assign(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(TsProperty {
            key: key.into(),
            value: value.into(),
            operator: TsOperator::Assign,
        });
        self
    }

    /// Adds a `key := addToList(value)` property.
    pub fn add_to_list(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(TsProperty {
            key: key.into(),
            value: value.into(),
            operator: TsOperator::AddToList,
        });
        self
    }

    /// Nests `child` inside this block.
    pub fn child(mut self, child: TsBlock) -> Self {
        self.children.push(child);
        self
    }

    /// Renders the block with one tab per nesting level and a trailing
    /// newline.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = "\t".repeat(depth);
        out.push_str(&indent);
        out.push_str(&self.name);
        out.push_str(" {\n");
        for property in &self.properties {
            out.push_str(&indent);
            out.push('\t');
            match property.operator {
                TsOperator::Assign => {
                    out.push_str(&property.key);
                    out.push_str(" = ");
                    out.push_str(&property.value);
                }
                TsOperator::AddToList => {
                    out.push_str(&property.key);
                    out.push_str(" := addToList(");
                    out.push_str(&property.value);
                    out.push(')');
                }
            }
            out.push('\n');
        }
        for child in &self.children {
            child.render_into(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("}\n");
    }
}

/// Builds the property block of one wizard element.
///
/// The default-value assignments keep their declared order and are always
/// followed by the fixed `CType` discriminator and the element identity
/// reference.
pub fn element_block(tab_id: &str, element: &WizardElement) -> TsBlock {
    let mut defaults = TsBlock::new("tt_content_defValues");
    for (field, value) in &element.default_values {
        defaults = defaults.assign(field, value);
    }
    defaults = defaults
        .assign("CType", CONTENT_TYPE)
        .assign("tx_fed_fcefile", &element.identity);

    TsBlock::new(format!("{WIZARD_ITEMS_PATH}.{tab_id}.elements.{}", element.id))
        .assign("iconIdentifier", element.icon_identifier.as_deref().unwrap_or(""))
        .assign("title", &element.title)
        .assign("description", &element.description)
        .child(defaults)
}

/// Builds the declaration block of one wizard tab.
pub fn tab_block(tab: &WizardTab) -> TsBlock {
    let member_ids = tab
        .elements
        .iter()
        .map(|e| e.id.as_str())
        .collect::<Vec<_>>()
        .join(",");
    TsBlock::new(format!("{WIZARD_ITEMS_PATH}.{}", tab.id))
        .assign("header", &tab.title)
        .add_to_list("show", member_ids)
        .assign("position", "0")
        .assign("key", &tab.key)
}

/// Renders the full wizard-tab set: every element block first, then one
/// declaration block per tab, tabs in insertion order.
pub fn render_tabs(tabs: &[WizardTab]) -> String {
    let mut out = String::new();
    for tab in tabs {
        for element in &tab.elements {
            out.push_str(&element_block(&tab.id, element).render());
        }
    }
    for tab in tabs {
        out.push_str(&tab_block(tab).render());
    }
    out
}

/// Wraps one page's configuration in its page-scope guard lines.
///
/// The condition restricts the enclosed configuration to the page tree
/// rooted at `page_id`; `[GLOBAL]` ends the scope.
pub fn page_scope_block(page_id: u64, inner: &str) -> String {
    let mut out = format!("[PIDinRootline = {page_id}]\n");
    out.push_str(inner);
    if !inner.is_empty() && !inner.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("[GLOBAL]\n");
    out
}
