//! Menu item value object and its construction record.
//!
//! An item is immutable once registered. Tree assembly flips the active flag
//! and attaches children on the clones it places in the assembled tree, never
//! on the stored registrations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Insertion-ordered attribute map, serialized as ` key="value"` pairs.
pub type Attributes = IndexMap<String, String>;

/// One assembled level of a navigation tree: priority groups in ascending
/// priority order, each holding the items registered at that exact priority
/// in registration order.
pub type Tree = Vec<Vec<Item>>;

/// Addresses a registered item either by name or by the item itself.
pub trait ItemName {
    /// The item name to look up.
    fn item_name(&self) -> &str;
}

impl ItemName for str {
    fn item_name(&self) -> &str {
        self
    }
}

impl ItemName for String {
    fn item_name(&self) -> &str {
        self
    }
}

impl ItemName for Item {
    fn item_name(&self) -> &str {
        self.name()
    }
}

impl<T: ItemName + ?Sized> ItemName for &T {
    fn item_name(&self) -> &str {
        (**self).item_name()
    }
}

/// Construction record for [`Item`], merged over the documented defaults.
///
/// Deserializes from the same JSON shape external producers describe menus
/// with: missing keys take the defaults (priority 500, top-level parent,
/// menu-level tags and attributes) and unrecognized keys are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    /// Unique name within the owning menu. Required, non-empty.
    pub name: String,

    /// Display label for the anchor.
    pub text: String,

    /// Link target; `None` renders an empty `href`.
    pub href: Option<String>,

    /// Sibling ordering key, ascending; lower renders first.
    pub priority: i32,

    /// Name of the owning item; `None` means top level.
    pub parent: Option<String>,

    /// Container tag override; empty or absent falls back to the menu config.
    pub item_tag: Option<String>,

    /// Container attribute override.
    pub item_attributes: Option<Attributes>,

    /// Child-wrapper tag override.
    pub subitem_tag: Option<String>,

    /// Child-wrapper attribute override.
    pub subitem_attributes: Option<Attributes>,

    /// Anchor attribute override.
    pub href_attributes: Option<Attributes>,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            text: String::new(),
            href: None,
            priority: 500,
            parent: None,
            item_tag: None,
            item_attributes: None,
            subitem_tag: None,
            subitem_attributes: None,
            href_attributes: None,
        }
    }
}

/// A single navigation entry.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    name: String,
    text: String,
    href: Option<String>,
    priority: i32,
    parent: Option<String>,
    item_tag: Option<String>,
    item_attributes: Option<Attributes>,
    subitem_tag: Option<String>,
    subitem_attributes: Option<Attributes>,
    href_attributes: Option<Attributes>,
    active: bool,
    children: Option<Tree>,
}

impl Item {
    /// Build an item from its configuration record.
    pub fn new(config: ItemConfig) -> Self {
        Self {
            name: config.name,
            text: config.text,
            href: config.href,
            priority: config.priority,
            parent: config.parent,
            item_tag: config.item_tag,
            item_attributes: config.item_attributes,
            subitem_tag: config.subitem_tag,
            subitem_attributes: config.subitem_attributes,
            href_attributes: config.href_attributes,
            active: false,
            children: None,
        }
    }

    /// Unique name within the owning menu.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label for the anchor.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Link target.
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Sibling ordering key; lower renders first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Name of the owning item; `None` means top level.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Container tag override.
    pub fn item_tag(&self) -> Option<&str> {
        self.item_tag.as_deref()
    }

    /// Container attribute override.
    pub fn item_attributes(&self) -> Option<&Attributes> {
        self.item_attributes.as_ref()
    }

    /// Child-wrapper tag override.
    pub fn subitem_tag(&self) -> Option<&str> {
        self.subitem_tag.as_deref()
    }

    /// Child-wrapper attribute override.
    pub fn subitem_attributes(&self) -> Option<&Attributes> {
        self.subitem_attributes.as_ref()
    }

    /// Anchor attribute override.
    pub fn href_attributes(&self) -> Option<&Attributes> {
        self.href_attributes.as_ref()
    }

    /// Whether tree assembly marked this item active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Child levels attached by tree assembly.
    pub fn children(&self) -> Option<&Tree> {
        self.children.as_ref()
    }

    /// Whether the transient children sequence is present and non-empty.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|children| !children.is_empty())
    }

    /// One-way transition applied by tree assembly. An item falls out of the
    /// active state by never being re-marked on the next build.
    pub(crate) fn set_active(&mut self) {
        self.active = true;
    }

    pub(crate) fn set_children(&mut self, children: Tree) {
        self.children = Some(children);
    }
}

impl From<ItemConfig> for Item {
    fn from(config: ItemConfig) -> Self {
        Self::new(config)
    }
}
