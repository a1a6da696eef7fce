//! Menu assembly and rendering.
//!
//! A menu collects flat item registrations keyed by parent and priority,
//! reassembles them into a tree on demand, and serializes that tree into
//! nested markup. Rendering performs no output escaping; callers exposing
//! user-controlled text or attributes must escape upstream.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{MenuError, MenuResult};
use crate::item::{Attributes, Item, ItemConfig, ItemName, Tree};

/// Per-menu rendering defaults.
///
/// Item-level overrides take precedence field-by-field; an empty override
/// still falls back to these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Tag wrapped around each item (default `li`).
    pub item_tag: String,

    /// Attributes on each item container.
    pub item_attributes: Attributes,

    /// Tag wrapped around each child block and the outermost list (default `ul`).
    pub subitem_tag: String,

    /// Attributes on child-block wrappers and the outermost list.
    pub subitem_attributes: Attributes,

    /// Attributes on each anchor.
    pub href_attributes: Attributes,

    /// Class appended to an active item's container (default `active`).
    pub active_class: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_tag: "li".to_string(),
            item_attributes: Attributes::new(),
            subitem_tag: "ul".to_string(),
            subitem_attributes: Attributes::new(),
            href_attributes: Attributes::new(),
            active_class: "active".to_string(),
        }
    }
}

/// Outermost-wrapper overrides for a single render call.
///
/// Presence decides here: `Some` wins even when the value is empty, unlike
/// the item-level fallback which treats empty overrides as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOverrides {
    /// Tag for the outermost wrapper.
    pub subitem_tag: Option<String>,

    /// Attributes for the outermost wrapper.
    pub subitem_attributes: Option<Attributes>,
}

/// A named navigation: flat item registrations, an active-name list, and the
/// logic to assemble and render them as a tree.
#[derive(Debug, Clone)]
pub struct Menu {
    name: String,
    /// Parent name (`None` = top level) → priority → items in registration order.
    registrations: HashMap<Option<String>, BTreeMap<i32, Vec<Item>>>,
    /// Names with a live registration entry.
    registered: HashSet<String>,
    /// Active item names in marking order; duplicates possible via `add_active`.
    active: Vec<String>,
    config: MenuConfig,
}

impl Menu {
    /// Create a menu with the given configuration.
    pub fn new(name: impl Into<String>, config: MenuConfig) -> Self {
        Self {
            name: name.into(),
            registrations: HashMap::new(),
            registered: HashSet::new(),
            active: Vec::new(),
            config,
        }
    }

    /// Menu name, the identity of its registry entry.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendering defaults for this menu.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Register an item into this menu.
    ///
    /// Fails without mutating the menu when the name is already registered or
    /// the declared parent has no registration yet (registration order
    /// matters: parents must be registered before their children).
    pub fn register_item(&mut self, item: Item) -> MenuResult<()> {
        if self.registered.contains(item.name()) {
            return Err(MenuError::DuplicateItem {
                name: item.name().to_owned(),
            });
        }

        if let Some(parent) = item.parent()
            && !self.registered.contains(parent)
        {
            return Err(MenuError::UnknownParent {
                name: item.name().to_owned(),
                parent: parent.to_owned(),
            });
        }

        debug!(
            menu = %self.name,
            item = %item.name(),
            priority = item.priority(),
            "registered menu item"
        );

        self.registered.insert(item.name().to_owned());
        let parent = item.parent().map(str::to_owned);
        self.registrations
            .entry(parent)
            .or_default()
            .entry(item.priority())
            .or_default()
            .push(item);

        Ok(())
    }

    /// Register a batch of items from a JSON array of configuration records.
    ///
    /// The array is parsed as a whole, then items register in array order.
    /// Items before a failing entry stay registered; the atomic unit is the
    /// single registration. Returns the number of registered items.
    pub fn register_json(&mut self, json: &str) -> MenuResult<usize> {
        let configs: Vec<ItemConfig> = serde_json::from_str(json)?;
        let count = configs.len();
        for config in configs {
            self.register_item(Item::new(config))?;
        }
        Ok(count)
    }

    /// Remove a single registration by name, returning whether one existed.
    ///
    /// Children of the removed item are orphaned, not cascaded: their
    /// registration entries remain but tree assembly can no longer reach them.
    pub fn unregister_item(&mut self, item: impl ItemName) -> bool {
        let name = item.item_name();
        if !self.registered.contains(name) {
            return false;
        }

        for buckets in self.registrations.values_mut() {
            for items in buckets.values_mut() {
                if let Some(index) = items.iter().position(|entry| entry.name() == name) {
                    items.remove(index);
                    self.registered.remove(name);
                    debug!(menu = %self.name, item = %name, "unregistered menu item");
                    return true;
                }
            }
        }

        false
    }

    /// Whether `item` has a live registration in this menu.
    pub fn has_item(&self, item: impl ItemName) -> bool {
        self.registered.contains(item.item_name())
    }

    /// Make `item` the only active item.
    ///
    /// An unregistered name leaves the active list unchanged. Returns a copy
    /// of the resulting list.
    pub fn set_active(&mut self, item: impl ItemName) -> Vec<String> {
        let name = item.item_name();
        if self.registered.contains(name) {
            self.active = vec![name.to_owned()];
        }
        self.active.clone()
    }

    /// Append `item` to the active list.
    ///
    /// The append is unconditional for registered names, so repeated calls
    /// with one name duplicate it. Unregistered names are a silent no-op.
    pub fn add_active(&mut self, item: impl ItemName) -> Vec<String> {
        let name = item.item_name();
        if self.registered.contains(name) {
            self.active.push(name.to_owned());
        }
        self.active.clone()
    }

    /// Clear the active list.
    pub fn clear_active(&mut self) -> Vec<String> {
        self.active.clear();
        self.active.clone()
    }

    /// Whether `item` is currently marked active.
    pub fn is_active(&self, item: impl ItemName) -> bool {
        let name = item.item_name();
        self.active.iter().any(|active| active == name)
    }

    /// Active item names in marking order.
    pub fn active(&self) -> &[String] {
        &self.active
    }

    /// Assemble the navigation tree from the flat registrations.
    ///
    /// The tree is ephemeral: items are cloned out of the registrations,
    /// active flags are set on the clones, and every call recomputes from
    /// scratch.
    pub fn build(&self) -> Tree {
        let tree = self.build_level(None);
        trace!(menu = %self.name, groups = tree.len(), "assembled navigation tree");
        tree
    }

    fn build_level(&self, parent: Option<String>) -> Tree {
        let Some(buckets) = self.registrations.get(&parent) else {
            return Tree::new();
        };

        let mut level = Tree::with_capacity(buckets.len());
        for items in buckets.values() {
            let mut group = Vec::with_capacity(items.len());
            for registration in items {
                let mut item = registration.clone();
                if self.is_active(&item) {
                    item.set_active();
                }

                // An item anchors children through its own name as a bucket
                // key, even when every child bucket has since been emptied.
                let key = Some(item.name().to_owned());
                if self.registrations.contains_key(&key) {
                    item.set_children(self.build_level(key));
                }

                group.push(item);
            }
            level.push(group);
        }

        level
    }

    /// Render with the menu's own configuration for the outermost wrapper.
    pub fn render(&self) -> String {
        self.render_with(&RenderOverrides::default())
    }

    /// Rebuild the tree and serialize it as nested markup.
    ///
    /// A menu with no top-level priority groups renders as the empty string.
    pub fn render_with(&self, overrides: &RenderOverrides) -> String {
        let tree = self.build();
        if tree.is_empty() {
            return String::new();
        }

        let tag = overrides
            .subitem_tag
            .as_deref()
            .unwrap_or(&self.config.subitem_tag);
        let attributes = overrides
            .subitem_attributes
            .as_ref()
            .unwrap_or(&self.config.subitem_attributes);

        let body = self.render_level(&tree);
        trace!(menu = %self.name, bytes = body.len(), "rendered navigation");

        format!("<{tag}{}>{body}</{tag}>", serialize_attributes(attributes))
    }

    fn render_level(&self, level: &[Vec<Item>]) -> String {
        let mut markup = String::new();
        for group in level {
            for item in group {
                markup.push_str(&self.render_item(item));
            }
        }
        markup
    }

    fn render_item(&self, item: &Item) -> String {
        let config = &self.config;
        let item_tag = fallback_tag(item.item_tag(), &config.item_tag);
        let item_attributes =
            fallback_attributes(item.item_attributes(), &config.item_attributes);
        let subitem_tag = fallback_tag(item.subitem_tag(), &config.subitem_tag);
        let subitem_attributes =
            fallback_attributes(item.subitem_attributes(), &config.subitem_attributes);
        let href_attributes =
            fallback_attributes(item.href_attributes(), &config.href_attributes);

        // Children come first; the active-class mutation below touches only
        // this item's own container.
        let children_markup = item
            .children()
            .filter(|children| !children.is_empty())
            .map(|children| self.render_level(children));

        let mut item_attributes = item_attributes.clone();
        if item.is_active() {
            match item_attributes.get_mut("class") {
                Some(class) => {
                    class.push(' ');
                    class.push_str(&config.active_class);
                }
                None => {
                    item_attributes.insert("class".to_owned(), config.active_class.clone());
                }
            }
        }

        let mut content = format!(
            "<a href=\"{}\"{}>{}</a>",
            item.href().unwrap_or(""),
            serialize_attributes(href_attributes),
            item.text(),
        );

        if let Some(children) = children_markup {
            let _ = write!(
                content,
                "<{subitem_tag}{}>{children}</{subitem_tag}>",
                serialize_attributes(subitem_attributes),
            );
        }

        format!(
            "<{item_tag}{}>{content}</{item_tag}>",
            serialize_attributes(&item_attributes),
        )
    }
}

/// Item overrides win only when non-empty; an empty override still falls
/// back to the menu default.
fn fallback_tag<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(tag) if !tag.is_empty() => tag,
        _ => default,
    }
}

fn fallback_attributes<'a>(
    value: Option<&'a Attributes>,
    default: &'a Attributes,
) -> &'a Attributes {
    match value {
        Some(attributes) if !attributes.is_empty() => attributes,
        _ => default,
    }
}

/// Space-prefixed ` key="value"` pairs in insertion order, values verbatim.
fn serialize_attributes(attributes: &Attributes) -> String {
    let mut serialized = String::new();
    for (key, value) in attributes {
        let _ = write!(serialized, " {key}=\"{value}\"");
    }
    serialized
}
