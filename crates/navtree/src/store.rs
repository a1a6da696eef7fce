//! Named menu registry.

use std::collections::HashMap;

use tracing::debug;

use crate::error::MenuResult;
use crate::item::{Item, ItemName};
use crate::menu::{Menu, MenuConfig, RenderOverrides};

/// Named registry of menus with get-or-create semantics.
///
/// The store is an explicit owned value rather than process-global state: the
/// embedding application decides its scope, and a concurrent host wraps it in
/// its own mutual-exclusion boundary (the store itself is single-threaded).
/// Tests instantiate isolated stores.
#[derive(Debug, Clone, Default)]
pub struct MenuStore {
    menus: HashMap<String, Menu>,
}

impl MenuStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a menu, creating it with default configuration if absent.
    pub fn get_or_create(&mut self, name: &str) -> &mut Menu {
        self.get_or_create_with(name, MenuConfig::default())
    }

    /// Fetch a menu, creating it with `config` if absent.
    ///
    /// An existing menu is returned as-is; its configuration is never
    /// replaced.
    pub fn get_or_create_with(&mut self, name: &str, config: MenuConfig) -> &mut Menu {
        self.menus.entry(name.to_owned()).or_insert_with(|| {
            debug!(menu = %name, "created menu");
            Menu::new(name, config)
        })
    }

    /// Look up a menu by name.
    pub fn get(&self, name: &str) -> Option<&Menu> {
        self.menus.get(name)
    }

    /// Look up a menu by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Menu> {
        self.menus.get_mut(name)
    }

    /// Number of menus in the store.
    pub fn len(&self) -> usize {
        self.menus.len()
    }

    /// Whether the store holds no menus.
    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Register `item` into the named menu, creating the menu if absent.
    pub fn register_item(&mut self, menu_name: &str, item: Item) -> MenuResult<()> {
        self.get_or_create(menu_name).register_item(item)
    }

    /// Unregister an item from the named menu.
    ///
    /// Returns `false` when either the menu or the item does not exist.
    pub fn unregister_item(&mut self, menu_name: &str, item: impl ItemName) -> bool {
        self.menus
            .get_mut(menu_name)
            .is_some_and(|menu| menu.unregister_item(item))
    }

    /// Make `item` the only active item of the named menu; no-op for an
    /// unknown menu.
    pub fn set_active(&mut self, menu_name: &str, item: impl ItemName) {
        if let Some(menu) = self.menus.get_mut(menu_name) {
            menu.set_active(item);
        }
    }

    /// Append `item` to the named menu's active list; no-op for an unknown
    /// menu.
    pub fn add_active(&mut self, menu_name: &str, item: impl ItemName) {
        if let Some(menu) = self.menus.get_mut(menu_name) {
            menu.add_active(item);
        }
    }

    /// Clear the named menu's active list; no-op for an unknown menu.
    pub fn clear_active(&mut self, menu_name: &str) {
        if let Some(menu) = self.menus.get_mut(menu_name) {
            menu.clear_active();
        }
    }

    /// Render the named menu, `None` when it does not exist.
    pub fn render(&self, menu_name: &str) -> Option<String> {
        self.menus.get(menu_name).map(Menu::render)
    }

    /// Render the named menu with outermost-wrapper overrides, `None` when
    /// it does not exist.
    pub fn render_with(&self, menu_name: &str, overrides: &RenderOverrides) -> Option<String> {
        self.menus
            .get(menu_name)
            .map(|menu| menu.render_with(overrides))
    }
}
