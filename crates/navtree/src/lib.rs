//! Named hierarchical navigation menus.
//!
//! Flat, unordered item registrations are assembled into priority-ordered
//! trees and rendered as nested markup. Rendering performs no output
//! escaping; callers exposing user-controlled text or attributes are
//! responsible for escaping upstream.

pub mod error;
pub mod item;
pub mod menu;
pub mod store;

pub use error::{MenuError, MenuResult};
pub use item::{Attributes, Item, ItemConfig, ItemName, Tree};
pub use menu::{Menu, MenuConfig, RenderOverrides};
pub use store::MenuStore;
