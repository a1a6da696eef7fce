//! Navigation error types.

use thiserror::Error;

/// Errors surfaced by menu registration.
#[derive(Debug, Error)]
pub enum MenuError {
    #[error("menu item \"{name}\" is already registered")]
    DuplicateItem { name: String },

    #[error("cannot register menu item \"{name}\" under unknown parent \"{parent}\"")]
    UnknownParent { name: String, parent: String },

    #[error("invalid menu item definition")]
    Definition(#[from] serde_json::Error),
}

/// Result type alias using MenuError.
pub type MenuResult<T> = Result<T, MenuError>;
