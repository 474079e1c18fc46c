//! Error types for scene and page operations.
//!
//! The editor turns scene errors into logged no-ops; they exist so the
//! structural layers can say precisely why something was refused. Page errors
//! are returned to the host.

use crate::types::ItemId;
use thiserror::Error;

/// Errors from structural scene operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("item {0} already exists")]
    DuplicateItem(ItemId),

    /// The new parent is the child itself or one of its descendants
    #[error("moving {child} under {parent} would create a cycle")]
    Cycle { child: ItemId, parent: ItemId },

    #[error("item {0} cannot contain other items")]
    NotAContainer(ItemId),

    #[error("item {0} cannot be its own parent")]
    SelfParent(ItemId),

    /// A z-order permutation that does not cover exactly the current items
    #[error("invalid item order: expected {expected} ids, got {actual}")]
    InvalidOrder { expected: usize, actual: usize },
}

/// Errors from page management.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("the last page cannot be deleted")]
    LastPage,

    #[error("unknown page {0}")]
    UnknownPage(String),

    #[error("page name cannot be empty")]
    EmptyName,
}

/// Result type alias for scene operations
pub type SceneResult<T> = Result<T, SceneError>;

/// Result type alias for page operations
pub type PageResult<T> = Result<T, PageError>;
