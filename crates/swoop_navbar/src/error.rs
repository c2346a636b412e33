//! Error types for swoop_navbar

use thiserror::Error;

/// Errors raised while configuring a navigation bar
///
/// Geometry and animation never fail; these cover the host-supplied
/// configuration only.
#[derive(Error, Debug)]
pub enum NavBarError {
    /// The item list is empty
    #[error("navigation bar needs at least one item")]
    NoItems,

    /// Two items share an id
    #[error("duplicate navigation item id: {0}")]
    DuplicateItem(String),

    /// No item has the requested id
    #[error("unknown navigation item id: {0}")]
    UnknownItem(String),

    /// A style value is out of range
    #[error("invalid navigation bar style: {0}")]
    InvalidStyle(String),

    /// Failed to parse a style file
    #[error("failed to parse navigation bar style: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for swoop_navbar operations
pub type Result<T> = std::result::Result<T, NavBarError>;
