//! hullkit hull naming
//!
//! Convex decomposition turns one source mesh into many hull meshes. This
//! crate names those hulls from a user template and finds them again later.
//!
//! # Templates
//!
//! A template is a string with two tokens:
//!
//! - `?` - the source object's name
//! - `#` - the 1-based hull index
//!
//! Only the first occurrence of each token is substituted. The default
//! template is `?_hull_#`.
//!
//! # Example
//!
//! ```
//! use hullkit_naming::{discover_matches, generate};
//!
//! assert_eq!(generate("?_hull_#", "Cube", 2), "Cube_hull_2");
//!
//! let scene = ["Cube", "Cube_hull_1", "Cube_hull_2", "Sphere_hull_1"];
//! let found = discover_matches("?_hull_#", &scene, &["Cube"]).unwrap();
//! assert_eq!(found.names(), vec!["Cube_hull_2", "Cube_hull_1"]);
//! ```
//!
//! # Crate Structure
//!
//! - [`template`] - Name generation and match patterns
//! - [`discover`] - Hull discovery among named items
//! - [`rename`] - Batch renaming
//! - [`error`] - Error types

pub mod discover;
pub mod error;
pub mod rename;
pub mod template;

pub use discover::{
    discover_matches, discover_matches_with, DiscoverOptions, DiscoveredItem, Discovery,
    NamedItem, NamedItemMut,
};
pub use error::{NamingError, NamingResult};
pub use rename::{rename_items, Rename};
pub use template::{
    build_match_pattern, generate, MatchPattern, NameTemplate, DEFAULT_TEMPLATE, INDEX_TOKEN,
    NAME_TOKEN,
};
