#![deny(missing_docs)]
//! xabbr core: abbreviation trees, snippet registries, output profiles.

/// Layered JSON option merging.
pub mod merge;
/// Abbreviation tree nodes.
pub mod node;
/// Output formatting profile.
pub mod profile;
/// Layered snippet registry.
pub mod registry;

pub use merge::{merge_into, merge_layers};
pub use node::{Abbreviation, Attribute, Node};
pub use profile::Profile;
pub use registry::{Snippet, SnippetGenerator, SnippetLayer, SnippetsRegistry};
