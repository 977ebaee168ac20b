//! Snippet registry construction: built-in tables, user layers, lorem generator.

/// Builds layered registries from defaults and user snippets.
pub mod builder;
/// Built-in snippet tables and default variables.
pub mod defaults;
/// Lorem ipsum pattern snippet.
pub mod lorem;

pub use builder::{SnippetsSource, create_snippets_registry};
pub use defaults::{default_table, default_variables, table_names};
pub use lorem::{LOREM_PATTERN, LoremOptions, MAX_WORD_COUNT, lorem, lorem_options};
