#![deny(missing_docs)]
//! xabbr: resolves partial options into a complete expansion configuration
//! and dispatches abbreviations to markup or stylesheet backends.
//!
//! ```
//! use serde_json::json;
//! use xabbr::{AbbreviationType, Options, create_options};
//!
//! let config = create_options(
//!     Options::new()
//!         .with_syntax("html")
//!         .with_snippets(json!({"link": "custom"})),
//! );
//! assert_eq!(config.kind, AbbreviationType::Markup);
//! assert_eq!(
//!     config.snippets.resolve("link").and_then(|s| s.as_literal()),
//!     Some("custom")
//! );
//! ```

/// Layered global/syntax/project configuration.
pub mod config;
/// Backend traits and the expander.
pub mod dispatch;
/// Configuration loading errors.
pub mod error;
/// Options resolution and profile building.
pub mod options;
/// Snippet registry construction.
pub mod registry;
/// Abbreviation type classification.
pub mod syntax;

pub use config::{ConfigContext, ConfigSection, ProjectConfig, ProjectSection, TypeSections};
pub use dispatch::{Expander, MarkupBackend, StylesheetBackend};
pub use error::ConfigError;
pub use options::{
    Configuration, FieldGenerator, FormatOptions, InsertedText, Options, ProfileSource,
    create_options, create_profile, default_field,
};
pub use registry::{SnippetsSource, create_snippets_registry};
pub use syntax::{AbbreviationType, STYLESHEET_SYNTAXES, classify, is_stylesheet};

pub use xabbr_core::{
    Abbreviation, Attribute, Node, Profile, Snippet, SnippetLayer, SnippetsRegistry,
};
