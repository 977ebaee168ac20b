//! Layered snippet registry builder.
//!
//! Layers are stacked in this order, later layers overriding earlier ones
//! for identical names:
//!
//! 1. The built-in table for the abbreviation type (`html` or `css`).
//! 2. The built-in table named after the syntax, when one exists and it is
//!    not the table from step 1 (e.g. `xsl`).
//! 3. User snippets: a single object, or a list whose items are objects or
//!    names of built-in tables. Unknown names are dropped.
//!
//! Markup registries also get the lorem generator installed as a pattern
//! in the first layer, so it is only reached when no exact name matches.

use super::defaults::{MARKUP_TABLE, STYLESHEET_TABLE, default_table};
use super::lorem::{LOREM_PATTERN, lorem_snippet};
use crate::syntax::{AbbreviationType, classify};
use serde_json::Value;
use std::sync::Arc;
use xabbr_core::{SnippetLayer, SnippetsRegistry};

/// Where a registry's snippets come from.
#[derive(Debug, Clone)]
pub enum SnippetsSource {
    /// A registry built by the caller. Used as is: no layering, no generator.
    Registry(Arc<SnippetsRegistry>),
    /// Raw user snippets: an object, a list of objects and table names, or nothing.
    Raw(Value),
}

impl Default for SnippetsSource {
    fn default() -> Self {
        Self::Raw(Value::Null)
    }
}

impl From<Arc<SnippetsRegistry>> for SnippetsSource {
    fn from(registry: Arc<SnippetsRegistry>) -> Self {
        Self::Registry(registry)
    }
}

impl From<SnippetsRegistry> for SnippetsSource {
    fn from(registry: SnippetsRegistry) -> Self {
        Self::Registry(Arc::new(registry))
    }
}

impl From<Value> for SnippetsSource {
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

/// Creates the snippet registry for `syntax`.
///
/// `kind` defaults to the classification of `syntax`. A pre-built
/// registry in `source` is returned as the same `Arc`.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use xabbr::registry::create_snippets_registry;
/// use xabbr::syntax::AbbreviationType;
///
/// let registry = create_snippets_registry(
///     Some(AbbreviationType::Markup),
///     "html",
///     json!({"link": "custom"}),
/// );
/// let link = registry.resolve("link").and_then(|s| s.as_literal());
/// assert_eq!(link, Some("custom"));
/// assert!(registry.contains("bq"));
/// ```
pub fn create_snippets_registry(
    kind: Option<AbbreviationType>,
    syntax: &str,
    source: impl Into<SnippetsSource>,
) -> Arc<SnippetsRegistry> {
    let kind = kind.unwrap_or_else(|| classify(None, syntax));
    match source.into() {
        SnippetsSource::Registry(registry) => registry,
        SnippetsSource::Raw(snippets) => Arc::new(build_registry(kind, syntax, &snippets)),
    }
}

fn build_registry(kind: AbbreviationType, syntax: &str, snippets: &Value) -> SnippetsRegistry {
    let base_table = match kind {
        AbbreviationType::Markup => MARKUP_TABLE,
        AbbreviationType::Stylesheet => STYLESHEET_TABLE,
    };

    let mut layers: Vec<Option<SnippetLayer>> = vec![default_table(base_table)];
    if syntax != base_table {
        layers.push(default_table(syntax));
    }

    match snippets {
        Value::Array(items) => layers.extend(items.iter().map(user_layer)),
        Value::Object(_) => layers.push(SnippetLayer::from_json(snippets)),
        Value::Null => {}
        other => log::debug!("Ignoring snippets that are neither object nor list: {other}"),
    }

    let mut registry = SnippetsRegistry::new(layers.into_iter().flatten().collect());

    if kind == AbbreviationType::Markup {
        if let Some(base) = registry.layer_mut(0) {
            base.set_pattern(LOREM_PATTERN.clone(), lorem_snippet());
        }
    }

    registry
}

fn user_layer(item: &Value) -> Option<SnippetLayer> {
    match item {
        Value::String(name) => {
            let table = default_table(name);
            if table.is_none() {
                log::debug!("Dropping reference to unknown snippet table '{name}'");
            }
            table
        }
        Value::Object(_) => SnippetLayer::from_json(item),
        other => {
            log::debug!("Ignoring snippet list item: {other}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use xabbr_core::{Node, Snippet};

    fn literal(registry: &SnippetsRegistry, name: &str) -> Option<String> {
        registry
            .resolve(name)
            .and_then(Snippet::as_literal)
            .map(str::to_string)
    }

    #[test]
    fn user_object_overrides_defaults() {
        let registry = create_snippets_registry(
            Some(AbbreviationType::Markup),
            "html",
            json!({"link": "custom"}),
        );

        assert_eq!(literal(&registry, "link").as_deref(), Some("custom"));
        assert_eq!(literal(&registry, "bq").as_deref(), Some("blockquote"));
        assert_eq!(registry.layers().len(), 2);
    }

    #[test]
    fn syntax_table_is_added_after_type_table() {
        let registry = create_snippets_registry(None, "xsl", Value::Null);

        assert_eq!(registry.layers().len(), 2);
        assert_eq!(
            literal(&registry, "!!!").as_deref(),
            Some("{<?xml version=\"1.0\" encoding=\"UTF-8\"?>}")
        );
        assert_eq!(literal(&registry, "bq").as_deref(), Some("blockquote"));
    }

    #[test]
    fn syntax_without_table_gets_only_type_table() {
        let registry = create_snippets_registry(None, "slim", Value::Null);
        assert_eq!(registry.layers().len(), 1);

        let registry = create_snippets_registry(None, "scss", Value::Null);
        assert_eq!(registry.layers().len(), 1);
        assert_eq!(literal(&registry, "c").as_deref(), Some("color:#${1:000}"));
    }

    #[test]
    fn list_items_resolve_references_and_skip_unknown() {
        let registry = create_snippets_registry(
            Some(AbbreviationType::Markup),
            "html",
            json!(["xsl", "no-such-table", {"foo": "bar"}, 42]),
        );

        assert_eq!(registry.layers().len(), 3);
        assert_eq!(literal(&registry, "foo").as_deref(), Some("bar"));
        assert_eq!(literal(&registry, "tm").as_deref(), Some("xsl:template[match mode]"));
    }

    #[test]
    fn list_order_decides_precedence() {
        let registry = create_snippets_registry(
            Some(AbbreviationType::Markup),
            "html",
            json!([{"a": "first"}, {"a": "second", "b": "kept"}, {"a": "third"}]),
        );

        assert_eq!(literal(&registry, "a").as_deref(), Some("third"));
        assert_eq!(literal(&registry, "b").as_deref(), Some("kept"));
    }

    #[test]
    fn scalar_snippets_are_ignored() {
        let registry = create_snippets_registry(None, "html", json!("xsl"));
        assert_eq!(registry.layers().len(), 1);
    }

    #[test]
    fn prebuilt_registry_is_passed_through() {
        let own = Arc::new(SnippetsRegistry::new(vec![
            [("only", "mine")].into_iter().collect(),
        ]));
        let registry = create_snippets_registry(
            Some(AbbreviationType::Markup),
            "html",
            Arc::clone(&own),
        );

        assert!(Arc::ptr_eq(&own, &registry));
        assert_eq!(registry.layers().len(), 1);
        assert_eq!(registry.layers()[0].pattern_count(), 0);
        assert!(registry.resolve("lorem").is_none());
    }

    #[test]
    fn markup_registry_has_lorem_in_first_layer() {
        let registry = create_snippets_registry(None, "html", json!({"x": "y"}));

        assert_eq!(registry.layers()[0].pattern_count(), 1);
        assert_eq!(registry.layers()[1].pattern_count(), 0);
        let text = registry.expand(&Node::new("lorem4")).unwrap();
        assert_eq!(text, "Lorem ipsum dolor sit.");
    }

    #[test]
    fn exact_user_snippet_shadows_lorem() {
        let registry = create_snippets_registry(None, "html", json!({"lorem": "short"}));
        assert_eq!(registry.expand(&Node::new("lorem")).as_deref(), Some("short"));
        assert!(registry.expand(&Node::new("lorem2")).is_some());
    }

    #[test]
    fn stylesheet_registry_has_no_generator() {
        let registry = create_snippets_registry(Some(AbbreviationType::Stylesheet), "css", Value::Null);
        assert_eq!(registry.layers()[0].pattern_count(), 0);
        assert!(registry.resolve("lorem").is_none());
    }
}
