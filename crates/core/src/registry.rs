//! Layered snippet registry.
//!
//! A registry is an ordered list of [`SnippetLayer`]s. Each layer maps exact
//! names and regular-expression patterns to a [`Snippet`].
//!
//! # Lookup
//!
//! 1. Exact names are looked up from the last layer to the first, so later
//!    layers override earlier ones.
//! 2. Only if no layer has the exact name, patterns are tried in layer order
//!    (first layer first), and within a layer in insertion order.

use crate::node::Node;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Computes snippet content from the node being expanded.
pub type SnippetGenerator = Arc<dyn Fn(&Node) -> String + Send + Sync>;

/// A snippet value: a literal template or content computed at lookup time.
#[derive(Clone)]
pub enum Snippet {
    /// Literal template text.
    Literal(String),
    /// Content generated from the matched node.
    Generator(SnippetGenerator),
}

impl Snippet {
    /// Wraps a closure as a generator snippet.
    pub fn generator<F>(f: F) -> Self
    where
        F: Fn(&Node) -> String + Send + Sync + 'static,
    {
        Self::Generator(Arc::new(f))
    }

    /// Produces the snippet content for `node`.
    pub fn render(&self, node: &Node) -> String {
        match self {
            Snippet::Literal(template) => template.clone(),
            Snippet::Generator(generate) => generate(node),
        }
    }

    /// Returns the template text of a literal snippet.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Snippet::Literal(template) => Some(template),
            Snippet::Generator(_) => None,
        }
    }
}

impl fmt::Debug for Snippet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snippet::Literal(template) => f.debug_tuple("Literal").field(template).finish(),
            Snippet::Generator(_) => f.write_str("Generator(..)"),
        }
    }
}

impl From<&str> for Snippet {
    fn from(template: &str) -> Self {
        Self::Literal(template.to_string())
    }
}

impl From<String> for Snippet {
    fn from(template: String) -> Self {
        Self::Literal(template)
    }
}

/// One mapping contributed to the lookup chain.
#[derive(Debug, Clone, Default)]
pub struct SnippetLayer {
    names: HashMap<String, Snippet>,
    patterns: Vec<(Regex, Snippet)>,
}

impl SnippetLayer {
    /// Creates an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a layer from a JSON object of `name -> template` pairs.
    ///
    /// Entries whose value is not a string are skipped. Returns `None` when
    /// `value` is not an object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut layer = Self::new();
        for (name, template) in object {
            match template.as_str() {
                Some(template) => layer.insert(name.clone(), template),
                None => log::debug!("Ignoring non-string snippet '{name}': {template}"),
            }
        }
        Some(layer)
    }

    /// Adds or replaces an exact-name entry.
    ///
    /// A key of the form `a|b` registers the same snippet under each alias.
    pub fn insert(&mut self, name: impl Into<String>, snippet: impl Into<Snippet>) {
        let name = name.into();
        let snippet = snippet.into();
        if name.contains('|') {
            for alias in name.split('|').map(str::trim).filter(|a| !a.is_empty()) {
                self.names.insert(alias.to_string(), snippet.clone());
            }
        } else {
            self.names.insert(name, snippet);
        }
    }

    /// Adds a pattern entry, replacing one registered with the same pattern source.
    pub fn set_pattern(&mut self, pattern: Regex, snippet: Snippet) {
        match self
            .patterns
            .iter_mut()
            .find(|(existing, _)| existing.as_str() == pattern.as_str())
        {
            Some(entry) => entry.1 = snippet,
            None => self.patterns.push((pattern, snippet)),
        }
    }

    /// Exact-name lookup within this layer.
    pub fn get(&self, name: &str) -> Option<&Snippet> {
        self.names.get(name)
    }

    /// First pattern entry in this layer matching `name`.
    pub fn match_pattern(&self, name: &str) -> Option<&Snippet> {
        self.patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(name))
            .map(|(_, snippet)| snippet)
    }

    /// Iterates exact names defined in this layer.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Number of exact-name entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Number of pattern entries.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// True when the layer has neither names nor patterns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.patterns.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SnippetLayer
where
    K: Into<String>,
    V: Into<Snippet>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut layer = Self::new();
        for (name, snippet) in iter {
            layer.insert(name, snippet);
        }
        layer
    }
}

/// Ordered stack of snippet layers.
#[derive(Debug, Clone, Default)]
pub struct SnippetsRegistry {
    layers: Vec<SnippetLayer>,
}

impl SnippetsRegistry {
    /// Creates a registry from layers in precedence order (last wins).
    pub fn new(layers: Vec<SnippetLayer>) -> Self {
        Self { layers }
    }

    /// All layers, in append order.
    pub fn layers(&self) -> &[SnippetLayer] {
        &self.layers
    }

    /// Layer at `index`.
    pub fn layer(&self, index: usize) -> Option<&SnippetLayer> {
        self.layers.get(index)
    }

    /// Mutable access to the layer at `index`.
    ///
    /// Shared registries are handed around as `Arc<SnippetsRegistry>`, so
    /// this is only reachable while the registry is still exclusively owned.
    pub fn layer_mut(&mut self, index: usize) -> Option<&mut SnippetLayer> {
        self.layers.get_mut(index)
    }

    /// Resolves `name` to a snippet following layer precedence.
    pub fn resolve(&self, name: &str) -> Option<&Snippet> {
        self.layers
            .iter()
            .rev()
            .find_map(|layer| layer.get(name))
            .or_else(|| self.layers.iter().find_map(|layer| layer.match_pattern(name)))
    }

    /// Resolves the node's name and renders the matching snippet.
    pub fn expand(&self, node: &Node) -> Option<String> {
        let name = node.name()?;
        self.resolve(name).map(|snippet| snippet.render(node))
    }

    /// True when `name` resolves in any layer.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }
}
