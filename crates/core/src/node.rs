//! Abbreviation tree handed between parser, transform, resolver and formatter stages.

use serde::{Deserialize, Serialize};

/// A single attribute on an abbreviation node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name (e.g., "class", "href").
    pub name: String,
    /// Attribute value; `None` for bare boolean attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Attribute {
    /// Create an attribute with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a value-less attribute.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// A node of a parsed abbreviation.
///
/// A node without a name is a group: the tree root, or a parenthesized
/// group in the abbreviation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Element (markup) or property (stylesheet) name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Text content (markup) or property value (stylesheet).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Ordered attribute list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<Attribute>,
    /// Child nodes in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Create a named node.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Create an unnamed group node.
    pub fn group() -> Self {
        Self::default()
    }

    /// Returns the node name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the text content.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends an attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Visits this node and all descendants depth-first, parents before children.
    pub fn walk_mut<F>(&mut self, visit: &mut F)
    where
        F: FnMut(&mut Node),
    {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }
}

/// Input accepted by the expand/parse entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Abbreviation {
    /// Raw abbreviation text; goes through the grammar parser first.
    Text(String),
    /// An already parsed tree; the parser is skipped, every later stage runs.
    Parsed(Node),
    /// A tree that already went through all stages; only formatting remains.
    Resolved(Node),
}

impl From<&str> for Abbreviation {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Abbreviation {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Node> for Abbreviation {
    fn from(tree: Node) -> Self {
        Self::Parsed(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_visits_parents_before_children() {
        let mut tree = Node::group()
            .with_child(Node::new("ul").with_child(Node::new("li")))
            .with_child(Node::new("p"));

        let mut seen = Vec::new();
        tree.walk_mut(&mut |node| seen.push(node.name().unwrap_or("#group").to_string()));

        assert_eq!(seen, vec!["#group", "ul", "li", "p"]);
    }

    #[test]
    fn attribute_lookup() {
        let node = Node::new("a")
            .with_attribute(Attribute::new("href", "/"))
            .with_attribute(Attribute::bare("download"));

        assert_eq!(
            node.attribute("href").and_then(|a| a.value.as_deref()),
            Some("/")
        );
        assert_eq!(node.attribute("download").map(|a| a.value.is_none()), Some(true));
        assert!(node.attribute("title").is_none());
    }

    #[test]
    fn node_converts_to_parsed_abbreviation() {
        let abbr: Abbreviation = Node::new("div").into();
        assert!(matches!(abbr, Abbreviation::Parsed(_)));

        let abbr: Abbreviation = "ul>li".into();
        assert_eq!(abbr, Abbreviation::Text("ul>li".to_string()));
    }
}
