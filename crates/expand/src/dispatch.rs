//! Routing of abbreviations through the markup or stylesheet backend chain.
//!
//! The grammar parsers, tree transforms, resolvers and formatters are
//! supplied by the caller as backends. This module only decides which
//! chain runs and hands each stage the resolved configuration it needs:
//!
//! - markup: parse → transform → snippets → variables → format
//! - stylesheet: parse → snippets → format
//!
//! Stylesheet abbreviations embed literal values, so they have no
//! variable stage.

use crate::options::{Configuration, FormatOptions, InsertedText, Options, create_options};
use crate::syntax::AbbreviationType;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use xabbr_core::{Abbreviation, Node, Profile, SnippetsRegistry};

/// Markup collaborators: grammar parser, tree transform, resolvers, formatter.
pub trait MarkupBackend {
    /// Error raised by the grammar parser.
    type Error;

    /// Parses abbreviation text into a tree.
    fn parse(&self, abbreviation: &str) -> Result<Node, Self::Error>;

    /// Applies text insertion, repetition and add-ons (BEM, JSX, XSL...).
    fn transform(&self, tree: &mut Node, text: Option<&InsertedText>, addons: &Map<String, Value>);

    /// Replaces node names with matching snippets.
    fn resolve_snippets(&self, tree: &mut Node, registry: &SnippetsRegistry);

    /// Substitutes `${name}` variables.
    fn resolve_variables(&self, tree: &mut Node, variables: &BTreeMap<String, String>);

    /// Renders the tree for `syntax`.
    fn format(&self, tree: &Node, profile: &Profile, syntax: &str, options: &FormatOptions) -> String;
}

/// Stylesheet collaborators: grammar parser, snippet resolver, formatter.
pub trait StylesheetBackend {
    /// Error raised by the grammar parser.
    type Error;

    /// Parses abbreviation text into a tree.
    fn parse(&self, abbreviation: &str) -> Result<Node, Self::Error>;

    /// Resolves property snippets; `options` are the transform add-ons.
    fn resolve_snippets(&self, tree: &mut Node, registry: &SnippetsRegistry, options: &Map<String, Value>);

    /// Renders the tree for `syntax`.
    fn format(&self, tree: &Node, profile: &Profile, syntax: &str, options: &FormatOptions) -> String;
}

/// Expands abbreviations with a pair of backends.
///
/// Both backends report parse failures with the same error type, which
/// is returned to the caller unchanged.
#[derive(Debug, Clone, Default)]
pub struct Expander<M, S> {
    markup: M,
    stylesheet: S,
}

impl<M, S> Expander<M, S> {
    /// Creates an expander.
    pub fn new(markup: M, stylesheet: S) -> Self {
        Self { markup, stylesheet }
    }

    /// The markup backend.
    pub fn markup(&self) -> &M {
        &self.markup
    }

    /// The stylesheet backend.
    pub fn stylesheet(&self) -> &S {
        &self.stylesheet
    }
}

impl<M, S, E> Expander<M, S>
where
    M: MarkupBackend<Error = E>,
    S: StylesheetBackend<Error = E>,
{
    /// Expands an abbreviation into a string, resolving `options` first.
    pub fn expand(
        &self,
        abbreviation: impl Into<Abbreviation>,
        options: impl Into<Options>,
    ) -> Result<String, E> {
        let config = create_options(options);
        self.expand_with(abbreviation, &config)
    }

    /// Parses an abbreviation into a fully resolved tree, resolving `options` first.
    pub fn parse(
        &self,
        abbreviation: impl Into<Abbreviation>,
        options: impl Into<Options>,
    ) -> Result<Node, E> {
        let config = create_options(options);
        self.parse_with(abbreviation, &config)
    }

    /// Expands with an already resolved configuration.
    pub fn expand_with(
        &self,
        abbreviation: impl Into<Abbreviation>,
        config: &Configuration,
    ) -> Result<String, E> {
        let tree = self.parse_with(abbreviation, config)?;
        Ok(match config.kind {
            AbbreviationType::Markup => {
                self.markup
                    .format(&tree, &config.profile, &config.syntax, &config.format)
            }
            AbbreviationType::Stylesheet => {
                self.stylesheet
                    .format(&tree, &config.profile, &config.syntax, &config.format)
            }
        })
    }

    /// Parses with an already resolved configuration.
    ///
    /// [`Abbreviation::Resolved`] trees are returned untouched.
    pub fn parse_with(
        &self,
        abbreviation: impl Into<Abbreviation>,
        config: &Configuration,
    ) -> Result<Node, E> {
        log::trace!("Dispatching {} abbreviation ({})", config.kind, config.syntax);
        match config.kind {
            AbbreviationType::Markup => self.parse_markup(abbreviation.into(), config),
            AbbreviationType::Stylesheet => self.parse_stylesheet(abbreviation.into(), config),
        }
    }

    fn parse_markup(&self, abbreviation: Abbreviation, config: &Configuration) -> Result<Node, E> {
        let mut tree = match abbreviation {
            Abbreviation::Resolved(tree) => return Ok(tree),
            Abbreviation::Parsed(tree) => tree,
            Abbreviation::Text(text) => self.markup.parse(&text)?,
        };

        self.markup
            .transform(&mut tree, config.text.as_ref(), &config.addons);
        self.markup.resolve_snippets(&mut tree, &config.snippets);
        self.markup.resolve_variables(&mut tree, &config.variables);
        Ok(tree)
    }

    fn parse_stylesheet(
        &self,
        abbreviation: Abbreviation,
        config: &Configuration,
    ) -> Result<Node, E> {
        let mut tree = match abbreviation {
            Abbreviation::Resolved(tree) => return Ok(tree),
            Abbreviation::Parsed(tree) => tree,
            Abbreviation::Text(text) => self.stylesheet.parse(&text)?,
        };

        self.stylesheet
            .resolve_snippets(&mut tree, &config.snippets, &config.addons);
        Ok(tree)
    }
}
