//! Abbreviation type classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Syntaxes that use stylesheet abbreviations (values embedded in names).
pub const STYLESHEET_SYNTAXES: &[&str] = &["css", "sass", "scss", "less", "stylus", "sss", "sugarss"];

/// Abbreviation family, deciding which backend chain runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbbreviationType {
    /// HTML, XML, Slim, Pug and anything unrecognized.
    #[default]
    Markup,
    /// CSS and its preprocessor dialects.
    Stylesheet,
}

impl AbbreviationType {
    /// Interprets an explicit type name. Anything but `"stylesheet"` is markup.
    pub fn from_name(name: &str) -> Self {
        if name == "stylesheet" {
            Self::Stylesheet
        } else {
            Self::Markup
        }
    }

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Stylesheet => "stylesheet",
        }
    }

    /// Syntax assumed when none is given.
    pub fn default_syntax(self) -> &'static str {
        match self {
            Self::Markup => "html",
            Self::Stylesheet => "css",
        }
    }
}

impl fmt::Display for AbbreviationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks if `syntax` uses stylesheet abbreviations.
///
/// # Example
///
/// ```
/// use xabbr::syntax::is_stylesheet;
///
/// assert!(is_stylesheet("scss"));
/// assert!(!is_stylesheet("slim"));
/// ```
pub fn is_stylesheet(syntax: &str) -> bool {
    STYLESHEET_SYNTAXES.contains(&syntax)
}

/// Decides the abbreviation family.
///
/// A non-empty explicit type wins; otherwise the syntax decides. Unknown
/// syntaxes are markup.
pub fn classify(explicit: Option<&str>, syntax: &str) -> AbbreviationType {
    match explicit.filter(|t| !t.is_empty()) {
        Some(name) => AbbreviationType::from_name(name),
        None if is_stylesheet(syntax) => AbbreviationType::Stylesheet,
        None => AbbreviationType::Markup,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_syntaxes_are_detected() {
        for syntax in STYLESHEET_SYNTAXES {
            assert!(is_stylesheet(syntax), "{syntax} should be a stylesheet");
        }
    }

    #[test]
    fn other_syntaxes_are_not_stylesheets() {
        for syntax in ["html", "xml", "xsl", "slim", "pug", "jsx", "angular", "", "CSS", "foo"] {
            assert!(!is_stylesheet(syntax), "{syntax:?} should not be a stylesheet");
        }
    }

    #[test]
    fn explicit_type_wins_over_syntax() {
        assert_eq!(classify(Some("stylesheet"), "html"), AbbreviationType::Stylesheet);
        assert_eq!(classify(Some("markup"), "css"), AbbreviationType::Markup);
    }

    #[test]
    fn unrecognized_explicit_type_is_markup() {
        for kind in ["markup", "html", "xml", "Stylesheet", "whatever"] {
            assert_eq!(classify(Some(kind), "scss"), AbbreviationType::Markup, "{kind}");
        }
    }

    #[test]
    fn empty_explicit_type_defers_to_syntax() {
        assert_eq!(classify(Some(""), "less"), AbbreviationType::Stylesheet);
        assert_eq!(classify(None, "sugarss"), AbbreviationType::Stylesheet);
        assert_eq!(classify(None, "unknown"), AbbreviationType::Markup);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let kind: AbbreviationType = serde_json::from_str("\"stylesheet\"").unwrap();
        assert_eq!(kind, AbbreviationType::Stylesheet);
        assert_eq!(
            serde_json::to_string(&AbbreviationType::Markup).unwrap(),
            "\"markup\""
        );
    }
}
