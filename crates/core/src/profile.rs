//! Output profile: formatting parameters consumed by formatter backends.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Formatting parameters for abbreviation output.
///
/// Built either from [`Profile::default`] or from a raw option bag with
/// [`Profile::from_options`], which layers the bag over the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    /// Indentation unit for nested output.
    pub indent: String,
    /// Tag name case: "upper", "lower" or "" to keep as written.
    pub tag_case: String,
    /// Attribute name case: "upper", "lower" or "" to keep as written.
    pub attribute_case: String,
    /// Attribute value quotes: "single" or "double".
    pub attribute_quotes: String,
    /// Whether output is formatted with line breaks and indentation.
    pub format: bool,
    /// Tags whose inner content is never formatted.
    pub format_skip: Vec<String>,
    /// Tags whose inner content is always formatted.
    pub format_force: Vec<String>,
    /// Number of sibling inline elements that forces line breaks.
    pub inline_break: usize,
    /// Output boolean attributes as `disabled` instead of `disabled="disabled"`.
    pub compact_boolean_attributes: bool,
    /// Attributes treated as boolean.
    pub boolean_attributes: Vec<String>,
    /// Self-closing tag style: "html", "xhtml" or "xml".
    pub self_closing_style: String,
    /// Elements treated as inline-level.
    pub inline_elements: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            tag_case: String::new(),
            attribute_case: String::new(),
            attribute_quotes: "double".to_string(),
            format: true,
            format_skip: strings(&["html"]),
            format_force: strings(&["body"]),
            inline_break: 3,
            compact_boolean_attributes: false,
            boolean_attributes: strings(&[
                "contenteditable",
                "seamless",
                "async",
                "autofocus",
                "autoplay",
                "checked",
                "controls",
                "defer",
                "disabled",
                "formnovalidate",
                "hidden",
                "ismap",
                "loop",
                "multiple",
                "muted",
                "novalidate",
                "readonly",
                "required",
                "reversed",
                "selected",
                "typemustmatch",
            ]),
            self_closing_style: "html".to_string(),
            inline_elements: strings(&[
                "a", "abbr", "acronym", "applet", "b", "basefont", "bdo", "big", "br", "button",
                "cite", "code", "del", "dfn", "em", "font", "i", "iframe", "img", "input", "ins",
                "kbd", "label", "map", "object", "q", "s", "samp", "select", "small", "span",
                "strike", "strong", "sub", "sup", "textarea", "tt", "u", "var",
            ]),
        }
    }
}

impl Profile {
    /// Builds a profile from a raw option bag layered over the defaults.
    ///
    /// `None`, `null` and non-object values yield the defaults. Keys are
    /// applied one at a time; a key with a value of the wrong type is
    /// dropped and the default kept.
    pub fn from_options(options: Option<&Value>) -> Self {
        let Some(object) = options.and_then(Value::as_object) else {
            if let Some(other) = options.filter(|v| !v.is_null()) {
                log::debug!("Ignoring non-object profile options: {other}");
            }
            return Self::default();
        };

        let mut current = match serde_json::to_value(Self::default()) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to serialize default profile: {err}");
                return Self::default();
            }
        };

        for (key, value) in object {
            if value.is_null() {
                continue;
            }
            let mut candidate = current.clone();
            if let Some(fields) = candidate.as_object_mut() {
                fields.insert(key.clone(), value.clone());
            }
            match serde_json::from_value::<Profile>(candidate.clone()) {
                Ok(_) => current = candidate,
                Err(err) => log::warn!("Ignoring profile option '{key}': {err}"),
            }
        }

        serde_json::from_value(current).unwrap_or_default()
    }

    /// Applies `tag_case` to an element name.
    pub fn name(&self, name: &str) -> String {
        apply_case(name, &self.tag_case)
    }

    /// Applies `attribute_case` to an attribute name.
    pub fn attribute_name(&self, name: &str) -> String {
        apply_case(name, &self.attribute_case)
    }

    /// Quote character for attribute values.
    pub fn quote_char(&self) -> char {
        if self.attribute_quotes == "single" {
            '\''
        } else {
            '"'
        }
    }

    /// Closing sequence for self-closing tags.
    pub fn self_close(&self) -> &'static str {
        match self.self_closing_style.as_str() {
            "xhtml" => " /",
            "xml" => "/",
            _ => "",
        }
    }

    /// True when `name` is an inline-level element.
    pub fn is_inline(&self, name: &str) -> bool {
        contains_ignore_case(&self.inline_elements, name)
    }

    /// True when `name` is a boolean attribute.
    pub fn is_boolean_attribute(&self, name: &str) -> bool {
        contains_ignore_case(&self.boolean_attributes, name)
    }

    /// Indentation for the given nesting level.
    pub fn indent_for(&self, level: usize) -> String {
        self.indent.repeat(level)
    }
}

fn apply_case(value: &str, case: &str) -> String {
    match case {
        "upper" => value.to_uppercase(),
        "lower" => value.to_lowercase(),
        _ => value.to_string(),
    }
}

fn contains_ignore_case(list: &[String], name: &str) -> bool {
    list.iter().any(|item| item.eq_ignore_ascii_case(name))
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
