//! Options resolution: turns a partial, caller-supplied option bag into a
//! fully resolved [`Configuration`].
//!
//! Resolution never fails. Absent or malformed fields fall back to their
//! defaults; the only thing callers can get "wrong" is lose a setting,
//! which is logged at `debug` level.

use crate::registry::{SnippetsSource, create_snippets_registry, default_variables};
use crate::syntax::{AbbreviationType, classify};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use xabbr_core::{Profile, SnippetsRegistry};

/// Produces editor tabstop text for a field index and optional placeholder.
///
/// For TextMate-style fields:
///
/// ```
/// use std::sync::Arc;
/// use xabbr::options::FieldGenerator;
///
/// let field: FieldGenerator = Arc::new(|index: usize, placeholder: Option<&str>| match placeholder {
///     Some(p) if !p.is_empty() => format!("${{{index}:{p}}}"),
///     _ => format!("${{{index}}}"),
/// });
/// assert_eq!(field(1, Some("item")), "${1:item}");
/// ```
pub type FieldGenerator = Arc<dyn Fn(usize, Option<&str>) -> String + Send + Sync>;

/// Key under which the field generator lives in format options.
pub const FIELD_KEY: &str = "field";

/// The default field generator: emits the placeholder, or nothing.
pub fn default_field() -> FieldGenerator {
    Arc::new(|_: usize, placeholder: Option<&str>| {
        placeholder.unwrap_or_default().to_string()
    })
}

/// Text inserted into the expanded abbreviation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertedText {
    /// A single string.
    Single(String),
    /// One entry per repetition of the implicitly repeated element.
    Lines(Vec<String>),
}

impl InsertedText {
    /// Reads inserted text from JSON: a string or a list of strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Single(text.clone())),
            Value::Array(items) => Some(Self::Lines(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl From<&str> for InsertedText {
    fn from(text: &str) -> Self {
        Self::Single(text.to_string())
    }
}

impl From<Vec<String>> for InsertedText {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

/// Where the output profile comes from.
#[derive(Debug, Clone)]
pub enum ProfileSource {
    /// A profile built by the caller, used as is.
    Resolved(Arc<Profile>),
    /// Raw profile options layered over the profile defaults.
    Options(Value),
}

impl Default for ProfileSource {
    fn default() -> Self {
        Self::Options(Value::Null)
    }
}

impl From<Arc<Profile>> for ProfileSource {
    fn from(profile: Arc<Profile>) -> Self {
        Self::Resolved(profile)
    }
}

impl From<Profile> for ProfileSource {
    fn from(profile: Profile) -> Self {
        Self::Resolved(Arc::new(profile))
    }
}

impl From<Value> for ProfileSource {
    fn from(value: Value) -> Self {
        Self::Options(value)
    }
}

/// Returns the caller's profile, or builds one from raw options.
pub fn create_profile(source: &ProfileSource) -> Arc<Profile> {
    match source {
        ProfileSource::Resolved(profile) => Arc::clone(profile),
        ProfileSource::Options(options) => Arc::new(Profile::from_options(Some(options))),
    }
}

/// Caller-supplied, partially specified options.
///
/// A bare string converts to options with only `syntax` set:
///
/// ```
/// use xabbr::options::{Options, create_options};
///
/// let a = create_options("slim");
/// let b = create_options(Options::new().with_syntax("slim"));
/// assert_eq!(a.syntax, b.syntax);
/// assert_eq!(a.kind, b.kind);
/// ```
#[derive(Clone, Default)]
pub struct Options {
    /// Explicit abbreviation type; anything but `"stylesheet"` means markup.
    pub kind: Option<String>,
    /// Output syntax (`html`, `slim`, `css`, ...).
    pub syntax: Option<String>,
    /// Tabstop generator.
    pub field: Option<FieldGenerator>,
    /// Text to insert into the expansion.
    pub text: Option<InsertedText>,
    /// Output profile or raw profile options.
    pub profile: ProfileSource,
    /// Variables for the variable resolver.
    pub variables: Value,
    /// User snippets or a pre-built registry.
    pub snippets: SnippetsSource,
    /// Tree transform add-ons (e.g. `{"bem": {"element": "--"}, "jsx": true}`).
    pub addons: Value,
    /// Formatter options.
    pub format: Value,
}

impl Options {
    /// Empty options; everything resolves to defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads options from a JSON object.
    ///
    /// A JSON string is the syntax shorthand. Fields of unexpected types are
    /// ignored. `addons` is also accepted under its older name `options`.
    pub fn from_value(value: &Value) -> Self {
        let object = match value {
            Value::String(syntax) => return Self::new().with_syntax(syntax.as_str()),
            Value::Object(object) => object,
            Value::Null => return Self::new(),
            other => {
                log::debug!("Ignoring options that are not an object: {other}");
                return Self::new();
            }
        };

        let string = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
        let raw = |key: &str| object.get(key).cloned().unwrap_or(Value::Null);

        Self {
            kind: string("type"),
            syntax: string("syntax"),
            field: None,
            text: object.get("text").and_then(InsertedText::from_json),
            profile: ProfileSource::Options(raw("profile")),
            variables: raw("variables"),
            snippets: SnippetsSource::Raw(raw("snippets")),
            addons: object
                .get("addons")
                .or_else(|| object.get("options"))
                .cloned()
                .unwrap_or(Value::Null),
            format: raw("format"),
        }
    }

    /// Sets the explicit abbreviation type.
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the output syntax.
    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = Some(syntax.into());
        self
    }

    /// Sets the tabstop generator.
    pub fn with_field<F>(mut self, field: F) -> Self
    where
        F: Fn(usize, Option<&str>) -> String + Send + Sync + 'static,
    {
        self.field = Some(Arc::new(field));
        self
    }

    /// Sets inserted text.
    pub fn with_text(mut self, text: impl Into<InsertedText>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the profile or raw profile options.
    pub fn with_profile(mut self, profile: impl Into<ProfileSource>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Sets variables.
    pub fn with_variables(mut self, variables: Value) -> Self {
        self.variables = variables;
        self
    }

    /// Sets user snippets or a pre-built registry.
    pub fn with_snippets(mut self, snippets: impl Into<SnippetsSource>) -> Self {
        self.snippets = snippets.into();
        self
    }

    /// Sets transform add-ons.
    pub fn with_addons(mut self, addons: Value) -> Self {
        self.addons = addons;
        self
    }

    /// Sets formatter options.
    pub fn with_format(mut self, format: Value) -> Self {
        self.format = format;
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("kind", &self.kind)
            .field("syntax", &self.syntax)
            .field("field", &self.field.as_ref().map(|_| ".."))
            .field("text", &self.text)
            .field("profile", &self.profile)
            .field("variables", &self.variables)
            .field("snippets", &self.snippets)
            .field("addons", &self.addons)
            .field("format", &self.format)
            .finish()
    }
}

impl From<&str> for Options {
    fn from(syntax: &str) -> Self {
        Self::new().with_syntax(syntax)
    }
}

impl From<String> for Options {
    fn from(syntax: String) -> Self {
        Self::new().with_syntax(syntax)
    }
}

impl From<Value> for Options {
    fn from(value: Value) -> Self {
        Self::from_value(&value)
    }
}

impl From<&Value> for Options {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

impl From<Option<Options>> for Options {
    fn from(options: Option<Options>) -> Self {
        options.unwrap_or_default()
    }
}

/// Formatter options: the field generator plus an opaque option bag.
#[derive(Clone)]
pub struct FormatOptions {
    /// Tabstop generator, always present.
    pub field: FieldGenerator,
    /// Remaining formatter options.
    pub options: Map<String, Value>,
}

impl FormatOptions {
    /// Emits a tabstop through the field generator.
    pub fn field(&self, index: usize, placeholder: Option<&str>) -> String {
        (self.field)(index, placeholder)
    }

    /// Looks up a formatter option.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

impl fmt::Debug for FormatOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatOptions")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Fully resolved settings handed to the backends.
#[derive(Clone)]
pub struct Configuration {
    /// Abbreviation family.
    pub kind: AbbreviationType,
    /// Output syntax.
    pub syntax: String,
    /// Tabstop generator.
    pub field: FieldGenerator,
    /// Text to insert into the expansion.
    pub text: Option<InsertedText>,
    /// Output profile.
    pub profile: Arc<Profile>,
    /// Variables, defaults included.
    pub variables: BTreeMap<String, String>,
    /// Snippet registry.
    pub snippets: Arc<SnippetsRegistry>,
    /// Tree transform add-ons.
    pub addons: Map<String, Value>,
    /// Formatter options.
    pub format: FormatOptions,
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("kind", &self.kind)
            .field("syntax", &self.syntax)
            .field("text", &self.text)
            .field("profile", &self.profile)
            .field("variables", &self.variables)
            .field("snippet_layers", &self.snippets.layers().len())
            .field("addons", &self.addons)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Resolves caller options into a [`Configuration`].
///
/// # Example
///
/// ```
/// use xabbr::options::create_options;
/// use xabbr::syntax::AbbreviationType;
///
/// let config = create_options("scss");
/// assert_eq!(config.kind, AbbreviationType::Stylesheet);
/// assert_eq!(config.variables["charset"], "UTF-8");
/// ```
pub fn create_options(options: impl Into<Options>) -> Configuration {
    let options = options.into();

    let explicit_kind = options.kind.as_deref().filter(|k| !k.is_empty());
    let syntax = match options.syntax.as_deref().filter(|s| !s.is_empty()) {
        Some(syntax) => syntax.to_string(),
        None => explicit_kind
            .map(AbbreviationType::from_name)
            .unwrap_or_default()
            .default_syntax()
            .to_string(),
    };
    let kind = classify(explicit_kind, &syntax);

    let field = options.field.clone().unwrap_or_else(default_field);
    let format = FormatOptions {
        field: Arc::clone(&field),
        options: format_options(&options.format),
    };

    Configuration {
        kind,
        profile: create_profile(&options.profile),
        snippets: create_snippets_registry(Some(kind), &syntax, options.snippets),
        variables: resolve_variables(&options.variables),
        addons: object_or_empty("addons", &options.addons),
        text: options.text,
        field,
        format,
        syntax,
    }
}

fn format_options(format: &Value) -> Map<String, Value> {
    let mut options = object_or_empty("format", format);
    if options.remove(FIELD_KEY).is_some() {
        log::debug!("Ignoring non-callable '{FIELD_KEY}' in format options");
    }
    options
}

fn resolve_variables(variables: &Value) -> BTreeMap<String, String> {
    let mut resolved = default_variables();
    let Some(object) = variables.as_object() else {
        if !variables.is_null() {
            log::debug!("Ignoring variables that are not an object: {variables}");
        }
        return resolved;
    };

    for (name, value) in object {
        let value = match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            other => {
                log::debug!("Ignoring variable '{name}' with non-scalar value: {other}");
                continue;
            }
        };
        resolved.insert(name.clone(), value);
    }
    resolved
}

fn object_or_empty(label: &str, value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(object) => object.clone(),
        Value::Null => Map::new(),
        other => {
            log::debug!("Ignoring {label} that is not an object: {other}");
            Map::new()
        }
    }
}
