//! Layered project configuration.
//!
//! A project configuration holds option sections at three levels of
//! specificity:
//!
//! ```json
//! {
//!   "globals": { "markup": { ... }, "stylesheet": { ... } },
//!   "syntax": { "angular": { ... }, "sugarss": { ... } },
//!   "project": {
//!     "proj1": {
//!       "globals": { "markup": { ... } },
//!       "syntax": { "sugarss": { ... } }
//!     }
//!   }
//! }
//! ```
//!
//! Sections apply in the order `globals[type]`, `syntax[syntax]`,
//! `project.globals[type]`, `project.syntax[syntax]`. Format, profile,
//! variable and add-on bags are deep-merged, later sections winning on
//! identical keys. Snippets are appended as extra registry layers, so
//! nothing defined by a less specific section is ever removed.
//!
//! Within a section, `options` is accepted as another name for `addons`.
//! Per-call options can be layered on top with
//! [`ProjectConfig::options_with`].

use crate::error::ConfigError;
use crate::options::{Options, ProfileSource};
use crate::registry::SnippetsSource;
use crate::syntax::{AbbreviationType, classify};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use xabbr_core::merge_layers;

/// One set of option overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSection {
    /// Formatter options.
    pub format: Value,
    /// Output profile options.
    pub profile: Value,
    /// Variables.
    pub variables: Value,
    /// Snippets: an object, a table name, or a list of either.
    pub snippets: Value,
    /// Tree transform add-ons (BEM, JSX...).
    #[serde(alias = "options")]
    pub addons: Value,
}

/// Sections keyed by abbreviation type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSections {
    /// Applies to every markup syntax.
    pub markup: Option<ConfigSection>,
    /// Applies to every stylesheet syntax.
    pub stylesheet: Option<ConfigSection>,
}

impl TypeSections {
    /// Section for `kind`, if defined.
    pub fn get(&self, kind: AbbreviationType) -> Option<&ConfigSection> {
        match kind {
            AbbreviationType::Markup => self.markup.as_ref(),
            AbbreviationType::Stylesheet => self.stylesheet.as_ref(),
        }
    }
}

/// Per-project overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSection {
    /// Type-wide overrides for this project.
    pub globals: TypeSections,
    /// Syntax overrides for this project.
    pub syntax: HashMap<String, ConfigSection>,
}

/// Global, syntax and project option sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Type-wide defaults.
    pub globals: TypeSections,
    /// Syntax-specific overrides.
    pub syntax: HashMap<String, ConfigSection>,
    /// Project-specific overrides, keyed by project name.
    pub project: HashMap<String, ProjectSection>,
}

/// What the caller is about to expand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigContext {
    /// Explicit abbreviation type.
    pub kind: Option<String>,
    /// Output syntax.
    pub syntax: Option<String>,
    /// Project name.
    pub project: Option<String>,
}

impl ConfigContext {
    /// Context for a syntax.
    pub fn syntax(syntax: impl Into<String>) -> Self {
        Self {
            syntax: Some(syntax.into()),
            ..Default::default()
        }
    }

    /// Context for an abbreviation type.
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Default::default()
        }
    }

    /// Sets the project name.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }
}

impl ProjectConfig {
    /// Parses a JSON configuration.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    /// Parses a YAML configuration.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(source).map_err(|err| ConfigError::Yaml(err.to_string()))?;
        let value =
            serde_json::to_value(yaml).map_err(|err| ConfigError::Yaml(err.to_string()))?;
        match value {
            Value::Null => Ok(Self::default()),
            value => Self::from_value(value),
        }
    }

    /// Reads a configuration file; `.yaml`/`.yml` files are YAML, anything else JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&source),
            _ => Self::from_json(&source),
        }
    }

    fn from_value(value: Value) -> Result<Self, ConfigError> {
        if !value.is_object() {
            return Err(ConfigError::InvalidRootType);
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Sections that apply to `kind`/`syntax`/`project`, least specific first.
    pub fn sections(
        &self,
        kind: AbbreviationType,
        syntax: &str,
        project: Option<&str>,
    ) -> Vec<&ConfigSection> {
        let mut sections = Vec::with_capacity(4);
        sections.extend(self.globals.get(kind));
        sections.extend(self.syntax.get(syntax));

        if let Some(name) = project {
            match self.project.get(name) {
                Some(project) => {
                    sections.extend(project.globals.get(kind));
                    sections.extend(project.syntax.get(syntax));
                }
                None => log::debug!("No configuration for project '{name}'"),
            }
        }

        sections
    }

    /// Builds expansion options for `context`.
    ///
    /// The result still goes through [`create_options`](crate::options::create_options),
    /// which supplies built-in defaults underneath these layers.
    pub fn options(&self, context: &ConfigContext) -> Options {
        self.options_with(context, Options::new())
    }

    /// Builds expansion options for `context` with per-call `overrides` as
    /// the topmost layer.
    ///
    /// Option bags deep-merge over the config sections, and override
    /// snippets are appended as the last registry layer. A pre-built
    /// registry or profile in `overrides` replaces the configured one. An
    /// explicit type or syntax in `overrides` takes precedence over
    /// `context` when picking sections.
    pub fn options_with(&self, context: &ConfigContext, overrides: impl Into<Options>) -> Options {
        let overrides = overrides.into();

        let explicit_kind = non_empty(&overrides.kind).or(non_empty(&context.kind));
        let syntax = match non_empty(&overrides.syntax).or(non_empty(&context.syntax)) {
            Some(syntax) => syntax.to_string(),
            None => explicit_kind
                .map(AbbreviationType::from_name)
                .unwrap_or_default()
                .default_syntax()
                .to_string(),
        };
        let kind = classify(explicit_kind, &syntax);
        let sections = self.sections(kind, &syntax, context.project.as_deref());

        let layered = |pick: fn(&ConfigSection) -> &Value, top: &Value| {
            merge_layers(sections.iter().map(|s| pick(s)).chain([top]))
        };

        let profile = match overrides.profile {
            ProfileSource::Resolved(profile) => ProfileSource::Resolved(profile),
            ProfileSource::Options(top) => ProfileSource::Options(layered(|s| &s.profile, &top)),
        };
        let snippets = match overrides.snippets {
            SnippetsSource::Registry(registry) => SnippetsSource::Registry(registry),
            SnippetsSource::Raw(top) => SnippetsSource::Raw(snippet_layers(&sections, &top)),
        };

        Options {
            kind: Some(kind.as_str().to_string()),
            syntax: Some(syntax),
            field: overrides.field,
            text: overrides.text,
            profile,
            variables: layered(|s| &s.variables, &overrides.variables),
            snippets,
            addons: layered(|s| &s.addons, &overrides.addons),
            format: layered(|s| &s.format, &overrides.format),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn snippet_layers(sections: &[&ConfigSection], top: &Value) -> Value {
    let mut layers = Vec::new();
    for snippets in sections.iter().map(|s| &s.snippets).chain([top]) {
        match snippets {
            Value::Null => {}
            Value::Array(items) => layers.extend(items.iter().cloned()),
            other => layers.push(other.clone()),
        }
    }
    Value::Array(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::create_options;
    use serde_json::json;
    use xabbr_core::Snippet;

    fn sample() -> ProjectConfig {
        ProjectConfig::from_json(
            &json!({
                "globals": {
                    "markup": {
                        "profile": {"tagCase": "upper", "attributeCase": "upper"},
                        "format": {"comment": {"enabled": true}},
                        "variables": {"lang": "ru", "bar": "bar"},
                        "snippets": {"sw": "switch", "foo": "global-foo"}
                    },
                    "stylesheet": {
                        "options": {"shortHex": true},
                        "snippets": {"gd": "grid"}
                    }
                },
                "syntax": {
                    "angular": {
                        "profile": {"tagCase": "lower"},
                        "format": {"comment": {"enabled": false}},
                        "snippets": {"sw": "div[ngSwitch]"}
                    }
                },
                "project": {
                    "proj1": {
                        "globals": {
                            "markup": {
                                "snippets": {"p1s": "div.proj1-snippet"},
                                "variables": {"bar": "project-bar"}
                            }
                        },
                        "syntax": {
                            "angular": {
                                "format": {"comment": {"after": "--"}},
                                "snippets": ["xsl", {"foo": "project-foo"}]
                            }
                        }
                    }
                }
            })
            .to_string(),
        )
        .unwrap()
    }

    fn literal(options: &Options, kind: AbbreviationType, name: &str) -> Option<String> {
        let config = create_options(options.clone());
        assert_eq!(config.kind, kind);
        config
            .snippets
            .resolve(name)
            .and_then(Snippet::as_literal)
            .map(str::to_string)
    }

    #[test]
    fn globals_apply_to_type() {
        let options = sample().options(&ConfigContext::syntax("html"));
        let config = create_options(options.clone());

        assert_eq!(config.profile.tag_case, "upper");
        assert_eq!(config.variables["lang"], "ru");
        assert_eq!(config.variables["charset"], "UTF-8");
        assert_eq!(config.format.get("comment"), Some(&json!({"enabled": true})));
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "sw").as_deref(),
            Some("switch")
        );
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "a").as_deref(),
            Some("a[href]")
        );
    }

    #[test]
    fn syntax_overrides_globals() {
        let options = sample().options(&ConfigContext::syntax("angular"));
        let config = create_options(options.clone());

        assert_eq!(config.profile.tag_case, "lower");
        assert_eq!(config.profile.attribute_case, "upper");
        assert_eq!(config.format.get("comment"), Some(&json!({"enabled": false})));
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "sw").as_deref(),
            Some("div[ngSwitch]")
        );
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "foo").as_deref(),
            Some("global-foo")
        );
    }

    #[test]
    fn project_overrides_syntax_and_globals() {
        let options =
            sample().options(&ConfigContext::syntax("angular").with_project("proj1"));
        let config = create_options(options.clone());

        assert_eq!(config.variables["bar"], "project-bar");
        assert_eq!(
            config.format.get("comment"),
            Some(&json!({"enabled": false, "after": "--"}))
        );
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "p1s").as_deref(),
            Some("div.proj1-snippet")
        );
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "sw").as_deref(),
            Some("div[ngSwitch]")
        );
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "foo").as_deref(),
            Some("project-foo")
        );
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "tm").as_deref(),
            Some("xsl:template[match mode]")
        );
    }

    #[test]
    fn unknown_project_uses_lower_layers() {
        let options = sample().options(&ConfigContext::syntax("angular").with_project("nope"));
        let config = create_options(options);
        assert_eq!(config.variables["bar"], "bar");
    }

    #[test]
    fn stylesheet_type_context() {
        let config = sample();
        let options = config.options(&ConfigContext::kind("stylesheet"));
        let resolved = create_options(options.clone());

        assert_eq!(resolved.syntax, "css");
        assert_eq!(resolved.kind, AbbreviationType::Stylesheet);
        assert_eq!(*resolved.profile, xabbr_core::Profile::default());
        assert_eq!(
            literal(&options, AbbreviationType::Stylesheet, "gd").as_deref(),
            Some("grid")
        );
        assert_eq!(config.sections(AbbreviationType::Stylesheet, "css", None).len(), 1);
    }

    #[test]
    fn section_options_are_addons() {
        let config = ProjectConfig::from_json(
            r#"{"globals": {"markup": {"options": {"bem": {"element": "--"}}}}}"#,
        )
        .unwrap();
        let resolved = create_options(config.options(&ConfigContext::syntax("html")));

        assert_eq!(resolved.addons.get("bem"), Some(&json!({"element": "--"})));
        assert_eq!(*resolved.profile, xabbr_core::Profile::default());

        let per_call = create_options(json!({"options": {"bem": {"element": "--"}}}));
        assert_eq!(per_call.addons, resolved.addons);

        let stylesheet = create_options(sample().options(&ConfigContext::kind("stylesheet")));
        assert_eq!(stylesheet.addons.get("shortHex"), Some(&json!(true)));
    }

    #[test]
    fn per_call_options_layer_over_config() {
        let context = ConfigContext::syntax("angular").with_project("proj1");
        let options = sample().options_with(
            &context,
            Options::new()
                .with_variables(json!({"lang": "de"}))
                .with_format(json!({"comment": {"before": "#"}}))
                .with_profile(json!({"attributeQuotes": "single"}))
                .with_addons(json!({"jsx": true}))
                .with_snippets(json!({"sw": "caller-switch"})),
        );
        let config = create_options(options.clone());

        assert_eq!(config.variables["lang"], "de");
        assert_eq!(config.variables["bar"], "project-bar");
        assert_eq!(
            config.format.get("comment"),
            Some(&json!({"enabled": false, "after": "--", "before": "#"}))
        );
        assert_eq!(config.profile.tag_case, "lower");
        assert_eq!(config.profile.attribute_case, "upper");
        assert_eq!(config.profile.attribute_quotes, "single");
        assert_eq!(config.addons.get("jsx"), Some(&json!(true)));
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "sw").as_deref(),
            Some("caller-switch")
        );
        assert_eq!(
            literal(&options, AbbreviationType::Markup, "p1s").as_deref(),
            Some("div.proj1-snippet")
        );
    }

    #[test]
    fn per_call_prebuilt_values_and_syntax_win() {
        let profile = std::sync::Arc::new(xabbr_core::Profile::default());
        let options = sample().options_with(
            &ConfigContext::syntax("angular"),
            Options::new()
                .with_syntax("html")
                .with_profile(std::sync::Arc::clone(&profile))
                .with_text("hi"),
        );
        let config = create_options(options);

        assert_eq!(config.syntax, "html");
        assert!(std::sync::Arc::ptr_eq(&profile, &config.profile));
        assert_eq!(config.text, Some(crate::options::InsertedText::from("hi")));
        assert_eq!(
            config.snippets.resolve("sw").and_then(Snippet::as_literal),
            Some("switch")
        );
    }

    #[test]
    fn yaml_and_json_are_equivalent() {
        let yaml = "globals:\n  markup:\n    variables:\n      lang: de\n";
        let json = r#"{"globals": {"markup": {"variables": {"lang": "de"}}}}"#;
        assert_eq!(
            ProjectConfig::from_yaml(yaml).unwrap(),
            ProjectConfig::from_json(json).unwrap()
        );
        assert_eq!(ProjectConfig::from_yaml("").unwrap(), ProjectConfig::default());
    }

    #[test]
    fn rejects_non_mapping_root() {
        assert!(matches!(
            ProjectConfig::from_json("[1, 2]"),
            Err(ConfigError::InvalidRootType)
        ));
        assert!(matches!(
            ProjectConfig::from_json("{"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ProjectConfig::from_yaml("a: [unterminated"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ProjectConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "{err:?}");
    }
}
