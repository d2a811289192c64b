//! Message templates with named placeholders.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use contracts_core::{Contract, ContractResult, ValidationError};

/// Quick-reply button attached to an interactive template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplateButton")]
pub struct TemplateButton {
    id: String,
    title: String,
}

// Channel providers cap button titles at 20 characters.
const MAX_BUTTON_TITLE: usize = 20;

impl TemplateButton {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> ContractResult<Self> {
        let id = id.into();
        let title = title.into();
        if title.is_empty() || title.chars().count() > MAX_BUTTON_TITLE {
            return Err(ValidationError::type_mismatch(
                "title",
                format!("button title must be 1..={MAX_BUTTON_TITLE} characters"),
            ));
        }
        Ok(Self { id, title })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Deserialize)]
struct RawTemplateButton {
    id: String,
    title: String,
}

impl TryFrom<RawTemplateButton> for TemplateButton {
    type Error = ValidationError;

    fn try_from(raw: RawTemplateButton) -> Result<Self, Self::Error> {
        Self::new(raw.id, raw.title)
    }
}

/// Parameterized message pattern.
///
/// The body carries `{named}` placeholders (ASCII alphanumerics and
/// underscores); [`Template::render`] substitutes them and fails when a
/// parameter is unbound. Placeholder syntax is validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTemplate")]
pub struct Template {
    name: String,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    buttons: Vec<TemplateButton>,
}

fn default_language() -> String {
    "en_US".to_string()
}

impl Template {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> ContractResult<Self> {
        let name = name.into();
        let body = body.into();
        if name.trim().is_empty() {
            return Err(ValidationError::type_mismatch(
                "name",
                "template name must not be blank",
            ));
        }
        parse_placeholders(&body)?;
        Ok(Self {
            name,
            language: default_language(),
            category: None,
            body,
            buttons: Vec::new(),
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_buttons(mut self, buttons: Vec<TemplateButton>) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn buttons(&self) -> &[TemplateButton] {
        &self.buttons
    }

    /// Names of the placeholders appearing in the body.
    pub fn placeholders(&self) -> BTreeSet<String> {
        // Syntax was validated at construction.
        parse_placeholders(&self.body).unwrap_or_default()
    }

    /// Substitute every placeholder, failing on unbound parameters.
    pub fn render(&self, params: &BTreeMap<String, String>) -> ContractResult<String> {
        let mut rendered = self.body.clone();
        for name in self.placeholders() {
            let value = params.get(&name).ok_or_else(|| {
                ValidationError::missing_field(format!("params.{name}"))
            })?;
            rendered = rendered.replace(&format!("{{{name}}}"), value);
        }
        Ok(rendered)
    }
}

impl Contract for Template {}

fn parse_placeholders(body: &str) -> ContractResult<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    let mut rest = body;
    while let Some(open) = rest.find('{') {
        let tail = &rest[open + 1..];
        let Some(close) = tail.find('}') else {
            return Err(ValidationError::type_mismatch(
                "body",
                "unterminated placeholder",
            ));
        };
        let name = &tail[..close];
        let well_formed =
            !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !well_formed {
            return Err(ValidationError::type_mismatch(
                "body",
                format!("malformed placeholder '{{{name}}}'"),
            ));
        }
        names.insert(name.to_string());
        rest = &tail[close + 1..];
    }
    if rest.contains('}') {
        return Err(ValidationError::type_mismatch(
            "body",
            "unmatched closing brace",
        ));
    }
    Ok(names)
}

#[derive(Debug, Deserialize)]
struct RawTemplate {
    name: String,
    #[serde(default = "default_language")]
    language: String,
    #[serde(default)]
    category: Option<String>,
    body: String,
    #[serde(default)]
    buttons: Vec<TemplateButton>,
}

impl TryFrom<RawTemplate> for Template {
    type Error = ValidationError;

    fn try_from(raw: RawTemplate) -> Result<Self, Self::Error> {
        let template = Template::new(raw.name, raw.body)?
            .with_language(raw.language)
            .with_buttons(raw.buttons);
        match raw.category {
            Some(category) => Ok(template.with_category(category)),
            None => Ok(template),
        }
    }
}
