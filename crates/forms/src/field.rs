//! Field descriptors: the static, per-input part of a form schema.
//!
//! A field is described by its `name` (key into the value map), a `label`
//! used in messages, a [`FieldKind`] and the rules in [`TextRules`]. The
//! rules apply to every kind because they run against the raw string value;
//! only number fields carry a [`NumberRange`] and only radio fields carry
//! [`RadioGroup`]s.
//!
//! ```
//! use forms::{FieldDescriptor, NumberRange, Pattern, RadioGroup};
//!
//! # fn main() -> Result<(), regex::Error> {
//! let email = FieldDescriptor::text("email", "Email")
//!     .required()
//!     .pattern(Pattern::new(r"^[^@\s]+@[^@\s]+$")?)
//!     .custom_message("Bad format");
//! let age = FieldDescriptor::number("age", "Age", NumberRange::default().min(18.0).max(65.0));
//! let color = FieldDescriptor::radio("color", "Color", vec![
//!     RadioGroup::inline(["red", "green"]),
//!     RadioGroup::stacked(["blue"]),
//! ]);
//!
//! assert!(email.is_textual() && age.is_textual());
//! assert!(!color.is_textual());
//! assert!(color.has_option("blue"));
//! # Ok(())
//! # }
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::errors::SchemaError;

/// Primitive input kinds that all validate as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum InputKind {
    Text,
    Email,
    Password,
    Tel,
    Url,
    Search,
    Date,
    Time,
    DatetimeLocal,
    Month,
    Week,
    Color,
    Textarea,
    Hidden,
}

/// How the options of one radio group are laid out by a renderer.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GroupLayout {
    Inline,
    #[default]
    Stacked,
}

/// One visual group of radio options. All groups of a field share the
/// field's single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioGroup {
    #[serde(default)]
    pub layout: GroupLayout,
    pub options: Vec<String>,
}

impl RadioGroup {
    pub fn new<I, S>(layout: GroupLayout, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            layout,
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    pub fn inline<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(GroupLayout::Inline, options)
    }

    pub fn stacked<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(GroupLayout::Stacked, options)
    }
}

/// Inclusive numeric bounds of a number field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberRange {
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

/// The shape of a field. Each variant carries only what applies to it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text(InputKind),
    Number(NumberRange),
    Radio(Vec<RadioGroup>),
}

impl FieldKind {
    /// The input type name as it appears in schema files and markup.
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Text(kind) => kind.as_ref(),
            FieldKind::Number(_) => "number",
            FieldKind::Radio(_) => "radio",
        }
    }
}

/// A compiled matching rule. Matching is an unanchored search, so a pattern
/// has to carry its own `^`/`$` to constrain the whole value.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Rules evaluated against the raw string value of any field kind.
///
/// `custom_message` replaces the default text of pattern and length
/// violations; it never affects the required or numeric messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRules {
    pub pattern: Option<Pattern>,
    pub custom_message: Option<String>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

/// Declarative description of a single form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub placeholder: Option<String>,
    pub rules: TextRules,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            placeholder: None,
            rules: TextRules::default(),
        }
    }

    /// Plain `text` input.
    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text(InputKind::Text))
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>, range: NumberRange) -> Self {
        Self::new(name, label, FieldKind::Number(range))
    }

    pub fn radio(
        name: impl Into<String>,
        label: impl Into<String>,
        groups: Vec<RadioGroup>,
    ) -> Self {
        Self::new(name, label, FieldKind::Radio(groups))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.rules.pattern = Some(pattern);
        self
    }

    pub fn custom_message(mut self, message: impl Into<String>) -> Self {
        self.rules.custom_message = Some(message.into());
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.rules.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.rules.max_length = Some(max);
        self
    }

    /// Return true if this field is edited as a free-form string, and so
    /// shows its placeholder.
    pub fn is_textual(&self) -> bool {
        matches!(self.kind, FieldKind::Text(_) | FieldKind::Number(_))
    }

    pub fn groups(&self) -> &[RadioGroup] {
        match &self.kind {
            FieldKind::Radio(groups) => groups,
            FieldKind::Text(_) | FieldKind::Number(_) => &[],
        }
    }

    /// True if `option` appears in any group of a radio field.
    pub fn has_option(&self, option: &str) -> bool {
        self.groups()
            .iter()
            .any(|g| g.options.iter().any(|o| o == option))
    }

    pub fn option_at(&self, group: usize, index: usize) -> Option<&str> {
        self.groups()
            .get(group)
            .and_then(|g| g.options.get(index))
            .map(String::as_str)
    }

    /// Check the invariants the validation engine relies on.
    pub fn check(&self) -> Result<(), SchemaError> {
        if let (Some(min), Some(max)) = (self.rules.min_length, self.rules.max_length) {
            if min > max {
                return Err(SchemaError::LengthBounds {
                    field: self.name.clone(),
                    min,
                    max,
                });
            }
        }
        match &self.kind {
            FieldKind::Text(_) => Ok(()),
            FieldKind::Number(range) => match (range.min, range.max) {
                (Some(min), Some(max)) if min > max => Err(SchemaError::ValueBounds {
                    field: self.name.clone(),
                    min,
                    max,
                }),
                _ => Ok(()),
            },
            FieldKind::Radio(groups) => {
                if groups.iter().any(|g| !g.options.is_empty()) {
                    Ok(())
                } else {
                    Err(SchemaError::EmptyRadio(self.name.clone()))
                }
            }
        }
    }
}
