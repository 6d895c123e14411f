//! Loading schemas from configuration files.
//!
//! Supported formats are chosen by file extension: `.ron`, `.json` and
//! `.toml`. All three share one document shape with camelCase keys:
//!
//! ```json
//! {
//!   "formName": "Contact",
//!   "fields": [
//!     { "name": "email", "label": "Email", "type": "email", "required": true,
//!       "validation": { "pattern": "^[^@]+@[^@]+$", "customMessage": "Bad format" } },
//!     { "name": "age", "label": "Age", "type": "number",
//!       "validation": { "minValue": 18, "maxValue": 65 } },
//!     { "name": "color", "label": "Color", "type": "radio",
//!       "groups": [ { "layout": "inline", "options": ["red", "green"] } ] }
//!   ]
//! }
//! ```
//!
//! `type` defaults to `text`. A loaded schema has passed the same checks as
//! [`FormSchema::check`].

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;

use crate::errors::{LoadError, SchemaError};
use crate::field::{
    FieldDescriptor, FieldKind, InputKind, NumberRange, Pattern, RadioGroup, TextRules,
};
use crate::schema::FormSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SchemaFormat {
    Ron,
    Json,
    Toml,
}

impl SchemaFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| Self::from_str(ext).ok())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchemaFile {
    form_name: String,
    #[serde(default)]
    fields: Vec<FieldEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FieldEntry {
    name: String,
    label: String,
    #[serde(rename = "type", default = "default_type")]
    kind: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    placeholder: Option<String>,
    #[serde(default)]
    validation: ValidationEntry,
    #[serde(default)]
    groups: Vec<RadioGroup>,
}

fn default_type() -> String {
    "text".to_string()
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationEntry {
    pattern: Option<String>,
    custom_message: Option<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    min_value: Option<f64>,
    max_value: Option<f64>,
}

impl TryFrom<FieldEntry> for FieldDescriptor {
    type Error = SchemaError;

    fn try_from(entry: FieldEntry) -> Result<Self, Self::Error> {
        let FieldEntry {
            name,
            label,
            kind,
            required,
            placeholder,
            validation,
            groups,
        } = entry;

        let has_bounds = validation.min_value.is_some() || validation.max_value.is_some();
        let kind = match kind.as_str() {
            "number" => FieldKind::Number(NumberRange {
                min: validation.min_value,
                max: validation.max_value,
            }),
            "radio" => FieldKind::Radio(groups.clone()),
            other => match InputKind::from_str(other) {
                Ok(input) => FieldKind::Text(input),
                Err(_) => {
                    return Err(SchemaError::UnknownFieldType {
                        field: name,
                        kind: other.to_string(),
                    });
                }
            },
        };
        if has_bounds && !matches!(kind, FieldKind::Number(_)) {
            return Err(SchemaError::BoundsOnNonNumber(name));
        }
        if !groups.is_empty() && !matches!(kind, FieldKind::Radio(_)) {
            return Err(SchemaError::GroupsOnNonRadio(name));
        }

        let pattern = match validation.pattern.as_deref().map(Pattern::new).transpose() {
            Ok(pattern) => pattern,
            Err(source) => return Err(SchemaError::InvalidPattern { field: name, source }),
        };

        Ok(FieldDescriptor {
            name,
            label,
            kind,
            required,
            placeholder,
            rules: TextRules {
                pattern,
                custom_message: validation.custom_message,
                min_length: validation.min_length,
                max_length: validation.max_length,
            },
        })
    }
}

impl TryFrom<SchemaFile> for FormSchema {
    type Error = SchemaError;

    fn try_from(file: SchemaFile) -> Result<Self, Self::Error> {
        let fields = file
            .fields
            .into_iter()
            .map(FieldDescriptor::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let schema = FormSchema::new(file.form_name, fields);
        schema.check()?;
        Ok(schema)
    }
}

/// Parse schema text in the given format.
pub fn parse_schema(text: &str, format: SchemaFormat) -> Result<FormSchema, LoadError> {
    let file: SchemaFile = match format {
        SchemaFormat::Ron => ron::from_str(text)?,
        SchemaFormat::Json => serde_json::from_str(text)?,
        SchemaFormat::Toml => toml::from_str(text)?,
    };
    Ok(FormSchema::try_from(file)?)
}

/// Read and parse a schema file, picking the format from its extension.
pub fn load_schema(path: impl AsRef<Path>) -> Result<FormSchema, LoadError> {
    let path = path.as_ref();
    let format = SchemaFormat::from_path(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let text = fs::read_to_string(path)?;
    let schema = parse_schema(&text, format)?;
    debug!(
        path = %path.display(),
        format = %format,
        form = %schema.form_name,
        fields = schema.field_count(),
        "loaded form schema"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::GroupLayout;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const CONTACT_JSON: &str = r#"{
        "formName": "Contact",
        "fields": [
            { "name": "email", "label": "Email", "type": "email", "required": true,
              "placeholder": "you@example.com",
              "validation": { "pattern": "^[^@]+@[^@]+$", "customMessage": "Bad format" } },
            { "name": "age", "label": "Age", "type": "number",
              "validation": { "minValue": 18, "maxValue": 65 } },
            { "name": "color", "label": "Color", "type": "radio",
              "groups": [ { "layout": "inline", "options": ["red", "green"] },
                          { "options": ["blue"] } ] },
            { "name": "note", "label": "Note" }
        ]
    }"#;

    #[test]
    fn json_document() {
        let schema = parse_schema(CONTACT_JSON, SchemaFormat::Json).unwrap();
        assert_eq!(schema.form_name, "Contact");
        assert_eq!(schema.field_count(), 4);

        let email = schema.field("email").unwrap();
        assert_eq!(email.kind, FieldKind::Text(InputKind::Email));
        assert!(email.required);
        assert_eq!(email.placeholder.as_deref(), Some("you@example.com"));
        assert_eq!(email.rules.custom_message.as_deref(), Some("Bad format"));
        assert_eq!(email.rules.pattern.as_ref().map(Pattern::as_str), Some("^[^@]+@[^@]+$"));

        assert_eq!(
            schema.field("age").unwrap().kind,
            FieldKind::Number(NumberRange {
                min: Some(18.0),
                max: Some(65.0)
            })
        );

        let color = schema.field("color").unwrap();
        assert_eq!(color.groups()[0].layout, GroupLayout::Inline);
        assert_eq!(color.groups()[1].layout, GroupLayout::Stacked);

        assert_eq!(schema.field("note").unwrap().kind.type_name(), "text");
    }

    #[test]
    fn ron_document() {
        let text = r#"(
            formName: "Feedback",
            fields: [
                (name: "rating", label: "Rating", type: "number",
                 validation: (minValue: Some(1.0), maxValue: Some(5.0))),
                (name: "comment", label: "Comment", type: "textarea",
                 validation: (maxLength: Some(200))),
            ],
        )"#;
        let schema = parse_schema(text, SchemaFormat::Ron).unwrap();
        assert_eq!(schema.form_name, "Feedback");
        assert_eq!(
            schema.field("comment").unwrap().kind,
            FieldKind::Text(InputKind::Textarea)
        );
        assert_eq!(schema.field("comment").unwrap().rules.max_length, Some(200));
        assert_eq!(
            schema.field("rating").unwrap().kind,
            FieldKind::Number(NumberRange {
                min: Some(1.0),
                max: Some(5.0)
            })
        );
    }

    #[test]
    fn bundled_contact_schema() {
        let schema =
            parse_schema(include_str!("../assets/contact.ron"), SchemaFormat::Ron).unwrap();
        assert_eq!(schema.form_name, "Contact Us");
        assert_eq!(schema.field_count(), 4);
        let contact = schema.field("contact").unwrap();
        assert_eq!(contact.groups()[0].layout, GroupLayout::Inline);
        assert_eq!(contact.option_at(1, 0), Some("letter"));
        assert!(schema.field("email").unwrap().rules.pattern.is_some());
    }

    #[test]
    fn toml_document() {
        let text = r#"
            formName = "Newsletter"

            [[fields]]
            name = "email"
            label = "Email"
            type = "email"
            required = true

            [[fields]]
            name = "frequency"
            label = "Frequency"
            type = "radio"
            groups = [{ layout = "stacked", options = ["daily", "weekly"] }]
        "#;
        let schema = parse_schema(text, SchemaFormat::Toml).unwrap();
        assert_eq!(schema.field_count(), 2);
        assert!(schema.field("frequency").unwrap().has_option("weekly"));
    }

    #[test]
    fn construction_checks_apply() {
        let cases = [
            (
                r#"{"formName":"F","fields":[{"name":"a","label":"A","type":"checkbox"}]}"#,
                "unknown field type",
            ),
            (
                r#"{"formName":"F","fields":[{"name":"a","label":"A","validation":{"pattern":"("}}]}"#,
                "invalid pattern",
            ),
            (
                r#"{"formName":"F","fields":[{"name":"a","label":"A","validation":{"minValue":1}}]}"#,
                "only apply to number fields",
            ),
            (
                r#"{"formName":"F","fields":[{"name":"a","label":"A","groups":[{"options":["x"]}]}]}"#,
                "only apply to radio fields",
            ),
            (
                r#"{"formName":"F","fields":[{"name":"a","label":"A","type":"radio"}]}"#,
                "at least one group",
            ),
            (
                r#"{"formName":"F","fields":[{"name":"a","label":"A"},{"name":"a","label":"B"}]}"#,
                "duplicate field name",
            ),
        ];
        for (text, expected) in cases {
            match parse_schema(text, SchemaFormat::Json) {
                Err(LoadError::Schema(err)) => {
                    let message = err.to_string();
                    assert!(message.contains(expected), "{message:?} for {text}");
                }
                other => panic!("expected schema error for {text}, got {other:?}"),
            }
        }
    }

    #[test]
    fn syntax_errors_keep_their_format() {
        assert!(matches!(
            parse_schema("{", SchemaFormat::Json),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            parse_schema("(", SchemaFormat::Ron),
            Err(LoadError::Ron(_))
        ));
        assert!(matches!(
            parse_schema("formName = ", SchemaFormat::Toml),
            Err(LoadError::Toml(_))
        ));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(SchemaFormat::from_path(Path::new("a/form.ron")), Some(SchemaFormat::Ron));
        assert_eq!(SchemaFormat::from_path(Path::new("form.JSON")), Some(SchemaFormat::Json));
        assert_eq!(SchemaFormat::from_path(Path::new("form.toml")), Some(SchemaFormat::Toml));
        assert_eq!(SchemaFormat::from_path(Path::new("form.yaml")), None);
        assert_eq!(SchemaFormat::from_path(Path::new("form")), None);
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(CONTACT_JSON.as_bytes()).unwrap();
        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.form_name, "Contact");

        let other = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            load_schema(other.path()),
            Err(LoadError::UnsupportedFormat(_))
        ));

        assert!(matches!(
            load_schema("does/not/exist.ron"),
            Err(LoadError::Io(_))
        ));
    }
}
