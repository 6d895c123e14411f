//! Form controller: owns the runtime state of one rendered form.
//!
//! Responsibilities:
//! - Change events (persist value, clear the stale error for that field)
//! - Radio selection (one value per field, shared by all of its groups)
//! - Submission (validate everything, replace errors, notify the sink)
//!
//! Nothing is re-validated while the user types; validation only runs on
//! submit.

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue, json};
use tracing::{debug, info};

use crate::errors::{ControllerError, SchemaError};
use crate::field::FieldKind;
use crate::schema::FormSchema;
use crate::state::{FormErrors, FormState, FormValues};
use crate::validate::{parse_number, validate_form};

/// Receives submission outcomes from a controller.
pub trait SubmissionSink {
    /// Every field passed; `submission` holds the collected values.
    fn on_accepted(&mut self, submission: &FormSubmission);

    /// At least one field failed; `errors` is the new error state.
    fn on_rejected(&mut self, form_name: &str, errors: &FormErrors);
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for &mut S {
    fn on_accepted(&mut self, submission: &FormSubmission) {
        (**self).on_accepted(submission);
    }

    fn on_rejected(&mut self, form_name: &str, errors: &FormErrors) {
        (**self).on_rejected(form_name, errors);
    }
}

/// Default sink: reports outcomes as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn on_accepted(&mut self, submission: &FormSubmission) {
        info!(
            form = %submission.form_name,
            values = ?submission.values,
            "Form submitted"
        );
    }

    fn on_rejected(&mut self, form_name: &str, errors: &FormErrors) {
        info!(
            form = %form_name,
            invalid_fields = errors.len(),
            "Validation failed. Check errors."
        );
    }
}

/// Values handed off after a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub form_name: String,
    pub values: FormValues,
}

impl FormSubmission {
    /// JSON object with one entry per schema field. Number fields become JSON
    /// numbers when they parse, everything else stays a string.
    pub fn to_json(&self, schema: &FormSchema) -> JsonValue {
        let mut map = JsonMap::new();
        for field in &schema.fields {
            let raw = self.values.get(&field.name);
            let value = match &field.kind {
                FieldKind::Number(_) => number_json(raw),
                FieldKind::Text(_) | FieldKind::Radio(_) => JsonValue::String(raw.to_string()),
            };
            map.insert(field.name.clone(), value);
        }
        JsonValue::Object(map)
    }
}

/// Largest integer an `f64` holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_json(raw: &str) -> JsonValue {
    if let Ok(n) = raw.trim().parse::<i64>() {
        return json!(n);
    }
    match parse_number(raw) {
        Some(n) if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER => json!(n as i64),
        Some(n) => serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(raw.to_string())),
        None => JsonValue::String(raw.to_string()),
    }
}

/// Result of [`FormController::handle_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(FormSubmission),
    Rejected(FormErrors),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

/// Owns the schema, the current values and the current errors of one form.
pub struct FormController<S = TracingSink> {
    schema: FormSchema,
    state: FormState,
    sink: S,
}

impl FormController<TracingSink> {
    /// Controller reporting to [`TracingSink`].
    pub fn new(schema: FormSchema) -> Result<Self, SchemaError> {
        Self::with_sink(schema, TracingSink)
    }
}

impl<S: SubmissionSink> FormController<S> {
    /// Check the schema and start with empty values and errors.
    pub fn with_sink(schema: FormSchema, sink: S) -> Result<Self, SchemaError> {
        schema.check()?;
        debug!(form = %schema.form_name, fields = schema.field_count(), "form controller created");
        Ok(Self {
            schema,
            state: FormState::default(),
            sink,
        })
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn values(&self) -> &FormValues {
        &self.state.values
    }

    pub fn errors(&self) -> &FormErrors {
        &self.state.errors
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Record a new raw value for a field and drop its stale error.
    ///
    /// For radio fields the value must be one of the field's options; the
    /// new selection replaces the previous one across all groups.
    pub fn handle_change(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), ControllerError> {
        let value = value.into();
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| ControllerError::UnknownField(name.to_string()))?;
        if matches!(field.kind, FieldKind::Radio(_)) && !field.has_option(&value) {
            return Err(ControllerError::UnknownOption {
                field: name.to_string(),
                option: value,
            });
        }

        let stale = self.state.errors.clear_field(name);
        debug!(field = name, cleared_error = stale.is_some(), "field changed");
        self.state.values.set(name, value);
        Ok(())
    }

    /// Select option `index` of radio group `group` of field `name`.
    pub fn select_option(
        &mut self,
        name: &str,
        group: usize,
        index: usize,
    ) -> Result<(), ControllerError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| ControllerError::UnknownField(name.to_string()))?;
        let option = field
            .option_at(group, index)
            .ok_or_else(|| ControllerError::OptionOutOfRange {
                field: name.to_string(),
                group,
                index,
            })?
            .to_string();
        self.handle_change(name, option)
    }

    /// Validate every field, replace the error state and report the outcome
    /// to the sink.
    pub fn handle_submit(&mut self) -> SubmitOutcome {
        let errors = validate_form(&self.schema, &self.state.values);
        self.state.errors = errors.clone();

        if errors.is_empty() {
            let submission = FormSubmission {
                form_name: self.schema.form_name.clone(),
                values: self.state.values.clone(),
            };
            debug!(form = %submission.form_name, "submission accepted");
            self.sink.on_accepted(&submission);
            SubmitOutcome::Accepted(submission)
        } else {
            debug!(
                form = %self.schema.form_name,
                invalid_fields = errors.len(),
                "submission rejected"
            );
            self.sink.on_rejected(&self.schema.form_name, &errors);
            SubmitOutcome::Rejected(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, NumberRange, RadioGroup};
    use pretty_assertions::assert_eq;

    fn schema() -> FormSchema {
        FormSchema::new(
            "Contact",
            vec![
                FieldDescriptor::text("name", "Name").required(),
                FieldDescriptor::number("age", "Age", NumberRange::default().min(18.0)),
                FieldDescriptor::radio(
                    "color",
                    "Color",
                    vec![
                        RadioGroup::inline(["red", "green"]),
                        RadioGroup::stacked(["blue"]),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn starts_empty() {
        let controller = FormController::new(schema()).unwrap();
        assert!(controller.values().is_empty());
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn inconsistent_schema_fails_fast() {
        let mut bad = schema();
        bad.fields.push(FieldDescriptor::text("name", "Again"));
        assert!(matches!(
            FormController::new(bad),
            Err(SchemaError::DuplicateField(_))
        ));
    }

    #[test]
    fn change_persists_value_and_clears_only_that_error() {
        let mut controller = FormController::new(schema()).unwrap();
        controller.handle_change("age", "3").unwrap();
        assert!(!controller.handle_submit().is_accepted());
        assert!(controller.errors().get("name").is_some());
        assert!(controller.errors().get("age").is_some());

        controller.handle_change("name", "Ann").unwrap();
        assert_eq!(controller.values().get("name"), "Ann");
        assert_eq!(controller.errors().get("name"), None);
        // no live re-validation: the other error stays until the next submit
        assert_eq!(controller.errors().get("age"), Some("Age should be at least 18"));
    }

    #[test]
    fn change_does_not_validate() {
        let mut controller = FormController::new(schema()).unwrap();
        controller.handle_change("age", "abc").unwrap();
        assert!(controller.errors().is_empty());
    }

    #[test]
    fn unknown_field_and_option_are_rejected() {
        let mut controller = FormController::new(schema()).unwrap();
        assert_eq!(
            controller.handle_change("nope", "x"),
            Err(ControllerError::UnknownField("nope".into()))
        );
        assert_eq!(
            controller.handle_change("color", "purple"),
            Err(ControllerError::UnknownOption {
                field: "color".into(),
                option: "purple".into(),
            })
        );
        assert_eq!(
            controller.select_option("color", 1, 1),
            Err(ControllerError::OptionOutOfRange {
                field: "color".into(),
                group: 1,
                index: 1,
            })
        );
        assert!(controller.values().is_empty());
    }

    #[test]
    fn select_option_resolves_across_groups() {
        let mut controller = FormController::new(schema()).unwrap();
        controller.select_option("color", 0, 1).unwrap();
        assert_eq!(controller.values().get("color"), "green");
        controller.select_option("color", 1, 0).unwrap();
        assert_eq!(controller.values().get("color"), "blue");
    }

    #[test]
    fn submission_json_types_numbers() {
        let mut controller = FormController::new(schema()).unwrap();
        controller.handle_change("name", "Ann").unwrap();
        controller.handle_change("age", "42").unwrap();
        controller.handle_change("color", "red").unwrap();
        let SubmitOutcome::Accepted(submission) = controller.handle_submit() else {
            panic!("expected an accepted submission");
        };
        assert_eq!(
            submission.to_json(controller.schema()),
            json!({ "name": "Ann", "age": 42, "color": "red" })
        );
    }

    #[test]
    fn number_json_falls_back_to_strings() {
        assert_eq!(number_json("2.5"), json!(2.5));
        assert_eq!(number_json(" 7 "), json!(7));
        assert_eq!(number_json("abc"), json!("abc"));
        assert_eq!(number_json("inf"), json!("inf"));
        // no JSON spelling for infinity
        assert_eq!(number_json("-Infinity"), json!("-Infinity"));
    }

    #[test]
    fn number_json_reads_values_like_validation_does() {
        assert_eq!(number_json(""), json!(0));
        assert_eq!(number_json("0x1A"), json!(26));
        assert_eq!(number_json("0b11"), json!(3));
        assert_eq!(number_json("1e3"), json!(1000));
        assert_eq!(number_json("9007199254740993"), json!(9_007_199_254_740_993_i64));
    }
}
