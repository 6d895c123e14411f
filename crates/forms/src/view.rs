//! Read-only snapshot of a form for an external renderer.
//!
//! The snapshot joins the schema with the controller's current state: each
//! field gets its value and error, and radio options get a `checked` flag.
//! Styling is entirely the renderer's business.

use serde::Serialize;

use crate::controller::{FormController, SubmissionSink};
use crate::field::{FieldDescriptor, FieldKind, GroupLayout};
use crate::state::FormState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView<'a> {
    pub form_name: &'a str,
    pub fields: Vec<FieldView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldView<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub input_type: &'a str,
    pub required: bool,
    pub placeholder: Option<&'a str>,
    pub value: &'a str,
    pub error: Option<&'a str>,
    /// Empty for non-radio fields.
    pub groups: Vec<GroupView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView<'a> {
    pub layout: GroupLayout,
    pub options: Vec<OptionView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionView<'a> {
    pub label: &'a str,
    pub checked: bool,
}

impl<'a> FieldView<'a> {
    fn new(field: &'a FieldDescriptor, state: &'a FormState) -> Self {
        let value = state.values.get(&field.name);
        let groups = match &field.kind {
            FieldKind::Radio(groups) => groups
                .iter()
                .map(|g| GroupView {
                    layout: g.layout,
                    options: g
                        .options
                        .iter()
                        .map(|o| OptionView {
                            label: o,
                            checked: state.values.contains(&field.name) && o == value,
                        })
                        .collect(),
                })
                .collect(),
            FieldKind::Text(_) | FieldKind::Number(_) => Vec::new(),
        };

        Self {
            name: &field.name,
            label: &field.label,
            input_type: field.kind.type_name(),
            required: field.required,
            placeholder: field.placeholder.as_deref().filter(|_| field.is_textual()),
            value,
            error: state.errors.get(&field.name),
            groups,
        }
    }

    /// Labels of checked options, in render order.
    pub fn checked_options(&self) -> Vec<&'a str> {
        self.groups
            .iter()
            .flat_map(|g| g.options.iter())
            .filter(|o| o.checked)
            .map(|o| o.label)
            .collect()
    }
}

impl<S: SubmissionSink> FormController<S> {
    /// Snapshot of schema plus current state, in schema order.
    pub fn view(&self) -> FormView<'_> {
        let schema = self.schema();
        let state = self.state();
        FormView {
            form_name: &schema.form_name,
            fields: schema
                .fields
                .iter()
                .map(|f| FieldView::new(f, state))
                .collect(),
        }
    }
}
