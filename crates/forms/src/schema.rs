//! Form schema: the ordered collection of field descriptors for one form.
//!
//! Kept free of mutation logic; runtime values and errors live in
//! [`FormState`](crate::FormState) and are owned by the
//! [`FormController`](crate::FormController).

use std::collections::HashSet;

use crate::errors::SchemaError;
use crate::field::FieldDescriptor;

/// Declarative schema for a multi-field form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub form_name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(form_name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            form_name: form_name.into(),
            fields,
        }
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Find a field by its name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check schema-wide invariants: unique names plus every field's own
    /// invariants. Stops at the first problem.
    pub fn check(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
            field.check()?;
        }
        Ok(())
    }
}
