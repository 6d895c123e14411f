//! Declarative forms with client-side validation.
//!
//! The crate focuses on *data*: a [`FormSchema`] describes the fields, the
//! validation engine ([`validate_field`], [`validate_form`]) turns values into
//! human-readable messages, and a [`FormController`] owns the values and
//! errors of one rendered form. Rendering is left to the caller, who reads a
//! [`FormView`] snapshot.
//!
//! # Example
//!
//! ```
//! use forms::{FieldDescriptor, FormController, FormSchema, NumberRange};
//!
//! let schema = FormSchema::new(
//!     "Signup",
//!     vec![
//!         FieldDescriptor::text("email", "Email").required(),
//!         FieldDescriptor::number("age", "Age", NumberRange::default().min(18.0).max(65.0)),
//!     ],
//! );
//! let mut form = FormController::new(schema).unwrap();
//!
//! form.handle_change("age", "10").unwrap();
//! assert!(!form.handle_submit().is_accepted());
//! assert_eq!(form.errors().get("email"), Some("Email is required"));
//! assert_eq!(form.errors().get("age"), Some("Age should be at least 18"));
//!
//! form.handle_change("email", "ann@example.com").unwrap();
//! form.handle_change("age", "30").unwrap();
//! assert!(form.handle_submit().is_accepted());
//! ```

pub mod controller;
pub mod errors;
pub mod field;
pub mod loader;
pub mod logging;
pub mod schema;
pub mod state;
pub mod validate;
pub mod view;

// Re-export main types
pub use controller::{FormController, FormSubmission, SubmissionSink, SubmitOutcome, TracingSink};
pub use errors::{ControllerError, LoadError, SchemaError};
pub use field::{
    FieldDescriptor, FieldKind, GroupLayout, InputKind, NumberRange, Pattern, RadioGroup,
    TextRules,
};
pub use loader::{SchemaFormat, load_schema, parse_schema};
pub use schema::FormSchema;
pub use state::{FormErrors, FormState, FormValues};
pub use validate::{Rule, Violation, parse_number, validate_field, validate_form};
pub use view::{FieldView, FormView, GroupView, OptionView};
