//! Validation engine: turns a field plus a raw value into violations, and a
//! whole schema plus a value map into per-field error messages.
//!
//! Rule order for a single field (every rule that applies is reported):
//!
//! 1. required       - empty value on a required field
//! 2. pattern        - value does not match `rules.pattern`
//! 3. min length     - fewer characters than `rules.min_length`
//! 4. max length     - more characters than `rules.max_length`
//! 5. numeric branch - number fields only: either "must be a number", or the
//!    `min`/`max` bound checks, never both
//!
//! Rules 1-4 look at the raw string for every field kind, number fields
//! included. Pattern and length violations use `rules.custom_message` when
//! one is set.

use std::fmt;

use strum::{AsRefStr, Display};

use crate::field::{FieldDescriptor, FieldKind, NumberRange};
use crate::schema::FormSchema;
use crate::state::{FormErrors, FormValues};

/// The rule that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Rule {
    Required,
    Pattern,
    MinLength,
    MaxLength,
    NotANumber,
    MinValue,
    MaxValue,
}

/// A single human-readable reason a value failed one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: Rule,
    pub message: String,
}

impl Violation {
    fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validate one raw value against one field, in rule order.
pub fn validate_field(field: &FieldDescriptor, value: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    let label = &field.label;
    let rules = &field.rules;
    let custom_or = |default: String| rules.custom_message.clone().unwrap_or(default);

    if field.required && value.is_empty() {
        violations.push(Violation::new(Rule::Required, format!("{label} is required")));
    }

    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(value) {
            violations.push(Violation::new(
                Rule::Pattern,
                custom_or(format!("{label} is invalid")),
            ));
        }
    }

    let length = value.chars().count();
    if let Some(min) = rules.min_length {
        if length < min {
            violations.push(Violation::new(
                Rule::MinLength,
                custom_or(format!("{label} is too short")),
            ));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            violations.push(Violation::new(
                Rule::MaxLength,
                custom_or(format!("{label} is too long")),
            ));
        }
    }

    match &field.kind {
        FieldKind::Number(range) => check_number(label, range, value, &mut violations),
        FieldKind::Text(_) | FieldKind::Radio(_) => {}
    }

    violations
}

fn check_number(label: &str, range: &NumberRange, value: &str, out: &mut Vec<Violation>) {
    let Some(number) = parse_number(value) else {
        out.push(Violation::new(
            Rule::NotANumber,
            format!("{label} must be a number"),
        ));
        return;
    };
    if let Some(min) = range.min {
        if number < min {
            out.push(Violation::new(
                Rule::MinValue,
                format!("{label} should be at least {min}"),
            ));
        }
    }
    if let Some(max) = range.max {
        if number > max {
            out.push(Violation::new(
                Rule::MaxValue,
                format!("{label} should be at most {max}"),
            ));
        }
    }
}

/// Numeric reading of a raw value, the way a browser number input reads it.
///
/// Surrounding whitespace is ignored and a blank value reads as `0`. Accepted
/// forms are decimal literals with optional sign, fraction and exponent
/// (`-2.5`, `.5`, `1e3`), a signed `Infinity`, and unsigned `0x`, `0o` and
/// `0b` integer literals. Anything else (`NaN`, `inf`, `1_000`, `-0x1A`) is
/// not a number.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    if let Some(n) = parse_radix_literal(trimmed) {
        return Some(n);
    }

    let unsigned = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if unsigned == "Infinity" {
        let sign = if trimmed.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }
    // keeps `inf`, `nan` and friends away from the float parser
    if !unsigned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

fn parse_radix_literal(value: &str) -> Option<f64> {
    let (radix, digits) = match value.get(..2)? {
        "0x" | "0X" => (16, &value[2..]),
        "0o" | "0O" => (8, &value[2..]),
        "0b" | "0B" => (2, &value[2..]),
        _ => return None,
    };
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Validate every field of `schema` in order. Fields without violations get
/// no entry; an empty result means the form is valid.
pub fn validate_form(schema: &FormSchema, values: &FormValues) -> FormErrors {
    let mut errors = FormErrors::default();
    for field in &schema.fields {
        let violations = validate_field(field, values.get(&field.name));
        if violations.is_empty() {
            continue;
        }
        let combined = violations
            .iter()
            .map(|v| v.message.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        errors.insert(&field.name, combined);
    }
    errors
}
