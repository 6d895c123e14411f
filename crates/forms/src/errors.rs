use std::path::PathBuf;

use thiserror::Error;

/// Inconsistencies in a form schema. Raised when a schema is built or loaded,
/// never while validating values.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    #[error("field {field}: unknown field type {kind:?}")]
    UnknownFieldType { field: String, kind: String },

    #[error("field {field}: invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("field {field}: minLength {min} exceeds maxLength {max}")]
    LengthBounds { field: String, min: usize, max: usize },

    #[error("field {field}: minValue {min} exceeds maxValue {max}")]
    ValueBounds { field: String, min: f64, max: f64 },

    #[error("field {0}: radio field needs at least one group with at least one option")]
    EmptyRadio(String),

    #[error("field {0}: minValue/maxValue only apply to number fields")]
    BoundsOnNonNumber(String),

    #[error("field {0}: groups only apply to radio fields")]
    GroupsOnNonRadio(String),
}

/// Rejected change events.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ControllerError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("field {field}: {option:?} is not one of its options")]
    UnknownOption { field: String, option: String },

    #[error("field {field}: no option at group {group}, index {index}")]
    OptionOutOfRange {
        field: String,
        group: usize,
        index: usize,
    },
}

/// Failures while reading a schema file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ron error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported schema file: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}
