use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::form::Field;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("expected a JSON object with the patient fields")]
    NotAnObject,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    #[error("{field}: value is required")]
    Missing { field: Field },

    #[error("{field}: '{raw}' is not a number")]
    NotNumeric { field: Field, raw: String },

    #[error("{field}: {value} is not allowed (expected {expected})")]
    OutOfDomain {
        field: Field,
        value: f64,
        expected: &'static str,
    },
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            Self::Missing { field }
            | Self::NotNumeric { field, .. }
            | Self::OutOfDomain { field, .. } => *field,
        }
    }
}

/// Every field that failed validation, in form order. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub(crate) Vec<FieldError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.iter().map(FieldError::field).collect()
    }

    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid patient input: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
