//! Field catalogue: what the form asks for and how, in a given variant.

use serde::Serialize;

use saintluc_core::{AsaScore, Field, Gender, SurgicalIndication, TreatedHta};

use crate::error::ScoringError;
use crate::variant::Variant;

/// How a field is entered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free positive number.
    Numeric { unit: Option<&'static str> },
    /// One of a fixed set of coded options.
    Choice { options: Vec<ChoiceOption> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub code: u8,
    pub label: &'static str,
}

/// A form field as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDef {
    pub field: Field,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn id(&self) -> &'static str {
        self.field.id()
    }

    /// Label shown for a raw answer, if it names a choice option.
    pub fn option_label(&self, code: u8) -> Option<&'static str> {
        match &self.kind {
            FieldKind::Choice { options } => {
                options.iter().find(|o| o.code == code).map(|o| o.label)
            }
            FieldKind::Numeric { .. } => None,
        }
    }

    /// Code of the option whose label matches `answer`, ignoring case.
    pub fn code_for_label(&self, answer: &str) -> Option<u8> {
        match &self.kind {
            FieldKind::Choice { options } => options
                .iter()
                .find(|o| o.label.to_lowercase() == answer.trim().to_lowercase())
                .map(|o| o.code),
            FieldKind::Numeric { .. } => None,
        }
    }
}

/// Display order of choice codes; matches the original form.
fn option_codes(field: Field) -> Vec<u8> {
    match field {
        Field::Gender => ordered(&[Gender::Male, Gender::Female], |g| g.code()),
        Field::SurgicalIndication => ordered(
            &[SurgicalIndication::Osteonecrosis, SurgicalIndication::Arthritis],
            |s| s.code(),
        ),
        Field::AsaScore => ordered(AsaScore::ALL, |a| a.code()),
        Field::TreatedHta => ordered(&[TreatedHta::Yes, TreatedHta::No], |t| t.code()),
        Field::Age | Field::PreopEmoglobin => Vec::new(),
    }
}

fn ordered<T: Copy>(values: &[T], code: fn(T) -> u8) -> Vec<u8> {
    values.iter().map(|v| code(*v)).collect()
}

/// Definition of one field in the given variant.
pub fn field_def(field: Field, variant: Variant) -> FieldDef {
    let kind = match field {
        Field::Age => FieldKind::Numeric { unit: None },
        Field::PreopEmoglobin => FieldKind::Numeric { unit: Some("g/dl") },
        _ => FieldKind::Choice {
            options: option_codes(field)
                .into_iter()
                .filter_map(|code| {
                    variant
                        .option_label(field, code)
                        .map(|label| ChoiceOption { code, label })
                })
                .collect(),
        },
    };
    FieldDef {
        field,
        label: variant.field_label(field),
        kind,
    }
}

/// All six fields in form order.
pub fn fields(variant: Variant) -> Vec<FieldDef> {
    Field::ALL
        .into_iter()
        .map(|f| field_def(f, variant))
        .collect()
}

/// Look up a field by its id.
pub fn get_field(id: &str, variant: Variant) -> Result<FieldDef, ScoringError> {
    Field::from_id(id)
        .map(|f| field_def(f, variant))
        .ok_or_else(|| ScoringError::UnknownField(id.to_string()))
}
