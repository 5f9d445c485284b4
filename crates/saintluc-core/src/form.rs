//! The draft form a user fills in before scoring.
//!
//! Values are kept as the raw text the user typed and only turned into a
//! typed [`PatientInput`] by [`PatientForm::validate`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, FieldError, ValidationErrors};
use crate::models::patient::positive;
use crate::models::{AsaScore, Gender, PatientInput, SurgicalIndication, TreatedHta};

/// One of the six scored patient variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Age,
    Gender,
    SurgicalIndication,
    AsaScore,
    TreatedHta,
    PreopEmoglobin,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 6] = [
        Field::Age,
        Field::Gender,
        Field::SurgicalIndication,
        Field::AsaScore,
        Field::TreatedHta,
        Field::PreopEmoglobin,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Gender => "gender",
            Self::SurgicalIndication => "surgical_indication",
            Self::AsaScore => "asa_score",
            Self::TreatedHta => "treated_hta",
            Self::PreopEmoglobin => "preop_emoglobin",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    /// Human-readable description of the accepted values.
    pub fn expected(self) -> &'static str {
        match self {
            Self::Age | Self::PreopEmoglobin => "a positive number",
            Self::Gender | Self::SurgicalIndication | Self::TreatedHta => "0 or 1",
            Self::AsaScore => "1, 2, 3 or 4",
        }
    }

    fn slot(self) -> usize {
        match self {
            Self::Age => 0,
            Self::Gender => 1,
            Self::SurgicalIndication => 2,
            Self::AsaScore => 3,
            Self::TreatedHta => 4,
            Self::PreopEmoglobin => 5,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Raw, possibly incomplete form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientForm {
    values: [Option<String>; 6],
}

impl PatientForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field from user text. Surrounding whitespace is trimmed and
    /// an empty value clears the field.
    pub fn set(&mut self, field: Field, raw: impl AsRef<str>) {
        let trimmed = raw.as_ref().trim();
        self.values[field.slot()] = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn with(mut self, field: Field, raw: impl AsRef<str>) -> Self {
        self.set(field, raw);
        self
    }

    pub fn clear(&mut self, field: Field) {
        self.values[field.slot()] = None;
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.slot()].as_deref()
    }

    /// Empty every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Fields that have no value yet, in form order.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|f| self.get(*f).is_none())
            .collect()
    }

    /// Build a draft from a JSON object keyed by field id.
    ///
    /// Numbers and strings are taken as raw values, `null` or an absent key
    /// leaves the field empty. Any other JSON type is kept as text so that
    /// validation reports it as not numeric.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, CoreError> {
        let object = value.as_object().ok_or(CoreError::NotAnObject)?;
        let mut form = Self::new();
        for (key, v) in object {
            let field = Field::from_id(key).ok_or_else(|| CoreError::UnknownField(key.clone()))?;
            match v {
                serde_json::Value::Null => form.clear(field),
                serde_json::Value::String(s) => form.set(field, s),
                other => form.set(field, other.to_string()),
            }
        }
        Ok(form)
    }

    /// Check one field in isolation.
    pub fn check(&self, field: Field) -> Result<(), FieldError> {
        let value = self.read(field)?;
        match field {
            Field::Age | Field::PreopEmoglobin => positive(field, value).map(|_| ()),
            Field::Gender => coded(field, value, Gender::from_code).map(|_| ()),
            Field::SurgicalIndication => {
                coded(field, value, SurgicalIndication::from_code).map(|_| ())
            }
            Field::AsaScore => coded(field, value, AsaScore::from_code).map(|_| ()),
            Field::TreatedHta => coded(field, value, TreatedHta::from_code).map(|_| ()),
        }
    }

    /// Turn the draft into a typed record, reporting every bad field.
    pub fn validate(&self) -> Result<PatientInput, ValidationErrors> {
        let age = self.read(Field::Age).and_then(|v| positive(Field::Age, v));
        let gender = self
            .read(Field::Gender)
            .and_then(|v| coded(Field::Gender, v, Gender::from_code));
        let indication = self
            .read(Field::SurgicalIndication)
            .and_then(|v| coded(Field::SurgicalIndication, v, SurgicalIndication::from_code));
        let asa = self
            .read(Field::AsaScore)
            .and_then(|v| coded(Field::AsaScore, v, AsaScore::from_code));
        let hta = self
            .read(Field::TreatedHta)
            .and_then(|v| coded(Field::TreatedHta, v, TreatedHta::from_code));
        let hb = self
            .read(Field::PreopEmoglobin)
            .and_then(|v| positive(Field::PreopEmoglobin, v));

        match (age, gender, indication, asa, hta, hb) {
            (Ok(age), Ok(gender), Ok(indication), Ok(asa), Ok(hta), Ok(hb)) => {
                PatientInput::new(age, gender, indication, asa, hta, hb)
            }
            (age, gender, indication, asa, hta, hb) => {
                let errors = [
                    age.err(),
                    gender.err(),
                    indication.err(),
                    asa.err(),
                    hta.err(),
                    hb.err(),
                ]
                .into_iter()
                .flatten()
                .collect();
                Err(ValidationErrors(errors))
            }
        }
    }

    fn read(&self, field: Field) -> Result<f64, FieldError> {
        let raw = self.get(field).ok_or(FieldError::Missing { field })?;
        // Accept a decimal comma as typed in the French variant.
        let normalized = raw.replace(',', ".");
        match normalized.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(FieldError::NotNumeric {
                field,
                raw: raw.to_string(),
            }),
        }
    }
}

impl From<&PatientInput> for PatientForm {
    fn from(input: &PatientInput) -> Self {
        Field::ALL
            .into_iter()
            .fold(Self::new(), |form, f| form.with(f, input.value(f).to_string()))
    }
}

fn coded<T>(field: Field, value: f64, from_code: fn(u8) -> Option<T>) -> Result<T, FieldError> {
    let out_of_domain = || FieldError::OutOfDomain {
        field,
        value,
        expected: field.expected(),
    };
    if value.fract() != 0.0 || !(0.0..=f64::from(u8::MAX)).contains(&value) {
        return Err(out_of_domain());
    }
    from_code(value as u8).ok_or_else(out_of_domain)
}
