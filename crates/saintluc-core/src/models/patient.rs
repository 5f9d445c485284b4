use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationErrors};
use crate::form::Field;

/// Declares a field whose values are a small set of numeric codes.
///
/// The enum serializes as its code so a patient record stays six plain
/// numbers on the wire.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The numeric code used by the regression formula.
            pub fn code(self) -> u8 {
                self as u8
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> u8 {
                value.code()
            }
        }

        impl TryFrom<u8> for $name {
            type Error = String;

            fn try_from(code: u8) -> Result<Self, Self::Error> {
                Self::from_code(code)
                    .ok_or_else(|| format!("invalid {} code: {code}", stringify!($name)))
            }
        }
    };
}

coded_enum! {
    /// Patient sex as coded by the model.
    Gender {
        Female = 0,
        Male = 1,
    }
}

coded_enum! {
    /// Reason for the arthroplasty.
    SurgicalIndication {
        Arthritis = 0,
        Osteonecrosis = 1,
    }
}

coded_enum! {
    /// ASA physical status classification.
    AsaScore {
        I = 1,
        II = 2,
        III = 3,
        IV = 4,
    }
}

coded_enum! {
    /// Whether the patient is under treatment for hypertension.
    TreatedHta {
        No = 0,
        Yes = 1,
    }
}

/// A complete, validated patient record.
///
/// Fields are private: the only ways in are [`PatientInput::new`],
/// deserialization, and [`crate::PatientForm::validate`], all of which
/// reject non-finite or non-positive measurements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatientRecord")]
pub struct PatientInput {
    age: f64,
    gender: Gender,
    surgical_indication: SurgicalIndication,
    asa_score: AsaScore,
    treated_hta: TreatedHta,
    preop_emoglobin: f64,
}

/// Unchecked wire shape of [`PatientInput`].
#[derive(Deserialize)]
struct PatientRecord {
    age: f64,
    gender: Gender,
    surgical_indication: SurgicalIndication,
    asa_score: AsaScore,
    treated_hta: TreatedHta,
    preop_emoglobin: f64,
}

impl TryFrom<PatientRecord> for PatientInput {
    type Error = ValidationErrors;

    fn try_from(r: PatientRecord) -> Result<Self, Self::Error> {
        Self::new(
            r.age,
            r.gender,
            r.surgical_indication,
            r.asa_score,
            r.treated_hta,
            r.preop_emoglobin,
        )
    }
}

impl PatientInput {
    /// Build a record, checking that `age` and `preop_emoglobin` are
    /// finite and strictly positive.
    pub fn new(
        age: f64,
        gender: Gender,
        surgical_indication: SurgicalIndication,
        asa_score: AsaScore,
        treated_hta: TreatedHta,
        preop_emoglobin: f64,
    ) -> Result<Self, ValidationErrors> {
        let checked_age = positive(Field::Age, age);
        let checked_hb = positive(Field::PreopEmoglobin, preop_emoglobin);

        let errors: Vec<FieldError> = [checked_age.as_ref().err(), checked_hb.as_ref().err()]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        if let Some(errors) = ValidationErrors::new(errors) {
            return Err(errors);
        }

        Ok(Self {
            age,
            gender,
            surgical_indication,
            asa_score,
            treated_hta,
            preop_emoglobin,
        })
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn surgical_indication(&self) -> SurgicalIndication {
        self.surgical_indication
    }

    pub fn asa_score(&self) -> AsaScore {
        self.asa_score
    }

    pub fn treated_hta(&self) -> TreatedHta {
        self.treated_hta
    }

    pub fn preop_emoglobin(&self) -> f64 {
        self.preop_emoglobin
    }

    /// Numeric value of a field as fed to the regression formula.
    pub fn value(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.age,
            Field::Gender => f64::from(self.gender.code()),
            Field::SurgicalIndication => f64::from(self.surgical_indication.code()),
            Field::AsaScore => f64::from(self.asa_score.code()),
            Field::TreatedHta => f64::from(self.treated_hta.code()),
            Field::PreopEmoglobin => self.preop_emoglobin,
        }
    }
}

pub(crate) fn positive(field: Field, value: f64) -> Result<f64, FieldError> {
    if !value.is_finite() {
        return Err(FieldError::NotNumeric {
            field,
            raw: value.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(FieldError::OutOfDomain {
            field,
            value,
            expected: field.expected(),
        });
    }
    Ok(value)
}
