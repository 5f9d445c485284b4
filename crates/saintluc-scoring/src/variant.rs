//! The two labelling variants of the calculator.
//!
//! Both share the model; they only differ in the strings shown around it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use saintluc_core::Field;

use crate::error::ScoringError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    En,
    Fr,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::En, Variant::Fr];

    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    pub fn title(self) -> &'static str {
        "Saint Luc Score"
    }

    pub fn field_label(self, field: Field) -> &'static str {
        match (self, field) {
            (Self::En, Field::Age) => "Age",
            (Self::En, Field::Gender) => "Gender",
            (Self::En, Field::SurgicalIndication) => "Surgical Indication",
            (Self::En, Field::AsaScore) => "ASA Score",
            (Self::En, Field::TreatedHta) => "Treated HTA",
            (Self::En, Field::PreopEmoglobin) => "Preop hemoglobin (g/dl)",
            (Self::Fr, Field::Age) => "Âge",
            (Self::Fr, Field::Gender) => "Sexe",
            (Self::Fr, Field::SurgicalIndication) => "Indication chirurgicale",
            (Self::Fr, Field::AsaScore) => "Score ASA",
            (Self::Fr, Field::TreatedHta) => "HTA traitée",
            (Self::Fr, Field::PreopEmoglobin) => "Hémoglobine préopératoire (g/dl)",
        }
    }

    /// Label of a choice option. `None` for numeric fields or unknown codes.
    pub fn option_label(self, field: Field, code: u8) -> Option<&'static str> {
        let label = match (self, field, code) {
            (Self::En, Field::Gender, 1) => "Male",
            (Self::En, Field::Gender, 0) => "Female",
            (Self::En, Field::SurgicalIndication, 1) => "Osteonecrosis",
            (Self::En, Field::SurgicalIndication, 0) => "Arthritis",
            (Self::En, Field::TreatedHta, 1) => "Yes",
            (Self::En, Field::TreatedHta, 0) => "No",
            (Self::Fr, Field::Gender, 1) => "Homme",
            (Self::Fr, Field::Gender, 0) => "Femme",
            (Self::Fr, Field::SurgicalIndication, 1) => "Ostéonécrose",
            (Self::Fr, Field::SurgicalIndication, 0) => "Arthrose",
            (Self::Fr, Field::TreatedHta, 1) => "Oui",
            (Self::Fr, Field::TreatedHta, 0) => "Non",
            (_, Field::AsaScore, 1) => "1",
            (_, Field::AsaScore, 2) => "2",
            (_, Field::AsaScore, 3) => "3",
            (_, Field::AsaScore, 4) => "4",
            _ => return None,
        };
        Some(label)
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::En => "Calculate Score",
            Self::Fr => "Calculer le score",
        }
    }

    pub fn reset_label(self) -> &'static str {
        match self {
            Self::En => "Reset",
            Self::Fr => "Réinitialiser",
        }
    }

    pub fn score_label(self) -> &'static str {
        "Score"
    }

    /// Result wording for the decision.
    pub fn verdict(self, recommend_blood_test: bool) -> &'static str {
        match (self, recommend_blood_test) {
            (Self::En, true) => "Post-operative blood test NECESSARY",
            (Self::En, false) => "Post-operative blood test NOT NECESSARY",
            (Self::Fr, true) => "Bilan sanguin post-opératoire NÉCESSAIRE",
            (Self::Fr, false) => "Bilan sanguin post-opératoire NON NÉCESSAIRE",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Variant {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::En),
            "fr" | "french" | "francais" | "français" => Ok(Self::Fr),
            _ => Err(ScoringError::UnknownVariant(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_codes() {
        assert_eq!("en".parse::<Variant>().unwrap(), Variant::En);
        assert_eq!("FR".parse::<Variant>().unwrap(), Variant::Fr);
        assert!("de".parse::<Variant>().is_err());
    }

    #[test]
    fn every_field_has_a_label_in_both_variants() {
        for variant in Variant::ALL {
            for field in Field::ALL {
                assert!(!variant.field_label(field).is_empty());
            }
        }
    }

    #[test]
    fn verdict_wording_differs_by_variant() {
        assert_eq!(
            Variant::En.verdict(true),
            "Post-operative blood test NECESSARY"
        );
        assert_ne!(Variant::En.verdict(false), Variant::Fr.verdict(false));
    }

    #[test]
    fn numeric_fields_have_no_options() {
        assert_eq!(Variant::En.option_label(Field::Age, 1), None);
        assert_eq!(Variant::Fr.option_label(Field::Gender, 2), None);
    }
}
