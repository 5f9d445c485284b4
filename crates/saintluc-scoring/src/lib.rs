//! saintluc-scoring
//!
//! The Saint Luc linear model: a fixed regression over six patient
//! variables whose rounded output decides whether a post-operative blood
//! test is recommended. Also holds the field catalogue and the two
//! hardcoded labelling variants used to present the form and the result.

pub mod error;
pub mod fields;
pub mod render;
pub mod variant;

use serde::Serialize;

use saintluc_core::{Field, PatientForm, PatientInput, ScoreResult};

use error::ScoringError;

/// A score strictly above this value recommends a blood test.
pub const THRESHOLD: f64 = -4.5676;

/// Number of decimal places kept in a [`ScoreResult`].
pub const DECIMALS: i32 = 4;

/// Regression weights of the linear model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coefficients {
    pub intercept: f64,
    pub age: f64,
    pub gender: f64,
    pub surgical_indication: f64,
    pub asa_score: f64,
    pub treated_hta: f64,
    pub preop_emoglobin: f64,
}

impl Coefficients {
    pub fn weight(&self, field: Field) -> f64 {
        match field {
            Field::Age => self.age,
            Field::Gender => self.gender,
            Field::SurgicalIndication => self.surgical_indication,
            Field::AsaScore => self.asa_score,
            Field::TreatedHta => self.treated_hta,
            Field::PreopEmoglobin => self.preop_emoglobin,
        }
    }
}

/// The published Saint Luc coefficients.
pub const SAINT_LUC: Coefficients = Coefficients {
    intercept: 2.503,
    age: 0.0506,
    gender: -2.896,
    surgical_indication: 2.976,
    asa_score: 0.733,
    treated_hta: 0.771,
    preop_emoglobin: -0.97,
};

/// One additive term of the model for a given patient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contribution {
    /// `None` for the intercept.
    pub field: Option<Field>,
    pub weight: f64,
    pub value: f64,
    pub contribution: f64,
}

/// Per-term breakdown, intercept first then fields in form order.
/// The contributions sum to the unrounded model output.
pub fn contributions(input: &PatientInput) -> Vec<Contribution> {
    let intercept = Contribution {
        field: None,
        weight: SAINT_LUC.intercept,
        value: 1.0,
        contribution: SAINT_LUC.intercept,
    };
    std::iter::once(intercept)
        .chain(Field::ALL.into_iter().map(|field| {
            let weight = SAINT_LUC.weight(field);
            let value = input.value(field);
            Contribution {
                field: Some(field),
                weight,
                value,
                contribution: weight * value,
            }
        }))
        .collect()
}

/// Unrounded model output.
pub fn raw_score(input: &PatientInput) -> f64 {
    Field::ALL.into_iter().fold(SAINT_LUC.intercept, |acc, field| {
        acc + SAINT_LUC.weight(field) * input.value(field)
    })
}

/// Round half away from zero to [`DECIMALS`] places.
pub fn round_score(raw: f64) -> f64 {
    let factor = 10f64.powi(DECIMALS);
    (raw * factor).round() / factor
}

/// The decision rule on an already rounded score.
pub fn decide(score: f64) -> bool {
    score > THRESHOLD
}

/// Score a validated patient record.
pub fn compute(input: &PatientInput) -> ScoreResult {
    let score = round_score(raw_score(input));
    let result = ScoreResult {
        score,
        recommend_blood_test: decide(score),
    };
    tracing::debug!(
        score = result.score,
        recommend_blood_test = result.recommend_blood_test,
        "computed saint luc score"
    );
    result
}

/// Validate a draft form and score it.
pub fn score_form(form: &PatientForm) -> Result<ScoreResult, ScoringError> {
    let input = form.validate()?;
    Ok(compute(&input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use saintluc_core::{AsaScore, Gender, SurgicalIndication, TreatedHta};

    fn patient(age: f64, asa: AsaScore, hb: f64) -> PatientInput {
        PatientInput::new(
            age,
            Gender::Female,
            SurgicalIndication::Arthritis,
            asa,
            TreatedHta::No,
            hb,
        )
        .unwrap()
    }

    #[test]
    fn rounds_to_four_places() {
        assert_eq!(round_score(-5.525000000001), -5.525);
        assert_eq!(round_score(1.23456), 1.2346);
        assert_eq!(round_score(-1.23454), -1.2345);
    }

    #[test]
    fn threshold_is_strict() {
        assert!(!decide(THRESHOLD));
        assert!(decide(-4.5675));
        assert!(!decide(-4.5677));
    }

    #[test]
    fn contributions_sum_to_raw_score() {
        let input = patient(72.0, AsaScore::III, 11.4);
        let terms = contributions(&input);
        assert_eq!(terms.len(), 7);
        assert_eq!(terms[0].field, None);
        let sum: f64 = terms.iter().map(|c| c.contribution).sum();
        assert!((sum - raw_score(&input)).abs() < 1e-12);
    }

    #[test]
    fn weights_match_coefficients() {
        assert_eq!(SAINT_LUC.weight(Field::Age), 0.0506);
        assert_eq!(SAINT_LUC.weight(Field::PreopEmoglobin), -0.97);
    }

    #[test]
    fn score_form_rejects_incomplete_draft() {
        let form = PatientForm::new().with(Field::Age, "50");
        let err = score_form(&form).unwrap_err();
        match err {
            ScoringError::Validation(errors) => assert_eq!(errors.errors().len(), 5),
            other => panic!("unexpected error: {other}"),
        }
    }
}
