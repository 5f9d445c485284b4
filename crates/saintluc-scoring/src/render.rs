//! Plain-text presentation of results and the model.

use std::fmt::Write;

use saintluc_core::{PatientInput, ScoreResult};

use crate::fields::field_def;
use crate::variant::Variant;
use crate::{Contribution, SAINT_LUC, THRESHOLD};

/// The result block shown after a submit.
pub fn render_result(variant: Variant, result: &ScoreResult) -> String {
    format!(
        "{}: {}\n{}\n",
        variant.score_label(),
        result.score,
        variant.verdict(result.recommend_blood_test)
    )
}

/// One line per model term, with the patient's answer next to each field.
pub fn render_contributions(
    variant: Variant,
    input: &PatientInput,
    terms: &[Contribution],
) -> String {
    let mut out = String::new();
    for term in terms {
        match term.field {
            None => {
                let _ = writeln!(out, "  {:<36} {:>+10.4}", "intercept", term.contribution);
            }
            Some(field) => {
                let def = field_def(field, variant);
                let answer = def
                    .option_label(input.value(field) as u8)
                    .map(str::to_string)
                    .unwrap_or_else(|| input.value(field).to_string());
                let label = format!("{} = {}", def.label, answer);
                let _ = writeln!(
                    out,
                    "  {:<36} {:>+10.4}  ({} x {})",
                    label, term.contribution, term.weight, term.value
                );
            }
        }
    }
    out
}

/// Coefficients and decision threshold.
pub fn render_model(variant: Variant) -> String {
    let mut out = format!("{}\n\n", variant.title());
    let _ = writeln!(out, "  {:<36} {:>+8}", "intercept", SAINT_LUC.intercept);
    for field in saintluc_core::Field::ALL {
        let _ = writeln!(
            out,
            "  {:<36} {:>+8}",
            variant.field_label(field),
            SAINT_LUC.weight(field)
        );
    }
    let _ = writeln!(out, "\n  score > {THRESHOLD} => {}", variant.verdict(true));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_block_in_english() {
        let result = ScoreResult {
            score: -5.525,
            recommend_blood_test: false,
        };
        assert_eq!(
            render_result(Variant::En, &result),
            "Score: -5.525\nPost-operative blood test NOT NECESSARY\n"
        );
    }

    #[test]
    fn result_block_in_french() {
        let result = ScoreResult {
            score: -3.669,
            recommend_blood_test: true,
        };
        let text = render_result(Variant::Fr, &result);
        assert!(text.contains("-3.669"));
        assert!(text.contains("NÉCESSAIRE"));
        assert!(!text.contains("NON"));
    }

    #[test]
    fn model_lists_every_coefficient() {
        let text = render_model(Variant::En);
        assert!(text.contains("+2.503"));
        assert!(text.contains("-0.97"));
        assert!(text.contains("-4.5676"));
        assert!(text.contains("Treated HTA"));
    }
}
