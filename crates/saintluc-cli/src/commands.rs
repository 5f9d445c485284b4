use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;

use saintluc_core::{Field, PatientForm, ScoreResult};
use saintluc_scoring::fields::{FieldDef, FieldKind, fields};
use saintluc_scoring::render::{render_contributions, render_model, render_result};
use saintluc_scoring::variant::Variant;
use saintluc_scoring::{Coefficients, Contribution, DECIMALS, SAINT_LUC, THRESHOLD};

use crate::config::{self, OutputFormat, SaintlucConfig};

/// Presentation settings resolved from flags and the config file.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub variant: Variant,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct ScoreReport {
    #[serde(flatten)]
    result: ScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    contributions: Option<Vec<Contribution>>,
}

#[derive(Serialize)]
struct ModelReport {
    coefficients: Coefficients,
    threshold: f64,
    decimals: i32,
}

/// Resolve presentation settings. The saved config is only read when a
/// flag is missing, and an unreadable one falls back to defaults.
pub fn resolve_output(
    dir: &Path,
    variant: Option<Variant>,
    format: Option<OutputFormat>,
) -> Output {
    if let (Some(variant), Some(format)) = (variant, format) {
        return Output { variant, format };
    }
    let saved = config::load_or_default_in(dir).unwrap_or_else(|e| {
        tracing::warn!(dir = %dir.display(), "ignoring unreadable config: {e}");
        SaintlucConfig::default()
    });
    Output {
        variant: variant.unwrap_or(saved.variant),
        format: format.unwrap_or(saved.format),
    }
}

/// Read a JSON patient record from a file, or stdin when `source` is `-`.
pub fn read_form(source: &Path) -> eyre::Result<PatientForm> {
    if source == Path::new("-") {
        return read_form_from(std::io::stdin().lock());
    }
    let file = std::fs::File::open(source)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", source.display()))?;
    read_form_from(std::io::BufReader::new(file))
}

/// Parse a JSON patient record from any reader.
pub fn read_form_from<R: Read>(mut reader: R) -> eyre::Result<PatientForm> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    Ok(PatientForm::from_json(&json)?)
}

/// Validate the form, score it and print the result.
pub fn score<W: Write>(
    form: &PatientForm,
    explain: bool,
    output: Output,
    mut out: W,
) -> eyre::Result<ScoreResult> {
    let input = form.validate()?;
    let result = saintluc_scoring::compute(&input);
    let terms = explain.then(|| saintluc_scoring::contributions(&input));

    match output.format {
        OutputFormat::Json => {
            let report = ScoreReport {
                result,
                contributions: terms,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Text => {
            if let Some(terms) = &terms {
                write!(out, "{}", render_contributions(output.variant, &input, terms))?;
                writeln!(out)?;
            }
            write!(out, "{}", render_result(output.variant, &result))?;
        }
    }
    Ok(result)
}

fn describe(def: &FieldDef) -> String {
    match &def.kind {
        FieldKind::Numeric { unit: Some(unit) } => format!("number ({unit})"),
        FieldKind::Numeric { unit: None } => "number".to_string(),
        FieldKind::Choice { options } => options
            .iter()
            .map(|o| format!("{}={}", o.code, o.label))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Print the field catalogue.
pub fn list_fields<W: Write>(output: Output, mut out: W) -> eyre::Result<()> {
    let defs = fields(output.variant);
    match output.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&defs)?)?,
        OutputFormat::Text => {
            for def in &defs {
                writeln!(out, "{:<20} {:<34} {}", def.id(), def.label, describe(def))?;
            }
        }
    }
    Ok(())
}

/// Print the coefficients and the decision threshold.
pub fn show_model<W: Write>(output: Output, mut out: W) -> eyre::Result<()> {
    match output.format {
        OutputFormat::Json => {
            let report = ModelReport {
                coefficients: SAINT_LUC,
                threshold: THRESHOLD,
                decimals: DECIMALS,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        OutputFormat::Text => write!(out, "{}", render_model(output.variant))?,
    }
    Ok(())
}

/// Print the effective config and where it lives.
pub fn show_config<W: Write>(dir: &Path, format: OutputFormat, mut out: W) -> eyre::Result<()> {
    let saved = config::has_config_in(dir);
    let current = config::load_or_default_in(dir)?;
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "path": config::config_path_in(dir),
                "saved": saved,
                "config": current,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "path:    {}", config::config_path_in(dir).display())?;
            writeln!(out, "saved:   {saved}")?;
            writeln!(out, "variant: {}", current.variant)?;
            writeln!(out, "format:  {}", current.format)?;
        }
    }
    Ok(())
}

/// Load the config (or defaults), apply `change`, and save it.
pub fn update_config(
    dir: &Path,
    change: impl FnOnce(&mut SaintlucConfig),
) -> eyre::Result<SaintlucConfig> {
    let mut current = config::load_or_default_in(dir)?;
    change(&mut current);
    config::save_config_in(dir, &current)?;
    Ok(current)
}

/// Build a form from individually supplied flag values.
pub fn form_from_values(values: [(Field, Option<&str>); 6]) -> PatientForm {
    values
        .into_iter()
        .fold(PatientForm::new(), |mut form, (field, raw)| {
            if let Some(raw) = raw {
                form.set(field, raw);
            }
            form
        })
}
