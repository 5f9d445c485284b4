//! In-memory form session and the interactive prompt loop around it.

use std::io::{BufRead, Write};

use saintluc_core::{Field, FieldError, PatientForm, ScoreResult, ValidationErrors};
use saintluc_scoring::fields::{FieldDef, FieldKind, fields};
use saintluc_scoring::render::render_result;
use saintluc_scoring::variant::Variant;

/// One user's form and the last computed result.
#[derive(Debug, Default)]
pub struct Session {
    form: PatientForm,
    result: Option<ScoreResult>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &PatientForm {
        &self.form
    }

    pub fn result(&self) -> Option<&ScoreResult> {
        self.result.as_ref()
    }

    /// Record an answer and check it. A rejected answer is not kept.
    pub fn set(&mut self, field: Field, raw: &str) -> Result<(), FieldError> {
        self.form.set(field, raw);
        let checked = self.form.check(field);
        if checked.is_err() {
            self.form.clear(field);
        }
        checked
    }

    /// Validate and score the form. On failure the previous result stays.
    pub fn submit(&mut self) -> Result<ScoreResult, ValidationErrors> {
        let input = self.form.validate()?;
        let result = saintluc_scoring::compute(&input);
        self.result = Some(result);
        Ok(result)
    }

    /// Clear the form and drop the result.
    pub fn reset(&mut self) {
        self.form.reset();
        self.result = None;
    }
}

enum Answer {
    Value(String),
    Reset,
    Quit,
}

fn read_answer<R: BufRead>(input: &mut R) -> std::io::Result<Answer> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(Answer::Quit);
    }
    let trimmed = line.trim();
    Ok(match trimmed.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Answer::Quit,
        "reset" => Answer::Reset,
        _ => Answer::Value(trimmed.to_string()),
    })
}

fn prompt(def: &FieldDef) -> String {
    match &def.kind {
        FieldKind::Numeric { .. } => format!("{}: ", def.label),
        FieldKind::Choice { options } => {
            let choices: Vec<String> = options
                .iter()
                .map(|o| {
                    if o.label == o.code.to_string() {
                        o.label.to_string()
                    } else {
                        format!("{} = {}", o.code, o.label)
                    }
                })
                .collect();
            format!("{} [{}]: ", def.label, choices.join(", "))
        }
    }
}

/// Drive a session over a line-based reader and writer.
///
/// Prompts for each field in order, re-asking after a rejected answer.
/// `reset` starts the form over and `quit` (or end of input) stops.
/// Returns how many results were shown.
pub fn run_interactive<R: BufRead, W: Write>(
    mut input: R,
    mut out: W,
    variant: Variant,
) -> eyre::Result<usize> {
    let defs = fields(variant);
    let mut session = Session::new();
    let mut shown = 0;

    writeln!(out, "{}", variant.title())?;
    writeln!(
        out,
        "(type 'reset' to start over, 'quit' to leave)\n"
    )?;

    'round: loop {
        for def in &defs {
            loop {
                write!(out, "{}", prompt(def))?;
                out.flush()?;

                let raw = match read_answer(&mut input)? {
                    Answer::Quit => return Ok(shown),
                    Answer::Reset => {
                        session.reset();
                        tracing::debug!("session reset");
                        writeln!(out, "-- {} --\n", variant.reset_label())?;
                        continue 'round;
                    }
                    Answer::Value(raw) => raw,
                };

                let raw = def
                    .code_for_label(&raw)
                    .map(|code| code.to_string())
                    .unwrap_or(raw);
                match session.set(def.field, &raw) {
                    Ok(()) => break,
                    Err(e) => writeln!(out, "  {e}")?,
                }
            }
        }

        match session.submit() {
            Ok(result) => {
                shown += 1;
                writeln!(out)?;
                write!(out, "{}", render_result(variant, &result))?;
                writeln!(out)?;
            }
            Err(errors) => writeln!(out, "{errors}")?,
        }
        session.reset();
    }
}
