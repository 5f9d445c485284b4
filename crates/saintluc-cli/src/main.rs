use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::EnvFilter;

use saintluc_cli::commands;
use saintluc_cli::config::{self, OutputFormat};
use saintluc_cli::session;
use saintluc_core::Field;
use saintluc_scoring::variant::Variant;

/// Saint Luc Score: post-operative blood test recommendation after arthroplasty
#[derive(Parser, Debug)]
#[command(name = "saintluc", version)]
#[command(after_help = "\
Examples:
  saintluc score --age 60 --gender 1 --surgical-indication 1 --asa-score 2 --treated-hta 0 --preop-emoglobin 13
  saintluc score --input patient.json --format json
  saintluc interactive --variant fr
  saintluc fields")]
struct Cli {
    /// Labelling variant (overrides the saved preference)
    #[arg(long, global = true)]
    variant: Option<Variant>,

    /// Output format (overrides the saved preference)
    #[arg(long, short = 'f', global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Directory holding the saved preferences
    #[arg(long, global = true, env = "SAINTLUC_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one patient
    Score(ScoreArgs),

    /// Fill in the form field by field
    Interactive,

    /// List the form fields and their accepted values
    Fields,

    /// Show the model coefficients and decision threshold
    Model,

    /// Show or change saved preferences
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// JSON record with the six fields ('-' for stdin)
    #[arg(long, short = 'i', conflicts_with_all = [
        "age", "gender", "surgical_indication", "asa_score", "treated_hta", "preop_emoglobin",
    ])]
    input: Option<PathBuf>,

    /// Age in years
    #[arg(long, allow_hyphen_values = true)]
    age: Option<String>,

    /// 1 = male, 0 = female
    #[arg(long, allow_hyphen_values = true)]
    gender: Option<String>,

    /// 1 = osteonecrosis, 0 = arthritis
    #[arg(long, allow_hyphen_values = true)]
    surgical_indication: Option<String>,

    /// ASA physical status, 1 to 4
    #[arg(long, allow_hyphen_values = true)]
    asa_score: Option<String>,

    /// 1 = treated hypertension, 0 = none
    #[arg(long, allow_hyphen_values = true)]
    treated_hta: Option<String>,

    /// Pre-operative hemoglobin in g/dl
    #[arg(long, allow_hyphen_values = true)]
    preop_emoglobin: Option<String>,

    /// Show each term of the model
    #[arg(long)]
    explain: bool,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Print the effective preferences
    Show,
    /// Save the default labelling variant
    SetVariant { variant: Variant },
    /// Save the default output format
    SetFormat {
        #[arg(value_enum)]
        format: OutputFormat,
    },
    /// Delete the saved preferences
    Reset,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dir = config::config_dir(cli.config_dir.as_deref())?;

    // Reset must work even when the saved file cannot be parsed.
    if let Command::Config {
        action: Some(ConfigAction::Reset),
    } = cli.command
    {
        return config::delete_config_in(&dir);
    }

    let output = commands::resolve_output(&dir, cli.variant, cli.format);
    tracing::debug!(variant = %output.variant, format = %output.format, "resolved output");

    let stdout = std::io::stdout();
    match cli.command {
        Command::Score(args) => {
            let form = match &args.input {
                Some(path) => commands::read_form(path)?,
                None => commands::form_from_values([
                    (Field::Age, args.age.as_deref()),
                    (Field::Gender, args.gender.as_deref()),
                    (Field::SurgicalIndication, args.surgical_indication.as_deref()),
                    (Field::AsaScore, args.asa_score.as_deref()),
                    (Field::TreatedHta, args.treated_hta.as_deref()),
                    (Field::PreopEmoglobin, args.preop_emoglobin.as_deref()),
                ]),
            };
            commands::score(&form, args.explain, output, stdout.lock())?;
        }
        Command::Interactive => {
            let shown = session::run_interactive(
                std::io::stdin().lock(),
                stdout.lock(),
                output.variant,
            )?;
            tracing::debug!(shown, "interactive session ended");
        }
        Command::Fields => commands::list_fields(output, stdout.lock())?,
        Command::Model => commands::show_model(output, stdout.lock())?,
        Command::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::show_config(&dir, output.format, stdout.lock())?,
            ConfigAction::SetVariant { variant } => {
                commands::update_config(&dir, |c| c.variant = variant)?;
            }
            ConfigAction::SetFormat { format } => {
                commands::update_config(&dir, |c| c.format = format)?;
            }
            ConfigAction::Reset => config::delete_config_in(&dir)?,
        },
    }

    Ok(())
}
