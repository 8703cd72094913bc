// Cleaner entry point: clean a CSV file and write the result.
use clap::Parser;
use cleaner::{clean_csv_file, CleanerSettings, NumericNormalizer};
use shared::utils::current_timestamp;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Cleans a scraped CSV table: sanitizes text, blanks null placeholders and
/// turns the configured columns into numbers.
#[derive(Parser, Debug)]
#[command(name = "cleaner", version)]
struct Cli {
    /// CSV file to clean
    input: PathBuf,

    /// Where to write the cleaned CSV
    output: PathBuf,

    /// JSON settings file (defaults are used when omitted)
    settings: Option<PathBuf>,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = match &cli.settings {
        Some(path) => CleanerSettings::load_from_file(path)?,
        None => CleanerSettings::default(),
    };

    info!(columns = ?settings.numeric_columns, "Cleaning {}", cli.input.display());
    let rows = clean_csv_file(&settings, NumericNormalizer::new(), &cli.input, &cli.output)?;

    let finished_at = current_timestamp(&settings.timestamp_format)?;
    info!(
        rows,
        "Finished cleaning {} -> {} at {}",
        cli.input.display(),
        cli.output.display(),
        finished_at
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_optional_settings() {
        let cli = Cli::try_parse_from(["cleaner", "in.csv", "out.csv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.csv"));
        assert_eq!(cli.output, PathBuf::from("out.csv"));
        assert!(cli.settings.is_none());

        let cli = Cli::try_parse_from(["cleaner", "in.csv", "out.csv", "cleaner.json"]).unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("cleaner.json")));
    }

    #[test]
    fn test_cli_requires_output() {
        assert!(Cli::try_parse_from(["cleaner", "in.csv"]).is_err());
    }
}
