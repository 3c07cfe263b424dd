use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mapstyle::ParserConfig;
use mapstyle::logging::init_logging;
use mapstyle::report::{Report, ReportError, ReportFormat};

/// Compile a map stylesheet and print its declarations in cascade order.
#[derive(Parser, Debug)]
#[command(name = "mapstyle", version)]
struct Args {
    /// Stylesheet to compile
    file: PathBuf,

    /// Treat the map as web mercator, enabling zoom shorthand
    #[arg(short, long)]
    mercator: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,

    /// Print the parsed rulesets instead of the flattened declarations
    #[arg(short, long)]
    rulesets: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Stylesheet(#[from] mapstyle::Error),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn run(args: &Args) -> Result<String, CliError> {
    let config = ParserConfig::new(args.mercator);
    let report = Report::from_file(&args.file, config, args.rulesets)?;
    tracing::info!(entries = report.len(), file = %args.file.display(), "compiled stylesheet");

    Ok(report.render(args.format)?)
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logging(args.verbose) {
        eprintln!("mapstyle: logging disabled: {err}");
    }

    match run(&args) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("mapstyle: {err}");
            ExitCode::FAILURE
        }
    }
}
