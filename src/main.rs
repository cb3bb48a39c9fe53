use std::fs;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

/// A tree-walking interpreter for the pylpex scripting language.
#[derive(Parser, Debug)]
#[command(name = "pylpex", version, about)]
struct Cli {
    /// Source file to run.
    path: Option<String>,

    /// Evaluate an inline source string instead of reading a file.
    #[arg(short = 'e', long = "eval", value_name = "SOURCE")]
    eval: Option<String>,

    /// Increase log verbosity (tracing level); repeatable.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into());
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let source = match (&cli.eval, &cli.path) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("{}", format!("could not read '{path}': {err}").red());
                return ExitCode::FAILURE;
            }
        },
        (None, None) => {
            eprintln!("usage: pylpex <path> | -e <source>");
            return ExitCode::FAILURE;
        }
    };

    match pylpex::run(&source) {
        Ok(value) => {
            tracing::debug!(%value, "program evaluated successfully");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", pylpex::format_error(&error).red());
            ExitCode::FAILURE
        }
    }
}
