mod cmd;
mod config;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_plan, cmd_render};
use config::InputArgs;
use output::{OutputFormat, print_error};

/// mcb - render the machine-config bootstrap manifests
#[derive(Parser)]
#[command(name = "mcb")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Render the bootstrap manifests into the destination directory
  Render {
    #[command(flatten)]
    inputs: InputArgs,
  },

  /// Show which manifests would be written, without writing anything
  Plan {
    #[command(flatten)]
    inputs: InputArgs,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Render { inputs } => cmd_render(&inputs, cli.verbose, cli.format),
    Commands::Plan { inputs } => cmd_plan(&inputs, cli.verbose, cli.format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&error_chain(&err));
      ExitCode::FAILURE
    }
  }
}

/// Join the error chain, dropping causes already spelled out by their parent.
fn error_chain(err: &anyhow::Error) -> String {
  let mut message = String::new();
  for cause in err.chain() {
    let text = cause.to_string();
    if message.contains(&text) {
      continue;
    }
    if !message.is_empty() {
      message.push_str(": ");
    }
    message.push_str(&text);
  }
  message
}
