use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use renovate_config_cli::commands::{
    config_cmd::{self, ConfigCommands},
    extract_cmd::{self, ExtractArgs},
    rules_cmd::{self, RulesArgs},
    schema_cmd,
    show_cmd::{self, ShowArgs},
    validate_cmd::{self, ValidateArgs},
};
use renovate_config_cli::config::{get_config_path, CliConfig};
use renovate_config_cli::errors::Error;

/// renovate-config CLI: Validate dependency update automation configuration
#[derive(Parser)]
#[command(name = "renovate-config")]
#[command(about = "Validate dependency update automation configuration", long_about = None)]
struct Cli {
    /// Path to the CLI settings file (defaults to ./renovate-config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration document
    Validate(ValidateArgs),

    /// Print the validated configuration document
    Show(ShowArgs),

    /// Print the JSON Schema of configuration documents
    Schema,

    /// Preview the dependencies regex managers extract from a directory
    Extract(ExtractArgs),

    /// List the package rules that apply to an update
    Rules(RulesArgs),

    #[command(subcommand)]
    Config(ConfigCommands),

    /// Show the CLI version
    Version,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config_path = get_config_path(cli.config.as_deref());

    match &cli.command {
        Commands::Validate(args) => {
            validate_cmd::execute(args, &CliConfig::load_or_default(&config_path)?)
        }
        Commands::Show(args) => show_cmd::execute(args, &CliConfig::load_or_default(&config_path)?),
        Commands::Schema => schema_cmd::execute(),
        Commands::Extract(args) => {
            extract_cmd::execute(args, &CliConfig::load_or_default(&config_path)?)
        }
        Commands::Rules(args) => rules_cmd::execute(args, &CliConfig::load_or_default(&config_path)?),
        Commands::Config(cmd) => config_cmd::execute(cmd, &config_path),
        Commands::Version => {
            println!(
                "renovate-config version {}",
                option_env!("RENOVATE_CONFIG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

fn main() {
    // Logs go to stderr; stdout carries command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("RENOVATE_CONFIG_LOG"))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
