//! Chai website CLI.
//!
//! Provides commands for:
//! - `serve`: Start the website server
//! - `check`: Validate every documentation group without serving
//! - `build-styles`: Compile all stylesheets ahead of time

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildStylesArgs, CheckArgs, ServeArgs};
use error::CliError;
use output::Output;

/// Chai language website.
#[derive(Parser)]
#[command(name = "chai-site", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the website server.
    Serve(ServeArgs),
    /// Validate documentation groups.
    Check(CheckArgs),
    /// Compile every stylesheet into the dist directory.
    BuildStyles(BuildStylesArgs),
}

fn serve(args: ServeArgs) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(args.execute())
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let verbose = matches!(&cli.command, Commands::Serve(args) if args.verbose);
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => serve(args),
        Commands::Check(args) => args.execute(),
        Commands::BuildStyles(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "chai-site",
            "serve",
            "--site-dir",
            "site",
            "--port",
            "9000",
            "--verbose",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Serve(ref args) if args.verbose));
    }

    #[test]
    fn test_parse_build_styles() {
        let cli = Cli::try_parse_from(["chai-site", "build-styles", "-c", "chai-site.toml"]).unwrap();

        assert!(matches!(cli.command, Commands::BuildStyles(_)));
    }

    #[test]
    fn test_parse_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["chai-site", "serve", "--port", "http"]).is_err());
    }
}
