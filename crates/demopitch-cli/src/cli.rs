use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use demopitch::providers::ApiRevision;

use crate::commands::candidates::handle_candidates;
use crate::commands::generate::handle_generate;
use crate::commands::models::handle_models;
use crate::logging::setup_logging;

#[derive(Parser)]
#[command(name = "demopitch", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Also print log output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(long)]
    pub project_name: String,

    #[arg(long)]
    pub problem: String,

    #[arg(long)]
    pub solution: String,

    #[arg(long)]
    pub tech_stack: String,

    #[arg(long)]
    pub target_users: String,

    /// Event name used in the script (defaults to DEMOPITCH_HACKATHON)
    #[arg(long)]
    pub hackathon: Option<String>,

    /// Requested Gemini model, may be imprecise (defaults to DEMOPITCH_MODEL)
    #[arg(long)]
    pub model: Option<String>,

    /// Gemini API key (defaults to GOOGLE_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Skip the network and print the template script
    #[arg(long)]
    pub offline: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a two-minute demo script
    Generate(GenerateArgs),

    /// Show the names a requested model resolves through
    Candidates {
        /// Requested model name
        model: String,
    },

    /// List the models a Gemini API revision exposes
    Models {
        #[arg(long, default_value = "v1")]
        revision: ApiRevision,

        #[arg(long)]
        api_key: Option<String>,
    },
}

pub async fn cli() -> Result<()> {
    let cli = Cli::parse();

    let log_name = match &cli.command {
        Command::Generate(_) => "generate",
        Command::Candidates { .. } => "candidates",
        Command::Models { .. } => "models",
    };
    if let Err(e) = setup_logging(Some(log_name), cli.verbose) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    match cli.command {
        Command::Generate(args) => handle_generate(args).await,
        Command::Candidates { model } => {
            handle_candidates(&model);
            Ok(())
        }
        Command::Models { revision, api_key } => handle_models(revision, api_key).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "demopitch",
            "generate",
            "--project-name",
            "Tidewatch",
            "--problem",
            "late surge warnings",
            "--solution",
            "buoy fusion",
            "--tech-stack",
            "Rust",
            "--target-users",
            "harbor masters",
            "--model",
            "gemini-1.5-pro-latest",
            "--offline",
        ])
        .unwrap();

        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.project_name, "Tidewatch");
                assert_eq!(args.model.as_deref(), Some("gemini-1.5-pro-latest"));
                assert!(args.offline);
                assert_eq!(args.hackathon, None);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_models_revision() {
        let cli = Cli::try_parse_from(["demopitch", "models", "--revision", "v1beta"]).unwrap();
        match cli.command {
            Command::Models { revision, .. } => assert_eq!(revision, ApiRevision::Secondary),
            _ => panic!("expected models"),
        }

        assert!(Cli::try_parse_from(["demopitch", "models", "--revision", "v2"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["demopitch", "candidates", "gemini-pro", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
