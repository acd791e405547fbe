//! CLI interface for the ATS scorer

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ats-scorer")]
#[command(about = "Score a PDF or DOCX resume for ATS compatibility")]
#[command(long_about = "Extract the text of a resume and score it with deterministic keyword, structure, content, format, contact and quantification rules, then list prioritized improvements")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume file
    Analyze {
        /// Path to resume file (PDF or DOCX)
        resume: PathBuf,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to a file, or into a directory under a generated name
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include per-metric details
        #[arg(short, long)]
        detailed: bool,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
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
    fn test_parse_analyze_command() {
        let cli = Cli::parse_from([
            "ats-scorer", "-v", "analyze", "cv.pdf", "--output", "json", "--no-color",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Analyze {
                resume,
                output,
                no_color,
                detailed,
                ..
            } => {
                assert_eq!(resume, PathBuf::from("cv.pdf"));
                assert_eq!(output.as_deref(), Some("json"));
                assert!(no_color);
                assert!(!detailed);
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("html").unwrap(), OutputFormat::Html);
        assert!(parse_output_format("pdf").is_err());
    }
}
