//! ats-scorer: rule-based ATS compatibility scoring for resumes

use ats_scorer::cli::{self, Cli, Commands, ConfigAction};
use ats_scorer::config::{Config, OutputFormat};
use anyhow::Context;
use ats_scorer::error::{AtsScorerError, Result};
use ats_scorer::input::InputManager;
use ats_scorer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use ats_scorer::output::{AnalysisEnvelope, ErrorEnvelope, ReportMetadata};
use ats_scorer::scoring::ResumeAnalyzer;
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            output,
            save,
            detailed,
            no_color,
        } => {
            let format = match output {
                Some(output) => {
                    cli::parse_output_format(&output).map_err(AtsScorerError::InvalidInput)?
                }
                None => config.output.format,
            };

            let result = analyze_file(&config, &resume, format, detailed, no_color).await;

            let rendered = match result {
                Ok(rendered) => rendered,
                Err(e) if format == OutputFormat::Json => {
                    // JSON callers always get an envelope, success or not
                    println!("{}", serde_json::to_string_pretty(&ErrorEnvelope::from(&e))?);
                    return Err(e.into());
                }
                Err(e) => return Err(e.into()),
            };

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
            Ok(())
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content =
                    toml::to_string_pretty(&config).context("Failed to serialize config")?;
                println!("{}", content);
                Ok(())
            }
            ConfigAction::Reset => {
                Config::default()
                    .save()
                    .context("Failed to write default configuration")?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
                Ok(())
            }
            ConfigAction::Path => {
                println!("{}", Config::config_path().display());
                Ok(())
            }
        },
    }
}

async fn analyze_file(
    config: &Config,
    resume: &Path,
    format: OutputFormat,
    detailed: bool,
    no_color: bool,
) -> Result<String> {
    info!("Analyzing resume: {}", resume.display());
    let received_at = chrono::Utc::now();

    let input_manager = InputManager::new(config.input.clone());
    let document = input_manager.load(resume).await?;

    let analysis = ResumeAnalyzer::new().analyze(&document.text, &document.filename)?;
    info!(
        "Overall score {} with {} recommendations",
        analysis.overall_score,
        analysis.recommendations.len()
    );

    let envelope = AnalysisEnvelope::new(analysis, ReportMetadata::for_document(&document, received_at));

    let generator = ReportGenerator::with_options(
        config.output.color_output && !no_color,
        config.output.detailed || detailed,
        config.output.pretty_json,
        true,
        true,
    );
    generator.generate_report(&envelope, format)
}
