//! Configuration management for the LWCP decoder.
//!
//! Handles:
//! - Command-line argument parsing
//! - Conversion model override files

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::model::ConversionModel;

/// Command-line arguments for `lwcp-decode`
#[derive(Debug, Parser)]
#[command(name = "lwcp-decode")]
#[command(about = "Decode LWCP control messages into JSON")]
#[command(version)]
pub struct Args {
    /// Capture file with one message per line
    #[arg(help = "Input file (reads stdin when omitted or '-')")]
    pub input: Option<PathBuf>,

    /// Apply the conversion model to every message
    #[arg(long, help = "Rename properties with the built-in conversion model")]
    pub convert: bool,

    /// Override model files, later files win
    #[arg(
        long = "model",
        value_name = "PATH",
        help = "TOML conversion model layered over the built-in one (implies --convert)"
    )]
    pub models: Vec<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Fail when any line has a malformed property list
    #[arg(long, help = "Exit with an error if any property list is malformed")]
    pub strict: bool,

    /// Log level for diagnostics on stderr
    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` means stdin
    pub input: Option<PathBuf>,
    pub convert: bool,
    /// Override model files in the order they are applied
    pub model_paths: Vec<PathBuf>,
    pub pretty: bool,
    pub strict: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut model_paths = Vec::new();

        // User-global overrides come first so explicit files win
        if let Some(user_model) = Self::user_model_path() {
            if user_model.is_file() {
                model_paths.push(user_model);
            }
        }
        let explicit_models = !args.models.is_empty();
        model_paths.extend(args.models);

        let input = args.input.filter(|p| p.as_os_str() != "-");

        Ok(Config {
            input,
            convert: args.convert || explicit_models,
            model_paths,
            pretty: args.pretty,
            strict: args.strict,
            log_level: args.log_level,
        })
    }

    /// `<config dir>/lwcp/model.toml`
    pub fn user_model_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lwcp").join("model.toml"))
    }

    /// Load and stack every configured override model
    pub fn load_overrides(&self) -> Result<ConversionModel> {
        let mut model = ConversionModel::new();
        for path in &self.model_paths {
            let layer = ConversionModel::load(path)?;
            log::info!("Loaded {} conversion rules from {:?}", layer.len(), path);
            model = model.merged_with(&layer);
        }
        Ok(model)
    }
}
