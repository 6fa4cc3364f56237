//! Config command implementation.
//!
//! Shows, checks and creates risk configuration files.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use tailrisk_config::{RiskConfig, Validate};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::error::CliError;
use crate::output::{print_error, print_header, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (defaults overlaid with --config)
    Show,

    /// Check a configuration file against every rule
    Validate(ValidateArgs),

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file (.toml or .json)
    pub file: PathBuf,
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination (.toml or .json)
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Validate(args) => validate(&args),
        ConfigCommand::Init(args) => init(&args),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let config = ctx.base_config()?;

    match ctx.format {
        OutputFormat::Table => {
            let source = ctx
                .config_path
                .as_ref()
                .map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
            print_header(&format!("Risk configuration ({source})"));
            print!("{}", config.to_toml_string()?);
        }
        OutputFormat::Json => println!("{}", config.to_json_string()?),
        OutputFormat::Csv => print_output(&settings(&config)?, OutputFormat::Csv)?,
    }
    Ok(())
}

/// Flattens the configuration into `Setting,Value` rows.
fn settings(config: &RiskConfig) -> Result<Vec<KeyValue>> {
    let value = serde_json::to_value(config)?;
    let rows = value
        .as_object()
        .map(|fields| {
            fields
                .iter()
                .map(|(key, value)| KeyValue::new(key, value.to_string()))
                .collect()
        })
        .unwrap_or_default();
    Ok(rows)
}

fn validate(args: &ValidateArgs) -> Result<()> {
    let config = RiskConfig::from_file(&args.file)
        .with_context(|| format!("loading configuration {}", args.file.display()))?;

    let errors = config.validate();
    if errors.is_empty() {
        print_success(&format!("{} is valid", args.file.display()));
        return Ok(());
    }

    for error in &errors {
        print_error(&error.to_string());
    }
    Err(CliError::InvalidConfig {
        path: args.file.clone(),
        count: errors.len(),
    }
    .into())
}

fn init(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::FileExists(args.path.clone()).into());
    }

    let config = RiskConfig::default();
    let is_json = args
        .path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let content = if is_json {
        config.to_json_string()?
    } else {
        config.to_toml_string()?
    };

    fs::write(&args.path, content)
        .with_context(|| format!("cannot write {}", args.path.display()))?;
    print_success(&format!("Wrote default configuration to {}", args.path.display()));
    Ok(())
}
