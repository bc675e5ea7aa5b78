//! Command-line interface definitions using clap

use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_CONFIG_PATH, StaticConfig};

/// TinyApp - a small multi-user URL shortener
#[derive(Parser, Debug)]
#[command(name = "tinyapp")]
#[command(version)]
#[command(about = "A small multi-user URL shortener", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite of an existing file
        #[arg(long)]
        force: bool,
    },
}

pub const SAMPLE_CONFIG_PATH: &str = "config.example.toml";

/// 写出示例配置，已存在的文件需要 --force 才会覆盖
pub fn generate_config(output_path: Option<&str>, force: bool) -> Result<String> {
    let path = output_path.unwrap_or(SAMPLE_CONFIG_PATH).to_string();

    if Path::new(&path).exists() && !force {
        bail!("{} already exists, use --force to overwrite", path);
    }

    StaticConfig::default()
        .save_to_file(&path)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to write {}", path))?;

    Ok(path)
}
