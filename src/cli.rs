use clap::{Parser, Subcommand};
use log::{error, info, warn};
use std::path::PathBuf;

use crate::config::{Config, ErrorPolicy};
use crate::error::{AppError, AppResult};
use crate::models::{infer_brand, Brand, VerifyStatus};
use crate::services::{FileService, LogoEncoder};

#[derive(Parser, Debug)]
#[command(name = "logo-encoder")]
#[command(author, version, about = "Encode brand logo PNGs as base64 text files", long_about = None)]
pub struct Cli {
    /// Directory holding `<brand>.png` files [env: LOGOS_DIR] [default: logos]
    #[arg(long, global = true, value_name = "DIR")]
    pub logos_dir: Option<PathBuf>,

    /// Directory receiving `<brand>.base64` files [env: LOGOS_OUTPUT_DIR] [default: src/logos]
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Comma separated brand list [env: LOGO_BRANDS]
    #[arg(long, global = true, value_name = "LIST")]
    pub brands: Option<String>,

    /// What to do when reading or writing a logo fails [env: LOGO_ON_ERROR]
    #[arg(long, global = true, value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Print the result as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Encode every brand logo (default)
    Generate,

    /// Check that each encoded file still matches its source image
    Verify,

    /// List brands that have a source image in the logos directory
    List,

    /// Show which brand a camera model string maps to
    InferBrand {
        /// Camera model as found in EXIF, e.g. "Canon EOS R10"
        model: String,
    },
}

impl Cli {
    /// Environment and defaults, overridden by whatever was passed on the command line.
    pub fn config(&self) -> AppResult<Config> {
        let config = Config::from_env()?;
        self.apply_overrides(config)
    }

    pub fn apply_overrides(&self, mut config: Config) -> AppResult<Config> {
        if let Some(dir) = &self.logos_dir {
            config.logos_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(list) = &self.brands {
            config.brands = Brand::parse_list(list)?;
            if config.brands.is_empty() {
                return Err(AppError::Config(
                    "--brands must name at least one brand".to_string(),
                ));
            }
        }
        if let Some(policy) = self.on_error {
            config.on_error = policy;
        }
        Ok(config)
    }
}

/// Runs the selected command. `Ok(false)` means the command finished but
/// something needs attention (failed brands, stale outputs).
pub fn run(cli: &Cli) -> AppResult<bool> {
    match cli.command.as_ref().unwrap_or(&Commands::Generate) {
        Commands::Generate => handle_generate(&cli.config()?, cli.json),
        Commands::Verify => handle_verify(&cli.config()?, cli.json),
        Commands::List => handle_list(&cli.config()?, cli.json),
        Commands::InferBrand { model } => Ok(handle_infer_brand(model, cli.json)),
    }
}

pub fn handle_generate(config: &Config, json: bool) -> AppResult<bool> {
    let encoder = LogoEncoder::from_config(config);
    let report = encoder.run(&config.brands)?;

    info!(
        "{} generated, {} missing, {} failed",
        report.generated().len(),
        report.missing().len(),
        report.failed().len()
    );
    if json {
        print_json(&report);
    }

    if report.has_failures() {
        error!(
            "Failed brands: {}",
            report
                .failed()
                .iter()
                .map(|b| b.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        return Ok(false);
    }
    Ok(true)
}

pub fn handle_verify(config: &Config, json: bool) -> AppResult<bool> {
    let encoder = LogoEncoder::from_config(config);
    let entries = encoder.verify(&config.brands)?;

    if json {
        print_json(&entries);
    } else {
        for entry in &entries {
            let status = match &entry.status {
                VerifyStatus::Ok => "ok".to_string(),
                VerifyStatus::SourceMissing => "source missing".to_string(),
                VerifyStatus::Stale { reason } => format!("stale ({})", reason),
            };
            println!("{:12} {}", entry.brand, status);
        }
    }

    let stale = entries
        .iter()
        .filter(|e| matches!(e.status, VerifyStatus::Stale { .. }))
        .count();
    if stale > 0 {
        warn!("{} encoded logo(s) are stale, run generate", stale);
    }
    Ok(stale == 0)
}

pub fn handle_list(config: &Config, json: bool) -> AppResult<bool> {
    let files = FileService::new(config.logos_dir.clone(), config.output_dir.clone());
    let brands = files.discover_brands()?;

    if json {
        print_json(&brands);
    } else {
        for brand in &brands {
            println!("{}", brand);
        }
    }
    Ok(true)
}

pub fn handle_infer_brand(model: &str, json: bool) -> bool {
    let brand = infer_brand(model);
    if json {
        print_json(&serde_json::json!({ "model": model, "brand": brand }));
    } else {
        match &brand {
            Some(brand) => println!("{}", brand),
            None => warn!("Could not extract a brand from camera model {:?}", model),
        }
    }
    brand.is_some()
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to serialize output: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_means_generate_with_defaults() {
        let cli = Cli::try_parse_from(["logo-encoder"]).unwrap();
        assert_eq!(cli.command, None);

        let config = cli.apply_overrides(Config::default()).unwrap();
        assert_eq!(config.logos_dir, PathBuf::from("logos"));
        assert_eq!(config.output_dir, PathBuf::from("src/logos"));
        assert_eq!(config.brands, Brand::defaults());
        assert_eq!(config.on_error, ErrorPolicy::FailFast);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "logo-encoder",
            "verify",
            "--logos-dir",
            "art",
            "--output-dir",
            "gen",
            "--brands",
            "sony,leica",
            "--on-error",
            "skip",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Commands::Verify));

        let config = cli.apply_overrides(Config::default()).unwrap();
        assert_eq!(config.logos_dir, PathBuf::from("art"));
        assert_eq!(config.output_dir, PathBuf::from("gen"));
        assert_eq!(config.brands, Brand::parse_list("sony,leica").unwrap());
        assert_eq!(config.on_error, ErrorPolicy::Skip);
    }

    #[test]
    fn test_bad_brand_list_is_rejected() {
        let cli = Cli::try_parse_from(["logo-encoder", "--brands", "../etc"]).unwrap();
        assert!(cli.apply_overrides(Config::default()).is_err());

        let cli = Cli::try_parse_from(["logo-encoder", "--brands", ","]).unwrap();
        assert!(cli.apply_overrides(Config::default()).is_err());
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        assert!(Cli::try_parse_from(["logo-encoder", "--on-error", "retry"]).is_err());
    }

    #[test]
    fn test_infer_brand_command() {
        let cli = Cli::try_parse_from(["logo-encoder", "infer-brand", "Canon EOS R10"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::InferBrand {
                model: "Canon EOS R10".to_string()
            })
        );
        assert!(handle_infer_brand("Canon EOS R10", false));
        assert!(!handle_infer_brand("  ", false));
    }
}
