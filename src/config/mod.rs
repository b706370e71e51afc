use clap::ValueEnum;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants;
use crate::error::{AppError, AppResult};
use crate::models::Brand;

/// How `generate` treats I/O failures other than a missing source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Stop at the first failure and return it.
    #[default]
    FailFast,
    /// Log the failure, record it in the report and move on.
    Skip,
}

impl FromStr for ErrorPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-fast" | "fail_fast" | "failfast" => Ok(ErrorPolicy::FailFast),
            "skip" => Ok(ErrorPolicy::Skip),
            other => Err(AppError::Config(format!(
                "unknown error policy {:?} (expected fail-fast or skip)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logos_dir: PathBuf,
    pub output_dir: PathBuf,
    pub brands: Vec<Brand>,
    pub on_error: ErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logos_dir: PathBuf::from(constants::LOGOS_DIR),
            output_dir: PathBuf::from(constants::OUTPUT_DIR),
            brands: Brand::defaults(),
            on_error: ErrorPolicy::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by `LOGOS_DIR`, `LOGOS_OUTPUT_DIR`, `LOGO_BRANDS`
    /// and `LOGO_ON_ERROR`.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(constants::ENV_LOGOS_DIR) {
            config.logos_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(constants::ENV_OUTPUT_DIR) {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(list) = lookup(constants::ENV_BRANDS) {
            config.brands = Brand::parse_list(&list)?;
        }
        if let Some(policy) = lookup(constants::ENV_ON_ERROR) {
            config.on_error = policy.parse()?;
        }

        if config.brands.is_empty() {
            return Err(AppError::Config("brand list is empty".to_string()));
        }

        Ok(config)
    }
}
