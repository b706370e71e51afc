use serde::Serialize;
use std::path::PathBuf;

use super::Brand;

/// What happened to one brand during `generate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BrandOutcome {
    Generated {
        brand: Brand,
        source: PathBuf,
        output: PathBuf,
        /// Size of the source image
        bytes: usize,
        encoded_len: usize,
        sha256: String,
    },
    Missing {
        brand: Brand,
        source: PathBuf,
    },
    /// Only recorded under `ErrorPolicy::Skip`.
    Failed {
        brand: Brand,
        source: PathBuf,
        error: String,
    },
}

impl BrandOutcome {
    pub fn brand(&self) -> &Brand {
        match self {
            BrandOutcome::Generated { brand, .. }
            | BrandOutcome::Missing { brand, .. }
            | BrandOutcome::Failed { brand, .. } => brand,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub output_dir: PathBuf,
    pub outcomes: Vec<BrandOutcome>,
}

impl RunReport {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            outcomes: Vec::new(),
        }
    }

    pub fn generated(&self) -> Vec<&Brand> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, BrandOutcome::Generated { .. }))
            .map(BrandOutcome::brand)
            .collect()
    }

    pub fn missing(&self) -> Vec<&Brand> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, BrandOutcome::Missing { .. }))
            .map(BrandOutcome::brand)
            .collect()
    }

    pub fn failed(&self) -> Vec<&Brand> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, BrandOutcome::Failed { .. }))
            .map(BrandOutcome::brand)
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed().is_empty()
    }
}

/// Result of checking one brand's output against its source.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyStatus {
    Ok,
    SourceMissing,
    Stale { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyEntry {
    pub brand: Brand,
    #[serde(flatten)]
    pub status: VerifyStatus,
}
