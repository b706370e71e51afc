use log::{error, info, warn};

use super::FileService;
use crate::config::{Config, ErrorPolicy};
use crate::constants::OUTPUT_EXT;
use crate::error::AppResult;
use crate::models::{Brand, BrandOutcome, RunReport, VerifyEntry, VerifyStatus};
use crate::utils::{decode_base64, encode_base64, sha256_hex};

/// Turns `<logos_dir>/<brand>.png` into `<output_dir>/<brand>.base64`.
#[derive(Debug, Clone)]
pub struct LogoEncoder {
    files: FileService,
    on_error: ErrorPolicy,
}

impl LogoEncoder {
    pub fn new(files: FileService, on_error: ErrorPolicy) -> Self {
        Self { files, on_error }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            FileService::new(config.logos_dir.clone(), config.output_dir.clone()),
            config.on_error,
        )
    }

    pub fn files(&self) -> &FileService {
        &self.files
    }

    /// Encodes every brand in order.
    ///
    /// A missing source is logged and skipped. Any other I/O error either
    /// aborts the run or is recorded as `Failed`, depending on the policy.
    /// Failing to create the output directory always aborts.
    pub fn run(&self, brands: &[Brand]) -> AppResult<RunReport> {
        self.files.ensure_output_dir()?;

        let mut report = RunReport::new(self.files.get_output_dir().clone());
        for brand in brands {
            let outcome = match self.encode_brand(brand) {
                Ok(outcome) => outcome,
                Err(e) if self.on_error == ErrorPolicy::Skip => {
                    error!("Failed to encode {}: {}", brand, e);
                    BrandOutcome::Failed {
                        brand: brand.clone(),
                        source: self.files.source_path(brand),
                        error: e.to_string(),
                    }
                }
                Err(e) => return Err(e),
            };
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    /// Encodes a single brand. The output directory must already exist.
    pub fn encode_brand(&self, brand: &Brand) -> AppResult<BrandOutcome> {
        let source = self.files.source_path(brand);

        let Some(data) = self.files.read_source(brand)? else {
            warn!("{} does not exist, skipping {}", source.display(), brand);
            return Ok(BrandOutcome::Missing {
                brand: brand.clone(),
                source,
            });
        };

        let encoded = encode_base64(&data);
        let output = self.files.write_output(brand, &encoded)?;
        info!(
            "Generated {}.{} in {}",
            brand,
            OUTPUT_EXT,
            self.files.get_output_dir().display()
        );

        Ok(BrandOutcome::Generated {
            brand: brand.clone(),
            source,
            output,
            bytes: data.len(),
            encoded_len: encoded.len(),
            sha256: sha256_hex(&data),
        })
    }

    /// Checks that each output decodes to the current source bytes.
    pub fn verify(&self, brands: &[Brand]) -> AppResult<Vec<VerifyEntry>> {
        let mut entries = Vec::with_capacity(brands.len());

        for brand in brands {
            let status = match self.files.read_source(brand)? {
                None => {
                    warn!(
                        "{} does not exist, nothing to verify for {}",
                        self.files.source_path(brand).display(),
                        brand
                    );
                    VerifyStatus::SourceMissing
                }
                Some(source) => self.check_output(brand, &source)?,
            };

            match &status {
                VerifyStatus::Ok => info!("{} is up to date", brand),
                VerifyStatus::Stale { reason } => warn!("{} is stale: {}", brand, reason),
                VerifyStatus::SourceMissing => {}
            }

            entries.push(VerifyEntry {
                brand: brand.clone(),
                status,
            });
        }

        Ok(entries)
    }

    fn check_output(&self, brand: &Brand, source: &[u8]) -> AppResult<VerifyStatus> {
        let Some(encoded) = self.files.read_output(brand)? else {
            return Ok(VerifyStatus::Stale {
                reason: format!("{} is missing", self.files.output_path(brand).display()),
            });
        };

        Ok(match decode_base64(&encoded) {
            Ok(decoded) if decoded == source => VerifyStatus::Ok,
            Ok(_) => VerifyStatus::Stale {
                reason: "content differs from source".to_string(),
            },
            Err(e) => VerifyStatus::Stale {
                reason: e.to_string(),
            },
        })
    }
}
