use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::{DEFAULT_BRANDS, OUTPUT_EXT, SOURCE_EXT};
use crate::error::{AppError, AppResult};

/// Lowercase brand key such as `canon` or `fujifilm`.
///
/// Restricted to `[a-z0-9][a-z0-9_-]*`, so joining it onto a directory can
/// never leave that directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Brand(String);

impl Brand {
    pub fn new(id: impl Into<String>) -> AppResult<Self> {
        let id = id.into();
        if regex_is_match!(r"^[a-z0-9][a-z0-9_-]*$", &id) {
            Ok(Self(id))
        } else {
            Err(AppError::InvalidBrand(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<dir>/<brand>.png`
    pub fn source_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.0, SOURCE_EXT))
    }

    /// `<dir>/<brand>.base64`
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.{}", self.0, OUTPUT_EXT))
    }

    pub fn defaults() -> Vec<Brand> {
        DEFAULT_BRANDS.iter().map(|b| Brand(b.to_string())).collect()
    }

    /// Parses a comma separated list, ignoring blank entries.
    pub fn parse_list(list: &str) -> AppResult<Vec<Brand>> {
        list.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Brand::new)
            .collect()
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Brand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Brand::new(s)
    }
}

impl TryFrom<String> for Brand {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Brand::new(value)
    }
}

impl From<Brand> for String {
    fn from(brand: Brand) -> Self {
        brand.0
    }
}

/// Guesses the brand from an EXIF camera model string.
///
/// Takes the first whitespace-separated token, lowercased:
/// "Canon EOS R10" gives "canon". Returns `None` for blank input.
pub fn infer_brand(camera_model: &str) -> Option<String> {
    camera_model
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .filter(|brand| !brand.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_brands() {
        assert!(Brand::new("canon").is_ok());
        assert!(Brand::new("leica-m").is_ok());
        assert!(Brand::new("phase_one").is_ok());
        assert!(Brand::new("3dr").is_ok());
    }

    #[test]
    fn test_rejects_path_like_brands() {
        for bad in ["", "../canon", "a/b", "a\\b", ".hidden", "Canon", "-x", "so ny"] {
            assert!(Brand::new(bad).is_err(), "{:?} should be rejected", bad);
        }
    }

    #[test]
    fn test_paths() {
        let brand = Brand::new("nikon").unwrap();
        assert_eq!(
            brand.source_path(Path::new("logos")),
            PathBuf::from("logos/nikon.png")
        );
        assert_eq!(
            brand.output_path(Path::new("src/logos")),
            PathBuf::from("src/logos/nikon.base64")
        );
    }

    #[test]
    fn test_default_order() {
        let names: Vec<String> = Brand::defaults().into_iter().map(String::from).collect();
        assert_eq!(names, vec!["canon", "fujifilm", "nikon", "panasonic", "sony"]);
    }

    #[test]
    fn test_parse_list() {
        let brands = Brand::parse_list(" sony, ,canon ").unwrap();
        assert_eq!(brands, vec![Brand::new("sony").unwrap(), Brand::new("canon").unwrap()]);
        assert!(Brand::parse_list("sony,../etc").is_err());
    }

    #[test]
    fn test_infer_brand() {
        assert_eq!(infer_brand("Canon EOS R10"), Some("canon".to_string()));
        assert_eq!(infer_brand("NIKON D850"), Some("nikon".to_string()));
        assert_eq!(infer_brand("Fujifilm X-T4"), Some("fujifilm".to_string()));
        assert_eq!(infer_brand("Canon"), Some("canon".to_string()));
        assert_eq!(infer_brand("Canon-EOS-R10"), Some("canon-eos-r10".to_string()));

        assert_eq!(infer_brand(""), None);
        assert_eq!(infer_brand("   "), None);
    }
}
