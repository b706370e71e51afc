// src/constants.rs

pub const LOGOS_DIR: &str = "logos";
pub const OUTPUT_DIR: &str = "src/logos";

pub const DEFAULT_BRANDS: &[&str] = &["canon", "fujifilm", "nikon", "panasonic", "sony"];

// File extensions
pub const SOURCE_EXT: &str = "png";
pub const OUTPUT_EXT: &str = "base64";

pub const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

// Environment overrides
pub const ENV_LOGOS_DIR: &str = "LOGOS_DIR";
pub const ENV_OUTPUT_DIR: &str = "LOGOS_OUTPUT_DIR";
pub const ENV_BRANDS: &str = "LOGO_BRANDS";
pub const ENV_ON_ERROR: &str = "LOGO_ON_ERROR";
