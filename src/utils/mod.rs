use base64::{engine::general_purpose, Engine as _};
use sha2::{Digest, Sha256};

use crate::constants::PNG_SIGNATURE;
use crate::error::AppResult;

/// Standard alphabet, padded, no line wrapping.
pub fn encode_base64(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Decodes raw file contents; surrounding ASCII whitespace is ignored.
pub fn decode_base64(text: impl AsRef<[u8]>) -> AppResult<Vec<u8>> {
    Ok(general_purpose::STANDARD.decode(text.as_ref().trim_ascii())?)
}

pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

pub fn has_png_signature(data: &[u8]) -> bool {
    data.starts_with(PNG_SIGNATURE)
}
