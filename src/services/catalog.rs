use log::debug;
use std::path::PathBuf;

use super::read_encoded;
use crate::error::{AppError, AppResult};
use crate::models::{infer_brand, Brand};
use crate::utils::{decode_base64, has_png_signature};

/// Read side of the generated `.base64` files.
#[derive(Debug, Clone)]
pub struct LogoCatalog {
    output_dir: PathBuf,
}

impl LogoCatalog {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// PNG bytes for `brand`, or `None` if no encoded logo exists.
    pub fn load(&self, brand: &Brand) -> AppResult<Option<Vec<u8>>> {
        match read_encoded(&brand.output_path(&self.output_dir))? {
            Some(encoded) => decode_logo(encoded).map(Some),
            None => {
                debug!("No encoded logo for {}", brand);
                Ok(None)
            }
        }
    }

    /// Looks a logo up by EXIF camera model, e.g. "NIKON D850".
    pub fn load_for_camera(&self, camera_model: &str) -> AppResult<Option<(Brand, Vec<u8>)>> {
        let Some(brand) = infer_brand(camera_model).and_then(|b| Brand::new(b).ok()) else {
            return Ok(None);
        };
        Ok(self.load(&brand)?.map(|data| (brand, data)))
    }
}

/// Decodes embedded logo text and checks that the result is a PNG.
pub fn decode_logo(text: impl AsRef<[u8]>) -> AppResult<Vec<u8>> {
    let data = decode_base64(text)?;
    if !has_png_signature(&data) {
        return Err(AppError::Decode("decoded logo is not a PNG image".to_string()));
    }
    Ok(data)
}
