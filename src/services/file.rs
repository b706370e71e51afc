use log::debug;
use std::fs::{self, File};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::constants::SOURCE_EXT;
use crate::error::{AppError, AppResult};
use crate::models::Brand;

/// Filesystem access for one source/output directory pair.
#[derive(Debug, Clone)]
pub struct FileService {
    logos_dir: PathBuf,
    output_dir: PathBuf,
}

impl FileService {
    pub fn new(logos_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            logos_dir,
            output_dir,
        }
    }

    pub fn get_logos_dir(&self) -> &PathBuf {
        &self.logos_dir
    }

    pub fn get_output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    pub fn source_path(&self, brand: &Brand) -> PathBuf {
        brand.source_path(&self.logos_dir)
    }

    pub fn output_path(&self, brand: &Brand) -> PathBuf {
        brand.output_path(&self.output_dir)
    }

    /// Creates the output directory itself, but not its parents.
    pub fn ensure_output_dir(&self) -> AppResult<()> {
        match fs::create_dir(&self.output_dir) {
            Ok(()) => {
                debug!("Created output directory {}", self.output_dir.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists && self.output_dir.is_dir() => Ok(()),
            Err(e) => Err(AppError::io("create directory", &self.output_dir, e)),
        }
    }

    /// Reads the whole source image, or `None` if it is not a regular file.
    pub fn read_source(&self, brand: &Brand) -> AppResult<Option<Vec<u8>>> {
        let path = self.source_path(brand);
        if !path.is_file() {
            return Ok(None);
        }
        read_all(&path).map(Some)
    }

    /// Raw contents of the encoded file. Not required to be valid UTF-8.
    pub fn read_output(&self, brand: &Brand) -> AppResult<Option<Vec<u8>>> {
        read_encoded(&self.output_path(brand))
    }

    /// Writes the encoded text, replacing any previous content.
    pub fn write_output(&self, brand: &Brand, encoded: &str) -> AppResult<PathBuf> {
        let path = self.output_path(brand);
        fs::write(&path, encoded).map_err(|e| AppError::io("write", &path, e))?;
        Ok(path)
    }

    /// Brands that have a `<brand>.png` directly inside the logos directory, sorted.
    pub fn discover_brands(&self) -> AppResult<Vec<Brand>> {
        if !self.logos_dir.is_dir() {
            return Err(AppError::io(
                "list",
                &self.logos_dir,
                std::io::Error::new(ErrorKind::NotFound, "not a directory"),
            ));
        }

        let mut brands: Vec<Brand> = WalkDir::new(&self.logos_dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == SOURCE_EXT))
            .filter_map(|e| {
                let stem = e.path().file_stem()?.to_str()?.to_string();
                Brand::new(stem).ok()
            })
            .collect();

        brands.sort();
        Ok(brands)
    }
}

/// Reads an encoded logo file as bytes, or `None` if it is not a regular file.
pub fn read_encoded(path: &Path) -> AppResult<Option<Vec<u8>>> {
    if !path.is_file() {
        return Ok(None);
    }
    fs::read(path)
        .map(Some)
        .map_err(|e| AppError::io("read", path, e))
}

fn read_all(path: &Path) -> AppResult<Vec<u8>> {
    let mut file = File::open(path).map_err(|e| AppError::io("open", path, e))?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)
        .map_err(|e| AppError::io("read", path, e))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(tmp: &TempDir) -> FileService {
        FileService::new(tmp.path().join("logos"), tmp.path().join("out"))
    }

    #[test]
    fn test_ensure_output_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let files = service(&tmp);

        files.ensure_output_dir().unwrap();
        assert!(tmp.path().join("out").is_dir());
        files.ensure_output_dir().unwrap();
    }

    #[test]
    fn test_ensure_output_dir_does_not_create_parents() {
        let tmp = TempDir::new().unwrap();
        let files = FileService::new(tmp.path().into(), tmp.path().join("a").join("b"));

        assert!(files.ensure_output_dir().is_err());
        assert!(!tmp.path().join("a").exists());
    }

    #[test]
    fn test_ensure_output_dir_rejects_plain_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("out"), "x").unwrap();

        assert!(service(&tmp).ensure_output_dir().is_err());
    }

    #[test]
    fn test_read_source_missing_and_directory() {
        let tmp = TempDir::new().unwrap();
        let files = service(&tmp);
        let brand = Brand::new("canon").unwrap();

        assert_eq!(files.read_source(&brand).unwrap(), None);

        fs::create_dir_all(tmp.path().join("logos").join("canon.png")).unwrap();
        assert_eq!(files.read_source(&brand).unwrap(), None);
    }

    #[test]
    fn test_write_output_truncates() {
        let tmp = TempDir::new().unwrap();
        let files = service(&tmp);
        let brand = Brand::new("sony").unwrap();
        files.ensure_output_dir().unwrap();

        files.write_output(&brand, "a much longer previous value").unwrap();
        let path = files.write_output(&brand, "YQ==").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "YQ==");
    }

    #[test]
    fn test_read_output_returns_raw_bytes() {
        let tmp = TempDir::new().unwrap();
        let files = service(&tmp);
        let brand = Brand::new("canon").unwrap();
        files.ensure_output_dir().unwrap();

        assert_eq!(files.read_output(&brand).unwrap(), None);

        fs::write(files.output_path(&brand), [0xFFu8, 0xFE, 0x00]).unwrap();
        assert_eq!(files.read_output(&brand).unwrap(), Some(vec![0xFF, 0xFE, 0x00]));
    }

    #[test]
    fn test_discover_brands() {
        let tmp = TempDir::new().unwrap();
        let logos = tmp.path().join("logos");
        fs::create_dir_all(logos.join("nested")).unwrap();
        fs::write(logos.join("sony.png"), b"x").unwrap();
        fs::write(logos.join("canon.png"), b"x").unwrap();
        fs::write(logos.join("notes.txt"), b"x").unwrap();
        fs::write(logos.join("Bad Name.png"), b"x").unwrap();
        fs::write(logos.join("nested").join("nikon.png"), b"x").unwrap();

        let brands = service(&tmp).discover_brands().unwrap();
        assert_eq!(brands, Brand::parse_list("canon,sony").unwrap());
    }

    #[test]
    fn test_discover_brands_missing_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(service(&tmp).discover_brands().is_err());
    }
}
