use crate::constants::{DRIVE_MAP_FILE_ID, DRIVE_MAP_FILE_PATH};
use crate::domain::CertificateFile;
use crate::error::{ImportError, Result};
use crate::normalize::slugify;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Outcome of resolving a shared-file link against the drive map
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CertificateLookup {
    /// The row carried no certificate link
    NotProvided,
    /// A file id was extracted but is absent from the drive map
    Unresolved { file_id: String },
    /// The mapped file was read from disk
    Found(CertificateFile),
}

/// Maps shared-file ids to local paths of previously downloaded files
#[derive(Debug, Clone, Default)]
pub struct DriveMap {
    paths: HashMap<String, PathBuf>,
}

impl DriveMap {
    /// An empty map; every provided link resolves to `Unresolved`
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the id-to-path table from a two-column CSV, joining each
    /// relative path under `download_path`.
    pub fn load(map_csv: &Path, download_path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(map_csv)?;
        let headers = reader.headers()?.clone();
        let id_idx = column_index(&headers, DRIVE_MAP_FILE_ID, map_csv)?;
        let path_idx = column_index(&headers, DRIVE_MAP_FILE_PATH, map_csv)?;

        let mut paths = HashMap::new();
        for record in reader.records() {
            let record = record?;
            let file_id = record.get(id_idx).unwrap_or("").to_string();
            let file_path = record.get(path_idx).unwrap_or("");
            if file_id.is_empty() || file_path.is_empty() {
                continue;
            }
            paths.insert(file_id, download_path.join(file_path));
        }
        debug!("Loaded drive map with {} entries", paths.len());
        Ok(Self { paths })
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Resolve a shared-file link of the form `<anything>=<fileId>` to file
    /// bytes. The output filename is the slugified stem plus the original
    /// extension.
    pub fn find_certificate(&self, link: &str) -> Result<CertificateLookup> {
        if link.is_empty() {
            return Ok(CertificateLookup::NotProvided);
        }
        // File id is the text after the first '='; a link without one is
        // reported whole for diagnostics.
        let file_id = match link.split_once('=') {
            Some((_, id)) => id,
            None => link,
        };
        let path = match self.paths.get(file_id) {
            Some(path) => path,
            None => {
                return Ok(CertificateLookup::Unresolved {
                    file_id: file_id.to_string(),
                })
            }
        };

        let content = fs::read(path)?;
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("certificate");
        let suffix = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        Ok(CertificateLookup::Found(CertificateFile {
            name: format!("{}{}", slugify(stem), suffix),
            content,
        }))
    }
}

fn column_index(headers: &csv::StringRecord, name: &str, source: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| {
            ImportError::Precondition(format!(
                "'{}' is missing the '{}' column.",
                source.display(),
                name
            ))
        })
}
