use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{MykoError, Result};
use crate::frame::{format_date_key, parse_date_key};

/// The four kinds of flat-file artifacts the pipeline reads and writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    /// Raw dated source frame.
    Frame,
    /// Rendered composite image.
    Composite,
    /// GeoJSON feature collection.
    FeatureCollection,
    /// KML visualization document.
    Visualization,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Frame,
        ArtifactKind::Composite,
        ArtifactKind::FeatureCollection,
        ArtifactKind::Visualization,
    ];

    /// Subdirectory used by the filesystem store.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Frame => "raw",
            Self::Composite => "processed",
            Self::FeatureCollection => "geojson",
            Self::Visualization => "kml",
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Self::Frame => "frame_",
            Self::Composite => "composite_",
            Self::FeatureCollection | Self::Visualization => "regions_",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            Self::Frame | Self::Composite => ".png",
            Self::FeatureCollection => ".geojson",
            Self::Visualization => ".kml",
        }
    }

    /// Artifact name for a date, e.g. `composite_07.09.2025.png`.
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("{}{}{}", self.prefix(), format_date_key(date), self.extension())
    }

    /// Date encoded in an artifact name of this kind, if it follows the scheme.
    pub fn parse_date(&self, name: &str) -> Option<NaiveDate> {
        let key = name.strip_prefix(self.prefix())?.strip_suffix(self.extension())?;
        parse_date_key(key).ok()
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Frame => write!(f, "frame"),
            Self::Composite => write!(f, "composite"),
            Self::FeatureCollection => write!(f, "feature collection"),
            Self::Visualization => write!(f, "visualization"),
        }
    }
}

/// Flat storage for pipeline artifacts, keyed by kind and file name.
pub trait ArtifactStore {
    /// Names of all artifacts of a kind, sorted.
    fn list(&self, kind: ArtifactKind) -> Result<Vec<String>>;

    fn read(&self, kind: ArtifactKind, name: &str) -> Result<Vec<u8>>;

    /// Replace or create an artifact. Readers never see a partial write.
    fn write(&mut self, kind: ArtifactKind, name: &str, bytes: &[u8]) -> Result<()>;

    fn remove(&mut self, kind: ArtifactKind, name: &str) -> Result<()>;

    fn exists(&self, kind: ArtifactKind, name: &str) -> Result<bool> {
        Ok(self.list(kind)?.iter().any(|n| n == name))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
    {
        return Err(MykoError::InvalidArtifactName(name.to_string()));
    }
    Ok(())
}

/// Write `bytes` to a sibling temp file, then rename it over `path`.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| MykoError::InvalidArtifactName(path.display().to_string()))?;
    let tmp = dir.join(format!(".{file_name}.tmp"));

    let result = (|| -> Result<()> {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Artifacts stored as files under one root directory, one subdirectory per kind.
#[derive(Clone, Debug)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open a store rooted at `root`, creating the kind directories.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        for kind in ArtifactKind::ALL {
            fs::create_dir_all(root.join(kind.dir_name()))?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, kind: ArtifactKind, name: &str) -> PathBuf {
        self.root.join(kind.dir_name()).join(name)
    }
}

impl ArtifactStore for FsStore {
    fn list(&self, kind: ArtifactKind) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(self.root.join(kind.dir_name()))? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                // Skip in-flight temp files.
                if !name.starts_with('.') {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, kind: ArtifactKind, name: &str) -> Result<Vec<u8>> {
        validate_name(name)?;
        let path = self.path(kind, name);
        if !path.is_file() {
            return Err(MykoError::ArtifactNotFound(path.display().to_string()));
        }
        Ok(fs::read(path)?)
    }

    fn write(&mut self, kind: ArtifactKind, name: &str, bytes: &[u8]) -> Result<()> {
        validate_name(name)?;
        write_atomic(&self.path(kind, name), bytes)
    }

    fn remove(&mut self, kind: ArtifactKind, name: &str) -> Result<()> {
        validate_name(name)?;
        fs::remove_file(self.path(kind, name))?;
        Ok(())
    }

    fn exists(&self, kind: ArtifactKind, name: &str) -> Result<bool> {
        validate_name(name)?;
        Ok(self.path(kind, name).is_file())
    }
}

/// In-memory store, used where filesystem side effects are unwanted.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    files: BTreeMap<(ArtifactKind, String), Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ArtifactStore for MemoryStore {
    fn list(&self, kind: ArtifactKind) -> Result<Vec<String>> {
        Ok(self
            .files
            .keys()
            .filter(|(k, _)| *k == kind)
            .map(|(_, name)| name.clone())
            .collect())
    }

    fn read(&self, kind: ArtifactKind, name: &str) -> Result<Vec<u8>> {
        self.files
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| MykoError::ArtifactNotFound(format!("{kind}/{name}")))
    }

    fn write(&mut self, kind: ArtifactKind, name: &str, bytes: &[u8]) -> Result<()> {
        validate_name(name)?;
        self.files.insert((kind, name.to_string()), bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, kind: ArtifactKind, name: &str) -> Result<()> {
        self.files
            .remove(&(kind, name.to_string()))
            .map(|_| ())
            .ok_or_else(|| MykoError::ArtifactNotFound(format!("{kind}/{name}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        let name = ArtifactKind::Composite.file_name(date);
        assert_eq!(name, "composite_07.09.2025.png");
        assert_eq!(ArtifactKind::Composite.parse_date(&name), Some(date));
        assert_eq!(ArtifactKind::Frame.parse_date(&name), None);
    }

    #[test]
    fn test_validate_name_rejects_traversal() {
        assert!(validate_name("../etc").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name(".hidden").is_err());
        assert!(validate_name("frame_01.01.2025.png").is_ok());
    }
}
