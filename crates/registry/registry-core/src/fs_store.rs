//! Directory-per-version model store.
//!
//! Layout:
//!
//! ```text
//! <root>/<name>/<version>/pipeline.json
//! <root>/<name>/<version>/metadata.json
//! <root>/<name>/latest            # text file holding the newest version
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use registry_spi::{
    ModelInfo, ModelMetadata, ModelStore, ModelTag, RegistryError, Result, StoredModel,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

pub const PIPELINE_FILE: &str = "pipeline.json";
pub const METADATA_FILE: &str = "metadata.json";
pub const LATEST_FILE: &str = "latest";

const VERSION_FORMAT: &str = "%Y%m%d%H%M%S%6f";

/// Model store rooted at a local directory.
#[derive(Debug, Clone)]
pub struct FsModelStore {
    root: PathBuf,
}

impl FsModelStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn model_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create a fresh version directory, suffixing `-N` on a timestamp clash.
    fn claim_version_dir(&self, name: &str) -> Result<(String, PathBuf)> {
        let model_dir = self.model_dir(name);
        fs::create_dir_all(&model_dir)?;

        let base = Utc::now().format(VERSION_FORMAT).to_string();
        let mut version = base.clone();
        let mut suffix = 0u32;
        loop {
            let dir = model_dir.join(&version);
            match fs::create_dir(&dir) {
                Ok(()) => return Ok((version, dir)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    suffix += 1;
                    version = format!("{}-{}", base, suffix);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl ModelStore for FsModelStore {
    fn save<P: Serialize>(&self, name: &str, pipeline: &P, info: &ModelInfo) -> Result<ModelTag> {
        ModelTag::latest(name)?;
        let (version, dir) = self.claim_version_dir(name)?;

        let metadata = ModelMetadata {
            name: name.to_string(),
            version: version.clone(),
            created_at: Utc::now().to_rfc3339(),
            features: info.features.clone(),
            target: info.target.clone(),
            metrics: info.metrics,
        };
        write_json(&dir.join(PIPELINE_FILE), pipeline)?;
        write_json(&dir.join(METADATA_FILE), &metadata)?;
        write_atomic(&self.model_dir(name).join(LATEST_FILE), version.as_bytes())?;

        let tag = ModelTag::versioned(name, &version)?;
        info!(model = %tag, dir = %dir.display(), "saved model");
        Ok(tag)
    }

    fn load<P: DeserializeOwned>(&self, tag: &ModelTag) -> Result<StoredModel<P>> {
        let resolved = self.resolve(tag)?;
        let version = resolved.version().unwrap_or_default();
        let dir = self.model_dir(resolved.name()).join(version);

        let metadata: ModelMetadata = read_json(&dir.join(METADATA_FILE), &resolved)?;
        let pipeline: P = read_json(&dir.join(PIPELINE_FILE), &resolved)?;
        debug!(model = %resolved, "loaded model");
        Ok(StoredModel { metadata, pipeline })
    }

    fn versions(&self, name: &str) -> Result<Vec<String>> {
        ModelTag::latest(name)?;
        let model_dir = self.model_dir(name);
        if !model_dir.is_dir() {
            return Err(RegistryError::NotFound(format!("model '{}'", name)));
        }
        let mut versions = list_dirs(&model_dir)?;
        versions.sort_by_key(|v| version_key(v));
        Ok(versions)
    }

    fn names(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = list_dirs(&self.root)?;
        names.sort();
        Ok(names)
    }

    fn resolve(&self, tag: &ModelTag) -> Result<ModelTag> {
        let model_dir = self.model_dir(tag.name());
        if let Some(version) = tag.version() {
            return if model_dir.join(version).is_dir() {
                Ok(tag.clone())
            } else {
                Err(RegistryError::NotFound(tag.to_string()))
            };
        }

        let pointer = model_dir.join(LATEST_FILE);
        let version = match fs::read_to_string(&pointer) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => self.newest_version(tag)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.newest_version(tag)?,
            Err(e) => return Err(e.into()),
        };
        if !model_dir.join(&version).is_dir() {
            return Err(RegistryError::NotFound(format!(
                "{} points at missing version {}",
                tag, version
            )));
        }
        ModelTag::versioned(tag.name(), &version)
    }
}

impl FsModelStore {
    fn newest_version(&self, tag: &ModelTag) -> Result<String> {
        self.versions(tag.name())?
            .pop()
            .ok_or_else(|| RegistryError::NotFound(tag.to_string()))
    }
}

/// Orders `<timestamp>` before `<timestamp>-1` before `<timestamp>-10`.
fn version_key(version: &str) -> (String, u64) {
    match version.rsplit_once('-') {
        Some((base, n)) => match n.parse() {
            Ok(n) => (base.to_string(), n),
            Err(_) => (version.to_string(), 0),
        },
        None => (version.to_string(), 0),
    }
}

fn list_dirs(dir: &Path) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                out.push(name.to_string());
            }
        }
    }
    Ok(out)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| RegistryError::Serialization(e.to_string()))?;
    write_atomic(path, &bytes)
}

/// Write to a sibling temp file, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path, tag: &ModelTag) -> Result<T> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(RegistryError::NotFound(format!(
                "{} has no {}",
                tag,
                path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
            )))
        }
        Err(e) => return Err(e.into()),
    };
    serde_json::from_slice(&bytes)
        .map_err(|e| RegistryError::Serialization(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Toy {
        weights: Vec<f64>,
    }

    fn info() -> ModelInfo {
        ModelInfo {
            features: vec!["GRE Score".into(), "CGPA".into()],
            target: Some("Chance of Admit".into()),
            metrics: None,
        }
    }

    #[test]
    fn test_save_then_load_latest() {
        let dir = TempDir::new().unwrap();
        let store = FsModelStore::new(dir.path());
        let toy = Toy {
            weights: vec![0.5, -1.0],
        };

        let tag = store.save("admissions_lr", &toy, &info()).unwrap();
        assert!(!tag.is_latest());

        let loaded: StoredModel<Toy> = store
            .load(&ModelTag::parse("admissions_lr:latest").unwrap())
            .unwrap();
        assert_eq!(loaded.pipeline, toy);
        assert_eq!(loaded.metadata.features, info().features);
        assert_eq!(Some(loaded.metadata.version.as_str()), tag.version());
        assert_eq!(loaded.metadata.name, "admissions_lr");
    }

    #[test]
    fn test_latest_tracks_newest_save() {
        let dir = TempDir::new().unwrap();
        let store = FsModelStore::new(dir.path());

        let first = store.save("m", &Toy { weights: vec![1.0] }, &info()).unwrap();
        let second = store.save("m", &Toy { weights: vec![2.0] }, &info()).unwrap();
        assert_ne!(first, second);

        let resolved = store.resolve(&ModelTag::latest("m").unwrap()).unwrap();
        assert_eq!(resolved, second);
        assert_eq!(store.versions("m").unwrap().len(), 2);
        assert_eq!(
            store.versions("m").unwrap().last().map(String::as_str),
            second.version()
        );

        let old: StoredModel<Toy> = store.load(&first).unwrap();
        assert_eq!(old.pipeline.weights, vec![1.0]);
    }

    #[test]
    fn test_missing_model_and_version() {
        let dir = TempDir::new().unwrap();
        let store = FsModelStore::new(dir.path());
        assert!(matches!(
            store.load::<Toy>(&ModelTag::latest("nope").unwrap()),
            Err(RegistryError::NotFound(_))
        ));

        store.save("m", &Toy { weights: vec![] }, &info()).unwrap();
        assert!(matches!(
            store.load::<Toy>(&ModelTag::parse("m:19990101").unwrap()),
            Err(RegistryError::NotFound(_))
        ));
    }

    #[test]
    fn test_latest_falls_back_to_newest_dir() {
        let dir = TempDir::new().unwrap();
        let store = FsModelStore::new(dir.path());
        let tag = store.save("m", &Toy { weights: vec![] }, &info()).unwrap();
        fs::remove_file(dir.path().join("m").join(LATEST_FILE)).unwrap();

        assert_eq!(store.resolve(&ModelTag::latest("m").unwrap()).unwrap(), tag);
    }

    #[test]
    fn test_names_lists_models() {
        let dir = TempDir::new().unwrap();
        let store = FsModelStore::new(dir.path().join("store"));
        assert!(store.names().unwrap().is_empty());

        store.save("b", &Toy { weights: vec![] }, &info()).unwrap();
        store.save("a", &Toy { weights: vec![] }, &info()).unwrap();
        assert_eq!(store.names().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_corrupt_pipeline_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FsModelStore::new(dir.path());
        let tag = store.save("m", &Toy { weights: vec![] }, &info()).unwrap();
        let path = dir
            .path()
            .join("m")
            .join(tag.version().unwrap())
            .join(PIPELINE_FILE);
        fs::write(path, "{not json").unwrap();

        assert!(matches!(
            store.load::<Toy>(&tag),
            Err(RegistryError::Serialization(_))
        ));
    }

    #[test]
    fn test_version_ordering() {
        let mut versions = vec![
            "20240101000000000001-10".to_string(),
            "20240101000000000001-2".to_string(),
            "20240101000000000001".to_string(),
        ];
        versions.sort_by_key(|v| version_key(v));
        assert_eq!(
            versions,
            vec![
                "20240101000000000001",
                "20240101000000000001-2",
                "20240101000000000001-10"
            ]
        );
    }
}
