use super::Store;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("malformed store file {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },
}

/// A [`Store`] persisted as a single JSON object file.
///
/// Entries survive the process, so a fresh `FileStore` on the same path sees
/// everything stored before. A missing file reads as an empty store and is
/// created on the first write. Every operation reads the whole file; this is
/// meant for small caches shared between runs, not concurrent writers.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a new [`FileStore`] with the given path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
    fn load(&self) -> Result<BTreeMap<String, String>, Error> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(Error::Io { path: self.path.clone(), source }),
        };
        serde_json::from_str(&contents)
            .map_err(|source| Error::Json { path: self.path.clone(), source })
    }
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|source| Error::Json { path: self.path.clone(), source })?;
        std::fs::write(&self.path, contents)
            .map_err(|source| Error::Io { path: self.path.clone(), source })
    }
}

impl Store for FileStore {
    type Error = Error;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.load()?.remove(key))
    }
    fn set(&self, key: String, value: String) -> Result<(), Self::Error> {
        let mut entries = self.load()?;
        entries.insert(key, value);
        self.save(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path().join("cache.json"));
        assert_eq!(store.get("k1").expect("failed to get"), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("cache.json");
        {
            let store = FileStore::new(&path);
            store.set(String::from("k1"), String::from(r#"{"value":5}"#)).expect("failed to set");
            store
                .set(String::from("k2"), String::from(r#"{"value":null}"#))
                .expect("failed to set");
        }
        let store = FileStore::new(&path);
        assert_eq!(store.get("k1").expect("failed to get").as_deref(), Some(r#"{"value":5}"#));
        assert_eq!(store.get("k2").expect("failed to get").as_deref(), Some(r#"{"value":null}"#));
        assert_eq!(store.get("k3").expect("failed to get"), None);
    }

    #[test]
    fn malformed_file() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("cache.json");
        std::fs::write(&path, "not json").expect("failed to write");
        let store = FileStore::new(&path);
        assert!(matches!(store.get("k1"), Err(Error::Json { .. })));
        assert!(matches!(store.set(String::from("k1"), String::new()), Err(Error::Json { .. })));
    }
}
