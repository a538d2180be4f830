//! Local filesystem object store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::{debug, warn};

use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_core::traits::storage::ObjectStore;

/// Stores each object as one file directly under `root`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Directory holding all stored objects.
    root: PathBuf,
}

impl LocalObjectStore {
    /// Create a store rooted at `root_path`, creating the directory if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The directory objects are written to.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Resolve an object name to its path. Names must be a single path component.
    fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains('/')
            || name.contains('\\')
            || name.contains('\0');
        if invalid {
            return Err(AppError::validation(format!("Invalid object name: {name:?}")));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn save(&self, name: &str, data: Bytes) -> AppResult<()> {
        let path = self.resolve(name)?;
        // Staged under a dot name so a torn write never appears under `name`.
        let staging = self.root.join(format!(".{name}.partial"));

        let written = match fs::write(&staging, &data).await {
            Ok(()) => fs::rename(&staging, &path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            match fs::remove_file(&staging).await {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == std::io::ErrorKind::NotFound => {}
                Err(cleanup) => {
                    warn!(name, error = %cleanup, "Failed to remove partial upload");
                }
            }
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to save file: {name}"),
                e,
            ));
        }

        debug!(name, bytes = data.len(), "Saved object");
        Ok(())
    }

    async fn read_bytes(&self, name: &str) -> AppResult<Bytes> {
        let path = self.resolve(name)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {name}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.resolve(name)?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(name, "Deleted object");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {name}"),
                e,
            )),
        }
    }

    async fn exists(&self, name: &str) -> AppResult<bool> {
        let path = self.resolve(name)?;
        fs::try_exists(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat file: {name}"),
                e,
            )
        })
    }
}

/// Guess a MIME type from a file name's extension.
pub fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> (tempfile::TempDir, LocalObjectStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path().join("uploads").to_str().unwrap())
            .await
            .unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_save_read_delete() {
        let (_dir, store) = store().await;
        assert!(store.health_check().await.unwrap());

        let data = Bytes::from_static(b"\x89PNG fake");
        store.save("1700-abc.png", data.clone()).await.unwrap();
        assert!(store.exists("1700-abc.png").await.unwrap());
        assert_eq!(store.read_bytes("1700-abc.png").await.unwrap(), data);

        store.delete("1700-abc.png").await.unwrap();
        assert!(!store.exists("1700-abc.png").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_leaves_only_final_file() {
        let (_dir, store) = store().await;
        store
            .save("1700-abc.png", Bytes::from_static(b"img"))
            .await
            .unwrap();

        let names: Vec<String> = std::fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["1700-abc.png".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_save_removes_partial_file() {
        let (_dir, store) = store().await;
        // A directory under the target name makes the final rename fail.
        std::fs::create_dir(store.root().join("1700-busy.png")).unwrap();

        let err = store
            .save("1700-busy.png", Bytes::from_static(b"img"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);

        assert!(!store.root().join(".1700-busy.png.partial").exists());
        assert!(store.root().join("1700-busy.png").is_dir());
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let (_dir, store) = store().await;
        store.delete("never-written.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let (_dir, store) = store().await;
        let err = store.read_bytes("nope.png").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_rejects_path_traversal() {
        let (_dir, store) = store().await;
        for name in ["../escape.png", "a/b.png", "..", ""] {
            let err = store.save(name, Bytes::new()).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "name {name:?}");
        }
    }

    #[test]
    fn test_public_url_and_content_type() {
        let store = LocalObjectStore {
            root: PathBuf::from("/tmp"),
        };
        assert_eq!(
            store.public_url("http://localhost:8080/certifications/", "1-x.png"),
            "http://localhost:8080/certifications/1-x.png"
        );
        assert_eq!(content_type_for("A.JPG"), "image/jpeg");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
