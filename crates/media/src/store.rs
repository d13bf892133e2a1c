//! Local filesystem layout for uploads and exports.
//!
//! Uploads are keyed by report: `{report_id}/original/{name}`, with derived
//! variants under `optimized/` and `thumb/`. Exports are flat files named
//! after the report number.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::MediaError;

#[derive(Debug, Clone)]
pub struct MediaStore {
    upload_dir: PathBuf,
    export_dir: PathBuf,
}

/// A file written under the upload tree.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Path relative to the upload root, always forward-slashed.
    pub rel_path: String,
    /// Absolute path on disk.
    pub abs_path: PathBuf,
}

impl MediaStore {
    pub fn new(upload_dir: impl Into<PathBuf>, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            export_dir: export_dir.into(),
        }
    }

    pub async fn ensure_dirs(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        tokio::fs::create_dir_all(&self.export_dir).await?;
        Ok(())
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn upload_path(&self, rel_path: &str) -> PathBuf {
        self.upload_dir.join(rel_path)
    }

    pub fn export_path(&self, file_name: &str) -> PathBuf {
        self.export_dir.join(file_name)
    }

    /// Persist an uploaded original under `{report_id}/original/`, keeping
    /// the client's extension (defaulting to `.jpg`).
    pub async fn save_original(
        &self,
        report_id: &str,
        file_name: &str,
        data: &[u8],
    ) -> Result<StoredFile, MediaError> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| "jpg".to_string());
        let rel_path = format!("{report_id}/original/{}.{ext}", Uuid::new_v4().simple());
        let abs_path = self.upload_path(&rel_path);
        if let Some(parent) = abs_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&abs_path, data).await?;
        Ok(StoredFile { rel_path, abs_path })
    }

    pub fn upload_url(rel_path: &str) -> String {
        format!("/files/uploads/{rel_path}")
    }

    pub fn export_url(file_name: &str) -> String {
        format!("/files/exports/{file_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_rooted_under_files() {
        assert_eq!(
            MediaStore::upload_url("r1/original/a.jpg"),
            "/files/uploads/r1/original/a.jpg"
        );
        assert_eq!(
            MediaStore::export_url("SR-240101-123.pdf"),
            "/files/exports/SR-240101-123.pdf"
        );
    }

    #[tokio::test]
    async fn save_original_keeps_extension_and_nests_by_report() {
        let tmp = std::env::temp_dir().join(format!("servio-store-{}", Uuid::new_v4()));
        let store = MediaStore::new(tmp.join("uploads"), tmp.join("exports"));
        let stored = store
            .save_original("report-1", "photo.PNG", b"fake")
            .await
            .unwrap();
        assert!(stored.rel_path.starts_with("report-1/original/"));
        assert!(stored.rel_path.ends_with(".png"));
        assert_eq!(std::fs::read(&stored.abs_path).unwrap(), b"fake");
        std::fs::remove_dir_all(&tmp).unwrap();
    }

    #[tokio::test]
    async fn save_original_defaults_missing_extension_to_jpg() {
        let tmp = std::env::temp_dir().join(format!("servio-store-{}", Uuid::new_v4()));
        let store = MediaStore::new(tmp.join("uploads"), tmp.join("exports"));
        let stored = store
            .save_original("report-1", "camera-roll", b"fake")
            .await
            .unwrap();
        assert!(stored.rel_path.ends_with(".jpg"));
        std::fs::remove_dir_all(&tmp).unwrap();
    }
}
