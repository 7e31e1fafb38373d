use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::error;

use super::BlobStore;

/// Blob store backed by one `<key>.json` file per blob under a data
/// directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates the store and makes sure the data directory exists.
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref().to_path_buf();
        if let Err(e) = std::fs::create_dir_all(&dir) {
            // Writes will fail later with a proper context.
            error!(path = %dir.display(), error = %e, "failed to create data directory");
        }
        Self { dir }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl BlobStore for FileStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        let path = self.blob_path(key);
        match fs::read(&path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("failed to read blob file {}", path.display()))
            }
        }
    }

    async fn put(&self, key: &str, body: Bytes) -> anyhow::Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await.with_context(|| {
                format!("failed to create data directory {}", self.dir.display())
            })?;
        }
        let path = self.blob_path(key);
        fs::write(&path, &body)
            .await
            .with_context(|| format!("failed to write blob file {}", path.display()))
    }
}
