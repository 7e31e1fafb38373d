use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use super::BlobStore;

/// Non-durable blob store over a plain map. Used by tests and fake app
/// states; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Bytes>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>> {
        let blobs = self.blobs.lock().expect("memory store lock");
        Ok(blobs.get(key).cloned())
    }

    async fn put(&self, key: &str, body: Bytes) -> anyhow::Result<()> {
        let mut blobs = self.blobs.lock().expect("memory store lock");
        blobs.insert(key.to_string(), body);
        Ok(())
    }
}
