use async_trait::async_trait;
use bytes::Bytes;

mod file;
mod local;
mod memory;
mod records;

pub use file::FileStore;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use records::{SavedPrompt, User, GUEST_USER_ID};

/// Blob holding the JSON-serialized user collection.
pub const USERS_KEY: &str = "ai_prompt_improver_users";
/// Blob holding the JSON-serialized prompt collection.
pub const PROMPTS_KEY: &str = "ai_prompt_improver_prompts";

/// Storage port the rest of the app depends on: whole named blobs in, whole
/// named blobs out. An absent key is not an error. There is no versioning
/// and no locking; concurrent writers race and the last write wins.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Bytes>>;
    async fn put(&self, key: &str, body: Bytes) -> anyhow::Result<()>;
}
