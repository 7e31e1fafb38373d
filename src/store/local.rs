use std::sync::Arc;

use anyhow::Context;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{BlobStore, SavedPrompt, User, GUEST_USER_ID, PROMPTS_KEY, USERS_KEY};

/// Typed facade over the blob port for the two persisted collections.
///
/// Every write re-serializes the whole collection into its blob, and every
/// read parses the whole blob; an absent blob is the empty collection. A blob
/// that is present but unparseable is an error and propagates as-is, with no
/// schema validation and no migration. Writes owned by the guest sentinel are
/// silent no-ops.
#[derive(Clone)]
pub struct LocalStore {
    blobs: Arc<dyn BlobStore>,
}

impl LocalStore {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Vec<T>> {
        match self.blobs.get(key).await? {
            Some(raw) => serde_json::from_slice(&raw)
                .with_context(|| format!("malformed collection blob '{key}'")),
            None => Ok(Vec::new()),
        }
    }

    async fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> anyhow::Result<()> {
        let raw = serde_json::to_vec(items)
            .with_context(|| format!("failed to serialize collection blob '{key}'"))?;
        self.blobs.put(key, Bytes::from(raw)).await
    }

    /// All stored users; empty when nothing has been persisted yet.
    pub async fn list_users(&self) -> anyhow::Result<Vec<User>> {
        self.read_collection(USERS_KEY).await
    }

    /// Appends a user and persists the collection. Does not check id/email
    /// uniqueness; callers do that first. Guest users are not stored.
    pub async fn create_user(&self, user: &User) -> anyhow::Result<()> {
        if user.is_guest() {
            return Ok(());
        }
        let mut users = self.list_users().await?;
        users.push(user.clone());
        self.write_collection(USERS_KEY, &users).await
    }

    /// Replaces the stored record with a matching id, leaving the rest
    /// untouched, and persists the collection.
    pub async fn update_user(&self, updated: &User) -> anyhow::Result<()> {
        if updated.is_guest() {
            return Ok(());
        }
        let users: Vec<User> = self
            .list_users()
            .await?
            .into_iter()
            .map(|u| if u.id == updated.id { updated.clone() } else { u })
            .collect();
        self.write_collection(USERS_KEY, &users).await
    }

    /// All prompts across all users, stored order (newest first).
    pub async fn list_prompts(&self) -> anyhow::Result<Vec<SavedPrompt>> {
        self.read_collection(PROMPTS_KEY).await
    }

    /// Prompts owned by one user, stored order preserved. Guest data is never
    /// persisted, so the guest sentinel short-circuits to empty.
    pub async fn list_prompts_for_user(&self, user_id: &str) -> anyhow::Result<Vec<SavedPrompt>> {
        if user_id == GUEST_USER_ID {
            return Ok(Vec::new());
        }
        Ok(self
            .list_prompts()
            .await?
            .into_iter()
            .filter(|p| p.user_id == user_id)
            .collect())
    }

    /// Prepends the prompt (most recent first on read), persists, then bumps
    /// the owning user's `totalPrompts`. A missing owner record skips the
    /// bump silently.
    pub async fn save_prompt(&self, prompt: &SavedPrompt) -> anyhow::Result<()> {
        if prompt.user_id == GUEST_USER_ID {
            return Ok(());
        }
        let mut prompts = self.list_prompts().await?;
        prompts.insert(0, prompt.clone());
        self.write_collection(PROMPTS_KEY, &prompts).await?;

        let owner = self
            .list_users()
            .await?
            .into_iter()
            .find(|u| u.id == prompt.user_id);
        if let Some(mut owner) = owner {
            owner.total_prompts += 1;
            self.update_user(&owner).await?;
        }
        Ok(())
    }

    /// Removes the prompt with a matching id (no-op when absent) and persists
    /// the remainder. The owner's `totalPrompts` counter is intentionally not
    /// decremented.
    pub async fn delete_prompt(&self, id: &str) -> anyhow::Result<()> {
        let prompts: Vec<SavedPrompt> = self
            .list_prompts()
            .await?
            .into_iter()
            .filter(|p| p.id != id)
            .collect();
        self.write_collection(PROMPTS_KEY, &prompts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::improver::{Category, OutputLength, Platform, Scores, Tone};
    use crate::store::MemoryStore;
    use time::OffsetDateTime;

    fn store() -> LocalStore {
        LocalStore::new(Arc::new(MemoryStore::new()))
    }

    fn user(id: &str) -> User {
        User {
            id: id.into(),
            email: format!("{}@example.com", id.to_lowercase()),
            password_hash: "cGFzc3dvcmQ=".into(),
            join_date: OffsetDateTime::now_utc(),
            total_prompts: 0,
        }
    }

    fn prompt(id: &str, user_id: &str) -> SavedPrompt {
        SavedPrompt {
            id: id.into(),
            user_id: user_id.into(),
            original_prompt: "make a logo".into(),
            improved_prompt: "Design a minimal vector logo...".into(),
            category: Category::ImageGeneration,
            tone: Tone::Creative,
            platform: Platform::Midjourney,
            length: OutputLength::Short,
            timestamp: OffsetDateTime::now_utc(),
            scores: Scores {
                clarity: 8.0,
                detail: 7.0,
                creativity: 9.0,
            },
            explanation: "Added concrete style constraints.".into(),
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = store();
        assert!(store.list_users().await.expect("list users").is_empty());
        assert!(store.list_prompts().await.expect("list prompts").is_empty());
    }

    #[tokio::test]
    async fn created_user_comes_back_exactly_once() {
        let store = store();
        let u = user("PROMPT-AB12");
        store.create_user(&u).await.expect("create user");

        let users = store.list_users().await.expect("list users");
        assert_eq!(users, vec![u]);
    }

    #[tokio::test]
    async fn guest_writes_never_touch_the_collections() {
        let store = store();
        store
            .create_user(&user(GUEST_USER_ID))
            .await
            .expect("create guest");
        store
            .save_prompt(&prompt("P1", GUEST_USER_ID))
            .await
            .expect("save guest prompt");

        assert!(store.list_users().await.expect("list users").is_empty());
        assert!(store.list_prompts().await.expect("list prompts").is_empty());
        assert!(store
            .list_prompts_for_user(GUEST_USER_ID)
            .await
            .expect("guest prompts")
            .is_empty());
    }

    #[tokio::test]
    async fn prompts_surface_newest_first() {
        let store = store();
        store.create_user(&user("PROMPT-AB12")).await.expect("create user");
        let p1 = prompt("P1", "PROMPT-AB12");
        let p2 = prompt("P2", "PROMPT-AB12");
        store.save_prompt(&p1).await.expect("save p1");
        store.save_prompt(&p2).await.expect("save p2");

        let ids: Vec<String> = store
            .list_prompts_for_user("PROMPT-AB12")
            .await
            .expect("list for user")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["P2".to_string(), "P1".to_string()]);
    }

    #[tokio::test]
    async fn listing_for_a_user_filters_out_other_owners() {
        let store = store();
        store.create_user(&user("PROMPT-AAAA")).await.expect("create a");
        store.create_user(&user("PROMPT-BBBB")).await.expect("create b");
        store.save_prompt(&prompt("P1", "PROMPT-AAAA")).await.expect("save");
        store.save_prompt(&prompt("P2", "PROMPT-BBBB")).await.expect("save");
        store.save_prompt(&prompt("P3", "PROMPT-AAAA")).await.expect("save");

        let ids: Vec<String> = store
            .list_prompts_for_user("PROMPT-AAAA")
            .await
            .expect("list for user")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["P3".to_string(), "P1".to_string()]);
        assert_eq!(store.list_prompts().await.expect("list all").len(), 3);
    }

    #[tokio::test]
    async fn saving_bumps_the_owner_counter_by_one() {
        let store = store();
        store.create_user(&user("PROMPT-AB12")).await.expect("create user");
        store.save_prompt(&prompt("P1", "PROMPT-AB12")).await.expect("save");

        let users = store.list_users().await.expect("list users");
        assert_eq!(users[0].total_prompts, 1);

        store.save_prompt(&prompt("P2", "PROMPT-AB12")).await.expect("save");
        let users = store.list_users().await.expect("list users");
        assert_eq!(users[0].total_prompts, 2);
    }

    #[tokio::test]
    async fn saving_for_an_unknown_owner_still_stores_the_prompt() {
        let store = store();
        store
            .save_prompt(&prompt("P1", "PROMPT-GONE"))
            .await
            .expect("save without owner");

        assert_eq!(store.list_prompts().await.expect("list").len(), 1);
        assert!(store.list_users().await.expect("list users").is_empty());
    }

    #[tokio::test]
    async fn update_replaces_only_the_matching_user() {
        let store = store();
        let a = user("PROMPT-AAAA");
        let b = user("PROMPT-BBBB");
        store.create_user(&a).await.expect("create a");
        store.create_user(&b).await.expect("create b");

        let mut changed = a.clone();
        changed.total_prompts = 41;
        store.update_user(&changed).await.expect("update");

        let users = store.list_users().await.expect("list users");
        assert_eq!(users.len(), 2);
        let got_a = users.iter().find(|u| u.id == a.id).expect("a present");
        assert_eq!(got_a.total_prompts, 41);
        let got_b = users.iter().find(|u| u.id == b.id).expect("b present");
        assert_eq!(got_b.total_prompts, 0);
    }

    #[tokio::test]
    async fn delete_removes_the_prompt_and_is_idempotent() {
        let store = store();
        store.create_user(&user("PROMPT-AB12")).await.expect("create user");
        store.save_prompt(&prompt("P1", "PROMPT-AB12")).await.expect("save");
        store.save_prompt(&prompt("P2", "PROMPT-AB12")).await.expect("save");

        store.delete_prompt("P1").await.expect("delete");
        let ids: Vec<String> = store
            .list_prompts()
            .await
            .expect("list")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["P2".to_string()]);

        // Second delete of the same id is a no-op, not an error.
        store.delete_prompt("P1").await.expect("delete again");
        assert_eq!(store.list_prompts().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_does_not_decrement_the_owner_counter() {
        let store = store();
        store.create_user(&user("PROMPT-AB12")).await.expect("create user");
        store.save_prompt(&prompt("P1", "PROMPT-AB12")).await.expect("save");
        store.delete_prompt("P1").await.expect("delete");

        // The counter only ever goes up; deletes do not touch it.
        let users = store.list_users().await.expect("list users");
        assert_eq!(users[0].total_prompts, 1);
        assert!(store.list_prompts().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn malformed_blob_is_an_error_not_an_empty_collection() {
        let blobs = Arc::new(MemoryStore::new());
        blobs
            .put(USERS_KEY, Bytes::from_static(b"{not json"))
            .await
            .expect("seed garbage");
        let store = LocalStore::new(blobs);

        let err = store.list_users().await.expect_err("list should fail");
        assert!(err.to_string().contains(USERS_KEY));
    }
}
