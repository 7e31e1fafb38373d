use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::improver::{Category, OutputLength, Platform, Scores, Tone};

/// Reserved identity marking a non-durable guest session. Nothing owned by
/// this id is ever written to storage.
pub const GUEST_USER_ID: &str = "GUEST";

/// User record as stored in the users blob. Field names stay camelCase on
/// disk so existing blobs remain readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,                  // unique; "GUEST" reserved
    pub email: String,
    pub password_hash: String,       // reversible base64 encoding, not a real hash
    #[serde(with = "time::serde::rfc3339")]
    pub join_date: OffsetDateTime,
    pub total_prompts: u32,          // bumped on every saved prompt
}

impl User {
    pub fn is_guest(&self) -> bool {
        self.id == GUEST_USER_ID
    }
}

/// One improvement result, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPrompt {
    pub id: String,
    pub user_id: String,
    pub original_prompt: String,
    pub improved_prompt: String,
    pub category: Category,
    pub tone: Tone,
    pub platform: Platform,
    pub length: OutputLength,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub scores: Scores,
    pub explanation: String,
}
