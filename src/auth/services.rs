use base64::{engine::general_purpose::STANDARD, Engine as _};
use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use time::OffsetDateTime;

use crate::store::{User, GUEST_USER_ID};

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Reversible base64 encoding, not a password hash. Kept for compatibility
/// with the stored user blobs.
pub fn encode_password(plain: &str) -> String {
    STANDARD.encode(plain)
}

pub fn verify_password(plain: &str, encoded: &str) -> bool {
    encode_password(plain) == encoded
}

/// `PROMPT-` plus four random uppercase alphanumeric characters.
pub fn new_user_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect();
    format!("PROMPT-{suffix}")
}

/// Ephemeral guest identity. Never persisted; the store treats the sentinel
/// id as a no-op on every write.
pub fn guest_user() -> User {
    User {
        id: GUEST_USER_ID.into(),
        email: "guest@aipro.local".into(),
        password_hash: String::new(),
        join_date: OffsetDateTime::now_utc(),
        total_prompts: 0,
    }
}
