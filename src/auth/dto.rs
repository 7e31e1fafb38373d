use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::store::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request body for login. The identifier is an email or a user id.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub join_date: OffsetDateTime,
    pub total_prompts: u32,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            join_date: user.join_date,
            total_prompts: user.total_prompts,
        }
    }
}
