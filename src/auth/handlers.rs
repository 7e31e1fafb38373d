use axum::{extract::State, routing::post, Json, Router};
use time::OffsetDateTime;
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, PublicUser, RegisterRequest},
        services::{encode_password, guest_user, is_valid_email, new_user_id, verify_password},
    },
    state::AppState,
    store::User,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/guest", post(guest))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<(axum::http::StatusCode, Json<PublicUser>), (axum::http::StatusCode, String)> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err((axum::http::StatusCode::BAD_REQUEST, "Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err((
            axum::http::StatusCode::BAD_REQUEST,
            "Password too short".into(),
        ));
    }

    // Ensure email is not taken
    let users = match state.store.list_users().await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "list_users failed");
            return Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };
    if users.iter().any(|u| u.email == payload.email) {
        warn!(email = %payload.email, "email already registered");
        return Err((
            axum::http::StatusCode::CONFLICT,
            "Email already registered.".into(),
        ));
    }

    let user = User {
        id: new_user_id(),
        email: payload.email,
        password_hash: encode_password(&payload.password),
        join_date: OffsetDateTime::now_utc(),
        total_prompts: 0,
    };
    if let Err(e) = state.store.create_user(&user).await {
        error!(error = %e, "create user failed");
        return Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
    }

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((axum::http::StatusCode::CREATED, Json(PublicUser::from(user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<PublicUser>, (axum::http::StatusCode, String)> {
    let identifier = payload.identifier.trim();
    let email = identifier.to_lowercase();

    let users = match state.store.list_users().await {
        Ok(u) => u,
        Err(e) => {
            error!(error = %e, "list_users failed");
            return Err((axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
    };

    // Identifier may be an email or a user id
    let found = users.into_iter().find(|u| {
        (u.email == email || u.id == identifier)
            && verify_password(&payload.password, &u.password_hash)
    });

    match found {
        Some(user) => {
            info!(user_id = %user.id, email = %user.email, "user logged in");
            Ok(Json(PublicUser::from(user)))
        }
        None => {
            warn!(identifier = %identifier, "login invalid credentials");
            Err((
                axum::http::StatusCode::UNAUTHORIZED,
                "Invalid credentials.".into(),
            ))
        }
    }
}

#[instrument]
pub async fn guest() -> Json<PublicUser> {
    let user = guest_user();
    info!(user_id = %user.id, "guest session started");
    Json(PublicUser::from(user))
}
