//! # Auth Endpoints
//!
//! Login, registration and logout.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login(username, password)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /auth/login {username, password}                                  │
//! │       │                                                                 │
//! │       ├── 2xx {token, user} ──► SessionStore::set() ──► session.json   │
//! │       │                                                                 │
//! │       └── error ──► server message surfaced, session untouched         │
//! │                                                                         │
//! │  Logout is purely local: drop the token, remove the file. The backend  │
//! │  has no logout endpoint - the token simply stops being presented.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::session::Session;
use clerk_core::validation::{validate_name, validate_password, validate_username};
use clerk_core::{Role, User};

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: User,
}

/// Input for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// Accessor for the `/auth` endpoints.
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        AuthApi { client }
    }

    /// Authenticates and installs the session.
    ///
    /// On success the token and user are persisted, so a restarted terminal
    /// is still logged in. On failure the session is left untouched and the
    /// server's message is surfaced.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Session> {
        let response: LoginResponse = self
            .client
            .post_json(
                "auth/login",
                &LoginRequest { username, password },
            )
            .await?;

        let session = Session {
            token: response.token,
            user: response.user,
        };
        self.client.session().set(session.clone())?;

        info!(user = %session.user.name, role = %session.user.role, "Logged in");
        Ok(session)
    }

    /// Registers a new account. Does NOT log the new user in - the flow
    /// returns to the login screen, matching the register screen's behavior.
    pub async fn register(&self, input: &RegisterInput) -> ApiResult<()> {
        validate_username(&input.username)?;
        validate_password(&input.password)?;
        validate_name(&input.name)?;

        self.client.post_unit("auth/register", input).await?;

        info!(username = %input.username, role = %input.role, "Registered");
        Ok(())
    }

    /// Drops the local session. Purely client-side.
    pub fn logout(&self) {
        self.client.session().clear();
        info!("Logged out");
    }
}
