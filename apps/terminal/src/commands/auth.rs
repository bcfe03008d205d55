//! # Auth Commands
//!
//! Login, logout, registration and identity at the prompt.
//!
//! ## Session Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  logged out ──► protected command ──► "Please log in first"            │
//! │  logged out ──► login ──────────────► session installed & persisted    │
//! │  logged in ───► login ──────────────► "Already logged in" (logout      │
//! │                                        first - the login-page          │
//! │                                        redirect, in shell form)        │
//! │  logged in ───► any 401/403 ────────► session cleared automatically    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::error::{AppError, ErrorCode};
use crate::Ctx;
use clerk_api::RegisterInput;
use clerk_core::Role;

/// Authenticates against the backend and installs the session.
pub async fn login(ctx: &Ctx, username: &str, password: &str) -> Result<(), AppError> {
    debug!(%username, "login command");

    if let Some(user) = ctx.api.session().user() {
        return Err(AppError::new(
            ErrorCode::AlreadyLoggedIn,
            format!("Already logged in as {} - `logout` first", user.name),
        ));
    }

    let session = ctx.api.auth().login(username, password).await?;
    println!(
        "Logged in as {} ({})",
        session.user.name, session.user.role
    );
    Ok(())
}

/// Drops the session; the next protected command will ask for login.
pub fn logout(ctx: &Ctx) -> Result<(), AppError> {
    debug!("logout command");

    if !ctx.api.session().is_authenticated() {
        println!("Not logged in");
        return Ok(());
    }

    ctx.api.auth().logout();
    // The cart is per-visit state; a new cashier starts clean.
    ctx.cart.with_cart_mut(|c| c.clear());
    println!("Logged out");
    Ok(())
}

/// Registers a new account, then returns to the login prompt.
pub async fn register(
    ctx: &Ctx,
    username: &str,
    password: &str,
    name: &str,
    role: Option<&str>,
) -> Result<(), AppError> {
    debug!(%username, "register command");

    let role = match role {
        Some(raw) => raw.parse::<Role>()?,
        None => Role::Staff,
    };

    ctx.api
        .auth()
        .register(&RegisterInput {
            username: username.to_string(),
            password: password.to_string(),
            name: name.to_string(),
            role,
        })
        .await?;

    println!("Registration successful - you can now `login {}`", username);
    Ok(())
}

/// Shows the current identity.
pub fn whoami(ctx: &Ctx) -> Result<(), AppError> {
    match ctx.api.session().user() {
        Some(user) => println!("{} ({}) - id {}", user.name, user.role, user.id),
        None => println!("Not logged in"),
    }
    Ok(())
}
