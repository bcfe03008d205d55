//! # clerk-api: API Client Layer for Clerk POS
//!
//! This crate provides typed access to the backend REST service.
//! The backend owns persistence, stock decrement and stats aggregation;
//! everything here is a thin, stateless consumer of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Clerk POS Data Flow                              │
//! │                                                                         │
//! │  Terminal command (products list)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     clerk-api (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   ApiClient   │    │   Endpoints   │    │ SessionStore │  │   │
//! │  │   │  (client.rs)  │    │ (products.rs) │    │ (session.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ reqwest       │◄───│ ProductsApi   │    │ token + user │  │   │
//! │  │   │ bearer header │    │ SalesApi      │───►│ cleared on   │  │   │
//! │  │   │ status checks │    │ AuthApi ...   │    │ 401/403      │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Backend REST service (base path /api)              │   │
//! │  │        auth • products • categories • sales • stats             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - The HTTP client core: bearer transport, status handling
//! - [`session`] - The persisted session (token + user identity)
//! - [`error`] - API error types
//! - [`endpoints`] - One module per backend resource
//!
//! ## Usage
//!
//! ```rust,ignore
//! use clerk_api::{ApiClient, SessionStore};
//!
//! let session = SessionStore::in_memory();
//! let api = ApiClient::new("http://localhost:5000/api", session)?;
//!
//! // Authenticate and use the typed endpoints
//! api.auth().login("aye", "hunter2x").await?;
//! let products = api.products().list().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod client;
pub mod endpoints;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use session::{Session, SessionStore};

// Endpoint re-exports for convenience
pub use endpoints::auth::{AuthApi, RegisterInput};
pub use endpoints::categories::{CategoriesApi, CategoryInput};
pub use endpoints::products::{ProductsApi, ProductInput};
pub use endpoints::sales::SalesApi;
pub use endpoints::{BulkDeleteReport, ImageUpload};
