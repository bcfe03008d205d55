//! # API Client
//!
//! The HTTP core every endpoint module goes through.
//!
//! ## Request Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Request Pipeline                                     │
//! │                                                                         │
//! │  endpoint module (ProductsApi::list)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  build request ──► attach "Authorization: Bearer <token>"              │
//! │       │            (when a session exists)                              │
//! │       ▼                                                                 │
//! │  send ──► status?                                                       │
//! │       │      ├── 2xx ──────────► decode into the typed schema          │
//! │       │      ├── 401/403 ──────► clear session, Err(Unauthorized)      │
//! │       │      └── other ────────► parse {"message": ...} or fallback,   │
//! │       │                          Err(Status)                            │
//! │       ▼                                                                 │
//! │  ApiResult<T>                                                           │
//! │                                                                         │
//! │  No retries, no request cancellation, no timeout beyond transport      │
//! │  defaults - any failure surfaces exactly once.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::endpoints::auth::AuthApi;
use crate::endpoints::categories::CategoriesApi;
use crate::endpoints::products::ProductsApi;
use crate::endpoints::sales::SalesApi;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;

/// Shape of the backend's error bodies: `{"message": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// =============================================================================
// Api Client
// =============================================================================

/// Typed client for the backend REST service.
///
/// Cheap to clone: the underlying `reqwest::Client` pools connections and
/// the session store is shared.
///
/// ## Usage
/// ```rust,ignore
/// let api = ApiClient::new("http://localhost:5000/api", session)?;
///
/// let products = api.products().list().await?;
/// api.sales().create(&draft).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Creates a client for the given base URL (e.g. `http://host:5000/api`).
    pub fn new(base_url: &str, session: SessionStore) -> ApiResult<Self> {
        // A trailing slash makes Url::join treat the base as a directory;
        // without it "…/api".join("products") would drop the /api segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        Ok(ApiClient {
            http: reqwest::Client::new(),
            base_url,
            session,
        })
    }

    /// The session store this client reads credentials from.
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // =========================================================================
    // Endpoint Accessors
    // =========================================================================

    /// Authentication endpoints (`/auth/*`).
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// Product endpoints (`/products`).
    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(self)
    }

    /// Category endpoints (`/categories`).
    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    /// Sales, receipts and dashboard endpoints (`/sales`).
    pub fn sales(&self) -> SalesApi<'_> {
        SalesApi::new(self)
    }

    // =========================================================================
    // Request Helpers (used by the endpoint modules)
    // =========================================================================

    fn url(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", path, e)))
    }

    /// GET `path` and decode the JSON body into `T`.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        debug!(%path, "GET");
        let response = self.execute(self.http.get(self.url(path)?)).await?;
        Self::decode_json(path, response).await
    }

    /// POST a JSON body to `path` and decode the response into `T`.
    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        debug!(%path, "POST");
        let response = self
            .execute(self.http.post(self.url(path)?).json(body))
            .await?;
        Self::decode_json(path, response).await
    }

    /// POST a JSON body to `path`, ignoring the response body.
    ///
    /// Used where the screens refetch the collection afterwards instead of
    /// patching local state from the response.
    pub(crate) async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        debug!(%path, "POST");
        self.execute(self.http.post(self.url(path)?).json(body))
            .await?;
        Ok(())
    }

    /// Send a multipart form (product/category create & update carry an
    /// optional image file part). The response body is ignored.
    pub(crate) async fn send_form(
        &self,
        method: Method,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ApiResult<()> {
        debug!(%path, %method, "multipart");
        self.execute(
            self.http
                .request(method, self.url(path)?)
                .multipart(form),
        )
        .await?;
        Ok(())
    }

    /// DELETE `path`, ignoring the response body.
    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        debug!(%path, "DELETE");
        self.execute(self.http.delete(self.url(path)?)).await?;
        Ok(())
    }

    // =========================================================================
    // Pipeline Core
    // =========================================================================

    /// Attaches the bearer token, sends, and maps the status.
    async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
        let request = match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Authorization failures are global: clear the session first so the
        // caller already observes a logged-out state.
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "Authorization failure - clearing session");
            self.session.clear();
            return Err(ApiError::Unauthorized);
        }

        // Surface the server's message when it sent one, else a generic
        // fallback. State on our side is untouched either way.
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_else(|_| format!("Request failed with status {}", status.as_u16()));

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode_json<T: DeserializeOwned>(path: &str, response: Response) -> ApiResult<T> {
        let raw = response.bytes().await?;
        serde_json::from_slice(&raw).map_err(|e| ApiError::decode(path, e))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
