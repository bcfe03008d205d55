//! # Endpoint Modules
//!
//! One module per backend resource, mirroring the consumed API surface:
//!
//! ```text
//! endpoints/
//! ├── mod.rs         ◄─── You are here (shared input & bulk-delete types)
//! ├── auth.rs        ◄─── POST /auth/login, /auth/register
//! ├── products.rs    ◄─── GET/POST/PUT/DELETE /products[/:id]
//! ├── categories.rs  ◄─── GET/POST/PUT/DELETE /categories[/:id]
//! └── sales.rs       ◄─── /sales, /sales/stats, /sales/trend,
//!                         /sales/top-products
//! ```
//!
//! Each module exposes a borrowed accessor type (`ProductsApi<'_>` etc.)
//! reached through [`crate::ApiClient`], so call sites read
//! `api.products().list()`.

use futures_util::future::join_all;

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};

pub mod auth;
pub mod categories;
pub mod products;
pub mod sales;

// =============================================================================
// Image Upload
// =============================================================================

/// An image file attached to a product or category create/update.
///
/// The bytes travel as a multipart file part named `image`; the backend
/// stores the file and responds with its server-side path.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// =============================================================================
// Bulk Delete
// =============================================================================

/// Per-id outcome of a bulk delete.
///
/// The backend has no batch endpoint, so a bulk delete fans out one DELETE
/// per id concurrently and waits for all of them to settle. Instead of
/// collapsing a partial failure into one generic error, every id's outcome
/// is kept so the screen can say exactly which deletions failed.
#[derive(Debug)]
pub struct BulkDeleteReport {
    outcomes: Vec<(String, ApiResult<()>)>,
}

impl BulkDeleteReport {
    /// All outcomes, in the order the ids were given.
    pub fn outcomes(&self) -> &[(String, ApiResult<()>)] {
        &self.outcomes
    }

    /// Number of ids requested.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of deletions that succeeded.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|(_, r)| r.is_ok()).count()
    }

    /// The ids that failed, with their errors.
    pub fn failed(&self) -> Vec<(&str, &ApiError)> {
        self.outcomes
            .iter()
            .filter_map(|(id, r)| r.as_ref().err().map(|e| (id.as_str(), e)))
            .collect()
    }

    /// True when every deletion succeeded.
    pub fn is_all_ok(&self) -> bool {
        self.outcomes.iter().all(|(_, r)| r.is_ok())
    }
}

/// Fans out `DELETE {resource}/{id}` for every id concurrently.
///
/// No ordering guarantee between the in-flight requests; the report is in
/// input order regardless of completion order.
pub(crate) async fn delete_each(
    client: &ApiClient,
    resource: &str,
    ids: &[String],
) -> BulkDeleteReport {
    let requests = ids.iter().map(|id| {
        let path = format!("{}/{}", resource, id);
        async move { (id.clone(), client.delete(&path).await) }
    });

    BulkDeleteReport {
        outcomes: join_all(requests).await,
    }
}
