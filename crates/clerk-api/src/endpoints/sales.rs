//! # Sales Endpoints
//!
//! Checkout submission, the receipts list, and the dashboard aggregates.
//!
//! ## Checkout Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart::begin_checkout() ──► SaleDraft                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /sales {items[], totalAmount, cashierId}                         │
//! │       │                                                                 │
//! │       ├── 2xx ──► caller commits the cart and refetches products       │
//! │       │          (the backend decremented stock)                        │
//! │       │                                                                 │
//! │       └── error ──► caller aborts: cart kept intact, message surfaced  │
//! │                                                                         │
//! │  Stock is NOT re-validated client-side before submitting; a race with  │
//! │  a concurrent sale is possible and the backend settles it.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::endpoints::{delete_each, BulkDeleteReport};
use crate::error::ApiResult;
use clerk_core::{Sale, SaleDraft, SaleStats, TopProduct, TrendPoint};

/// Accessor for the `/sales` endpoints.
pub struct SalesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SalesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        SalesApi { client }
    }

    /// Fetches all receipts. Filtering and pagination happen client-side.
    pub async fn list(&self) -> ApiResult<Vec<Sale>> {
        let sales: Vec<Sale> = self.client.get_json("sales").await?;
        debug!(count = sales.len(), "Fetched receipts");
        Ok(sales)
    }

    /// Submits a checkout.
    ///
    /// The response body is ignored: on success the caller refetches the
    /// product list, which is where the decremented stock becomes visible.
    pub async fn create(&self, draft: &SaleDraft) -> ApiResult<()> {
        self.client.post_unit("sales", draft).await?;

        info!(
            items = draft.items.len(),
            total = %draft.total_amount,
            "Sale submitted"
        );
        Ok(())
    }

    /// Deletes one receipt.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("sales/{}", id)).await?;
        info!(%id, "Receipt deleted");
        Ok(())
    }

    /// Deletes many receipts concurrently, reporting one outcome per id.
    pub async fn delete_many(&self, ids: &[String]) -> BulkDeleteReport {
        let report = delete_each(self.client, "sales", ids).await;
        info!(
            requested = report.len(),
            succeeded = report.succeeded(),
            "Bulk receipt delete settled"
        );
        report
    }

    // =========================================================================
    // Dashboard Aggregates
    // =========================================================================

    /// Today's revenue and order count.
    pub async fn stats(&self) -> ApiResult<SaleStats> {
        self.client.get_json("sales/stats").await
    }

    /// Daily sales for the last 7 days.
    pub async fn trend(&self) -> ApiResult<Vec<TrendPoint>> {
        self.client.get_json("sales/trend").await
    }

    /// Top-selling products by quantity.
    pub async fn top_products(&self) -> ApiResult<Vec<TopProduct>> {
        self.client.get_json("sales/top-products").await
    }
}
