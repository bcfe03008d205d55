//! # Product Endpoints
//!
//! CRUD against `/products`. Create and update are multipart forms because
//! they may carry an image file; the screens refetch the collection after
//! every mutation instead of patching local state, so mutations return `()`.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::endpoints::{delete_each, BulkDeleteReport, ImageUpload};
use crate::error::ApiResult;
use clerk_core::validation::{validate_name, validate_price, validate_stock};
use clerk_core::{Money, Product};

/// Input for creating or updating a product.
///
/// `category` is the category id; `image` is attached as a file part when
/// present. Matching the form the backend expects, `barcode` is always sent
/// (empty when unset) while `category` is omitted when unset.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: String,
    pub price: Money,
    pub stock: i64,
    pub category: Option<String>,
    pub barcode: Option<String>,
    pub image: Option<ImageUpload>,
}

impl ProductInput {
    fn validate(&self) -> ApiResult<()> {
        validate_name(&self.name)?;
        validate_price(self.price)?;
        validate_stock(self.stock)?;
        Ok(())
    }

    fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("name", self.name)
            .text("price", self.price.amount().to_string())
            .text("stock", self.stock.to_string())
            .text("barcode", self.barcode.unwrap_or_default());

        if let Some(category) = self.category {
            form = form.text("category", category);
        }

        if let Some(image) = self.image {
            form = form.part(
                "image",
                Part::bytes(image.bytes).file_name(image.file_name),
            );
        }

        form
    }
}

/// Accessor for the `/products` endpoints.
pub struct ProductsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProductsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        ProductsApi { client }
    }

    /// Fetches the full product collection. Filtering and pagination happen
    /// client-side - there is no server-side paging.
    pub async fn list(&self) -> ApiResult<Vec<Product>> {
        let products: Vec<Product> = self.client.get_json("products").await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    /// Creates a product (multipart, optional image).
    pub async fn create(&self, input: ProductInput) -> ApiResult<()> {
        input.validate()?;
        let name = input.name.clone();

        self.client
            .send_form(Method::POST, "products", input.into_form())
            .await?;

        info!(%name, "Product created");
        Ok(())
    }

    /// Updates a product (multipart, optional image).
    pub async fn update(&self, id: &str, input: ProductInput) -> ApiResult<()> {
        input.validate()?;

        self.client
            .send_form(Method::PUT, &format!("products/{}", id), input.into_form())
            .await?;

        info!(%id, "Product updated");
        Ok(())
    }

    /// Deletes one product.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("products/{}", id)).await?;
        info!(%id, "Product deleted");
        Ok(())
    }

    /// Deletes many products concurrently, reporting one outcome per id.
    pub async fn delete_many(&self, ids: &[String]) -> BulkDeleteReport {
        let report = delete_each(self.client, "products", ids).await;
        info!(
            requested = report.len(),
            succeeded = report.succeeded(),
            "Bulk product delete settled"
        );
        report
    }
}
