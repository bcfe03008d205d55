//! # Category Endpoints
//!
//! CRUD against `/categories`. Same multipart convention as products:
//! create and update may carry an image file part, and the screens refetch
//! after every mutation.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use tracing::{debug, info};

use crate::client::ApiClient;
use crate::endpoints::{delete_each, BulkDeleteReport, ImageUpload};
use crate::error::ApiResult;
use clerk_core::validation::validate_name;
use clerk_core::Category;

/// Input for creating or updating a category.
#[derive(Debug, Clone, Default)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<ImageUpload>,
}

impl CategoryInput {
    fn validate(&self) -> ApiResult<()> {
        validate_name(&self.name)?;
        Ok(())
    }

    fn into_form(self) -> Form {
        let mut form = Form::new()
            .text("name", self.name)
            .text("description", self.description.unwrap_or_default());

        if let Some(image) = self.image {
            form = form.part(
                "image",
                Part::bytes(image.bytes).file_name(image.file_name),
            );
        }

        form
    }
}

/// Accessor for the `/categories` endpoints.
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CategoriesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        CategoriesApi { client }
    }

    /// Fetches the full category collection.
    pub async fn list(&self) -> ApiResult<Vec<Category>> {
        let categories: Vec<Category> = self.client.get_json("categories").await?;
        debug!(count = categories.len(), "Fetched categories");
        Ok(categories)
    }

    /// Creates a category (multipart, optional image).
    pub async fn create(&self, input: CategoryInput) -> ApiResult<()> {
        input.validate()?;
        let name = input.name.clone();

        self.client
            .send_form(Method::POST, "categories", input.into_form())
            .await?;

        info!(%name, "Category created");
        Ok(())
    }

    /// Updates a category (multipart, optional image).
    pub async fn update(&self, id: &str, input: CategoryInput) -> ApiResult<()> {
        input.validate()?;

        self.client
            .send_form(
                Method::PUT,
                &format!("categories/{}", id),
                input.into_form(),
            )
            .await?;

        info!(%id, "Category updated");
        Ok(())
    }

    /// Deletes one category.
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.client.delete(&format!("categories/{}", id)).await?;
        info!(%id, "Category deleted");
        Ok(())
    }

    /// Deletes many categories concurrently, reporting one outcome per id.
    pub async fn delete_many(&self, ids: &[String]) -> BulkDeleteReport {
        let report = delete_each(self.client, "categories", ids).await;
        info!(
            requested = report.len(),
            succeeded = report.succeeded(),
            "Bulk category delete settled"
        );
        report
    }
}
