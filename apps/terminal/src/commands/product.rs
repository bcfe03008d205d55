//! # Product Commands
//!
//! The product list screen and its CRUD operations.
//!
//! ## List Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products [term] [page]                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GET /products (full collection - no server paging)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ListView: case-insensitive filter on name OR barcode,                 │
//! │            fixed page size, page clamped                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  table + "page X of Y (N items)"                                       │
//! │                                                                         │
//! │  Mutations (add/edit/rm) refetch the collection afterwards instead     │
//! │  of patching local state - the server's answer is the truth.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::commands::{page_footer, require_login, row};
use crate::error::AppError;
use crate::Ctx;
use clerk_api::{ImageUpload, ProductInput};
use clerk_core::validation::validate_search_query;
use clerk_core::{ListView, Money, Product};

/// Arguments shared by `product add` and `product edit`.
#[derive(Debug, Clone, Default)]
pub struct ProductFormArgs {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub category: Option<String>,
    pub barcode: Option<String>,
    /// Local path of an image file to upload.
    pub image: Option<String>,
}

impl ProductFormArgs {
    fn into_input(self) -> Result<ProductInput, AppError> {
        let image = match self.image {
            Some(path) => Some(ImageUpload {
                file_name: std::path::Path::new(&path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "image".to_string()),
                bytes: std::fs::read(&path)
                    .map_err(|e| AppError::io(format!("read {}: {}", path, e)))?,
            }),
            None => None,
        };

        Ok(ProductInput {
            name: self.name,
            price: Money::from_amount(self.price),
            stock: self.stock,
            category: self.category,
            barcode: self.barcode,
            image,
        })
    }
}

/// The products screen: filter on name or barcode.
fn matches(product: &Product, needle: &str) -> bool {
    product.name.to_lowercase().contains(needle)
        || product
            .barcode
            .as_ref()
            .map(|b| b.to_lowercase().contains(needle))
            .unwrap_or(false)
}

/// Fetches the collection and refreshes the shared catalog snapshot.
pub(crate) async fn refresh_catalog(ctx: &Ctx) -> Result<Vec<Product>, AppError> {
    let products = ctx.api.products().list().await?;
    ctx.catalog.replace(products.clone());
    Ok(products)
}

/// `products [term] [page]` - the list screen.
pub async fn list(ctx: &Ctx, term: &str, page: usize) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(%term, %page, "products command");

    let term = validate_search_query(term)?;
    let products = refresh_catalog(ctx).await?;

    let mut view = ListView::with_page_size(ctx.config.page_size);
    view.set_items(products, matches);
    view.set_search(&term, matches);
    view.set_page(page);

    println!(
        "{}",
        row(&[
            ("ID", 24),
            ("NAME", 28),
            ("CATEGORY", 14),
            ("PRICE", 10),
            ("STOCK", 6),
            ("BARCODE", 14),
        ])
    );
    for product in view.current_page() {
        let category = product
            .category
            .as_ref()
            .map_or("-", |c| c.name.as_str());
        println!(
            "{}",
            row(&[
                (&product.id, 24),
                (&product.name, 28),
                (category, 14),
                (&product.price.to_string(), 10),
                (&product.stock.to_string(), 6),
                (product.barcode.as_deref().unwrap_or("-"), 14),
            ])
        );
    }

    if view.is_empty() {
        println!("No products found");
    }
    println!(
        "{}",
        page_footer(view.page(), view.total_pages(), view.filtered_len())
    );
    Ok(())
}

/// `product add <name> <price> <stock> [category=] [barcode=] [image=]`
pub async fn add(ctx: &Ctx, args: ProductFormArgs) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(name = %args.name, "product add command");

    let name = args.name.clone();
    ctx.api.products().create(args.into_input()?).await?;
    refresh_catalog(ctx).await?;

    println!("Product created: {}", name);
    Ok(())
}

/// `product edit <id> <name> <price> <stock> [category=] [barcode=] [image=]`
pub async fn edit(ctx: &Ctx, id: &str, args: ProductFormArgs) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(%id, "product edit command");

    ctx.api.products().update(id, args.into_input()?).await?;
    refresh_catalog(ctx).await?;

    println!("Product updated: {}", id);
    Ok(())
}

/// `product rm <id>...` - one id deletes directly, several fan out
/// concurrently with a per-id report.
pub async fn remove(ctx: &Ctx, ids: &[String]) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(count = ids.len(), "product rm command");

    if let [id] = ids {
        ctx.api.products().delete(id).await?;
        println!("Product deleted: {}", id);
    } else {
        let report = ctx.api.products().delete_many(ids).await;
        println!("Deleted {} of {} products", report.succeeded(), report.len());
        for (id, err) in report.failed() {
            println!("  failed {}: {}", id, err);
        }
    }

    refresh_catalog(ctx).await?;
    Ok(())
}
