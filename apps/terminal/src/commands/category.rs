//! # Category Commands
//!
//! The category list screen and its CRUD operations. Same list/filter/
//! paginate contract as products, filtering on the name only.

use tracing::debug;

use crate::commands::{page_footer, require_login, row};
use crate::error::AppError;
use crate::Ctx;
use clerk_api::{CategoryInput, ImageUpload};
use clerk_core::validation::validate_search_query;
use clerk_core::{Category, ListView};

/// Arguments shared by `category add` and `category edit`.
#[derive(Debug, Clone, Default)]
pub struct CategoryFormArgs {
    pub name: String,
    pub description: Option<String>,
    /// Local path of an image file to upload.
    pub image: Option<String>,
}

impl CategoryFormArgs {
    fn into_input(self) -> Result<CategoryInput, AppError> {
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

        Ok(CategoryInput {
            name: self.name,
            description: self.description,
            image,
        })
    }
}

fn matches(category: &Category, needle: &str) -> bool {
    category.name.to_lowercase().contains(needle)
}

/// `categories [term] [page]` - the list screen.
pub async fn list(ctx: &Ctx, term: &str, page: usize) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(%term, %page, "categories command");

    let term = validate_search_query(term)?;
    let categories = ctx.api.categories().list().await?;

    let mut view = ListView::with_page_size(ctx.config.page_size);
    view.set_items(categories, matches);
    view.set_search(&term, matches);
    view.set_page(page);

    println!(
        "{}",
        row(&[("ID", 24), ("NAME", 24), ("DESCRIPTION", 40)])
    );
    for category in view.current_page() {
        println!(
            "{}",
            row(&[
                (&category.id, 24),
                (&category.name, 24),
                (category.description.as_deref().unwrap_or("-"), 40),
            ])
        );
    }

    if view.is_empty() {
        println!("No categories found");
    }
    println!(
        "{}",
        page_footer(view.page(), view.total_pages(), view.filtered_len())
    );
    Ok(())
}

/// `category add <name> [description=] [image=]`
pub async fn add(ctx: &Ctx, args: CategoryFormArgs) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(name = %args.name, "category add command");

    let name = args.name.clone();
    ctx.api.categories().create(args.into_input()?).await?;

    println!("Category created: {}", name);
    Ok(())
}

/// `category edit <id> <name> [description=] [image=]`
pub async fn edit(ctx: &Ctx, id: &str, args: CategoryFormArgs) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(%id, "category edit command");

    ctx.api.categories().update(id, args.into_input()?).await?;

    println!("Category updated: {}", id);
    Ok(())
}

/// `category rm <id>...`
pub async fn remove(ctx: &Ctx, ids: &[String]) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(count = ids.len(), "category rm command");

    if let [id] = ids {
        ctx.api.categories().delete(id).await?;
        println!("Category deleted: {}", id);
    } else {
        let report = ctx.api.categories().delete_many(ids).await;
        println!(
            "Deleted {} of {} categories",
            report.succeeded(),
            report.len()
        );
        for (id, err) in report.failed() {
            println!("  failed {}: {}", id, err);
        }
    }

    Ok(())
}
