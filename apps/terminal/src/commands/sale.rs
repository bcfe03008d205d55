//! # Sale Commands
//!
//! Checkout and the receipts screen.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  checkout                                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Cart::begin_checkout(cashier) ──► SaleDraft, phase = Submitting       │
//! │       │         (empty cart / double trigger rejected here)             │
//! │       ▼                                                                 │
//! │  POST /sales                                                            │
//! │       │                                                                 │
//! │       ├── ok ───► commit_checkout (cart empties) + catalog refetch     │
//! │       │           (the refetch is where the decremented stock shows)   │
//! │       │                                                                 │
//! │       └── err ──► abort_checkout (lines intact), message surfaced      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::commands::product::refresh_catalog;
use crate::commands::{page_footer, require_login, row};
use crate::error::AppError;
use crate::Ctx;
use clerk_core::validation::validate_search_query;
use clerk_core::{ListView, Sale};

fn matches(sale: &Sale, needle: &str) -> bool {
    sale.receipt_number.to_lowercase().contains(needle)
        || sale
            .cashier
            .as_ref()
            .map(|c| c.name.to_lowercase().contains(needle))
            .unwrap_or(false)
}

/// `checkout` - submits the cart as a finalized sale.
pub async fn checkout(ctx: &Ctx) -> Result<(), AppError> {
    let cashier = require_login(ctx)?;
    debug!(cashier = %cashier.id, "checkout command");

    // Build the submission and flip to Submitting inside the lock; the
    // network call happens outside it.
    let draft = ctx
        .cart
        .with_cart_mut(|cart| cart.begin_checkout(&cashier.id))?;

    match ctx.api.sales().create(&draft).await {
        Ok(()) => {
            ctx.cart.with_cart_mut(|cart| cart.commit_checkout());
            // Refresh stock from the server now that it decremented.
            refresh_catalog(ctx).await?;

            info!(total = %draft.total_amount, "Checkout completed");
            println!(
                "Sale completed - total {}",
                ctx.config.format_money(draft.total_amount)
            );
            Ok(())
        }
        Err(err) => {
            // The cart survives a failed submission untouched.
            ctx.cart.with_cart_mut(|cart| cart.abort_checkout());
            Err(err.into())
        }
    }
}

/// `receipts [term] [page]` - the receipts list screen. Filters on the
/// receipt number or the cashier name.
pub async fn list(ctx: &Ctx, term: &str, page: usize) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(%term, %page, "receipts command");

    let term = validate_search_query(term)?;
    let sales = ctx.api.sales().list().await?;

    let mut view = ListView::with_page_size(ctx.config.page_size);
    view.set_items(sales, matches);
    view.set_search(&term, matches);
    view.set_page(page);

    println!(
        "{}",
        row(&[
            ("ID", 24),
            ("RECEIPT NO", 18),
            ("DATE", 20),
            ("CASHIER", 16),
            ("ITEMS", 5),
            ("TOTAL", 12),
        ])
    );
    for sale in view.current_page() {
        println!(
            "{}",
            row(&[
                (&sale.id, 24),
                (&sale.receipt_number, 18),
                (&sale.created_at.format("%Y-%m-%d %H:%M").to_string(), 20),
                (sale.cashier_name(), 16),
                (&sale.item_count().to_string(), 5),
                (&sale.total_amount.to_string(), 12),
            ])
        );
    }

    if view.is_empty() {
        println!("No sales records found");
    }
    println!(
        "{}",
        page_footer(view.page(), view.total_pages(), view.filtered_len())
    );
    Ok(())
}

/// `receipt <id>` - the detail view of one receipt.
///
/// The backend has no single-receipt endpoint; like the screen's detail
/// modal this works off the fetched collection.
pub async fn detail(ctx: &Ctx, id: &str) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(%id, "receipt command");

    let sales = ctx.api.sales().list().await?;
    let sale = sales
        .iter()
        .find(|s| s.id == id || s.receipt_number == id)
        .ok_or_else(|| AppError::not_found("Receipt", id))?;

    println!("Receipt #{}", sale.receipt_number);
    println!(
        "{}  cashier: {}",
        sale.created_at.format("%Y-%m-%d %H:%M:%S"),
        sale.cashier_name()
    );
    println!(
        "{}",
        row(&[("PRODUCT", 28), ("QTY", 5), ("PRICE", 10), ("TOTAL", 12)])
    );
    for item in &sale.items {
        let name = item
            .product
            .as_ref()
            .map_or("Deleted Product", |p| p.name.as_str());
        println!(
            "{}",
            row(&[
                (name, 28),
                (&item.quantity.to_string(), 5),
                (&item.price.to_string(), 10),
                (&item.line_total().to_string(), 12),
            ])
        );
    }
    println!(
        "Total: {}  ({} items)",
        ctx.config.format_money(sale.total_amount),
        sale.item_count()
    );
    Ok(())
}

/// `receipt rm <id>...`
pub async fn remove(ctx: &Ctx, ids: &[String]) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(count = ids.len(), "receipt rm command");

    if let [id] = ids {
        ctx.api.sales().delete(id).await?;
        println!("Receipt deleted: {}", id);
    } else {
        let report = ctx.api.sales().delete_many(ids).await;
        println!(
            "Deleted {} of {} receipts",
            report.succeeded(),
            report.len()
        );
        for (id, err) in report.failed() {
            println!("  failed {}: {}", id, err);
        }
    }

    Ok(())
}
