//! # Cart Commands
//!
//! The sale screen's cart manipulation. All rules live in
//! [`clerk_core::cart`]; these commands wire them to the prompt and the
//! catalog snapshot.
//!
//! ## Sale Screen Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart add p-1 ──► catalog lookup (id or barcode) ──► Cart::add_product │
//! │  cart inc p-1 ──► Cart::update_quantity(+n)                            │
//! │  cart dec p-1 ──► Cart::update_quantity(-n)   (never drops a line)     │
//! │  cart rm  p-1 ──► Cart::remove_line           (unconditional)          │
//! │  cart         ──► render lines + total                                 │
//! │  checkout     ──► sale.rs                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::commands::product::refresh_catalog;
use crate::commands::{require_login, row};
use crate::error::AppError;
use crate::Ctx;
use clerk_core::CheckoutPhase;

/// `cart` - renders the current order.
pub fn show(ctx: &Ctx) -> Result<(), AppError> {
    ctx.cart.with_cart(|cart| {
        if cart.is_empty() {
            println!("Cart is empty");
            return;
        }

        println!(
            "{}",
            row(&[("ID", 24), ("NAME", 28), ("PRICE", 10), ("QTY", 5), ("TOTAL", 12)])
        );
        for line in cart.lines() {
            println!(
                "{}",
                row(&[
                    (&line.product_id, 24),
                    (&line.name, 28),
                    (&line.unit_price.to_string(), 10),
                    (&line.quantity.to_string(), 5),
                    (&line.line_total().to_string(), 12),
                ])
            );
        }

        println!(
            "Total: {}  ({} items)",
            ctx.config.format_money(cart.total()),
            cart.total_quantity()
        );
        if cart.phase() == CheckoutPhase::Submitting {
            println!("(checkout in progress)");
        }
    });
    Ok(())
}

/// `cart add <id|barcode>` - adds one unit of a product.
///
/// The product comes from the catalog snapshot (fetched on first use), the
/// same collection the product list shows; its stock value bounds the line.
pub async fn add(ctx: &Ctx, key: &str) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!(%key, "cart add command");

    if ctx.catalog.is_empty() {
        refresh_catalog(ctx).await?;
    }

    let product = ctx
        .catalog
        .find(key)
        .ok_or_else(|| AppError::not_found("Product", key))?;

    ctx.cart.with_cart_mut(|cart| cart.add_product(&product))?;

    ctx.cart.with_cart(|cart| {
        println!(
            "Added {} - cart total {}",
            product.name,
            ctx.config.format_money(cart.total())
        );
    });
    Ok(())
}

/// `cart inc <id> [n]` / `cart dec <id> [n]` - quantity delta.
///
/// A delta that would land at or below zero leaves the line unchanged;
/// `cart rm` is the only way to drop a line.
pub fn update(ctx: &Ctx, product_id: &str, delta: i64) -> Result<(), AppError> {
    debug!(%product_id, %delta, "cart update command");

    ctx.cart
        .with_cart_mut(|cart| cart.update_quantity(product_id, delta))?;

    ctx.cart.with_cart(|cart| {
        let quantity = cart
            .lines()
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0);
        println!(
            "Quantity now {} - cart total {}",
            quantity,
            ctx.config.format_money(cart.total())
        );
    });
    Ok(())
}

/// `cart rm <id>` - removes a line unconditionally.
pub fn remove(ctx: &Ctx, product_id: &str) -> Result<(), AppError> {
    debug!(%product_id, "cart rm command");

    ctx.cart.with_cart_mut(|cart| cart.remove_line(product_id));
    ctx.cart.with_cart(|cart| {
        println!(
            "Removed - cart total {}",
            ctx.config.format_money(cart.total())
        );
    });
    Ok(())
}

/// `cart clear` - starts the order over.
pub fn clear(ctx: &Ctx) -> Result<(), AppError> {
    debug!("cart clear command");

    ctx.cart.with_cart_mut(|cart| cart.clear());
    println!("Cart cleared");
    Ok(())
}
