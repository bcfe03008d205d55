//! # Cart / Checkout State Machine
//!
//! Manages the in-progress sale for one checkout session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Cashier Action           Operation               Cart State Change     │
//! │  ──────────────           ─────────               ─────────────────     │
//! │                                                                         │
//! │  Pick product ───────────► add_product() ───────► line qty +1 / new    │
//! │                                                                         │
//! │  +/- on a line ──────────► update_quantity() ───► line qty ± delta     │
//! │                                                                         │
//! │  Remove line ────────────► remove_line() ───────► line deleted         │
//! │                                                                         │
//! │  Checkout ───────────────► begin_checkout() ────► phase = Submitting   │
//! │                                 │                                       │
//! │                   POST /sales   │  (done by the caller)                 │
//! │                                 ▼                                       │
//! │          success: commit_checkout() ────────────► lines cleared, Idle  │
//! │          failure: abort_checkout() ─────────────► lines kept, Idle     │
//! │                                                                         │
//! │  Every mutation is guarded by the product's last-known stock.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! `Empty → Populated` on the first successful `add_product`, back to
//! `Empty` on a committed checkout or when the last line is removed. The
//! explicit `Submitting` phase rejects a second checkout trigger while one
//! is outstanding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DraftItem, Product, SaleDraft};

// =============================================================================
// Cart Line
// =============================================================================

/// One line of the cart: a product snapshot plus a requested quantity.
///
/// ## Design Notes
/// - `unit_price` is frozen when the product first enters the cart. If the
///   product price changes on the server afterwards, this line keeps the
///   price the cashier saw.
/// - `stock` is the last-known stock snapshot and is the upper bound for
///   `quantity`. It is refreshed whenever the same product is added again
///   from a freshly fetched list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product id (unique per cart - adding the same product increments).
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Last-known stock for this product; bounds `quantity`.
    pub stock: i64,

    /// Requested quantity; always `1 <= quantity <= stock`.
    pub quantity: i64,

    /// When this line was created.
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new line from a product with quantity 1.
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            stock: product.stock,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Line total: frozen unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Checkout Phase
// =============================================================================

/// Whether a checkout submission is currently in flight.
///
/// ## Why an Explicit Phase?
/// The submission is asynchronous and the screen stays interactive while it
/// is outstanding. Without this guard a second checkout press would submit
/// the same lines twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    /// No submission outstanding; the cart accepts mutations.
    #[default]
    Idle,
    /// `POST /sales` is in flight; a second checkout is rejected.
    Submitting,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product increments)
/// - `1 <= quantity <= stock snapshot` for every line
/// - `total()` equals the sum of the line totals after every mutation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    phase: CheckoutPhase,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// The current lines, in the order they were added.
    #[inline]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The current checkout phase.
    #[inline]
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Grand total: sum of quantity × frozen unit price over all lines.
    /// Returns zero for an empty cart.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Adds one unit of a product to the cart.
    ///
    /// ## Behavior
    /// - No line for this product: a new line with quantity 1 is created,
    ///   provided `product.stock > 0`; otherwise [`CoreError::OutOfStock`]
    ///   and no state change.
    /// - Line exists: its quantity is incremented by 1, provided the new
    ///   quantity does not exceed the product's stock; otherwise
    ///   [`CoreError::InsufficientStock`] and no state change. The stock
    ///   snapshot is refreshed from the passed product, so a restocked
    ///   product raises the bound without re-adding.
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            let requested = line.quantity + 1;
            if requested > product.stock {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.stock,
                    requested,
                });
            }
            line.quantity = requested;
            line.stock = product.stock;
            return Ok(());
        }

        if !product.in_stock() {
            return Err(CoreError::OutOfStock {
                name: product.name.clone(),
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(())
    }

    /// Adjusts a line's quantity by `delta`.
    ///
    /// ## Behavior
    /// - Resulting quantity ≤ 0: the line is left unchanged and `Ok` is
    ///   returned - decrements past 1 are no-ops, not removals. Use
    ///   [`Cart::remove_line`] to drop a line.
    /// - Resulting quantity above the stock snapshot:
    ///   [`CoreError::InsufficientStock`], line unchanged.
    /// - Unknown product id: [`CoreError::NotInCart`].
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) -> CoreResult<()> {
        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::NotInCart {
                product_id: product_id.to_string(),
            })?;

        let requested = line.quantity + delta;
        if requested <= 0 {
            return Ok(());
        }
        if requested > line.stock {
            return Err(CoreError::InsufficientStock {
                name: line.name.clone(),
                available: line.stock,
                requested,
            });
        }

        line.quantity = requested;
        Ok(())
    }

    /// Removes a line unconditionally. Unknown ids are a no-op.
    pub fn remove_line(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Clears all lines and returns the cart to `Idle`.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.phase = CheckoutPhase::Idle;
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Starts a checkout: builds the sale submission and enters `Submitting`.
    ///
    /// ## Preconditions
    /// - The cart is non-empty ([`CoreError::EmptyCart`])
    /// - No checkout is already in flight ([`CoreError::CheckoutInProgress`])
    ///
    /// The submission carries, for every line, the product id, quantity and
    /// the frozen unit price. Server-side stock is NOT re-validated here; a
    /// race with concurrent sales is possible and accepted - the backend has
    /// the final word.
    pub fn begin_checkout(&mut self, cashier_id: &str) -> CoreResult<SaleDraft> {
        if self.phase == CheckoutPhase::Submitting {
            return Err(CoreError::CheckoutInProgress);
        }
        if self.lines.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let items = self
            .lines
            .iter()
            .map(|l| DraftItem {
                product: l.product_id.clone(),
                quantity: l.quantity,
                price: l.unit_price,
            })
            .collect();

        self.phase = CheckoutPhase::Submitting;

        Ok(SaleDraft {
            items,
            total_amount: self.total(),
            cashier_id: cashier_id.to_string(),
        })
    }

    /// Finishes a successful checkout: clears the lines, back to `Idle`.
    ///
    /// The caller is expected to refresh the product list afterwards so the
    /// next sale sees the decremented stock.
    pub fn commit_checkout(&mut self) {
        self.clear();
    }

    /// Aborts a failed checkout: lines stay intact, back to `Idle`.
    pub fn abort_checkout(&mut self) {
        self.phase = CheckoutPhase::Idle;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: i64, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_amount(price),
            stock,
            category: None,
            barcode: None,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_add_product_creates_line_with_quantity_one() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 5);

        cart.add_product(&product).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
        assert_eq!(cart.total(), Money::from_amount(999));
    }

    #[test]
    fn test_add_same_product_increments_line() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 5);

        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();

        assert_eq!(cart.line_count(), 1); // still one unique line
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total(), Money::from_amount(1998));
    }

    #[test]
    fn test_add_out_of_stock_is_rejected_without_state_change() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 0);

        let err = cart.add_product(&product).unwrap_err();
        assert!(matches!(err, CoreError::OutOfStock { .. }));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
    }

    #[test]
    fn test_add_past_stock_is_rejected() {
        let mut cart = Cart::new();
        let product = test_product("1", 500, 2);

        cart.add_product(&product).unwrap();
        cart.add_product(&product).unwrap();
        let err = cart.add_product(&product).unwrap_err();

        assert!(matches!(
            err,
            CoreError::InsufficientStock {
                available: 2,
                requested: 3,
                ..
            }
        ));
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_add_refreshes_stock_snapshot() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 500, 1)).unwrap();

        // Restocked on the server, list refetched, product added again.
        cart.add_product(&test_product("1", 500, 10)).unwrap();
        assert_eq!(cart.lines()[0].stock, 10);

        // The raised bound now also applies to quantity updates.
        cart.update_quantity("1", 5).unwrap();
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn test_price_frozen_at_first_add() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1000, 10)).unwrap();

        // Price raised on the server; the line keeps the original price.
        let repriced = test_product("1", 1500, 10);
        cart.add_product(&repriced).unwrap();

        assert_eq!(cart.lines()[0].unit_price, Money::from_amount(1000));
        assert_eq!(cart.total(), Money::from_amount(2000));
    }

    #[test]
    fn test_update_quantity_to_zero_is_a_noop_not_a_removal() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 999, 5)).unwrap();

        cart.update_quantity("1", -1).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_update_quantity_past_stock_reports_insufficient() {
        let mut cart = Cart::new();
        let product = test_product("1", 999, 3);
        cart.add_product(&product).unwrap();
        cart.update_quantity("1", 2).unwrap(); // quantity == stock == 3

        let err = cart.update_quantity("1", 1).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientStock { .. }));
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_update_quantity_unknown_product() {
        let mut cart = Cart::new();
        let err = cart.update_quantity("missing", 1).unwrap_err();
        assert!(matches!(err, CoreError::NotInCart { .. }));
    }

    /// Worked example from the sale screen: one line at price 1000, stock 3.
    #[test]
    fn test_increment_to_stock_then_reject() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("A", 1000, 3)).unwrap();

        cart.update_quantity("A", 1).unwrap();
        cart.update_quantity("A", 1).unwrap();
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), Money::from_amount(3000));

        assert!(cart.update_quantity("A", 1).is_err());
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total(), Money::from_amount(3000));
    }

    #[test]
    fn test_remove_line_is_unconditional() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 999, 5)).unwrap();

        cart.remove_line("1");
        assert!(cart.is_empty());

        // Removing an absent line is fine too.
        cart.remove_line("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_over_multiple_lines() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1000, 5)).unwrap();
        cart.add_product(&test_product("2", 250, 5)).unwrap();
        cart.add_product(&test_product("2", 250, 5)).unwrap();

        assert_eq!(cart.total(), Money::from_amount(1500));
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_checkout_happy_path_clears_cart() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1000, 5)).unwrap();
        cart.add_product(&test_product("1", 1000, 5)).unwrap();

        let draft = cart.begin_checkout("u-1").unwrap();
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].quantity, 2);
        assert_eq!(draft.items[0].price, Money::from_amount(1000));
        assert_eq!(draft.total_amount, Money::from_amount(2000));
        assert_eq!(draft.cashier_id, "u-1");
        assert_eq!(cart.phase(), CheckoutPhase::Submitting);

        cart.commit_checkout();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::ZERO);
        assert_eq!(cart.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn test_checkout_on_empty_cart_is_rejected() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.begin_checkout("u-1").unwrap_err(),
            CoreError::EmptyCart
        ));
    }

    #[test]
    fn test_second_checkout_while_submitting_is_rejected() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1000, 5)).unwrap();

        let _draft = cart.begin_checkout("u-1").unwrap();
        let err = cart.begin_checkout("u-1").unwrap_err();

        assert!(matches!(err, CoreError::CheckoutInProgress));
        assert_eq!(cart.line_count(), 1); // cart intact
    }

    #[test]
    fn test_abort_checkout_keeps_lines() {
        let mut cart = Cart::new();
        cart.add_product(&test_product("1", 1000, 5)).unwrap();

        let _draft = cart.begin_checkout("u-1").unwrap();
        cart.abort_checkout();

        assert_eq!(cart.phase(), CheckoutPhase::Idle);
        assert_eq!(cart.line_count(), 1);

        // After an abort a new checkout may start.
        assert!(cart.begin_checkout("u-1").is_ok());
    }
}
