//! # Cart State
//!
//! Holds the current cart for the sale screen.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Commands and the checkout flow both access the cart
//! 2. Only one operation should modify the cart at a time
//! 3. Clones of the state share one cart
//!
//! The cart itself (all the business rules) lives in clerk-core; this is
//! only the thread-safe holder.

use std::sync::{Arc, Mutex};

use clerk_core::Cart;

/// Shared holder for the sale screen's cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = cart_state.with_cart(|cart| cart.total());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_product(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clerk_core::{Money, Product};

    fn test_product() -> Product {
        Product {
            id: "p-1".to_string(),
            name: "Coca-Cola 330ml".to_string(),
            price: Money::from_amount(1200),
            stock: 24,
            category: None,
            barcode: None,
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_clones_share_one_cart() {
        let state = CartState::new();
        let alias = state.clone();

        state
            .with_cart_mut(|c| c.add_product(&test_product()))
            .unwrap();

        assert_eq!(alias.with_cart(|c| c.line_count()), 1);
        assert_eq!(
            alias.with_cart(|c| c.total()),
            Money::from_amount(1200)
        );
    }
}
