//! # Catalog State
//!
//! The last-fetched product collection, shared between the sale screen and
//! the product list.
//!
//! The sale screen fetches the catalog once and works against that snapshot;
//! a successful checkout refetches it so the decremented stock becomes
//! visible. Stale in between is by design - stock is only authoritative on
//! the server.

use std::sync::{Arc, Mutex};

use clerk_core::Product;

/// Shared holder for the fetched product list.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Arc<Mutex<Vec<Product>>>,
}

impl CatalogState {
    pub fn new() -> Self {
        CatalogState::default()
    }

    /// Replaces the snapshot with a freshly fetched collection.
    pub fn replace(&self, products: Vec<Product>) {
        *self.products.lock().expect("Catalog mutex poisoned") = products;
    }

    /// True until the first fetch.
    pub fn is_empty(&self) -> bool {
        self.products
            .lock()
            .expect("Catalog mutex poisoned")
            .is_empty()
    }

    /// A clone of the current snapshot.
    pub fn all(&self) -> Vec<Product> {
        self.products
            .lock()
            .expect("Catalog mutex poisoned")
            .clone()
    }

    /// Looks a product up by id, or by exact barcode as a fallback so a
    /// scanner wired to the prompt works too.
    pub fn find(&self, key: &str) -> Option<Product> {
        let products = self.products.lock().expect("Catalog mutex poisoned");
        products
            .iter()
            .find(|p| p.id == key)
            .or_else(|| {
                products
                    .iter()
                    .find(|p| p.barcode.as_deref() == Some(key))
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clerk_core::Money;

    fn product(id: &str, barcode: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price: Money::from_amount(1000),
            stock: 5,
            category: None,
            barcode: barcode.map(String::from),
            image: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_find_by_id_then_barcode() {
        let catalog = CatalogState::new();
        catalog.replace(vec![
            product("p-1", Some("5449000000996")),
            product("p-2", None),
        ]);

        assert_eq!(catalog.find("p-2").unwrap().id, "p-2");
        assert_eq!(catalog.find("5449000000996").unwrap().id, "p-1");
        assert!(catalog.find("missing").is_none());
    }
}
