//! # Domain Types
//!
//! Core domain types used throughout Clerk POS. These double as the wire
//! schemas for the backend REST API: every payload is parsed into one of
//! these explicit types at the API boundary - nothing downstream touches
//! untyped JSON.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  receipt_number │   │  name           │       │
//! │  │  price (Money)  │   │  items[]        │   │  role           │       │
//! │  │  stock          │   │  total_amount   │   └─────────────────┘       │
//! │  │  category?      │   │  cashier?       │                             │
//! │  └─────────────────┘   └─────────────────┘   ┌─────────────────┐       │
//! │                                              │    Category     │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  ─────────────  │       │
//! │  │   SaleStats     │   │   SaleDraft     │   │  id             │       │
//! │  │  sales, orders  │   │  (checkout      │   │  name           │       │
//! │  │  (today)        │   │   submission)   │   │  description?   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Conventions
//! - Field names are camelCase on the wire (`receiptNumber`, `totalAmount`)
//! - Monetary amounts are bare integers, carried by [`Money`]
//! - Embedded references arrive as `{id, name}` documents ([`EntityRef`])
//!   and may be `null` when the referenced entity was deleted

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Entity Reference
// =============================================================================

/// A thin `{id, name}` reference to another entity.
///
/// Used wherever the backend embeds a populated document: a product's
/// category, a receipt's cashier, a receipt line's product. The referenced
/// entity may since have been deleted, which is why holders keep the whole
/// reference optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// `stock` is authoritative on the server; the client treats every fetched
/// value as a snapshot that bounds cart quantities until the next refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, assigned by the backend.
    pub id: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Unit price in the smallest currency unit.
    pub price: Money,

    /// Sellable units currently on hand (server-authoritative).
    pub stock: i64,

    /// Category this product belongs to, if any.
    #[serde(default)]
    pub category: Option<EntityRef>,

    /// Barcode (EAN-13, UPC-A, etc.).
    #[serde(default)]
    pub barcode: Option<String>,

    /// Server-side path of the product image, if one was uploaded.
    #[serde(default)]
    pub image: Option<String>,

    /// When the product was created.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the product was last updated.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Checks if at least one unit can be sold.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Server-side path of the category image, if one was uploaded.
    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// =============================================================================
// User & Role
// =============================================================================

/// The role of an authenticated user.
///
/// A closed set: the register screen offers exactly these three. Unknown
/// strings are a parse error at the API boundary, not a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::Staff => write!(f, "staff"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            "staff" => Ok(Role::Staff),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec![
                    "admin".to_string(),
                    "manager".to_string(),
                    "staff".to_string(),
                ],
            }),
        }
    }
}

/// An authenticated user's identity, as returned by `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,

    #[serde(default)]
    pub username: Option<String>,
}

// =============================================================================
// Sale / Receipt
// =============================================================================

/// A line item on a finalized receipt.
///
/// Uses the snapshot pattern: `price` is the unit price *at time of sale*
/// and never changes when the product's current price does. The product
/// reference is optional because products can be deleted after the sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    #[serde(default)]
    pub product: Option<EntityRef>,

    pub quantity: i64,

    /// Unit price at time of sale (frozen).
    pub price: Money,
}

impl SaleItem {
    /// Line total: frozen unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// A finalized sale, as listed on the receipts screen.
///
/// Immutable once created, except for deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub receipt_number: String,

    /// Cashier who rang the sale up; `None` if the user was deleted.
    #[serde(default)]
    pub cashier: Option<EntityRef>,

    pub items: Vec<SaleItem>,
    pub total_amount: Money,
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Number of line items on the receipt.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Display name of the cashier, with the backend's fallback.
    pub fn cashier_name(&self) -> &str {
        self.cashier.as_ref().map_or("Unknown", |c| c.name.as_str())
    }
}

// =============================================================================
// Checkout Submission
// =============================================================================

/// One line of a checkout submission: product id, quantity, and the unit
/// price frozen into the cart when the product was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    /// Product id (the wire field is named `product`).
    pub product: String,
    pub quantity: i64,
    pub price: Money,
}

/// The body of `POST /sales`, built by [`crate::cart::Cart::begin_checkout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    pub items: Vec<DraftItem>,
    pub total_amount: Money,
    pub cashier_id: String,
}

// =============================================================================
// Dashboard Aggregates
// =============================================================================

/// Today's totals, from `GET /sales/stats`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStats {
    /// Revenue so far today.
    pub sales: Money,
    /// Number of orders so far today.
    pub orders: i64,
}

/// One day of the 7-day sales trend, from `GET /sales/trend`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Day label as the backend formats it (e.g. `2026-08-01`).
    pub date: String,
    pub sales: Money,
}

/// A top-selling product, from `GET /sales/top-products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    #[serde(default)]
    pub id: Option<String>,

    pub name: String,
    pub total_quantity: i64,

    #[serde(default)]
    pub total_revenue: Option<Money>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_product_payload() {
        let payload = r#"[
            {
                "id": "p-1",
                "name": "Coca-Cola 330ml",
                "price": 1200,
                "stock": 24,
                "category": {"id": "c-1", "name": "Drinks"},
                "barcode": "5449000000996",
                "image": "/uploads/coke.jpg",
                "createdAt": "2026-07-01T09:30:00Z"
            },
            {
                "id": "p-2",
                "name": "Instant Noodles",
                "price": 800,
                "stock": 0
            }
        ]"#;

        let products: Vec<Product> = serde_json::from_str(payload).unwrap();
        assert_eq!(products.len(), 2);

        assert_eq!(products[0].price, Money::from_amount(1200));
        assert_eq!(products[0].category.as_ref().unwrap().name, "Drinks");
        assert!(products[0].in_stock());

        // Optional fields default cleanly when the backend omits them.
        assert!(products[1].category.is_none());
        assert!(products[1].barcode.is_none());
        assert!(!products[1].in_stock());
    }

    #[test]
    fn test_parse_sale_with_deleted_references() {
        let payload = r#"{
            "id": "s-1",
            "receiptNumber": "R-20260801-0001",
            "cashier": null,
            "items": [
                {"product": null, "quantity": 2, "price": 1200},
                {"product": {"id": "p-2", "name": "Noodles"}, "quantity": 1, "price": 800}
            ],
            "totalAmount": 3200,
            "createdAt": "2026-08-01T12:00:00Z"
        }"#;

        let sale: Sale = serde_json::from_str(payload).unwrap();
        assert_eq!(sale.item_count(), 2);
        assert_eq!(sale.cashier_name(), "Unknown");
        assert_eq!(sale.items[0].line_total(), Money::from_amount(2400));
        assert_eq!(sale.total_amount, Money::from_amount(3200));
    }

    #[test]
    fn test_sale_draft_wire_shape() {
        let draft = SaleDraft {
            items: vec![DraftItem {
                product: "p-1".to_string(),
                quantity: 3,
                price: Money::from_amount(1000),
            }],
            total_amount: Money::from_amount(3000),
            cashier_id: "u-1".to_string(),
        };

        let json = serde_json::to_value(&draft).unwrap();
        // The backend expects exactly these camelCase names.
        assert_eq!(json["totalAmount"], 3000);
        assert_eq!(json["cashierId"], "u-1");
        assert_eq!(json["items"][0]["product"], "p-1");
        assert_eq!(json["items"][0]["price"], 1000);
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!(Role::Admin.to_string(), "admin");
        assert!("cashier".parse::<Role>().is_err());

        let user: User =
            serde_json::from_str(r#"{"id": "u-1", "name": "Aye", "role": "staff"}"#).unwrap();
        assert_eq!(user.role, Role::Staff);
        assert!(user.username.is_none());
    }

    #[test]
    fn test_parse_stats_and_trend() {
        let stats: SaleStats =
            serde_json::from_str(r#"{"sales": 152000, "orders": 17}"#).unwrap();
        assert_eq!(stats.sales, Money::from_amount(152000));
        assert_eq!(stats.orders, 17);

        let trend: Vec<TrendPoint> =
            serde_json::from_str(r#"[{"date": "2026-08-01", "sales": 42000}]"#).unwrap();
        assert_eq!(trend[0].sales, Money::from_amount(42000));

        let top: Vec<TopProduct> = serde_json::from_str(
            r#"[{"name": "Coca-Cola 330ml", "totalQuantity": 40, "totalRevenue": 48000}]"#,
        )
        .unwrap();
        assert_eq!(top[0].total_quantity, 40);
        assert_eq!(top[0].total_revenue, Some(Money::from_amount(48000)));
    }
}
