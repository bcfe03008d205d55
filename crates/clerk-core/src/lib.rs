//! # clerk-core: Pure Business Logic for Clerk POS
//!
//! This crate is the **heart** of Clerk POS. It contains all client-side
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Clerk POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal Shell (apps/terminal)               │   │
//! │  │    login ──► products ──► sale screen ──► receipts ──► stats   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ clerk-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  listing  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ ListView  │  │   │
//! │  │   │   Sale    │  │  totals   │  │ CartLine  │  │ Selection │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILES • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    clerk-api (API Client Layer)                 │   │
//! │  │         reqwest client, bearer session, endpoint modules        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, Sale, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart / checkout state machine
//! - [`listing`] - Client-side filter + pagination for list screens
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network, file system and terminal access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are integers in the smallest
//!    currency unit to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use clerk_core::cart::Cart;
//! use clerk_core::money::Money;
//!
//! let cart = Cart::new();
//! assert!(cart.is_empty());
//! assert_eq!(cart.total(), Money::ZERO);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod listing;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use clerk_core::Money` instead of
// `use clerk_core::money::Money`

pub use cart::{Cart, CartLine, CheckoutPhase};
pub use error::{CoreError, CoreResult, ValidationError};
pub use listing::{ListView, Selection};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for the list screens (products, categories, receipts).
///
/// ## Why a constant?
/// All list screens paginate client-side with the same fixed page size.
/// Configurable per-terminal via the app config; this is the fallback.
pub const DEFAULT_PAGE_SIZE: usize = 10;
