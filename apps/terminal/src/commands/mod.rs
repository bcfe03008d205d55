//! # Command Modules
//!
//! All commands reachable from the shell prompt, one module per screen.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (login gate + shared rendering)
//! ├── auth.rs     ◄─── login, logout, register, whoami
//! ├── product.rs  ◄─── product list/add/edit/delete
//! ├── category.rs ◄─── category list/add/edit/delete
//! ├── cart.rs     ◄─── cart manipulation (sale screen)
//! ├── sale.rs     ◄─── checkout + receipts
//! └── stats.rs    ◄─── dashboard aggregates
//! ```
//!
//! Every command takes the shared [`crate::Ctx`] and returns
//! `Result<(), AppError>`; output goes straight to stdout.

use crate::error::AppError;
use crate::Ctx;
use clerk_core::User;

pub mod auth;
pub mod cart;
pub mod category;
pub mod product;
pub mod sale;
pub mod stats;

/// The authorization gate for protected screens.
///
/// Mirrors the route guard of a web front-end: without a credential token
/// the command is refused and the cashier is pointed at `login`. The server
/// still has the final word - any 401/403 later clears the session too.
pub(crate) fn require_login(ctx: &Ctx) -> Result<User, AppError> {
    ctx.api
        .session()
        .user()
        .ok_or_else(AppError::not_logged_in)
}

/// Renders one table row with fixed column widths.
///
/// Truncation counts characters, not bytes - product names are not ASCII.
pub(crate) fn row(cells: &[(&str, usize)]) -> String {
    let mut line = String::new();
    for &(text, width) in cells {
        let cell = if text.chars().count() > width {
            let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
            cut.push('…');
            cut
        } else {
            text.to_string()
        };
        line.push_str(&format!("{:<width$}  ", cell, width = width));
    }
    line.trim_end().to_string()
}

/// Renders the `page X of Y (N items)` footer the list screens share.
pub(crate) fn page_footer(page: usize, total_pages: usize, items: usize) -> String {
    format!("page {} of {} ({} items)", page, total_pages, items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_pads_and_truncates() {
        assert_eq!(row(&[("ab", 4), ("cd", 4)]), "ab    cd");
        // Over-long cells are cut with an ellipsis.
        assert_eq!(row(&[("abcdefgh", 4)]), "abc…");
    }

    #[test]
    fn test_page_footer() {
        assert_eq!(page_footer(1, 3, 25), "page 1 of 3 (25 items)");
    }
}
