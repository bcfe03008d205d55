//! # Dashboard Commands
//!
//! Today's totals, the 7-day trend and the top sellers, straight from the
//! backend's aggregate endpoints. All computation happens server-side;
//! this module only renders.

use tracing::debug;

use crate::commands::{require_login, row};
use crate::error::AppError;
use crate::Ctx;
use clerk_core::TrendPoint;

/// Width of the ASCII bar column in the trend chart.
const BAR_WIDTH: usize = 30;

/// Renders one trend bar scaled against the largest day.
fn trend_bar(point: &TrendPoint, max_sales: i64) -> String {
    let filled = if max_sales > 0 {
        (point.sales.amount() * BAR_WIDTH as i64 / max_sales) as usize
    } else {
        0
    };
    format!(
        "{}  {:<width$}  {}",
        point.date,
        "#".repeat(filled),
        point.sales,
        width = BAR_WIDTH
    )
}

/// `dashboard` - stats, trend and top products in one screen.
pub async fn dashboard(ctx: &Ctx) -> Result<(), AppError> {
    require_login(ctx)?;
    debug!("dashboard command");

    let stats = ctx.api.sales().stats().await?;
    println!("Today: {} revenue, {} orders", ctx.config.format_money(stats.sales), stats.orders);

    let trend = ctx.api.sales().trend().await?;
    if !trend.is_empty() {
        println!();
        println!("Sales trend (last 7 days)");
        let max_sales = trend.iter().map(|p| p.sales.amount()).max().unwrap_or(0);
        for point in &trend {
            println!("  {}", trend_bar(point, max_sales));
        }
    }

    let top = ctx.api.sales().top_products().await?;
    if !top.is_empty() {
        println!();
        println!("Top selling products");
        println!("  {}", row(&[("PRODUCT", 28), ("SOLD", 6), ("REVENUE", 12)]));
        for product in &top {
            let revenue = product
                .total_revenue
                .map(|m| m.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "  {}",
                row(&[
                    (&product.name, 28),
                    (&product.total_quantity.to_string(), 6),
                    (&revenue, 12),
                ])
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clerk_core::Money;

    #[test]
    fn test_trend_bar_scales_to_max() {
        let full = TrendPoint {
            date: "2026-08-01".to_string(),
            sales: Money::from_amount(1000),
        };
        let half = TrendPoint {
            date: "2026-08-02".to_string(),
            sales: Money::from_amount(500),
        };

        assert!(trend_bar(&full, 1000).contains(&"#".repeat(BAR_WIDTH)));
        assert!(trend_bar(&half, 1000).contains(&"#".repeat(BAR_WIDTH / 2)));

        // A flat week renders without bars instead of dividing by zero.
        let zero = TrendPoint {
            date: "2026-08-03".to_string(),
            sales: Money::ZERO,
        };
        assert!(!trend_bar(&zero, 0).contains('#'));
    }
}
