//! Overview numbers for the store.

use anyhow::Result;
use dashboard_domain::mock::LOW_STOCK_THRESHOLD;
use dashboard_domain::prelude::MockStore;

use crate::context::Context;

/// Run the summary command.
pub async fn run(ctx: &Context) -> Result<()> {
    let summary = MockStore::seeded()?.summary()?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Store Summary");
    ctx.output.kv("products", &summary.products.to_string());
    ctx.output.kv(
        &format!("low stock (<= {})", LOW_STOCK_THRESHOLD),
        &summary.low_stock.to_string(),
    );
    ctx.output.kv("open orders", &summary.open_orders.to_string());
    ctx.output.kv("revenue", &summary.revenue.display());
    ctx.output.kv("unread notifications", &summary.unread_notifications.to_string());

    Ok(())
}
