//! Dataset summary command.

use anyhow::Result;

use crate::context::Context;

/// Print catalog counts.
pub fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let stats = catalog.stats();

    if ctx.output.is_json() {
        ctx.output.json(&stats);
        return Ok(());
    }

    ctx.output.header("Catalog");
    ctx.output.kv("categories", &stats.categories.to_string());
    ctx.output.kv("products", &stats.products.to_string());
    ctx.output.kv("featured", &stats.featured.to_string());
    ctx.output.kv("in stock", &stats.in_stock.to_string());
    ctx.output.kv("testimonials", &stats.testimonials.to_string());

    let skipped = catalog.load_report().skipped();
    if skipped > 0 {
        ctx.output.warn(&format!("{} invalid record(s) were skipped while loading", skipped));
    }

    ctx.output.header("Products per category");
    let widths = [24, 8];
    for count in &stats.per_category {
        ctx.output
            .table_row(&[&count.name, &count.products.to_string()], &widths);
    }

    Ok(())
}
