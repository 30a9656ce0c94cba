//! Category listing and detail commands.

use anyhow::Result;
use serde_json::json;

use super::CategoryArgs;
use crate::commands::products::print_product_table;
use crate::context::Context;

/// List all categories in catalog order.
pub fn list(ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let categories = catalog.list_categories();

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    let stats = catalog.stats();
    ctx.output.header(&format!("Categories ({})", categories.len()));
    let widths = [4, 24, 20, 8];
    ctx.output.table_header(&["ID", "NAME", "SLUG", "PRODUCTS"], &widths);
    for (category, count) in categories.iter().zip(stats.per_category.iter()) {
        ctx.output.table_row(
            &[
                category.id.as_str(),
                &category.name,
                &category.slug,
                &count.products.to_string(),
            ],
            &widths,
        );
    }

    Ok(())
}

/// Show one category and its products.
pub fn show(args: CategoryArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let category = catalog.get_category_by_slug(&args.slug)?;
    let products = catalog.products_in_category(&args.slug)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "category": category,
            "products": products,
        }));
        return Ok(());
    }

    ctx.output.header(&category.name);
    ctx.output.kv("id", category.id.as_str());
    ctx.output.kv("slug", &category.slug);
    ctx.output.kv("image", &category.image_url);

    if products.is_empty() {
        ctx.output.info("No products in this category");
        return Ok(());
    }

    ctx.output.info("");
    print_product_table(ctx, &products);
    Ok(())
}
