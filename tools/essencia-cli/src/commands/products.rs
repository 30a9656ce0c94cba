//! Product listing and detail commands.

use anyhow::{Context as _, Result};
use essencia_catalog::catalog::Product;
use essencia_catalog::search::{ProductFilter, ProductQuery, SortOption};

use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{featured_badge, stock_badge, truncate_name};

/// Suggestions shown under a product, as on the storefront product page.
const RELATED_LIMIT: usize = 4;

/// Collect typed flags and raw `key=value` filters into one parameter list.
///
/// Typed flags and raw filters share the same keys, so giving a criterion
/// twice is reported as an invalid filter.
fn filter_pairs(args: &ProductsArgs) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    if let Some(ref category) = args.category {
        pairs.push(("category".to_string(), category.clone()));
    }
    if let Some(featured) = args.featured {
        pairs.push(("featured".to_string(), featured.to_string()));
    }
    if let Some(in_stock) = args.in_stock {
        pairs.push(("in_stock".to_string(), in_stock.to_string()));
    }
    if let Some(ref search) = args.search {
        pairs.push(("search".to_string(), search.clone()));
    }
    for raw in &args.filters {
        let (key, value) = raw
            .split_once('=')
            .with_context(|| format!("Filter '{}' must be written as key=value", raw))?;
        pairs.push((key.to_string(), value.to_string()));
    }
    Ok(pairs)
}

/// Build the product query described by the command line.
pub fn build_query(args: &ProductsArgs) -> Result<ProductQuery> {
    let filter = ProductFilter::from_pairs(filter_pairs(args)?)?;
    let sort = args.sort.parse::<SortOption>().with_context(|| {
        let options: Vec<&str> = SortOption::ALL.iter().map(|s| s.as_str()).collect();
        format!("Valid sort options: {}", options.join(", "))
    })?;
    let query = ProductQuery::new().with_filter(filter).with_sort(sort);
    Ok(match args.limit {
        Some(limit) => query.with_limit(limit),
        None => query,
    })
}

/// List products.
pub fn list(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let query = build_query(&args)?;
    let catalog = ctx.open_catalog()?;
    let products = catalog.query_products(&query)?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({}), {}",
        products.len(),
        query.sort.display_name()
    ));
    if products.is_empty() {
        ctx.output.info("No products match");
        return Ok(());
    }
    print_product_table(ctx, &products);
    Ok(())
}

/// Show a single product.
pub fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let product = match (args.id, args.slug) {
        (Some(id), _) => catalog.get_product(&id)?,
        (None, Some(slug)) => catalog.get_product_by_slug(&slug)?,
        (None, None) => anyhow::bail!("Give a product slug or --id"),
    };

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("slug", &product.slug);
    ctx.output.kv("category", &product.category);
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("stock", &stock_badge(product.in_stock));
    if product.featured {
        ctx.output.kv("featured", "yes");
    }
    if !product.description.is_empty() {
        ctx.output.kv("description", &product.description);
    }

    ctx.output.info("");
    ctx.output.info("Images:");
    for image in &product.images {
        ctx.output.list_item(image);
    }

    let related = catalog.related_products(&product.id, RELATED_LIMIT)?;
    if !related.is_empty() {
        ctx.output.header("You may also like");
        print_product_table(ctx, &related);
    }

    Ok(())
}

/// Print products as a table; verbose mode adds descriptions.
pub fn print_product_table(ctx: &Context, products: &[&Product]) {
    let widths = [4, 32, 18, 10, 8, 10];
    ctx.output
        .table_header(&["ID", "NAME", "CATEGORY", "PRICE", "STOCK", ""], &widths);
    for product in products {
        ctx.output.table_row(
            &[
                product.id.as_str(),
                &truncate_name(&product.name),
                &product.category,
                &product.price.display(),
                &stock_badge(product.in_stock),
                &featured_badge(product.featured),
            ],
            &widths,
        );
        if ctx.output.is_verbose() && !product.description.is_empty() {
            ctx.output.kv("    ", &product.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ProductsArgs {
        ProductsArgs {
            category: None,
            featured: None,
            in_stock: None,
            search: None,
            sort: "relevance".to_string(),
            limit: None,
            filters: Vec::new(),
        }
    }

    #[test]
    fn test_typed_flags_build_filter() {
        let mut args = args();
        args.category = Some("colares".to_string());
        args.featured = Some(true);
        args.sort = "price-desc".to_string();

        let query = build_query(&args).unwrap();
        assert_eq!(query.filter.category.as_deref(), Some("colares"));
        assert_eq!(query.filter.featured, Some(true));
        assert_eq!(query.sort, SortOption::PriceDesc);
    }

    #[test]
    fn test_raw_filters_build_filter() {
        let mut args = args();
        args.filters = vec!["in_stock=false".to_string(), "q=scrunchie".to_string()];

        let query = build_query(&args).unwrap();
        assert_eq!(query.filter.in_stock, Some(false));
        assert_eq!(query.filter.search.as_deref(), Some("scrunchie"));
    }

    #[test]
    fn test_malformed_raw_filter_is_rejected() {
        let mut args = args();
        args.filters = vec!["featured".to_string()];
        assert!(build_query(&args).is_err());
    }

    #[test]
    fn test_flag_and_raw_filter_conflict() {
        let mut args = args();
        args.category = Some("brincos".to_string());
        args.filters = vec!["category=colares".to_string()];
        assert!(build_query(&args).is_err());
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let mut args = args();
        args.sort = "popularity".to_string();
        let err = build_query(&args).unwrap_err();
        assert!(format!("{:#}", err).contains("price-asc"));
    }

    #[test]
    fn test_limit_is_passed_through() {
        assert_eq!(build_query(&args()).unwrap().limit, None);

        let mut limited = args();
        limited.featured = Some(true);
        limited.limit = Some(4);
        assert_eq!(build_query(&limited).unwrap().limit, Some(4));
    }
}
