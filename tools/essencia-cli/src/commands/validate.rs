//! Dataset validation command.

use anyhow::{bail, Context as _, Result};
use essencia_catalog::{Catalog, LoadPolicy};
use serde_json::json;

use super::ValidateArgs;
use crate::context::Context;

/// Check a dataset against the catalog invariants.
///
/// Every violation is reported. The command fails when any are found,
/// unless `--lenient` accepts a dataset that loads with records skipped.
pub fn run(args: ValidateArgs, ctx: &Context) -> Result<()> {
    // Always collect every violation; the policy only decides the outcome.
    let loader = ctx.config.loader().with_policy(LoadPolicy::SkipInvalid);

    let source = args
        .path
        .as_deref()
        .or(ctx.config.catalog.source.as_deref());
    let (label, catalog) = match source {
        Some(path) => {
            let path = ctx.resolve_path(path);
            let catalog = loader.load_path(&path).context("Failed to load catalog")?;
            (path.display().to_string(), catalog)
        }
        None => (
            "built-in dataset".to_string(),
            loader
                .load_builtin()
                .context("Failed to load built-in catalog")?,
        ),
    };

    let violations = &catalog.load_report().violations;
    let valid = violations.is_empty();

    if ctx.output.is_json() {
        report_json(ctx, &catalog, valid);
    } else {
        ctx.output.header(&format!("Validating {}", label));
        for violation in violations {
            if args.lenient {
                ctx.output.warn(&format!("Skipped: {}", violation));
            } else {
                ctx.output.error(&format!("Error: {}", violation));
            }
        }
        let stats = catalog.stats();
        ctx.output.kv("categories", &stats.categories.to_string());
        ctx.output.kv("products", &stats.products.to_string());
        ctx.output.kv("testimonials", &stats.testimonials.to_string());
    }

    let message = outcome(violations.len(), args.lenient)?;
    ctx.output.success(&message);

    Ok(())
}

/// Decide the command result from the number of violations found.
///
/// Any violation is an error unless `lenient`, in which case the dataset
/// passes with the offending records skipped.
fn outcome(violations: usize, lenient: bool) -> Result<String> {
    match (violations, lenient) {
        (0, _) => Ok("Dataset is valid".to_string()),
        (n, true) => Ok(format!("Dataset loads with {} record(s) skipped", n)),
        (n, false) => bail!("Dataset has {} violation(s)", n),
    }
}

fn report_json(ctx: &Context, catalog: &Catalog, valid: bool) {
    let stats = catalog.stats();
    let violations: Vec<_> = catalog
        .load_report()
        .violations
        .iter()
        .map(|v| json!({ "entity": v.entity().as_str(), "message": v.to_string() }))
        .collect();

    let report = json!({
        "valid": valid,
        "counts": {
            "categories": stats.categories,
            "products": stats.products,
            "testimonials": stats.testimonials,
        },
        "violations": violations,
    });
    ctx.output.json(&report);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_dataset_passes() {
        assert_eq!(outcome(0, false).unwrap(), "Dataset is valid");
        assert_eq!(outcome(0, true).unwrap(), "Dataset is valid");
    }

    #[test]
    fn test_violations_fail_by_default() {
        let err = outcome(2, false).unwrap_err();
        assert_eq!(err.to_string(), "Dataset has 2 violation(s)");
    }

    #[test]
    fn test_lenient_accepts_skipped_records() {
        assert_eq!(
            outcome(3, true).unwrap(),
            "Dataset loads with 3 record(s) skipped"
        );
    }
}
