//! Testimonial listing command.

use anyhow::Result;

use crate::context::Context;

/// List testimonials in dataset order.
pub fn run(ctx: &Context) -> Result<()> {
    let catalog = ctx.open_catalog()?;
    let testimonials = catalog.list_testimonials();

    if ctx.output.is_json() {
        ctx.output.json(&testimonials);
        return Ok(());
    }

    ctx.output.header(&format!("Testimonials ({})", testimonials.len()));
    for testimonial in testimonials {
        ctx.output.info("");
        ctx.output.kv(&testimonial.author, &testimonial.stars());
        ctx.output.list_item(&testimonial.content);
    }

    Ok(())
}
