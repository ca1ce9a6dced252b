use fabquote_core::Quote;

/// Render a quote into the plain-text summary sent back over chat: id,
/// itemized breakdown, totals, completion estimate, and an optional detail
/// link when a portal base URL is configured.
pub fn quote_summary(quote: &Quote, view_base_url: Option<&str>) -> String {
    let mut lines = vec![format!("Here's your estimate (quote {}):", quote.quote_id)];

    for item in &quote.line_items {
        lines.push(format!("  - {}: ${:.2}", item.label, item.total));
    }

    lines.push(format!("Subtotal: ${:.2}", quote.subtotal));
    lines.push(format!("Tax: ${:.2}", quote.tax));
    lines.push(format!("Total: ${:.2}", quote.total));
    lines.push(format!("Estimated completion: {}", quote.estimated_completion));
    lines.push(format!("Valid until: {}", quote.valid_until.format("%B %e, %Y")));

    if let Some(base_url) = view_base_url {
        lines.push(format!(
            "View details: {}/{}",
            base_url.trim_end_matches('/'),
            quote.quote_id
        ));
    }

    lines.join("\n")
}
