use chrono::Utc;
use rust_decimal::Decimal;

use fabquote_core::pricing::rates::RateBook;
use fabquote_core::{compose_quote, line_items_for, QuoteCategory, QuoteRequest};

use crate::commands::CommandResult;

#[derive(Debug, Clone)]
pub struct EstimateArgs {
    pub category: String,
    pub sqft: Option<Decimal>,
    pub material: Option<String>,
    pub edge_profile: Option<String>,
    pub sink_cutouts: Option<u32>,
    pub backsplash_lf: Option<Decimal>,
    pub base_lf: Option<Decimal>,
    pub wall_lf: Option<Decimal>,
    pub tall_units: Option<u32>,
    pub drawer_stacks: Option<u32>,
}

pub fn run(args: EstimateArgs) -> CommandResult {
    let Some(category) = QuoteCategory::parse(&args.category) else {
        return CommandResult {
            exit_code: 2,
            output: format!(
                "unknown category `{}` (expected countertop|cabinet|combo)",
                args.category
            ),
        };
    };

    let request = QuoteRequest {
        category: Some(category),
        material: args.material.map(|m| m.to_ascii_lowercase()),
        sqft: args.sqft,
        edge_profile: args.edge_profile.map(|p| p.to_ascii_lowercase()),
        sink_cutouts: args.sink_cutouts,
        backsplash_lf: args.backsplash_lf,
        base_lf: args.base_lf,
        wall_lf: args.wall_lf,
        tall_units: args.tall_units,
        drawer_stacks: args.drawer_stacks,
        ..QuoteRequest::default()
    };

    if let Err(error) = request.validate() {
        return CommandResult { exit_code: 2, output: error.to_string() };
    }

    let items = line_items_for(&request, &RateBook::fallback());
    if items.is_empty() {
        return CommandResult {
            exit_code: 2,
            output: "nothing to price; supply at least one non-zero measurement".to_string(),
        };
    }

    let quote = compose_quote(category, items, Utc::now());

    let mut lines = vec![format!("offline estimate {} ({category})", quote.quote_id)];
    for item in &quote.line_items {
        lines.push(format!(
            "  {:<28} {:>6} x {:>8} = {:>10}",
            item.label,
            format!("{}", item.quantity),
            format!("${:.2}", item.unit_price),
            format!("${:.2}", item.total),
        ));
    }
    lines.push(format!("  {:<28} {:>30}", "subtotal", format!("${:.2}", quote.subtotal)));
    lines.push(format!("  {:<28} {:>30}", "tax (8.5%)", format!("${:.2}", quote.tax)));
    lines.push(format!("  {:<28} {:>30}", "total", format!("${:.2}", quote.total)));
    lines.push(format!("estimated completion: {}", quote.estimated_completion));

    CommandResult { exit_code: 0, output: lines.join("\n") }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{run, EstimateArgs};

    fn args(category: &str) -> EstimateArgs {
        EstimateArgs {
            category: category.to_string(),
            sqft: None,
            material: None,
            edge_profile: None,
            sink_cutouts: None,
            backsplash_lf: None,
            base_lf: None,
            wall_lf: None,
            tall_units: None,
            drawer_stacks: None,
        }
    }

    #[test]
    fn prices_the_published_countertop_example() {
        let result = run(EstimateArgs {
            sqft: Some(Decimal::from(45)),
            material: Some("granite".to_string()),
            edge_profile: Some("bullnose".to_string()),
            sink_cutouts: Some(1),
            backsplash_lf: Some(Decimal::from(12)),
            ..args("countertop")
        });

        assert_eq!(result.exit_code, 0);
        assert!(result.output.contains("$4775.00"));
        assert!(result.output.contains("$405.88"));
        assert!(result.output.contains("$5180.88"));
    }

    #[test]
    fn rejects_unknown_categories() {
        let result = run(args("kitchen"));
        assert_eq!(result.exit_code, 2);
        assert!(result.output.contains("unknown category"));
    }

    #[test]
    fn rejects_estimates_with_nothing_to_price() {
        let result = run(args("cabinet"));
        assert_eq!(result.exit_code, 2);
        assert!(result.output.contains("nothing to price"));
    }
}
