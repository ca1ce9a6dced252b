use rust_decimal::Decimal;

use crate::domain::line_item::{LineCategory, LineItem};
use crate::domain::request::QuoteRequest;
use crate::pricing::rates::{CabinetRates, CountertopRates};

/// Price the countertop portion of a request. Pure: rates are already
/// resolved, missing numerics read as zero, and zero-quantity steps emit no
/// line item at all.
pub fn countertop_line_items(request: &QuoteRequest, rates: &CountertopRates) -> Vec<LineItem> {
    let mut items = Vec::new();
    let sqft = request.sqft.unwrap_or(Decimal::ZERO);

    if sqft > Decimal::ZERO {
        let label = match request.material.as_deref() {
            Some(material) => format!("{} Countertop", title_case(material)),
            None => "Countertop Material".to_string(),
        };
        items.push(LineItem::priced(label, sqft, rates.price_per_sqft, LineCategory::Countertop));
    }

    if sqft > Decimal::ZERO {
        if let Some(profile) = request.edge_profile.as_deref() {
            if profile != "straight" {
                // Perimeter approximation carried over from the original
                // calculator; not derived from actual slab geometry.
                let estimated_lf = (sqft / Decimal::new(15, 1)).ceil();
                items.push(LineItem::priced(
                    format!("{} Edge Profile", title_case(profile)),
                    estimated_lf,
                    rates.edge_adder_lf,
                    LineCategory::Countertop,
                ));
            }
        }
    }

    if let Some(cutouts) = request.sink_cutouts.filter(|count| *count > 0) {
        items.push(LineItem::priced(
            format!("Sink Cutout ({cutouts})"),
            Decimal::from(cutouts),
            rates.sink_cutout_fee,
            LineCategory::Countertop,
        ));
    }

    if let Some(backsplash_lf) = request.backsplash_lf.filter(|lf| *lf > Decimal::ZERO) {
        items.push(LineItem::priced(
            "Backsplash",
            backsplash_lf,
            rates.backsplash_per_lf,
            LineCategory::Countertop,
        ));
    }

    // Flat install labor applies only when there is a countertop to install.
    if sqft > Decimal::ZERO {
        items.push(LineItem::flat(
            "Fabrication & Installation",
            rates.labor_install_base,
            LineCategory::Countertop,
        ));
    }

    items
}

/// Price the cabinet portion of a request, in fixed order: base, wall, tall
/// units, drawer stacks, crown, toe kick, assembly, installation, delivery.
pub fn cabinet_line_items(request: &QuoteRequest, rates: &CabinetRates) -> Vec<LineItem> {
    let mut items = Vec::new();
    let base_lf = request.base_lf.unwrap_or(Decimal::ZERO);
    let wall_lf = request.wall_lf.unwrap_or(Decimal::ZERO);
    let tall_units = request.tall_units.unwrap_or(0);
    let drawer_stacks = request.drawer_stacks.unwrap_or(0);
    let run_lf = base_lf + wall_lf;

    if base_lf > Decimal::ZERO {
        items.push(LineItem::priced(
            "Base Cabinets",
            base_lf,
            rates.base_price_per_lf,
            LineCategory::Cabinet,
        ));
    }

    if wall_lf > Decimal::ZERO {
        items.push(LineItem::priced(
            "Wall Cabinets",
            wall_lf,
            rates.wall_price_per_lf,
            LineCategory::Cabinet,
        ));
    }

    if tall_units > 0 {
        items.push(LineItem::priced(
            format!("Tall Units ({tall_units})"),
            Decimal::from(tall_units),
            rates.tall_unit_price,
            LineCategory::Cabinet,
        ));
    }

    if drawer_stacks > 0 {
        items.push(LineItem::priced(
            format!("Drawer Stacks ({drawer_stacks})"),
            Decimal::from(drawer_stacks),
            rates.drawer_stack_adder,
            LineCategory::Cabinet,
        ));
    }

    if run_lf > Decimal::ZERO {
        items.push(LineItem::priced(
            "Crown Molding",
            run_lf,
            rates.crown_per_lf,
            LineCategory::Cabinet,
        ));
    }

    if base_lf > Decimal::ZERO {
        items.push(LineItem::priced(
            "Toe Kick",
            base_lf,
            rates.toe_kick_per_lf,
            LineCategory::Cabinet,
        ));
    }

    let assembled_units = tall_units + drawer_stacks;
    if assembled_units > 0 {
        items.push(LineItem::priced(
            "Assembly",
            Decimal::from(assembled_units),
            rates.assembly_per_unit,
            LineCategory::Cabinet,
        ));
    }

    if run_lf > Decimal::ZERO {
        items.push(LineItem::priced(
            "Installation",
            run_lf,
            rates.install_per_lf,
            LineCategory::Cabinet,
        ));
    }

    if base_lf > Decimal::ZERO || wall_lf > Decimal::ZERO || tall_units > 0 {
        items.push(LineItem::flat("Delivery", rates.delivery_flat, LineCategory::Cabinet));
    }

    items
}

fn title_case(term: &str) -> String {
    term.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
