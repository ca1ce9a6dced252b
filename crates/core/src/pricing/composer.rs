use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::line_item::{LineCategory, LineItem};
use crate::domain::quote::{Quote, QuoteId};
use crate::domain::request::{QuoteCategory, QuoteRequest};
use crate::pricing::builders::{cabinet_line_items, countertop_line_items};
use crate::pricing::rates::{ComboRates, RateBook};

pub const ESTIMATE_VALIDITY_DAYS: i64 = 30;

const FALLBACK_ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const FALLBACK_ID_SUFFIX_LEN: usize = 4;

fn sales_tax_rate() -> Decimal {
    Decimal::new(85, 3)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Build the full line-item list for a request against resolved rates.
/// Combo requests concatenate countertop items then cabinet items and carry
/// the discount line at the end.
pub fn line_items_for(request: &QuoteRequest, rates: &RateBook) -> Vec<LineItem> {
    match request.category {
        Some(QuoteCategory::Cabinet) => cabinet_line_items(request, &rates.cabinet),
        Some(QuoteCategory::Combo) => {
            let mut items = countertop_line_items(request, &rates.countertop);
            items.extend(cabinet_line_items(request, &rates.cabinet));
            if let Some(discount) = combo_discount_item(&items, &rates.combo) {
                items.push(discount);
            }
            items
        }
        // An unset category prices as countertop-only; the follow-up
        // generator keeps unset categories from reaching this point.
        _ => countertop_line_items(request, &rates.countertop),
    }
}

/// The trailing negative discount line for a combo quote. Computed on the
/// subtotal before the discount itself is added.
pub fn combo_discount_item(items: &[LineItem], rates: &ComboRates) -> Option<LineItem> {
    if rates.combo_discount_pct <= Decimal::ZERO {
        return None;
    }

    let subtotal: Decimal = items.iter().map(|item| item.total).sum();
    if subtotal <= Decimal::ZERO {
        return None;
    }

    let discount = round_money(subtotal * rates.combo_discount_pct / Decimal::ONE_HUNDRED);
    Some(LineItem {
        label: format!("Combo Discount ({}%)", rates.combo_discount_pct),
        quantity: Decimal::ONE,
        unit_price: -discount,
        total: -discount,
        category: LineCategory::Discount,
    })
}

/// Finalize a quote locally and deterministically: subtotal is the literal
/// sum of line-item totals (discount included), tax is a fixed 8.5%, and
/// every money figure is rounded to two decimals.
pub fn compose_quote(
    category: QuoteCategory,
    line_items: Vec<LineItem>,
    now: DateTime<Utc>,
) -> Quote {
    let subtotal = round_money(line_items.iter().map(|item| item.total).sum());
    let tax = round_money(subtotal * sales_tax_rate());
    let total = round_money(subtotal + tax);

    let estimated_completion = match category {
        QuoteCategory::Combo => "4-6 weeks",
        QuoteCategory::Countertop | QuoteCategory::Cabinet => "2-3 weeks",
    };

    Quote {
        quote_id: QuoteId(generate_fallback_quote_id(now)),
        category,
        line_items,
        subtotal,
        tax,
        total,
        estimated_completion: estimated_completion.to_string(),
        created_at: now,
        valid_until: now + Duration::days(ESTIMATE_VALIDITY_DAYS),
    }
}

/// Locally generated quote ids are recognizable by their `UQ` prefix,
/// followed by a millisecond timestamp and a short random suffix.
pub fn generate_fallback_quote_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..FALLBACK_ID_SUFFIX_LEN)
        .map(|_| FALLBACK_ID_ALPHABET[rng.gen_range(0..FALLBACK_ID_ALPHABET.len())] as char)
        .collect();
    format!("UQ{}{suffix}", now.timestamp_millis())
}
