use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    Countertop,
    Cabinet,
    Discount,
}

/// One priced component of a quote. Immutable once built; `total` is always
/// `quantity * unit_price`, with flat fees carrying a quantity of one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub label: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub total: Decimal,
    pub category: LineCategory,
}

impl LineItem {
    pub fn priced(
        label: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
        category: LineCategory,
    ) -> Self {
        Self { label: label.into(), quantity, unit_price, total: quantity * unit_price, category }
    }

    pub fn flat(label: impl Into<String>, amount: Decimal, category: LineCategory) -> Self {
        Self {
            label: label.into(),
            quantity: Decimal::ONE,
            unit_price: amount,
            total: amount,
            category,
        }
    }
}
