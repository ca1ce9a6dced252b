use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-square-foot and flat rates for countertop work. Live profiles from
/// the pricing service and the built-in fallback share this exact shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountertopRates {
    pub price_per_sqft: Decimal,
    pub edge_adder_lf: Decimal,
    pub sink_cutout_fee: Decimal,
    pub backsplash_per_lf: Decimal,
    pub labor_install_base: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinetRates {
    pub base_price_per_lf: Decimal,
    pub wall_price_per_lf: Decimal,
    pub tall_unit_price: Decimal,
    pub drawer_stack_adder: Decimal,
    pub crown_per_lf: Decimal,
    pub toe_kick_per_lf: Decimal,
    pub assembly_per_unit: Decimal,
    pub install_per_lf: Decimal,
    pub delivery_flat: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboRates {
    pub combo_discount_pct: Decimal,
}

impl CountertopRates {
    pub fn fallback() -> Self {
        Self {
            price_per_sqft: Decimal::from(65),
            edge_adder_lf: Decimal::from(12),
            sink_cutout_fee: Decimal::from(150),
            backsplash_per_lf: Decimal::from(45),
            labor_install_base: Decimal::from(800),
        }
    }

    pub fn merged(patch: CountertopRatesPatch) -> Self {
        let fallback = Self::fallback();
        Self {
            price_per_sqft: patch.price_per_sqft.unwrap_or(fallback.price_per_sqft),
            edge_adder_lf: patch.edge_adder_lf.unwrap_or(fallback.edge_adder_lf),
            sink_cutout_fee: patch.sink_cutout_fee.unwrap_or(fallback.sink_cutout_fee),
            backsplash_per_lf: patch.backsplash_per_lf.unwrap_or(fallback.backsplash_per_lf),
            labor_install_base: patch.labor_install_base.unwrap_or(fallback.labor_install_base),
        }
    }
}

impl CabinetRates {
    pub fn fallback() -> Self {
        Self {
            base_price_per_lf: Decimal::from(180),
            wall_price_per_lf: Decimal::from(160),
            tall_unit_price: Decimal::from(450),
            drawer_stack_adder: Decimal::from(120),
            crown_per_lf: Decimal::from(25),
            toe_kick_per_lf: Decimal::from(15),
            assembly_per_unit: Decimal::from(75),
            install_per_lf: Decimal::from(85),
            delivery_flat: Decimal::from(200),
        }
    }

    pub fn merged(patch: CabinetRatesPatch) -> Self {
        let fallback = Self::fallback();
        Self {
            base_price_per_lf: patch.base_price_per_lf.unwrap_or(fallback.base_price_per_lf),
            wall_price_per_lf: patch.wall_price_per_lf.unwrap_or(fallback.wall_price_per_lf),
            tall_unit_price: patch.tall_unit_price.unwrap_or(fallback.tall_unit_price),
            drawer_stack_adder: patch.drawer_stack_adder.unwrap_or(fallback.drawer_stack_adder),
            crown_per_lf: patch.crown_per_lf.unwrap_or(fallback.crown_per_lf),
            toe_kick_per_lf: patch.toe_kick_per_lf.unwrap_or(fallback.toe_kick_per_lf),
            assembly_per_unit: patch.assembly_per_unit.unwrap_or(fallback.assembly_per_unit),
            install_per_lf: patch.install_per_lf.unwrap_or(fallback.install_per_lf),
            delivery_flat: patch.delivery_flat.unwrap_or(fallback.delivery_flat),
        }
    }
}

impl ComboRates {
    pub fn fallback() -> Self {
        Self { combo_discount_pct: Decimal::from(10) }
    }

    pub fn merged(patch: ComboRatesPatch) -> Self {
        let fallback = Self::fallback();
        Self {
            combo_discount_pct: patch.combo_discount_pct.unwrap_or(fallback.combo_discount_pct),
        }
    }
}

/// Partial live profiles as the pricing service may return them: any
/// missing rate falls back to the built-in table so the merged profile
/// always has the full key set.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountertopRatesPatch {
    pub price_per_sqft: Option<Decimal>,
    pub edge_adder_lf: Option<Decimal>,
    pub sink_cutout_fee: Option<Decimal>,
    pub backsplash_per_lf: Option<Decimal>,
    pub labor_install_base: Option<Decimal>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinetRatesPatch {
    pub base_price_per_lf: Option<Decimal>,
    pub wall_price_per_lf: Option<Decimal>,
    pub tall_unit_price: Option<Decimal>,
    pub drawer_stack_adder: Option<Decimal>,
    pub crown_per_lf: Option<Decimal>,
    pub toe_kick_per_lf: Option<Decimal>,
    pub assembly_per_unit: Option<Decimal>,
    pub install_per_lf: Option<Decimal>,
    pub delivery_flat: Option<Decimal>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComboRatesPatch {
    pub combo_discount_pct: Option<Decimal>,
}

/// The three per-category profiles a pricing pass may need, resolved ahead
/// of line-item building so the builders stay free of I/O.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateBook {
    pub countertop: CountertopRates,
    pub cabinet: CabinetRates,
    pub combo: ComboRates,
}

impl RateBook {
    pub fn fallback() -> Self {
        Self {
            countertop: CountertopRates::fallback(),
            cabinet: CabinetRates::fallback(),
            combo: ComboRates::fallback(),
        }
    }
}
