use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteCategory {
    Countertop,
    Cabinet,
    Combo,
}

impl QuoteCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "countertop" => Some(Self::Countertop),
            "cabinet" => Some(Self::Cabinet),
            "combo" => Some(Self::Combo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Countertop => "countertop",
            Self::Cabinet => "cabinet",
            Self::Combo => "combo",
        }
    }
}

impl std::fmt::Display for QuoteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A progressively-filled picture of a customer's project. Every field is
/// optional until the customer supplies it: `None` means "not yet asked",
/// which is distinct from an explicit zero ("customer said none").
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub category: Option<QuoteCategory>,
    pub material: Option<String>,
    pub sqft: Option<Decimal>,
    pub edge_profile: Option<String>,
    pub sink_cutouts: Option<u32>,
    pub backsplash_lf: Option<Decimal>,
    pub base_lf: Option<Decimal>,
    pub wall_lf: Option<Decimal>,
    pub tall_units: Option<u32>,
    pub drawer_stacks: Option<u32>,
    pub zipcode: Option<String>,
    pub session_id: Option<String>,
    pub website_id: Option<String>,
}

impl QuoteRequest {
    /// Fold newly extracted fields into this request. A populated field in
    /// `newer` wins; an absent field never erases data already collected.
    pub fn merge(&mut self, newer: QuoteRequest) {
        if newer.category.is_some() {
            self.category = newer.category;
        }
        if newer.material.is_some() {
            self.material = newer.material;
        }
        if newer.sqft.is_some() {
            self.sqft = newer.sqft;
        }
        if newer.edge_profile.is_some() {
            self.edge_profile = newer.edge_profile;
        }
        if newer.sink_cutouts.is_some() {
            self.sink_cutouts = newer.sink_cutouts;
        }
        if newer.backsplash_lf.is_some() {
            self.backsplash_lf = newer.backsplash_lf;
        }
        if newer.base_lf.is_some() {
            self.base_lf = newer.base_lf;
        }
        if newer.wall_lf.is_some() {
            self.wall_lf = newer.wall_lf;
        }
        if newer.tall_units.is_some() {
            self.tall_units = newer.tall_units;
        }
        if newer.drawer_stacks.is_some() {
            self.drawer_stacks = newer.drawer_stacks;
        }
        if newer.zipcode.is_some() {
            self.zipcode = newer.zipcode;
        }
        if newer.session_id.is_some() {
            self.session_id = newer.session_id;
        }
        if newer.website_id.is_some() {
            self.website_id = newer.website_id;
        }
    }

    /// Boundary validation: supplied measurements must be non-negative.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("sqft", self.sqft),
            ("backsplashLf", self.backsplash_lf),
            ("baseLf", self.base_lf),
            ("wallLf", self.wall_lf),
        ] {
            if let Some(value) = value {
                if value < Decimal::ZERO {
                    return Err(DomainError::NegativeQuantity { field });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{QuoteCategory, QuoteRequest};
    use crate::errors::DomainError;

    #[test]
    fn merge_fills_absent_fields_only() {
        let mut request = QuoteRequest {
            category: Some(QuoteCategory::Countertop),
            material: Some("granite".to_string()),
            ..QuoteRequest::default()
        };

        request.merge(QuoteRequest {
            sqft: Some(Decimal::from(45)),
            ..QuoteRequest::default()
        });

        assert_eq!(request.category, Some(QuoteCategory::Countertop));
        assert_eq!(request.material.as_deref(), Some("granite"));
        assert_eq!(request.sqft, Some(Decimal::from(45)));
    }

    #[test]
    fn merge_never_erases_with_emptier_data() {
        let mut request = QuoteRequest {
            material: Some("quartz".to_string()),
            sqft: Some(Decimal::from(30)),
            ..QuoteRequest::default()
        };

        request.merge(QuoteRequest::default());

        assert_eq!(request.material.as_deref(), Some("quartz"));
        assert_eq!(request.sqft, Some(Decimal::from(30)));
    }

    #[test]
    fn newer_values_replace_older_ones() {
        let mut request =
            QuoteRequest { sqft: Some(Decimal::from(30)), ..QuoteRequest::default() };

        request.merge(QuoteRequest {
            sqft: Some(Decimal::from(50)),
            ..QuoteRequest::default()
        });

        assert_eq!(request.sqft, Some(Decimal::from(50)));
    }

    #[test]
    fn explicit_zero_is_preserved_as_supplied() {
        let mut request = QuoteRequest::default();
        request.merge(QuoteRequest { sink_cutouts: Some(0), ..QuoteRequest::default() });

        assert_eq!(request.sink_cutouts, Some(0));
    }

    #[test]
    fn validate_rejects_negative_measurements() {
        let request =
            QuoteRequest { sqft: Some(Decimal::from(-5)), ..QuoteRequest::default() };

        let error = request.validate().expect_err("negative sqft should be rejected");
        assert!(matches!(error, DomainError::NegativeQuantity { field: "sqft" }));
    }

    #[test]
    fn category_parses_wire_literals_only() {
        assert_eq!(QuoteCategory::parse("countertop"), Some(QuoteCategory::Countertop));
        assert_eq!(QuoteCategory::parse(" Combo "), Some(QuoteCategory::Combo));
        assert_eq!(QuoteCategory::parse("kitchen"), None);
    }
}
