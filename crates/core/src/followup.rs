use crate::domain::request::{QuoteCategory, QuoteRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingField {
    Category,
    Material,
    SquareFootage,
    CabinetFootage,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NextStep {
    Ask { field: MissingField, prompt: String },
    Complete,
}

pub fn prompt_for(field: MissingField) -> String {
    match field {
        MissingField::Category => {
            "Are you looking for countertops, cabinets, or both?".to_string()
        }
        MissingField::Material => {
            "What countertop material would you like? We carry granite, quartzite, quartz, \
             marble, soapstone, butcher block, and laminate."
                .to_string()
        }
        MissingField::SquareFootage => {
            "About how many square feet of countertop do you need?".to_string()
        }
        MissingField::CabinetFootage => {
            "How many linear feet of base and wall cabinets are you planning?".to_string()
        }
    }
}

fn ask(field: MissingField) -> NextStep {
    NextStep::Ask { field, prompt: prompt_for(field) }
}

/// Determine the next question to ask, or report completion. Conditions are
/// checked top to bottom and the first unmet one wins; for combo requests
/// the question order is fixed (square footage, material, cabinet footage)
/// regardless of what the customer mentioned first.
pub fn next_step(request: &QuoteRequest) -> NextStep {
    let Some(category) = request.category else {
        return ask(MissingField::Category);
    };

    match category {
        QuoteCategory::Countertop => {
            if request.material.is_none() {
                return ask(MissingField::Material);
            }
            if request.sqft.is_none() {
                return ask(MissingField::SquareFootage);
            }
        }
        QuoteCategory::Cabinet => {
            if request.base_lf.is_none() && request.wall_lf.is_none() {
                return ask(MissingField::CabinetFootage);
            }
        }
        QuoteCategory::Combo => {
            if request.sqft.is_none() {
                return ask(MissingField::SquareFootage);
            }
            if request.material.is_none() {
                return ask(MissingField::Material);
            }
            if request.base_lf.is_none() && request.wall_lf.is_none() {
                return ask(MissingField::CabinetFootage);
            }
        }
    }

    NextStep::Complete
}

pub fn is_complete(request: &QuoteRequest) -> bool {
    matches!(next_step(request), NextStep::Complete)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{is_complete, next_step, MissingField, NextStep};
    use crate::domain::request::{QuoteCategory, QuoteRequest};

    fn asked(request: &QuoteRequest) -> Option<MissingField> {
        match next_step(request) {
            NextStep::Ask { field, .. } => Some(field),
            NextStep::Complete => None,
        }
    }

    #[test]
    fn empty_request_asks_for_category_first() {
        assert_eq!(asked(&QuoteRequest::default()), Some(MissingField::Category));
    }

    #[test]
    fn countertop_asks_material_before_square_footage() {
        let mut request = QuoteRequest {
            category: Some(QuoteCategory::Countertop),
            sqft: Some(Decimal::from(45)),
            ..QuoteRequest::default()
        };
        assert_eq!(asked(&request), Some(MissingField::Material));

        request.material = Some("granite".to_string());
        request.sqft = None;
        assert_eq!(asked(&request), Some(MissingField::SquareFootage));
    }

    #[test]
    fn cabinet_completes_with_either_run() {
        let base_only = QuoteRequest {
            category: Some(QuoteCategory::Cabinet),
            base_lf: Some(Decimal::from(10)),
            ..QuoteRequest::default()
        };
        assert!(is_complete(&base_only));

        let wall_only = QuoteRequest {
            category: Some(QuoteCategory::Cabinet),
            wall_lf: Some(Decimal::from(8)),
            ..QuoteRequest::default()
        };
        assert!(is_complete(&wall_only));
    }

    #[test]
    fn combo_question_order_is_fixed_regardless_of_what_was_supplied() {
        // Material arrived first; square footage is still asked next.
        let request = QuoteRequest {
            category: Some(QuoteCategory::Combo),
            material: Some("granite".to_string()),
            ..QuoteRequest::default()
        };
        assert_eq!(asked(&request), Some(MissingField::SquareFootage));

        let request = QuoteRequest {
            category: Some(QuoteCategory::Combo),
            sqft: Some(Decimal::from(40)),
            ..QuoteRequest::default()
        };
        assert_eq!(asked(&request), Some(MissingField::Material));

        let request = QuoteRequest {
            category: Some(QuoteCategory::Combo),
            sqft: Some(Decimal::from(40)),
            material: Some("quartz".to_string()),
            ..QuoteRequest::default()
        };
        assert_eq!(asked(&request), Some(MissingField::CabinetFootage));
    }

    #[test]
    fn optional_fields_never_block_completion() {
        let request = QuoteRequest {
            category: Some(QuoteCategory::Countertop),
            material: Some("granite".to_string()),
            sqft: Some(Decimal::from(45)),
            ..QuoteRequest::default()
        };
        assert!(is_complete(&request));
    }

    #[test]
    fn completion_is_monotonic_under_optional_additions() {
        let mut request = QuoteRequest {
            category: Some(QuoteCategory::Combo),
            material: Some("granite".to_string()),
            sqft: Some(Decimal::from(45)),
            base_lf: Some(Decimal::from(10)),
            ..QuoteRequest::default()
        };
        assert!(is_complete(&request));

        request.edge_profile = Some("ogee".to_string());
        request.sink_cutouts = Some(2);
        request.backsplash_lf = Some(Decimal::from(12));
        request.tall_units = Some(1);
        request.drawer_stacks = Some(3);
        request.zipcode = Some("30301".to_string());
        assert!(is_complete(&request));
    }
}
