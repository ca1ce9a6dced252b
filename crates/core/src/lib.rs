pub mod config;
pub mod domain;
pub mod errors;
pub mod extract;
pub mod followup;
pub mod pricing;

pub use domain::line_item::{LineCategory, LineItem};
pub use domain::quote::{Quote, QuoteId};
pub use domain::request::{QuoteCategory, QuoteRequest};
pub use errors::{DomainError, InterfaceError};
pub use extract::FieldExtractor;
pub use followup::{next_step, MissingField, NextStep};
pub use pricing::builders::{cabinet_line_items, countertop_line_items};
pub use pricing::composer::{compose_quote, line_items_for, ESTIMATE_VALIDITY_DAYS};
pub use pricing::rates::{CabinetRates, ComboRates, CountertopRates, RateBook};
