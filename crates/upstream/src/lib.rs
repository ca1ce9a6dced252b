pub mod error;
pub mod pricing;
pub mod quotes;

pub use error::UpstreamError;
pub use pricing::{resolve_rate_book, HttpRateProvider, RateProvider, StaticRateProvider};
pub use quotes::{HttpQuoteSink, LocalQuoteSink, QuoteSink};
