use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown quote category `{0}` (expected countertop|cabinet|combo)")]
    InvalidCategory(String),
    #[error("field `{field}` must not be negative")]
    NegativeQuantity { field: &'static str },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Boundary-facing errors. Upstream pricing and persistence failures never
/// reach this layer; they degrade to fallbacks before a response is built.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("unauthorized: {message}")]
    Unauthorized { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn bad_request(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn unauthorized(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::Unauthorized { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn internal(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), correlation_id: correlation_id.into() }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::BadRequest { message, .. } => message.clone(),
            Self::Unauthorized { .. } => "A valid bearer token is required.".to_string(),
            Self::Internal { .. } => "An unexpected internal error occurred.".to_string(),
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. }
            | Self::Unauthorized { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl DomainError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        InterfaceError::bad_request(self.to_string(), correlation_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainError, InterfaceError};

    #[test]
    fn domain_error_maps_to_bad_request_with_correlation_id() {
        let interface =
            DomainError::NegativeQuantity { field: "sqft" }.into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest { ref correlation_id, .. } if correlation_id == "req-1"
        ));
        assert!(interface.user_message().contains("sqft"));
    }

    #[test]
    fn unauthorized_hides_detail_from_user_message() {
        let interface = InterfaceError::unauthorized("token mismatch", "req-2");

        assert_eq!(interface.user_message(), "A valid bearer token is required.");
        assert_eq!(interface.correlation_id(), "req-2");
    }

    #[test]
    fn invalid_category_message_names_accepted_literals() {
        let error = DomainError::InvalidCategory("kitchen".to_string());
        assert!(error.to_string().contains("countertop|cabinet|combo"));
    }
}
