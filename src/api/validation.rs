use validator::Validate;

use super::errors::TodoApiError;

/// Checks decoded request bodies and query strings.
///
/// Constructed once at startup and handed to handlers through `web::Data`.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator;

impl RequestValidator {
    pub fn new() -> Self {
        RequestValidator
    }

    /// Fails with the message of the first broken rule
    pub fn validate<T: Validate>(&self, value: &T) -> Result<(), TodoApiError> {
        value.validate().map_err(TodoApiError::from)
    }
}
