//! Shared validation helpers for inbound HTTP adapters.

use actix_web::HttpRequest;
use actix_web::error::JsonPayloadError;
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, UserId, UserValidationError};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    MalformedBody,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            ValidationCode::MissingField => "missing_field",
            ValidationCode::MalformedBody => "malformed_body",
        }
    }
}

/// Map a profile validation failure onto the API error payload.
///
/// `details.fields` lists every missing field in validation order.
pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    let message = err.to_string();
    match err {
        UserValidationError::MissingFields(fields) => {
            Error::invalid_request(message).with_details(json!({
                "fields": fields,
                "code": ValidationCode::MissingField.as_str(),
            }))
        }
    }
}

/// Error handler for `web::JsonConfig`.
///
/// Unparsable bodies, wrong content types, and non-string field values are
/// reported the same way as missing fields.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected user payload");
    Error::invalid_request("request body must be a JSON object of string fields")
        .with_details(json!({
            "code": ValidationCode::MalformedBody.as_str(),
        }))
        .into()
}

/// Parse a `{id}` path segment.
///
/// Identifiers that are not integers cannot match a stored user, so they are
/// reported as not found.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<UserId>()
        .map_err(|_| Error::not_found(format!("user {raw} not found")))
}
