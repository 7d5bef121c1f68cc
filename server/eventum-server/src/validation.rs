//! Payload validation helpers shared by the services.

use chrono::NaiveDate;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::ApiError;

/// Validate a request payload, flattening field errors into a single
/// 400 message.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload.validate().map_err(|errors| {
        let mut messages = Vec::new();
        collect_messages(&errors, &mut messages);
        messages.sort();
        messages.dedup();
        ApiError::validation(messages.join("; "))
    })
}

fn collect_messages(errors: &ValidationErrors, messages: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    match &error.message {
                        Some(message) => messages.push(message.to_string()),
                        None => messages.push(format!("Invalid value for '{field}'")),
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, messages),
            ValidationErrorsKind::List(list) => {
                for nested in list.values() {
                    collect_messages(nested, messages);
                }
            }
        }
    }
}

/// Enforce the `YYYY-MM-DD` shape of the event date filter. The normalized
/// date is used as a prefix match against the stored date string.
pub fn parse_date_filter(value: &str) -> Result<String, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| ApiError::validation("Invalid date format. Use YYYY-MM-DD."))
}
