//! Completeness check that turns extracted fields into a lead.

use crate::conversation::model::{ExtractedFields, LeadRecord};
use crate::error::IncompleteFieldsError;

/// Build a [`LeadRecord`] if name, email and phone are all present.
///
/// Values are taken verbatim; the extractor's patterns are the only
/// format check.
pub fn validate(fields: &ExtractedFields) -> Result<LeadRecord, IncompleteFieldsError> {
    match (
        non_empty(&fields.name),
        non_empty(&fields.email),
        non_empty(&fields.phone),
    ) {
        (Some(name), Some(email), Some(phone)) => Ok(LeadRecord::from_parts(
            name.to_string(),
            email.to_string(),
            phone.to_string(),
        )),
        _ => Err(IncompleteFieldsError {
            missing: fields.missing(),
        }),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
