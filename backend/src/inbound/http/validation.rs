//! Shared validation helpers for inbound HTTP adapters.

use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, PlantValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidDate,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDate => "invalid_date",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| {
        field_error(
            field,
            format!("{} must be a valid UUID", field.as_str()),
            ErrorCode::InvalidUuid,
            value,
        )
    })
}

/// Parse a `YYYY-MM-DD` date, matching the administrative form's date inputs.
pub(crate) fn parse_optional_date(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<NaiveDate>, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                field_error(
                    field,
                    format!("{} must be a YYYY-MM-DD date", field.as_str()),
                    ErrorCode::InvalidDate,
                    &raw,
                )
            })
        })
        .transpose()
}

/// Map an entity validation failure to a `400` with field details.
pub(crate) fn map_plant_validation_error(error: PlantValidationError) -> Error {
    let field = match &error {
        PlantValidationError::EmptyField { field }
        | PlantValidationError::NegativeValue { field, .. } => (*field).to_owned(),
        PlantValidationError::Slug(_) => "slug".to_owned(),
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use serde_json::Value;

    const FIELD: FieldName = FieldName::new("acquiredAt");

    #[rstest]
    fn parses_valid_dates() {
        let parsed = parse_optional_date(Some("2024-06-01".into()), FIELD).expect("valid date");
        assert_eq!(
            parsed,
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid fixture date"))
        );
    }

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("  ".into()))]
    fn blank_dates_parse_to_none(#[case] raw: Option<String>) {
        assert_eq!(parse_optional_date(raw, FIELD).expect("blank is fine"), None);
    }

    #[rstest]
    fn invalid_dates_carry_field_details() {
        let error = parse_optional_date(Some("01/06/2024".into()), FIELD)
            .expect_err("invalid date should fail");
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("field").and_then(Value::as_str),
            Some("acquiredAt")
        );
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_date")
        );
    }

    #[rstest]
    fn invalid_uuids_carry_field_details() {
        let error =
            parse_uuid("not-a-uuid", FieldName::new("instanceId")).expect_err("should fail");
        let details = error.details().expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("invalid_uuid")
        );
    }
}
