//! Form state and local validation.
//!
//! Validation runs before any request is issued; a failure becomes
//! `ApiError::Validation` and never reaches the network.

use crate::api::error::INVALID_EVENT_ID_MESSAGE;
use crate::api::ApiError;
use crate::models::{NewEvent, Registration};
use crate::utils::parse_timestamp;

pub const REQUIRED_FIELDS_MESSAGE: &str = "All fields are required.";
pub const INVALID_CAPACITY_MESSAGE: &str = "Max capacity must be a number.";

/// Parse a user-typed event id.
///
/// Surrounding whitespace is ignored; anything that is not a plain integer
/// is rejected with the fixed validation message.
pub fn parse_event_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::Validation(INVALID_EVENT_ID_MESSAGE.to_string()))
}

fn require(value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ApiError::Validation(REQUIRED_FIELDS_MESSAGE.to_string()))
    } else {
        Ok(value.to_string())
    }
}

fn require_timestamp(value: &str, label: &str) -> Result<String, ApiError> {
    let value = require(value)?;
    if parse_timestamp(&value).is_none() {
        return Err(ApiError::Validation(format!(
            "{} must be a date/time like 2025-06-01T18:30.",
            label
        )));
    }
    Ok(value)
}

/// Fields of the create-event form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateEventForm {
    pub name: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub max_capacity: String,
}

impl CreateEventForm {
    pub fn validate(&self) -> Result<NewEvent, ApiError> {
        let name = require(&self.name)?;
        let location = require(&self.location)?;
        let start_time = require_timestamp(&self.start_time, "Start time")?;
        let end_time = require_timestamp(&self.end_time, "End time")?;
        let max_capacity = require(&self.max_capacity)?
            .parse::<i64>()
            .ok()
            .filter(|c| *c >= 0)
            .ok_or_else(|| ApiError::Validation(INVALID_CAPACITY_MESSAGE.to_string()))?;

        Ok(NewEvent {
            name,
            location,
            start_time,
            end_time,
            max_capacity,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Fields of the register-attendee form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub event_id: String,
    pub name: String,
    pub email: String,
}

impl RegistrationForm {
    /// Event id is checked first so a bad id is reported even when other
    /// fields are empty.
    pub fn validate(&self) -> Result<(i64, Registration), ApiError> {
        let event_id = parse_event_id(&self.event_id)?;
        let registration = Registration {
            name: require(&self.name)?,
            email: require(&self.email)?,
        };
        Ok((event_id, registration))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<impl std::fmt::Debug, ApiError>) -> String {
        result.unwrap_err().user_message()
    }

    #[test]
    fn test_parse_event_id() {
        assert_eq!(parse_event_id("12"), Ok(12));
        assert_eq!(parse_event_id(" 12 "), Ok(12));
        assert_eq!(parse_event_id("-4"), Ok(-4));
        assert_eq!(message(parse_event_id("abc")), INVALID_EVENT_ID_MESSAGE);
        assert_eq!(message(parse_event_id("")), INVALID_EVENT_ID_MESSAGE);
        assert_eq!(message(parse_event_id("99999999999999999999")), INVALID_EVENT_ID_MESSAGE);
    }

    fn filled_event_form() -> CreateEventForm {
        CreateEventForm {
            name: " Rust Meetup ".to_string(),
            location: "Hall B".to_string(),
            start_time: "2025-06-01T18:30".to_string(),
            end_time: "2025-06-01T21:00".to_string(),
            max_capacity: "120".to_string(),
        }
    }

    #[test]
    fn test_create_event_form_valid() {
        let event = filled_event_form().validate().expect("valid form");
        assert_eq!(event.name, "Rust Meetup");
        assert_eq!(event.max_capacity, 120);
        assert_eq!(event.start_time, "2025-06-01T18:30");
    }

    #[test]
    fn test_create_event_form_required_fields() {
        let mut form = filled_event_form();
        form.location = "  ".to_string();
        assert_eq!(message(form.validate()), REQUIRED_FIELDS_MESSAGE);

        assert_eq!(message(CreateEventForm::default().validate()), REQUIRED_FIELDS_MESSAGE);
    }

    #[test]
    fn test_create_event_form_capacity_must_be_number() {
        let mut form = filled_event_form();
        form.max_capacity = "lots".to_string();
        assert_eq!(message(form.validate()), INVALID_CAPACITY_MESSAGE);

        form.max_capacity = "-5".to_string();
        assert_eq!(message(form.validate()), INVALID_CAPACITY_MESSAGE);
    }

    #[test]
    fn test_create_event_form_timestamps() {
        let mut form = filled_event_form();
        form.end_time = "later".to_string();
        assert_eq!(
            message(form.validate()),
            "End time must be a date/time like 2025-06-01T18:30."
        );
    }

    #[test]
    fn test_registration_form() {
        let mut form = RegistrationForm {
            event_id: "12".to_string(),
            name: "Ann".to_string(),
            email: "a@x.com".to_string(),
        };
        let (event_id, registration) = form.validate().expect("valid");
        assert_eq!(event_id, 12);
        assert_eq!(registration.name, "Ann");

        form.event_id = "abc".to_string();
        assert_eq!(message(form.validate()), INVALID_EVENT_ID_MESSAGE);

        form.reset();
        assert_eq!(form, RegistrationForm::default());
    }

    #[test]
    fn test_registration_form_bad_id_reported_first() {
        let form = RegistrationForm {
            event_id: "x".to_string(),
            ..Default::default()
        };
        assert_eq!(message(form.validate()), INVALID_EVENT_ID_MESSAGE);
    }
}
