use validator::{Validate, ValidationErrors};

use crate::models::{CreateUserRequest, EditUserRequest, NewUser, UserChanges};
use crate::outcome::{ValidationError, ValidationOutcome, ValidationReason};

/// Request payload that [`UserLogicValidator`] can check.
///
/// Field rules come from the `validator` derive. Presence of required fields
/// is reported by [`missing_fields`](Self::missing_fields), because the
/// payloads keep every field optional on the wire.
pub trait LogicPayload: Validate {
    /// Command produced once the payload is valid
    type Valid;

    /// Fields in declared order. Ties between failures go to the earlier one.
    const FIELDS: &'static [&'static str];

    fn missing_fields(&self) -> Vec<&'static str> {
        Vec::new()
    }

    /// Converts a payload that passed every check into its command.
    fn into_valid(self) -> ValidationOutcome<Self::Valid>;
}

/// Shared validation entry point for user payloads.
pub struct UserLogicValidator;

impl UserLogicValidator {
    /// Validates a payload, reporting a single failing field.
    ///
    /// A broken field rule (length, format) is reported before a missing
    /// field. Within each kind the earliest declared field wins.
    pub fn validate<P: LogicPayload>(payload: P) -> ValidationOutcome<P::Valid> {
        let mut failures = match payload.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => field_failures(&errors),
        };
        failures.extend(
            payload
                .missing_fields()
                .into_iter()
                .map(|field| ValidationError::new(field, ValidationReason::Required)),
        );

        let first = failures.into_iter().min_by_key(|failure| {
            let required = failure.reason == ValidationReason::Required;
            let position = P::FIELDS
                .iter()
                .position(|field| *field == failure.field)
                .unwrap_or(P::FIELDS.len());
            (required, position)
        });

        match first {
            Some(first) => {
                tracing::debug!(field = %first.field, reason = ?first.reason, "Payload rejected");
                Err(first)
            }
            None => payload.into_valid(),
        }
    }
}

fn field_failures(errors: &ValidationErrors) -> Vec<ValidationError> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, field_errors)| {
            field_errors
                .first()
                .map(|error| ValidationError::new(field.to_string(), reason_for(error)))
        })
        .collect()
}

fn reason_for(error: &validator::ValidationError) -> ValidationReason {
    match error.code.as_ref() {
        "email" => ValidationReason::InvalidFormat,
        "length" => {
            let len = error
                .params
                .get("value")
                .and_then(|value| value.as_str())
                .map(|value| value.chars().count() as u64);
            let min = error.params.get("min").and_then(|min| min.as_u64());

            match (len, min) {
                (Some(len), Some(min)) if len < min => ValidationReason::TooShort,
                _ => ValidationReason::TooLong,
            }
        }
        _ => ValidationReason::InvalidFormat,
    }
}

impl LogicPayload for CreateUserRequest {
    type Valid = NewUser;

    const FIELDS: &'static [&'static str] = &["name", "email"];

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.email.is_none() {
            missing.push("email");
        }
        missing
    }

    fn into_valid(self) -> ValidationOutcome<NewUser> {
        match (self.name, self.email) {
            (Some(name), Some(email)) => Ok(NewUser { name, email }),
            (None, _) => Err(ValidationError::new("name", ValidationReason::Required)),
            (_, None) => Err(ValidationError::new("email", ValidationReason::Required)),
        }
    }
}

impl LogicPayload for EditUserRequest {
    type Valid = UserChanges;

    const FIELDS: &'static [&'static str] = &["name", "email", "status"];

    fn into_valid(self) -> ValidationOutcome<UserChanges> {
        Ok(UserChanges {
            name: self.name,
            email: self.email,
            status: self.status,
        })
    }
}
