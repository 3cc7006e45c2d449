//! Outcome values produced by validation, lookup and business rules.
//!
//! Expected divergence is modeled as data instead of errors:
//!
//! - [`ValidationOutcome`]: the request payload is (in)valid
//! - [`LookupOutcome`]: the user exists or not
//! - [`BusinessOutcome`]: a domain rule accepted or rejected the command
//!
//! Handlers collapse the nested combination into [`EditOutcome`] or
//! [`CreateOutcome`] before handing it to the router in [`crate::respond`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{UserId, UserInfo};

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationReason {
    Required,
    TooShort,
    TooLong,
    InvalidFormat,
}

/// First failing field of a request payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    #[schema(example = "name")]
    pub field: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}

/// Domain rule that refused a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RuleReason {
    /// The account is locked and the change does not unlock it
    Locked,
    /// The email belongs to another user
    EmailTaken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RuleViolation {
    pub reason: RuleReason,
}

impl RuleViolation {
    pub fn locked() -> Self {
        Self {
            reason: RuleReason::Locked,
        }
    }

    pub fn email_taken() -> Self {
        Self {
            reason: RuleReason::EmailTaken,
        }
    }
}

/// Body of a 400: either the invalid field or the violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum RejectionDetail {
    Invalid(ValidationError),
    Rule(RuleViolation),
}

impl From<ValidationError> for RejectionDetail {
    fn from(invalid: ValidationError) -> Self {
        RejectionDetail::Invalid(invalid)
    }
}

impl From<RuleViolation> for RejectionDetail {
    fn from(violation: RuleViolation) -> Self {
        RejectionDetail::Rule(violation)
    }
}

pub type ValidationOutcome<T> = Result<T, ValidationError>;
pub type LookupOutcome<T> = Option<T>;
pub type BusinessOutcome<T> = Result<T, RuleViolation>;

/// `ValidationOutcome<LookupOutcome<BusinessOutcome<UserInfo>>>` as one level.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    InvalidInput(ValidationError),
    NotFound,
    Rejected(RuleViolation),
    Accepted(UserInfo),
}

impl From<ValidationOutcome<LookupOutcome<BusinessOutcome<UserInfo>>>> for EditOutcome {
    fn from(nested: ValidationOutcome<LookupOutcome<BusinessOutcome<UserInfo>>>) -> Self {
        match nested {
            Err(invalid) => EditOutcome::InvalidInput(invalid),
            Ok(None) => EditOutcome::NotFound,
            Ok(Some(Err(violation))) => EditOutcome::Rejected(violation),
            Ok(Some(Ok(info))) => EditOutcome::Accepted(info),
        }
    }
}

/// `ValidationOutcome<BusinessOutcome<UserId>>` as one level.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    InvalidInput(ValidationError),
    Rejected(RuleViolation),
    Created(UserId),
}

impl From<ValidationOutcome<BusinessOutcome<UserId>>> for CreateOutcome {
    fn from(nested: ValidationOutcome<BusinessOutcome<UserId>>) -> Self {
        match nested {
            Err(invalid) => CreateOutcome::InvalidInput(invalid),
            Ok(Err(violation)) => CreateOutcome::Rejected(violation),
            Ok(Ok(id)) => CreateOutcome::Created(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserStatus;
    use chrono::Utc;
    use serde_json::json;

    fn info() -> UserInfo {
        UserInfo {
            id: UserId::from("x1"),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            status: UserStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_edit_outcome_collapses_every_branch() {
        let invalid = ValidationError::new("name", ValidationReason::TooShort);

        assert_eq!(
            EditOutcome::from(Err(invalid.clone())),
            EditOutcome::InvalidInput(invalid)
        );
        assert_eq!(EditOutcome::from(Ok(None)), EditOutcome::NotFound);
        assert_eq!(
            EditOutcome::from(Ok(Some(Err(RuleViolation::locked())))),
            EditOutcome::Rejected(RuleViolation::locked())
        );
        let accepted = info();
        assert_eq!(
            EditOutcome::from(Ok(Some(Ok(accepted.clone())))),
            EditOutcome::Accepted(accepted)
        );
    }

    #[test]
    fn test_create_outcome_collapses_every_branch() {
        let invalid = ValidationError::new("email", ValidationReason::Required);

        assert_eq!(
            CreateOutcome::from(Err(invalid.clone())),
            CreateOutcome::InvalidInput(invalid)
        );
        assert_eq!(
            CreateOutcome::from(Ok(Err(RuleViolation::email_taken()))),
            CreateOutcome::Rejected(RuleViolation::email_taken())
        );
        assert_eq!(
            CreateOutcome::from(Ok(Ok(UserId::from("x1")))),
            CreateOutcome::Created(UserId::from("x1"))
        );
    }

    #[test]
    fn test_detail_wire_format() {
        assert_eq!(
            serde_json::to_value(ValidationError::new("name", ValidationReason::TooShort))
                .unwrap(),
            json!({"field": "name", "reason": "too_short"})
        );
        assert_eq!(
            serde_json::to_value(RuleViolation::email_taken()).unwrap(),
            json!({"reason": "email_taken"})
        );
    }
    #[test]
    fn test_rejection_detail_renders_inner_body() {
        let invalid = ValidationError::new("email", ValidationReason::Required);
        assert_eq!(
            serde_json::to_value(RejectionDetail::from(invalid.clone())).unwrap(),
            serde_json::to_value(invalid).unwrap()
        );
        assert_eq!(
            serde_json::to_value(RejectionDetail::from(RuleViolation::locked())).unwrap(),
            json!({"reason": "locked"})
        );
    }
}
