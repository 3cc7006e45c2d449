//! Users Domain
//!
//! A REST resource for users whose handlers never throw for expected
//! divergence. Validation, lookup and business-rule results are values that
//! the outcome router in [`respond`] turns into HTTP responses.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, validation dispatch
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Respond   │  ← Outcome → status + body + links
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business rules (locked, email taken)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, LinkBuilder, UserService, handlers};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let links = LinkBuilder::new("http://localhost:8080/api/users");
//!
//! let router = handlers::router(service, links);
//! ```

pub mod error;
pub mod handlers;
pub mod links;
pub mod models;
pub mod outcome;
pub mod pagination;
pub mod repository;
pub mod respond;
pub mod service;
pub mod user_validator;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use links::{Link, LinkBuilder, Rel, UserResource};
pub use models::{
    CreateUserRequest, EditUserRequest, NewUser, User, UserChanges, UserId, UserInfo, UserStatus,
};
pub use outcome::{CreateOutcome, EditOutcome, RejectionDetail, RuleViolation, ValidationError};
pub use pagination::{Page, PageMeta, PageRequest};
pub use repository::{InMemoryUserRepository, UserEdit, UserRepository};
pub use respond::{CreatedResponse, UserPageResponse};
pub use service::UserService;
pub use user_validator::{LogicPayload, UserLogicValidator};
