use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserId};
use crate::outcome::{BusinessOutcome, RuleViolation};

/// Change applied to a stored user while the repository holds it exclusively.
///
/// Returning a violation leaves the stored user untouched.
pub type UserEdit = Box<dyn FnOnce(&mut User) -> BusinessOutcome<()> + Send>;

/// Repository trait for User persistence
///
/// Emails are unique across users, compared case-insensitively. Both write
/// methods enforce that as part of the write itself.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user, unless its email is already taken
    async fn insert(&self, user: User) -> UserResult<BusinessOutcome<User>>;

    /// Get a user by ID
    async fn find(&self, id: &UserId) -> UserResult<Option<User>>;

    /// Run `edit` against the stored user and keep the result.
    ///
    /// `None` if the user does not exist. The violation from `edit`, or
    /// `email_taken` when the edited email belongs to another user, leaves
    /// the store unchanged.
    async fn update_with(
        &self,
        id: &UserId,
        edit: UserEdit,
    ) -> UserResult<Option<BusinessOutcome<User>>>;

    /// Delete a user by ID. Returns whether it existed.
    async fn remove(&self, id: &UserId) -> UserResult<bool>;

    /// Users ordered newest first
    async fn page(&self, offset: usize, limit: usize) -> UserResult<Vec<User>>;

    /// Count total users (for pagination)
    async fn count(&self) -> UserResult<usize>;
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn email_in_use(users: &HashMap<UserId, User>, email: &str, except: Option<&UserId>) -> bool {
    let email = email.to_lowercase();
    users
        .values()
        .any(|u| Some(&u.id) != except && u.email.to_lowercase() == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: User) -> UserResult<BusinessOutcome<User>> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(UserError::Repository(format!(
                "user {} already exists",
                user.id
            )));
        }

        if email_in_use(&users, &user.email, None) {
            return Ok(Err(RuleViolation::email_taken()));
        }

        users.insert(user.id.clone(), user.clone());

        tracing::debug!(user_id = %user.id, "Stored user");
        Ok(Ok(user))
    }

    async fn find(&self, id: &UserId) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(id).cloned())
    }

    async fn update_with(
        &self,
        id: &UserId,
        edit: UserEdit,
    ) -> UserResult<Option<BusinessOutcome<User>>> {
        let mut users = self.users.write().await;

        let Some(mut user) = users.get(id).cloned() else {
            return Ok(None);
        };

        if let Err(violation) = edit(&mut user) {
            return Ok(Some(Err(violation)));
        }

        if email_in_use(&users, &user.email, Some(id)) {
            return Ok(Some(Err(RuleViolation::email_taken())));
        }

        users.insert(id.clone(), user.clone());

        tracing::debug!(user_id = %id, "Replaced user");
        Ok(Some(Ok(user)))
    }

    async fn remove(&self, id: &UserId) -> UserResult<bool> {
        let mut users = self.users.write().await;
        Ok(users.remove(id).is_some())
    }

    async fn page(&self, offset: usize, limit: usize) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<&User> = users.values().collect();

        // Newest first; ids break ties between users created in the same instant
        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(result
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self) -> UserResult<usize> {
        let users = self.users.read().await;
        Ok(users.len())
    }
}
