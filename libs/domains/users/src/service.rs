use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{NewUser, User, UserChanges, UserId, UserInfo};
use crate::outcome::{BusinessOutcome, LookupOutcome, RuleViolation};
use crate::pagination::{Page, PageRequest};
use crate::repository::{UserEdit, UserRepository};

/// Application service for users.
///
/// Expected divergence (missing user, rule violation) comes back as an
/// outcome value; `Err` is reserved for infrastructure failures.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new active user. The email must not belong to another user.
    pub async fn create(&self, new_user: NewUser) -> UserResult<BusinessOutcome<UserId>> {
        let outcome = self.repository.insert(User::new(new_user)).await?;

        match &outcome {
            Ok(created) => tracing::info!(user_id = %created.id, "Created user"),
            Err(violation) => tracing::info!(reason = ?violation.reason, "Create rejected"),
        }
        Ok(outcome.map(|created| created.id))
    }

    /// Get a user by ID
    pub async fn get_info(&self, id: &UserId) -> UserResult<LookupOutcome<UserInfo>> {
        Ok(self.repository.find(id).await?.map(UserInfo::from))
    }

    /// Apply changes to an existing user.
    ///
    /// A locked user only accepts a change that sets the status back to
    /// active. The email must not belong to another user. Both rules are
    /// checked against the stored user in the same write that applies the
    /// change.
    pub async fn edit(
        &self,
        id: &UserId,
        changes: UserChanges,
    ) -> UserResult<LookupOutcome<BusinessOutcome<UserInfo>>> {
        let edit: UserEdit = Box::new(move |user: &mut User| {
            if user.is_locked() && !changes.unlocks() {
                return Err(RuleViolation::locked());
            }
            user.apply_changes(changes);
            Ok(())
        });

        let outcome = self.repository.update_with(id, edit).await?;

        match &outcome {
            Some(Ok(_)) => tracing::info!(user_id = %id, "Updated user"),
            Some(Err(violation)) => {
                tracing::info!(user_id = %id, reason = ?violation.reason, "Edit rejected")
            }
            None => tracing::debug!(user_id = %id, "Edit of unknown user"),
        }
        Ok(outcome.map(|result| result.map(UserInfo::from)))
    }

    /// Delete a user. Deleting a missing user is not an error.
    pub async fn delete(&self, id: &UserId) -> UserResult<()> {
        if self.repository.remove(id).await? {
            tracing::info!(user_id = %id, "Deleted user");
        } else {
            tracing::debug!(user_id = %id, "Delete of unknown user ignored");
        }
        Ok(())
    }

    /// List users, newest first
    pub async fn list(&self, request: PageRequest) -> UserResult<Page<UserInfo>> {
        let total = self.repository.count().await?;
        let users = self
            .repository
            .page(request.offset(), request.limit())
            .await?;

        Ok(Page::new(users, total).map(UserInfo::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::models::UserStatus;
    use crate::outcome::RuleReason;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use mockall::predicate::eq;

    fn stored(id: &str, email: &str, status: UserStatus) -> User {
        let mut user = User::new(NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
        });
        user.id = UserId::from(id);
        user.status = status;
        user
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: email.to_string(),
        }
    }

    /// Repository whose single stored user is `user`
    fn repo_holding(user: User) -> MockUserRepository {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update_with().returning(move |_, edit| {
            let mut user = user.clone();
            Ok(Some(edit(&mut user).map(|_| user)))
        });
        mock_repo
    }

    #[tokio::test]
    async fn test_create_stores_new_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .withf(|user| user.email == "ada@example.com" && user.status == UserStatus::Active)
            .times(1)
            .returning(|user| Ok(Ok(user)));

        let service = UserService::new(mock_repo);
        let outcome = service.create(new_user("ada@example.com")).await.unwrap();

        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_create_passes_on_taken_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_insert()
            .returning(|_| Ok(Err(RuleViolation::email_taken())));

        let service = UserService::new(mock_repo);
        let outcome = service.create(new_user("ADA@example.com")).await.unwrap();

        assert_eq!(outcome, Err(RuleViolation::email_taken()));
    }

    #[tokio::test]
    async fn test_get_info_missing() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find()
            .with(eq(UserId::from("x1")))
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        assert!(service.get_info(&UserId::from("x1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_edit_missing_user_is_not_found() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_update_with().returning(|_, _| Ok(None));

        let service = UserService::new(mock_repo);
        let outcome = service
            .edit(&UserId::from("x1"), UserChanges::default())
            .await
            .unwrap();

        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn test_edit_locked_user_is_rejected() {
        let mock_repo = repo_holding(stored("x1", "ada@example.com", UserStatus::Locked));

        let service = UserService::new(mock_repo);
        let outcome = service
            .edit(
                &UserId::from("x1"),
                UserChanges {
                    name: Some("Grace".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(outcome, Some(Err(RuleViolation::locked())));
    }

    #[tokio::test]
    async fn test_edit_can_unlock_locked_user() {
        let mock_repo = repo_holding(stored("x1", "ada@example.com", UserStatus::Locked));

        let service = UserService::new(mock_repo);
        let outcome = service
            .edit(
                &UserId::from("x1"),
                UserChanges {
                    status: Some(UserStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let info = outcome.unwrap().unwrap();
        assert_eq!(info.status, UserStatus::Active);
    }

    #[tokio::test]
    async fn test_edit_applies_changes() {
        let mock_repo = repo_holding(stored("x1", "ada@example.com", UserStatus::Active));

        let service = UserService::new(mock_repo);
        let outcome = service
            .edit(
                &UserId::from("x1"),
                UserChanges {
                    name: Some("Ada King".to_string()),
                    email: Some("ADA@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let info = outcome.unwrap().unwrap();
        assert_eq!(info.name, "Ada King");
        assert_eq!(info.email, "ADA@example.com");
    }

    #[tokio::test]
    async fn test_edit_passes_on_taken_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_update_with()
            .returning(|_, _| Ok(Some(Err(RuleViolation::email_taken()))));

        let service = UserService::new(mock_repo);
        let outcome = service
            .edit(
                &UserId::from("x1"),
                UserChanges {
                    email: Some("grace@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let violation = outcome.unwrap().unwrap_err();
        assert_eq!(violation.reason, RuleReason::EmailTaken);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_edits_never_undo_a_lock() {
        for _ in 0..20 {
            let service = UserService::new(InMemoryUserRepository::new());
            let id = service
                .create(new_user("ada@example.com"))
                .await
                .unwrap()
                .unwrap();

            let renames: Vec<_> = (0..8)
                .map(|i| {
                    let service = service.clone();
                    let id = id.clone();
                    tokio::spawn(async move {
                        let changes = UserChanges {
                            name: Some(format!("Ada {i}")),
                            ..Default::default()
                        };
                        service.edit(&id, changes).await.unwrap()
                    })
                })
                .collect();

            let lock = UserChanges {
                status: Some(UserStatus::Locked),
                ..Default::default()
            };
            let locked = service.edit(&id, lock).await.unwrap();
            assert!(matches!(locked, Some(Ok(_))));

            for rename in renames {
                match rename.await.unwrap() {
                    Some(Ok(_)) | Some(Err(RuleViolation { reason: RuleReason::Locked })) => {}
                    other => panic!("unexpected edit outcome: {other:?}"),
                }
            }

            let info = service.get_info(&id).await.unwrap().unwrap();
            assert_eq!(info.status, UserStatus::Locked);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_accept_one_email_once() {
        let service = UserService::new(InMemoryUserRepository::new());

        let creates: Vec<_> = (0..16)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move {
                    service.create(new_user("ada@example.com")).await.unwrap()
                })
            })
            .collect();

        let mut created = 0;
        for create in creates {
            if create.await.unwrap().is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        let page = service.list(PageRequest::default()).await.unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_remove().times(2).returning(|_| Ok(false));

        let service = UserService::new(mock_repo);
        service.delete(&UserId::from("x1")).await.unwrap();
        service.delete(&UserId::from("x1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_uses_page_window() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_count().returning(|| Ok(45));
        mock_repo
            .expect_page()
            .with(eq(20), eq(10))
            .returning(|_, _| Ok(vec![stored("x1", "ada@example.com", UserStatus::Active)]));

        let service = UserService::new(mock_repo);
        let page = service.list(PageRequest::new(2, 10)).await.unwrap();

        assert_eq!(page.total, 45);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_repository_failure_propagates() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_count()
            .returning(|| Err(UserError::Repository("unavailable".to_string())));

        let service = UserService::new(mock_repo);
        let result = service.list(PageRequest::default()).await;

        assert!(matches!(result, Err(UserError::Repository(_))));
    }
}
