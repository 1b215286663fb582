use std::sync::Arc;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{UpdateUser, User, UserDetails};
use crate::repository::UserRepository;

/// Service layer for User business logic
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

    /// Create a new user, rejecting an email address that is already taken
    pub async fn create_user(&self, input: UserDetails) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        if let Some(existing) = self.repository.find_by_email(&input.email_address).await? {
            return Err(UserError::AlreadyExists { id: existing.id });
        }

        self.repository.save(None, input).await
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: i64) -> UserResult<Option<User>> {
        self.repository.find_by_id(id).await
    }

    /// Get a user by email address
    pub async fn get_user_by_email(&self, email: &str) -> UserResult<Option<User>> {
        self.repository.find_by_email(email).await
    }

    /// Get a user by first and last name
    pub async fn get_user_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> UserResult<Option<User>> {
        self.repository
            .find_by_first_and_last_name(first_name, last_name)
            .await
    }

    /// Replace every mutable field of an existing user.
    ///
    /// A `user_id` in the body must match `id`. Email uniqueness against
    /// other rows is left to the storage constraint.
    pub async fn update_user(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if let Some(body_id) = input.user_id {
            if body_id != existing.id {
                return Err(UserError::IdMismatch {
                    path: id,
                    body: body_id,
                });
            }
        }

        self.repository.save(Some(id), input.details).await
    }

    /// Delete a user, returning the record as it was before removal
    pub async fn delete_user(&self, id: i64) -> UserResult<User> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;

        if !self.repository.delete_by_id(id).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(existing)
    }

    /// List the users reporting to an approver.
    ///
    /// Fails when the approver itself does not exist, so that an unknown
    /// approver and an approver without reports stay distinguishable.
    pub async fn list_users_by_approver(&self, approver_id: i64) -> UserResult<Vec<User>> {
        if self.repository.find_by_id(approver_id).await?.is_none() {
            return Err(UserError::ApproverNotFound(approver_id));
        }

        self.repository.find_all_by_approver_id(approver_id).await
    }
}
