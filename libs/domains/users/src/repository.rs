use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserDetails};

/// Repository trait for User persistence
///
/// Implementations perform no business validation. The only rules they
/// enforce are the ones the storage schema enforces: unique email addresses
/// and writes against an existing id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// Get a user by email address
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    /// Get a user by first and last name. When several users share the
    /// name, the one with the lowest id is returned.
    async fn find_by_first_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> UserResult<Option<User>>;

    /// List every user whose approver is `approver_id`, ordered by id
    async fn find_all_by_approver_id(&self, approver_id: i64) -> UserResult<Vec<User>>;

    /// Insert (`id == None`) or fully replace (`id == Some`) a user
    async fn save(&self, id: Option<i64>, details: UserDetails) -> UserResult<User>;

    /// Delete a user by ID, returning whether a row was removed
    async fn delete_by_id(&self, id: i64) -> UserResult<bool>;
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<i64, User>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Insert a user with a fixed id, bypassing the id sequence.
    ///
    /// Intended for seeding fixtures. The sequence is advanced past `user.id`
    /// so later inserts never collide with it. An occupied id or a taken email
    /// fails with `AlreadyExists`.
    pub async fn insert_with_id(&self, user: User) -> UserResult<User> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) {
            return Err(UserError::AlreadyExists { id: user.id });
        }

        if let Some(existing) = users.values().find(|u| u.email_address == user.email_address) {
            return Err(UserError::AlreadyExists { id: existing.id });
        }

        self.next_id
            .fetch_max(user.id.saturating_add(1), Ordering::SeqCst);
        users.insert(user.id, user.clone());
        Ok(user)
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email_address == email).cloned())
    }

    async fn find_by_first_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> UserResult<Option<User>> {
        let users = self.users.read().await;
        let found = users
            .values()
            .filter(|u| u.first_name == first_name && u.last_name == last_name)
            .min_by_key(|u| u.id)
            .cloned();
        Ok(found)
    }

    async fn find_all_by_approver_id(&self, approver_id: i64) -> UserResult<Vec<User>> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users
            .values()
            .filter(|u| u.approver_id == Some(approver_id))
            .cloned()
            .collect();
        result.sort_by_key(|u| u.id);

        Ok(result)
    }

    async fn save(&self, id: Option<i64>, details: UserDetails) -> UserResult<User> {
        let mut users = self.users.write().await;

        // Mirrors the unique index on email_address
        if let Some(existing) = users
            .values()
            .find(|u| u.email_address == details.email_address && Some(u.id) != id)
        {
            return Err(UserError::AlreadyExists { id: existing.id });
        }

        match id {
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let user = User::from_details(id, details);
                users.insert(id, user.clone());

                tracing::info!(user_id = id, "Created user");
                Ok(user)
            }
            Some(id) => {
                let user = users.get_mut(&id).ok_or(UserError::NotFound(id))?;
                user.apply_details(details);

                tracing::info!(user_id = id, "Updated user");
                Ok(user.clone())
            }
        }
    }

    async fn delete_by_id(&self, id: i64) -> UserResult<bool> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
