use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};

use crate::entity::{ActiveModel, Column, Entity};
use crate::error::{UserError, UserResult};
use crate::models::{User, UserDetails};
use crate::repository::UserRepository;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Translate a failed insert/update into a domain error.
    ///
    /// A unique violation on email_address is reported as `AlreadyExists`
    /// carrying the id of the row that owns the address.
    async fn write_error(&self, err: DbErr, email: &str) -> UserError {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            match self.find_by_email(email).await {
                Ok(Some(existing)) => return UserError::AlreadyExists { id: existing.id },
                Ok(None) => {}
                Err(lookup) => {
                    tracing::warn!(error = %lookup, "Failed to resolve conflicting user");
                }
            }
        }
        UserError::Database(err)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> UserResult<Option<User>> {
        let user = Entity::find_by_id(id).one(&self.db).await?.map(Into::into);
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let user = Entity::find()
            .filter(Column::EmailAddress.eq(email))
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(user)
    }

    async fn find_by_first_and_last_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> UserResult<Option<User>> {
        let user = Entity::find()
            .filter(Column::FirstName.eq(first_name))
            .filter(Column::LastName.eq(last_name))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(user)
    }

    async fn find_all_by_approver_id(&self, approver_id: i64) -> UserResult<Vec<User>> {
        let users = Entity::find()
            .filter(Column::ApproverId.eq(approver_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(users)
    }

    async fn save(&self, id: Option<i64>, details: UserDetails) -> UserResult<User> {
        let email = details.email_address.clone();
        let model = ActiveModel::from_details(id, details);

        let result = match id {
            None => model.insert(&self.db).await,
            Some(id) => match model.update(&self.db).await {
                // Row deleted between the existence check and this write
                Err(DbErr::RecordNotUpdated) => return Err(UserError::NotFound(id)),
                other => other,
            },
        };

        let saved = match result {
            Ok(saved) => saved,
            Err(err) => return Err(self.write_error(err, &email).await),
        };

        if id.is_some() {
            tracing::info!(user_id = saved.id, "Updated user");
        } else {
            tracing::info!(user_id = saved.id, "Created user");
        }
        Ok(saved.into())
    }

    async fn delete_by_id(&self, id: i64) -> UserResult<bool> {
        let result = Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Model;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i64, email: &str, approver_id: Option<i64>) -> Model {
        Model {
            id,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email_address: email.to_string(),
            approver_id,
        }
    }

    fn details(email: &str) -> UserDetails {
        UserDetails {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email_address: email.to_string(),
            approver_id: Some(1234),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_maps_model() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(123, "john.doe@email.com", Some(1234))]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.find_by_id(123).await.unwrap().unwrap();

        assert_eq!(user.id, 123);
        assert_eq!(user.email_address, "john.doe@email.com");
        assert_eq!(user.approver_id, Some(1234));
    }

    #[tokio::test]
    async fn test_find_by_email_absent() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(repo.find_by_email("nobody@email.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_by_approver() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(2, "a@email.com", Some(1)),
                model(3, "b@email.com", Some(1)),
            ]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let users = repo.find_all_by_approver_id(1).await.unwrap();

        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.approver_id == Some(1)));
    }

    #[tokio::test]
    async fn test_save_inserts_new_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "john.doe@email.com", Some(1234))]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.save(None, details("john.doe@email.com")).await.unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.first_name, "John");
    }

    #[tokio::test]
    async fn test_save_update_on_vanished_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.save(Some(55), details("john.doe@email.com")).await;

        assert!(matches!(result, Err(UserError::NotFound(55))));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(repo.delete_by_id(123).await.unwrap());
        assert!(!repo.delete_by_id(123).await.unwrap());
    }

    #[tokio::test]
    async fn test_query_failure_surfaces_as_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.find_by_id(1).await;

        assert!(matches!(result, Err(UserError::Database(_))));
    }
}
