use sea_orm_migration::{prelude::*, schema::*};

pub const EMAIL_INDEX: &str = "idx_users_email_address";
pub const APPROVER_INDEX: &str = "idx_users_approver_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(big_pk_auto(Users::Id))
                    .col(string(Users::FirstName))
                    .col(string(Users::LastName))
                    .col(string(Users::EmailAddress))
                    .col(big_integer_null(Users::ApproverId))
                    .to_owned(),
            )
            .await?;

        // Backs the one-user-per-email rule; duplicate inserts fail here
        manager
            .create_index(
                Index::create()
                    .name(EMAIL_INDEX)
                    .table(Users::Table)
                    .col(Users::EmailAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(APPROVER_INDEX)
                    .table(Users::Table)
                    .col(Users::ApproverId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(APPROVER_INDEX).table(Users::Table).to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name(EMAIL_INDEX).table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    EmailAddress,
    ApproverId,
}
