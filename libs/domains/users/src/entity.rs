use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{User, UserDetails};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email_address: String,
    pub approver_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            email_address: model.email_address,
            approver_id: model.approver_id,
        }
    }
}

impl ActiveModel {
    /// Build an ActiveModel for the given details.
    ///
    /// With `None` the id is left unset so the database assigns it. With
    /// `Some(id)` every column is set, which makes `update` a full replace.
    pub fn from_details(id: Option<i64>, details: UserDetails) -> Self {
        Self {
            id: id.map_or(NotSet, Set),
            first_name: Set(details.first_name),
            last_name: Set(details.last_name),
            email_address: Set(details.email_address),
            approver_id: Set(details.approver_id),
        }
    }
}
