//! `accounts` table entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::models::{
    account::{Account, AccountId},
    credential::HashedPassword,
};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Account {
    fn from(model: Model) -> Self {
        Account::reconstruct(
            AccountId::from_uuid(model.id),
            model.name,
            model.email,
            model.username,
            HashedPassword::new(model.password_hash),
            model.created_at,
            model.updated_at,
        )
    }
}
