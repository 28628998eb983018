use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    domain::{
        error::RepositoryError,
        models::account::{Account, AccountId, NewAccount},
        repositories::account_repository::AccountRepository,
    },
    infrastructure::entities::accounts,
};

/// Clones share one connection pool.
#[derive(Clone)]
pub struct PostgresAccountRepository {
    db: Arc<DatabaseConnection>,
}

impl PostgresAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Arc::new(db) }
    }
}

fn map_db_err(e: DbErr) -> RepositoryError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => RepositoryError::Duplicate(detail),
        _ => RepositoryError::DatabaseError(e.to_string()),
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let now = Utc::now();
        let model = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(account.name().to_string()),
            email: Set(account.email().to_string()),
            username: Set(account.username().to_string()),
            password_hash: Set(account.password_hash().as_str().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(map_db_err)?;

        tracing::info!(account_id = %model.id, username = %model.username, "Created account");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let model = accounts::Entity::find_by_id(*id.as_uuid())
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Account::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        tracing::debug!(%username, "Looking up account by username");
        let model = accounts::Entity::find()
            .filter(accounts::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(model.map(Account::from))
    }

    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Account::from).collect())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        accounts::Entity::find()
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }

    async fn update(&self, account: &Account) -> Result<Account, RepositoryError> {
        let model = accounts::ActiveModel {
            id: Set(*account.id().as_uuid()),
            name: Set(account.name().to_string()),
            email: Set(account.email().to_string()),
            username: Set(account.username().to_string()),
            password_hash: Set(account.password_hash().as_str().to_string()),
            created_at: Set(account.created_at()),
            updated_at: Set(Utc::now()),
        }
        .update(self.db.as_ref())
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => RepositoryError::NotFound,
            e => map_db_err(e),
        })?;

        tracing::info!(account_id = %model.id, "Updated account");
        Ok(model.into())
    }

    async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
        let result = accounts::Entity::delete_by_id(*id.as_uuid())
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(account_id = %id, "Deleted account");
        Ok(())
    }
}
