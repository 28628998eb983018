use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::account::{Account, AccountId, NewAccount},
};

/// Storage port for accounts.
///
/// Implementations assign the id and timestamps on `create`. Username lookup
/// is an exact match.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError>;
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError>;
    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError>;
    async fn count(&self) -> Result<u64, RepositoryError>;

    /// Write every field of `account`. Fails with `NotFound` if the id is unknown.
    async fn update(&self, account: &Account) -> Result<Account, RepositoryError>;

    /// Fails with `NotFound` if the id is unknown.
    async fn delete(&self, id: AccountId) -> Result<(), RepositoryError>;
}
