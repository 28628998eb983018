use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::{
    error::RepositoryError,
    models::account::{Account, AccountId, NewAccount},
    repositories::account_repository::AccountRepository,
};

/// In-memory implementation of AccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Stand-in for the unique index on `accounts.username`; callers hold the write guard.
fn ensure_username_free(
    accounts: &HashMap<AccountId, Account>,
    username: &str,
    except: Option<AccountId>,
) -> Result<(), RepositoryError> {
    let taken = accounts
        .values()
        .any(|a| a.username() == username && Some(a.id()) != except);
    if taken {
        return Err(RepositoryError::Duplicate(username.to_string()));
    }
    Ok(())
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: NewAccount) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        ensure_username_free(&accounts, account.username(), None)?;

        let account = Account::from_new(AccountId::new(), account, Utc::now());
        accounts.insert(account.id(), account.clone());

        tracing::info!(account_id = %account.id(), username = %account.username(), "Created account");
        Ok(account)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .values()
            .find(|a| a.username() == username)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, RepositoryError> {
        let accounts = self.accounts.read().await;
        let mut all: Vec<Account> = accounts.values().cloned().collect();
        all.sort_by_key(|a| a.created_at());
        Ok(all)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.len() as u64)
    }

    async fn update(&self, account: &Account) -> Result<Account, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        if !accounts.contains_key(&account.id()) {
            return Err(RepositoryError::NotFound);
        }
        ensure_username_free(&accounts, account.username(), Some(account.id()))?;

        let stored = accounts
            .get_mut(&account.id())
            .ok_or(RepositoryError::NotFound)?;
        // creation time belongs to the stored record
        let updated = Account::reconstruct(
            account.id(),
            account.name().to_string(),
            account.email().to_string(),
            account.username().to_string(),
            account.password_hash().clone(),
            stored.created_at(),
            Utc::now(),
        );
        *stored = updated.clone();

        tracing::info!(account_id = %updated.id(), "Updated account");
        Ok(updated)
    }

    async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
        let mut accounts = self.accounts.write().await;

        if accounts.remove(&id).is_none() {
            return Err(RepositoryError::NotFound);
        }

        tracing::info!(account_id = %id, "Deleted account");
        Ok(())
    }
}
