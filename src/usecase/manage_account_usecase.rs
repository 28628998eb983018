use crate::domain::{
    error::{DomainError, RepositoryError},
    models::account::{Account, AccountId},
    repositories::account_repository::AccountRepository,
    services::password_service::PasswordHasher,
};

/// Optional profile edits. `None` leaves the field as it is.
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
}

pub struct ManageAccountUsecase<R: AccountRepository, P: PasswordHasher> {
    account_repository: R,
    password_hasher: P,
}

impl<R: AccountRepository, P: PasswordHasher> ManageAccountUsecase<R, P> {
    pub fn new(account_repository: R, password_hasher: P) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }

    pub async fn get(&self, id: AccountId) -> Result<Account, DomainError> {
        Ok(self
            .account_repository
            .find_by_id(id)
            .await?
            .ok_or(RepositoryError::NotFound)?)
    }

    /// Apply profile edits. The password hash is never touched here.
    pub async fn update_profile(
        &self,
        id: AccountId,
        changes: ProfileChanges,
    ) -> Result<Account, DomainError> {
        let mut account = self.get(id).await?;

        if let Some(username) = changes.username {
            if username != account.username() {
                let holder = self.account_repository.find_by_username(&username).await?;
                if holder.is_some_and(|other| other.id() != id) {
                    return Err(DomainError::UsernameTaken(username));
                }
            }
            account.change_username(username)?;
        }
        if let Some(name) = changes.name {
            account.rename(name)?;
        }
        if let Some(email) = changes.email {
            account.change_email(email)?;
        }

        Ok(self.account_repository.update(&account).await?)
    }

    /// Re-derive the hash from `new_password` once `current_password` verifies.
    pub async fn change_password(
        &self,
        id: AccountId,
        current_password: &str,
        new_password: &str,
    ) -> Result<Account, DomainError>
    where
        P: Send + Sync,
    {
        let mut account = self.get(id).await?;

        if !account.verify_password(current_password, &self.password_hasher)? {
            tracing::warn!(account_id = %id, "Password change rejected");
            return Err(DomainError::AuthenticationFailed);
        }
        account.change_password(new_password, &self.password_hasher)?;

        let account = self.account_repository.update(&account).await?;
        tracing::info!(account_id = %id, "Password changed");
        Ok(account)
    }

    pub async fn delete(&self, id: AccountId) -> Result<(), DomainError> {
        self.account_repository.delete(id).await?;
        Ok(())
    }
}
