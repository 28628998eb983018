use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    error::DomainError, models::credential::HashedPassword,
    services::password_service::PasswordHasher,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AccountId(Uuid);
impl AccountId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    Ok(value)
}

/// Account that has not been stored yet.
///
/// The plaintext password is hashed inside `new` and dropped; only the hash
/// travels on to the repository.
#[derive(Debug, Clone)]
pub struct NewAccount {
    name: String,
    email: String,
    username: String,
    password_hash: HashedPassword,
}

impl NewAccount {
    pub fn new<P: PasswordHasher>(
        name: String,
        email: String,
        username: String,
        password: &str,
        hasher: &P,
    ) -> Result<Self, DomainError> {
        let name = non_empty("name", name)?;
        let email = non_empty("email", email)?;
        let username = non_empty("username", username)?;
        if password.is_empty() {
            return Err(DomainError::EmptyField("password"));
        }

        let password_hash = hasher.hash(password)?;
        Ok(Self {
            name,
            email,
            username,
            password_hash,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
}

/// Stored account.
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: AccountId,
    name: String,
    email: String,
    username: String,
    #[serde(skip_serializing)]
    password_hash: HashedPassword,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Account {
    /// Give a pending account its storage identity.
    pub fn from_new(id: AccountId, new_account: NewAccount, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new_account.name,
            email: new_account.email,
            username: new_account.username,
            password_hash: new_account.password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild from stored values without validating or hashing.
    pub fn reconstruct(
        id: AccountId,
        name: String,
        email: String,
        username: String,
        password_hash: HashedPassword,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            username,
            password_hash,
            created_at,
            updated_at,
        }
    }

    pub fn rename(&mut self, name: String) -> Result<(), DomainError> {
        self.name = non_empty("name", name)?;
        self.touch();
        Ok(())
    }

    pub fn change_email(&mut self, email: String) -> Result<(), DomainError> {
        self.email = non_empty("email", email)?;
        self.touch();
        Ok(())
    }

    pub fn change_username(&mut self, username: String) -> Result<(), DomainError> {
        self.username = non_empty("username", username)?;
        self.touch();
        Ok(())
    }

    /// Replace the credential with a freshly salted hash of `new_password`.
    pub fn change_password<P: PasswordHasher>(
        &mut self,
        new_password: &str,
        hasher: &P,
    ) -> Result<(), DomainError> {
        if new_password.is_empty() {
            return Err(DomainError::EmptyField("password"));
        }
        self.password_hash = hasher.hash(new_password)?;
        self.touch();
        Ok(())
    }

    pub fn verify_password<P: PasswordHasher>(
        &self,
        candidate: &str,
        hasher: &P,
    ) -> Result<bool, DomainError> {
        hasher.verify(candidate, &self.password_hash)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn id(&self) -> AccountId {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
