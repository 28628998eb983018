//! Test doubles shared by the unit test modules.

use crate::domain::{
    error::DomainError, models::credential::HashedPassword,
    services::password_service::PasswordHasher,
};

/// Deterministic hasher: `mock_hash:<plain>`. Fast, and lets tests check
/// which plaintext a stored hash came from.
#[derive(Clone)]
pub struct MockPasswordHasher;

impl PasswordHasher for MockPasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        Ok(HashedPassword::new(format!("mock_hash:{}", plain_password)))
    }

    fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
        Ok(hashed_password.as_str() == format!("mock_hash:{}", plain_password))
    }
}
