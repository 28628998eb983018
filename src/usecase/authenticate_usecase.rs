use crate::domain::{
    error::DomainError, models::account::Account,
    repositories::account_repository::AccountRepository,
    services::password_service::PasswordHasher,
};

pub struct AuthenticateUsecase<R: AccountRepository, P: PasswordHasher> {
    account_repository: R,
    password_hasher: P,
}

impl<R: AccountRepository, P: PasswordHasher> AuthenticateUsecase<R, P> {
    pub fn new(account_repository: R, password_hasher: P) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }

    /// Unknown username and wrong password both yield `AuthenticationFailed`.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Account, DomainError>
    where
        P: Send + Sync,
    {
        let Some(account) = self.account_repository.find_by_username(username).await? else {
            // spend a hash so unknown names cost the same as wrong passwords
            let _ = self.password_hasher.hash(password);
            tracing::warn!(%username, "Authentication failed: unknown username");
            return Err(DomainError::AuthenticationFailed);
        };

        if !account.verify_password(password, &self.password_hasher)? {
            tracing::warn!(account_id = %account.id(), "Authentication failed: password mismatch");
            return Err(DomainError::AuthenticationFailed);
        }

        tracing::debug!(account_id = %account.id(), "Authenticated");
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::models::{account::NewAccount, credential::HashedPassword},
        infrastructure::in_memory_account_repository::InMemoryAccountRepository,
        testing::MockPasswordHasher,
    };
    use rstest::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[fixture]
    async fn usecase() -> AuthenticateUsecase<InMemoryAccountRepository, MockPasswordHasher> {
        let repo = InMemoryAccountRepository::new();
        let new_account = NewAccount::new(
            "Test User".to_string(),
            "testuser@example.com".to_string(),
            "testuser".to_string(),
            "test_password",
            &MockPasswordHasher,
        )
        .unwrap();
        repo.create(new_account).await.unwrap();

        AuthenticateUsecase::new(repo, MockPasswordHasher)
    }

    #[rstest]
    #[tokio::test]
    async fn test_authenticate_positive(
        #[future] usecase: AuthenticateUsecase<InMemoryAccountRepository, MockPasswordHasher>,
    ) {
        let account = usecase
            .await
            .authenticate("testuser", "test_password")
            .await
            .unwrap();
        assert_eq!(account.email(), "testuser@example.com");
    }

    #[derive(Clone, Default)]
    struct CountingHasher {
        calls: Arc<AtomicUsize>,
    }

    impl PasswordHasher for CountingHasher {
        fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            MockPasswordHasher.hash(plain_password)
        }

        fn verify(&self, plain_password: &str, hashed_password: &HashedPassword) -> Result<bool, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            MockPasswordHasher.verify(plain_password, hashed_password)
        }
    }

    #[tokio::test]
    async fn test_unknown_username_still_hashes() {
        let hasher = CountingHasher::default();
        let usecase = AuthenticateUsecase::new(InMemoryAccountRepository::new(), hasher.clone());

        let result = usecase.authenticate("nobody", "test_password").await;

        assert!(matches!(result, Err(DomainError::AuthenticationFailed)));
        assert_eq!(hasher.calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[case("invalid_user", "test_password")]
    #[case("testuser", "wrong_password")]
    #[case("TESTUSER", "test_password")]
    #[tokio::test]
    async fn test_authenticate_negative(
        #[future] usecase: AuthenticateUsecase<InMemoryAccountRepository, MockPasswordHasher>,
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let result = usecase.await.authenticate(username, password).await;
        assert!(matches!(result, Err(DomainError::AuthenticationFailed)));
    }
}
