use crate::domain::{
    error::DomainError,
    models::account::{Account, NewAccount},
    repositories::account_repository::AccountRepository,
    services::password_service::PasswordHasher,
};

pub struct RegisterAccountUsecase<R: AccountRepository, P: PasswordHasher> {
    account_repository: R,
    password_hasher: P,
}

impl<R: AccountRepository, P: PasswordHasher> RegisterAccountUsecase<R, P> {
    pub fn new(account_repository: R, password_hasher: P) -> Self {
        Self {
            account_repository,
            password_hasher,
        }
    }

    pub async fn register(
        &self,
        name: String,
        email: String,
        username: String,
        password: String,
    ) -> Result<Account, DomainError>
    where
        P: Send + Sync,
    {
        if self
            .account_repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(DomainError::UsernameTaken(username));
        }

        // Hash password
        let new_account = NewAccount::new(name, email, username, &password, &self.password_hasher)?;

        let account = self.account_repository.create(new_account).await?;
        tracing::info!(account_id = %account.id(), "Registered account");

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{error::RepositoryError, models::account::AccountId},
        infrastructure::in_memory_account_repository::InMemoryAccountRepository,
        testing::MockPasswordHasher,
    };

    fn usecase(repo: InMemoryAccountRepository) -> RegisterAccountUsecase<InMemoryAccountRepository, MockPasswordHasher> {
        RegisterAccountUsecase::new(repo, MockPasswordHasher)
    }

    #[tokio::test]
    async fn test_register_positive() {
        let repo = InMemoryAccountRepository::new();
        let account = usecase(repo.clone())
            .register(
                "A".to_string(),
                "a@x.com".to_string(),
                "a".to_string(),
                "secret".to_string(),
            )
            .await
            .unwrap();

        assert_eq!(account.username(), "a");
        assert_eq!(account.password_hash().as_str(), "mock_hash:secret");
        assert!(repo.find_by_id(account.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_register_duplicated_username_negative() {
        let repo = InMemoryAccountRepository::new();
        let usecase = usecase(repo.clone());
        usecase
            .register("A".to_string(), "a@x.com".to_string(), "a".to_string(), "secret".to_string())
            .await
            .unwrap();

        let result = usecase
            .register("B".to_string(), "b@x.com".to_string(), "a".to_string(), "other".to_string())
            .await;

        assert!(matches!(result, Err(DomainError::UsernameTaken(name)) if name == "a"));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_register_concurrent_same_username() {
        let repo = InMemoryAccountRepository::new();
        let usecase = std::sync::Arc::new(usecase(repo.clone()));

        let handles: Vec<_> = (0..2)
            .map(|i| {
                let usecase = usecase.clone();
                tokio::spawn(async move {
                    usecase
                        .register(
                            format!("User {}", i),
                            format!("user{}@x.com", i),
                            "dup".to_string(),
                            "secret".to_string(),
                        )
                        .await
                })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => succeeded += 1,
                Err(DomainError::UsernameTaken(_))
                | Err(DomainError::Repository(RepositoryError::Duplicate(_))) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
        }

        assert_eq!(succeeded, 1);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_empty_field_negative() {
        let repo = InMemoryAccountRepository::new();
        let result = usecase(repo.clone())
            .register(String::new(), "a@x.com".to_string(), "a".to_string(), "secret".to_string())
            .await;

        assert!(matches!(result, Err(DomainError::EmptyField("name"))));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_repository_error_propagates() {
        struct FailingRepository;

        #[async_trait::async_trait]
        impl AccountRepository for FailingRepository {
            async fn create(&self, _account: NewAccount) -> Result<Account, RepositoryError> {
                Err(RepositoryError::Duplicate("accounts_username_key".to_string()))
            }
            async fn find_by_id(&self, _id: AccountId) -> Result<Option<Account>, RepositoryError> {
                Ok(None)
            }
            async fn find_by_username(&self, _username: &str) -> Result<Option<Account>, RepositoryError> {
                Ok(None)
            }
            async fn find_all(&self) -> Result<Vec<Account>, RepositoryError> {
                Ok(vec![])
            }
            async fn count(&self) -> Result<u64, RepositoryError> {
                Ok(0)
            }
            async fn update(&self, _account: &Account) -> Result<Account, RepositoryError> {
                Err(RepositoryError::NotFound)
            }
            async fn delete(&self, _id: AccountId) -> Result<(), RepositoryError> {
                Err(RepositoryError::NotFound)
            }
        }

        let usecase = RegisterAccountUsecase::new(FailingRepository, MockPasswordHasher);
        let result = usecase
            .register("A".to_string(), "a@x.com".to_string(), "a".to_string(), "secret".to_string())
            .await;

        assert!(matches!(
            result,
            Err(DomainError::Repository(RepositoryError::Duplicate(_)))
        ));
    }
}
