use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Empty {0}")]
    EmptyField(&'static str),

    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
