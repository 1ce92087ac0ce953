use super::domain::RegisteredUser;

/// Storage for registered respondents, listed in registration order.
pub trait UserRepository: Send + Sync {
    fn insert(&self, user: RegisteredUser) -> Result<RegisteredUser, RepositoryError>;
    fn list(&self) -> Result<Vec<RegisteredUser>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("user already exists")]
    Conflict,
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}
