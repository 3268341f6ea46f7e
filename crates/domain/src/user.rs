use derive_more::{AsRef, Display};

/// Identifier of a user as issued by the authentication provider.
#[derive(AsRef, Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserID(String);

impl UserID {
    pub fn new(id: &str) -> Result<Self, UserIDError> {
        let trimmed_id = id.trim();

        if trimmed_id.is_empty() {
            return Err(UserIDError::Empty);
        }

        if trimmed_id.chars().any(char::is_whitespace) {
            return Err(UserIDError::ContainsWhitespace);
        }

        Ok(UserID(trimmed_id.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum UserIDError {
    #[error("User ID must not be empty")]
    Empty,
    #[error("User ID must not contain whitespace")]
    ContainsWhitespace,
}
