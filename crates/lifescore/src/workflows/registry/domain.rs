use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::report::{Salutation, UserProfile};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Sign-up form as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub title: Salutation,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl Registration {
    /// Trims every field and rejects blanks.
    pub fn validate(self) -> Result<Self, RegistrationError> {
        let required = |value: String, field: &'static str| {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                Err(RegistrationError::MissingField(field))
            } else {
                Ok(trimmed)
            }
        };
        Ok(Self {
            title: self.title,
            name: required(self.name, "name")?,
            phone: required(self.phone, "phone")?,
            email: required(self.email, "email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: UserId,
    pub title: Salutation,
    pub name: String,
    pub phone: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl RegisteredUser {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            title: self.title,
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(name: &str, phone: &str, email: &str) -> Registration {
        Registration {
            title: Salutation::Mr,
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn validation_trims_fields() {
        let valid = registration("  Sunil ", " 0712345678", "sunil@example.com ")
            .validate()
            .expect("valid");
        assert_eq!(valid.name, "Sunil");
        assert_eq!(valid.phone, "0712345678");
        assert_eq!(valid.email, "sunil@example.com");
    }

    #[test]
    fn blank_fields_are_named() {
        assert_eq!(
            registration("Sunil", "   ", "sunil@example.com").validate(),
            Err(RegistrationError::MissingField("phone"))
        );
        assert_eq!(
            registration("", "0712345678", "").validate(),
            Err(RegistrationError::MissingField("name"))
        );
    }
}
