use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use super::domain::{RegisteredUser, Registration, RegistrationError, UserId};
use super::export::{export_csv, ExportError};
use super::listing::{search, UserPage};
use super::repository::{RepositoryError, UserRepository};
use crate::config::{DeliveryConfig, RegistryConfig};
use crate::workflows::delivery::artifacts::user_export_name;

/// Query string for the admin listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub page: Option<usize>,
}

impl ListQuery {
    fn term(&self) -> &str {
        self.search.as_deref().map(str::trim).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserExport {
    pub file_name: String,
    pub body: String,
    pub rows: usize,
}

pub struct RegistryService<R> {
    repository: Arc<R>,
    per_page: usize,
    country_code: String,
}

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("usr-{id:06}"))
}

impl<R> RegistryService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repository: Arc<R>, registry: RegistryConfig, delivery: &DeliveryConfig) -> Self {
        Self {
            repository,
            per_page: registry.users_per_page.max(1),
            country_code: delivery.country_code.clone(),
        }
    }

    pub fn register(
        &self,
        registration: Registration,
    ) -> Result<RegisteredUser, RegistryServiceError> {
        let valid = registration.validate()?;
        let user = RegisteredUser {
            id: next_user_id(),
            title: valid.title,
            name: valid.name,
            phone: valid.phone,
            email: valid.email,
            registered_at: Some(Utc::now()),
        };
        let stored = self.repository.insert(user)?;
        info!(user_id = %stored.id.0, "respondent registered");
        Ok(stored)
    }

    pub fn list(&self, query: &ListQuery) -> Result<UserPage, RegistryServiceError> {
        let users = self.repository.list()?;
        Ok(UserPage::build(
            &users,
            query.term(),
            query.page.unwrap_or(1),
            self.per_page,
            &self.country_code,
        ))
    }

    /// CSV of every user matching the search, not just the current page.
    pub fn export(&self, query: &ListQuery, today: NaiveDate) -> Result<UserExport, RegistryServiceError> {
        let users = self.repository.list()?;
        let matched = search(&users, query.term());
        let body = export_csv(&matched, &self.country_code)?;
        info!(rows = matched.len(), "user list exported");
        Ok(UserExport {
            file_name: user_export_name(today),
            body,
            rows: matched.len(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryServiceError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
}
