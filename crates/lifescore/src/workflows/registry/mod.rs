//! Registered respondents: sign-up validation, the admin listing, and CSV export.

pub mod domain;
pub mod export;
pub mod listing;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{RegisteredUser, Registration, RegistrationError, UserId};
pub use export::{export_csv, write_csv, ExportError, CSV_HEADER};
pub use listing::{display_phone, page_numbers, search, total_pages, UserPage, UserRow};
pub use repository::{RepositoryError, UserRepository};
pub use router::registry_router;
pub use service::{ListQuery, RegistryService, RegistryServiceError, UserExport};
