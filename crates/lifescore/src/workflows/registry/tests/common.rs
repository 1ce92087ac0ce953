use std::sync::{Arc, Mutex};

use crate::config::{DeliveryConfig, RegistryConfig};
use crate::workflows::registry::{
    RegisteredUser, Registration, RegistryService, RepositoryError, UserRepository,
};
use crate::workflows::report::Salutation;

pub(super) fn registration(name: &str, phone: &str, email: &str) -> Registration {
    Registration {
        title: Salutation::Mr,
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
    }
}

pub(super) fn build_service(per_page: usize) -> (RegistryService<MemoryUsers>, Arc<MemoryUsers>) {
    let repository = Arc::new(MemoryUsers::default());
    let service = RegistryService::new(
        repository.clone(),
        RegistryConfig {
            users_per_page: per_page,
        },
        &DeliveryConfig::default(),
    );
    (service, repository)
}

pub(super) fn seed(service: &RegistryService<MemoryUsers>, count: usize) {
    for index in 1..=count {
        service
            .register(registration(
                &format!("Member {index:02}"),
                &format!("07{index:08}"),
                &format!("member{index}@example.com"),
            ))
            .expect("registration succeeds");
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryUsers {
    users: Arc<Mutex<Vec<RegisteredUser>>>,
}

impl UserRepository for MemoryUsers {
    fn insert(&self, user: RegisteredUser) -> Result<RegisteredUser, RepositoryError> {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        if guard.iter().any(|existing| existing.id == user.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(user.clone());
        Ok(user)
    }

    fn list(&self) -> Result<Vec<RegisteredUser>, RepositoryError> {
        Ok(self.users.lock().expect("user mutex poisoned").clone())
    }
}

pub(super) struct OfflineUsers;

impl UserRepository for OfflineUsers {
    fn insert(&self, _user: RegisteredUser) -> Result<RegisteredUser, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<RegisteredUser>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
