use async_trait::async_trait;

use crate::types::{
    NewRegistration, NewUser, Registration, RegistrationPatch, RegistrationStatus, User,
};
use crate::Result;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// All stored users
    async fn list(&self) -> Result<Vec<User>>;

    /// Look up a user by lowercased email
    async fn find_by_email(&self, email_lower: &str) -> Result<Option<User>>;

    /// Create a user and persist it
    async fn create(&self, user: NewUser) -> Result<User>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// All registrations
    async fn list(&self) -> Result<Vec<Registration>>;

    /// Registrations owned by one user
    async fn list_by_user(&self, user_id: u64) -> Result<Vec<Registration>>;

    /// Look up a registration by id
    async fn find(&self, id: &str) -> Result<Option<Registration>>;

    /// Create a registration in pending state
    async fn create(&self, new: NewRegistration) -> Result<Registration>;

    /// Apply an edit patch; returns None when the id is unknown
    async fn update(&self, id: &str, patch: RegistrationPatch) -> Result<Option<Registration>>;

    /// Move a registration to a new status; returns None when the id is unknown
    async fn set_status(
        &self,
        id: &str,
        status: RegistrationStatus,
    ) -> Result<Option<Registration>>;

    /// Delete by id; false when the id was unknown
    async fn delete(&self, id: &str) -> Result<bool>;
}
