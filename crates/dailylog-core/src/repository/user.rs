//! UserRepository trait definition.

use dailylog_types::error::RepositoryError;
use dailylog_types::user::User;
use uuid::Uuid;

/// Repository trait for the user rows this service touches.
pub trait UserRepository: Send + Sync {
    /// Persist a new user.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// A user by id.
    fn find_by_id(
        &self,
        user_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Update a user (profile fields, free trial count).
    fn update(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
