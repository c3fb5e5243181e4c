use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use super::entities::{Password, User};
use super::errors::AuthError;
use super::value_objects::{Email, PasswordHash, PlainPassword, UserId};

/// Source of the current UTC time
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Repository trait for user persistence operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Stores a new user
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by their unique identifier
  async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;

  /// Finds a user by their normalized email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Replaces an existing user
  async fn update(&self, user: User) -> Result<User, AuthError>;

  /// Permanently removes a user. Used to roll back an incomplete registration.
  async fn delete(&self, id: UserId) -> Result<(), AuthError>;
}

/// Repository trait for credential persistence.
///
/// Attempt bookkeeping is a read-modify-write: implementations must serialize
/// `save` calls per `user_id` (transaction or version check) so concurrent
/// logins for the same account do not lose updates.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PasswordRepository: Send + Sync {
  /// Loads the credential owned by a user
  async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Password>, AuthError>;

  /// Inserts or replaces the credential for `password.user_id()`
  async fn save(&self, password: Password) -> Result<Password, AuthError>;
}

/// Service trait for the external hashing collaborator
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a stored hash
  async fn verify(
    &self,
    password: &PlainPassword,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}
