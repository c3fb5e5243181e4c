use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::{AuthService, RegisterUser};
use crate::domain::auth::value_objects::{PasswordStatus, PlainPassword, Role};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  pub first_name: String,
  pub last_name: String,
  /// Optional display name; composed from first and last name when blank
  pub full_name: String,
  pub email: String,
  pub contact: String,
  /// Persisted role ordinal (0 = administrator, 1 = developer, 2 = user)
  pub role: i32,
  /// User's password (plain text, will be hashed by the hashing collaborator)
  pub password: PlainPassword,
  pub password_confirmation: PlainPassword,
}

/// Response after successful user registration
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
  /// Unique identifier of the newly created user
  pub user_id: Uuid,
  /// Identifier intended for token claims
  pub user_identifier: Uuid,
  pub masked_email: String,
  pub role: Role,
  pub password_status: PasswordStatus,
  pub created_at: DateTime<Utc>,
}

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user registration use case
  ///
  /// # Errors
  /// Returns `AuthError` if registration fails (e.g., unknown role, weak password,
  /// email already exists)
  pub async fn execute(
    &self,
    command: RegisterUserCommand,
  ) -> Result<RegisterUserResponse, AuthError> {
    let role = Role::try_from(command.role)?;

    let (user, password) = self
      .auth_service
      .register(RegisterUser {
        first_name: command.first_name,
        last_name: command.last_name,
        full_name: command.full_name,
        email: command.email,
        contact: command.contact,
        role,
        password: command.password,
        password_confirmation: command.password_confirmation,
      })
      .await?;

    Ok(RegisterUserResponse {
      user_id: user.id().into_inner(),
      user_identifier: user.user_identifier().into_inner(),
      masked_email: user.email().mask(),
      role: user.role(),
      password_status: password.status(),
      created_at: user.base().created_at(),
    })
  }
}
