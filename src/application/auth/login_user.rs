use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Email, PasswordStatus, PlainPassword, Role};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: PlainPassword,
}

/// Response after successful user login, carrying the claims a token
/// collaborator needs
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  pub user_id: Uuid,
  pub user_identifier: Uuid,
  pub email: String,
  pub masked_email: String,
  pub full_name: String,
  pub role: Role,
  /// The credential is still on its first-access password
  pub must_change_password: bool,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  auth_service: Arc<AuthService>,
}

impl LoginUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the user login use case
  ///
  /// # Errors
  /// Returns `AuthError` if login fails (e.g., invalid credentials, account locked)
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AuthError> {
    let email = Email::create(command.email)?;

    let (user, password) = self
      .auth_service
      .authenticate(email, command.password)
      .await?;

    Ok(LoginUserResponse {
      user_id: user.id().into_inner(),
      user_identifier: user.user_identifier().into_inner(),
      email: user.email().unmask(),
      masked_email: user.email().mask(),
      full_name: user.full_name().to_string(),
      role: user.role(),
      must_change_password: password.status() == PasswordStatus::FirstAccess,
    })
  }
}
