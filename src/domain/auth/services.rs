use std::sync::Arc;

use super::entities::{Password, User};
use super::errors::{AuthError, InvariantViolation, RepositoryError};
use super::ports::{Clock, PasswordHasher, PasswordRepository, UserRepository};
use super::value_objects::{Email, PasswordStatus, PlainPassword, Role, UserId};

/// Runtime options for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  /// Log `jo***@example.com` instead of the full address
  pub mask_emails_in_logs: bool,
}

impl Default for AuthServiceConfig {
  fn default() -> Self {
    Self {
      mask_emails_in_logs: true,
    }
  }
}

/// Input for registering a user together with their first credential
#[derive(Debug, Clone)]
pub struct RegisterUser {
  pub first_name: String,
  pub last_name: String,
  pub full_name: String,
  pub email: String,
  pub contact: String,
  pub role: Role,
  pub password: PlainPassword,
  pub password_confirmation: PlainPassword,
}

/// Authentication service driving the credential lifecycle and lockout policy
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_repo: Arc<dyn PasswordRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  clock: Arc<dyn Clock>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    password_repo: Arc<dyn PasswordRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    clock: Arc<dyn Clock>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      password_repo,
      password_hasher,
      clock,
      config,
    }
  }

  /// Registers a new user and stores a first-access credential.
  ///
  /// If the credential cannot be stored the user insert is rolled back, so a
  /// failed registration leaves no account behind.
  ///
  /// # Errors
  /// Returns `AuthError::Validation` for weak passwords or invalid identity fields
  /// and `AuthError::EmailAlreadyExists` if the address is taken
  pub async fn register(&self, input: RegisterUser) -> Result<(User, Password), AuthError> {
    Password::validate_with_confirmation(
      input.password.expose(),
      input.password_confirmation.expose(),
    )?;

    let user = User::create(
      &input.first_name,
      &input.last_name,
      &input.full_name,
      &input.email,
      &input.contact,
      input.role,
      self.clock.now(),
    )?;
    let email = self.display_email(user.email());

    if self.user_repo.find_by_email(user.email()).await?.is_some() {
      tracing::warn!(email = %email, "Registration rejected, email already exists");
      return Err(AuthError::EmailAlreadyExists);
    }

    let hash = self.password_hasher.hash(&input.password).await?;
    let password = Password::create(user.id(), hash.into_inner(), PasswordStatus::FirstAccess)?;

    let user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        tracing::warn!(email = %email, "Registration lost a race on a duplicate email");
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };
    let password = match self.password_repo.save(password).await {
      Ok(password) => password,
      Err(e) => {
        tracing::error!(user_id = %user.id(), error = %e, "Credential save failed, rolling back user");
        if let Err(rollback) = self.user_repo.delete(user.id()).await {
          tracing::error!(user_id = %user.id(), error = %rollback, "Failed to roll back user");
        }
        return Err(e);
      }
    };

    tracing::info!(user_id = %user.id(), email = %email, role = %user.role(), "User registered");
    Ok((user, password))
  }

  /// Authenticates a user, recording the outcome on their credential
  ///
  /// # Errors
  /// * `AuthError::InvalidCredentials` - unknown email, inactive user, or wrong password
  /// * `AuthError::AccountLocked` - too many consecutive failures
  /// * `AuthError::CredentialUnavailable` - credential is blocked, deactivated or removed
  pub async fn authenticate(
    &self,
    email: Email,
    password: PlainPassword,
  ) -> Result<(User, Password), AuthError> {
    let masked = self.display_email(&email);

    let user = match self.user_repo.find_by_email(&email).await? {
      Some(user) if user.is_active() => user,
      Some(user) => {
        tracing::warn!(user_id = %user.id(), "Login rejected for deactivated user");
        return Err(AuthError::InvalidCredentials);
      }
      None => {
        tracing::warn!(email = %masked, "Login attempt for unknown email");
        return Err(AuthError::InvalidCredentials);
      }
    };

    let mut credential = match self.password_repo.find_by_user_id(user.id()).await? {
      Some(credential) => credential,
      None => {
        let violation = InvariantViolation::MissingCredential {
          user_id: user.id().to_string(),
        };
        tracing::error!(error = %violation, "Cannot authenticate user");
        return Err(AuthError::InvalidCredentials);
      }
    };

    let now = self.clock.now();

    if !credential.status().can_authenticate() {
      tracing::warn!(user_id = %user.id(), status = %credential.status(), "Login rejected by credential status");
      return Err(AuthError::CredentialUnavailable(credential.status()));
    }

    if let Some(message) = credential.login_attempt().lock_message(now) {
      tracing::warn!(user_id = %user.id(), "Login rejected, account is locked");
      return Err(AuthError::AccountLocked { message });
    }

    let is_valid = self
      .password_hasher
      .verify(&password, credential.value())
      .await?;

    if !is_valid {
      credential.record_failure(now);
      let credential = self.password_repo.save(credential).await?;
      let attempt = credential.login_attempt();

      if let Some(message) = attempt.lock_message(now) {
        tracing::warn!(
          user_id = %user.id(),
          failed_attempts = attempt.failed_attempts(),
          locked_until = ?attempt.locked_until(),
          "Account locked after repeated failures"
        );
        return Err(AuthError::AccountLocked { message });
      }

      tracing::warn!(
        user_id = %user.id(),
        failed_attempts = attempt.failed_attempts(),
        "Invalid password"
      );
      return Err(AuthError::InvalidCredentials);
    }

    if !credential.login_attempt().is_clean() {
      credential.record_success();
      credential = self.password_repo.save(credential).await?;
    }

    tracing::info!(user_id = %user.id(), email = %masked, "User authenticated");
    Ok((user, credential))
  }

  /// Clears failures and any lock for a user (administrative action)
  pub async fn unlock_account(&self, user_id: UserId) -> Result<Password, AuthError> {
    let user = self.find_user(user_id).await?;
    let mut credential = self.find_credential(&user).await?;

    credential.unlock();
    let credential = self.password_repo.save(credential).await?;

    tracing::info!(user_id = %user_id, "Account unlocked");
    Ok(credential)
  }

  /// Replaces a user's password after checking the strength policy
  pub async fn change_password(
    &self,
    user_id: UserId,
    new_password: PlainPassword,
    confirmation: PlainPassword,
  ) -> Result<Password, AuthError> {
    Password::validate_with_confirmation(new_password.expose(), confirmation.expose())?;

    let user = self.find_user(user_id).await?;
    let mut credential = self.find_credential(&user).await?;

    if credential.status() == PasswordStatus::Removed {
      return Err(AuthError::CredentialUnavailable(credential.status()));
    }

    let hash = self.password_hasher.hash(&new_password).await?;
    credential.change(hash.into_inner())?;
    let credential = self.password_repo.save(credential).await?;

    tracing::info!(user_id = %user_id, "Password changed");
    Ok(credential)
  }

  /// Soft deletes a user
  pub async fn deactivate_user(&self, user_id: UserId) -> Result<User, AuthError> {
    let mut user = self.find_user(user_id).await?;

    user.deactivate(self.clock.now());
    let user = self.user_repo.update(user).await?;

    tracing::info!(user_id = %user_id, "User deactivated");
    Ok(user)
  }

  async fn find_user(&self, user_id: UserId) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  async fn find_credential(&self, user: &User) -> Result<Password, AuthError> {
    match self.password_repo.find_by_user_id(user.id()).await? {
      Some(credential) => Ok(credential),
      None => {
        let violation = InvariantViolation::MissingCredential {
          user_id: user.id().to_string(),
        };
        tracing::error!(error = %violation, "Credential lookup failed");
        Err(violation.into())
      }
    }
  }

  fn display_email(&self, email: &Email) -> String {
    if self.config.mask_emails_in_logs {
      email.mask()
    } else {
      email.unmask()
    }
  }
}
