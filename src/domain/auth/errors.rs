use std::convert::Infallible;

use thiserror::Error;

use super::value_objects::PasswordStatus;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("{message}")]
  AccountLocked { message: String },

  #[error("Credential cannot be used while {0}")]
  CredentialUnavailable(PasswordStatus),

  #[error("Email already exists")]
  EmailAlreadyExists,

  #[error("User not found")]
  UserNotFound,

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Validation error: {0}")]
  Validation(#[from] ValidationError),

  #[error("Invariant violation: {0}")]
  Invariant(#[from] InvariantViolation),
}

/// Repository-related errors reported by persistence collaborators
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Record not found")]
  NotFound,

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Concurrent update rejected for user {0}")]
  Conflict(String),
}

/// Errors reported by the hashing collaborator
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),
}

/// Input validation errors. Messages are safe to show to the end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Email cannot be empty")]
  EmptyEmail,

  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password cannot be empty")]
  PasswordEmpty,

  #[error("Password too short, minimum {min} characters required")]
  PasswordTooShort { min: usize },

  #[error("Password too long, maximum {max} characters allowed")]
  PasswordTooLong { max: usize },

  #[error("Password must contain at least one lowercase letter")]
  PasswordMissingLowercase,

  #[error("Password must contain at least one uppercase letter")]
  PasswordMissingUppercase,

  #[error("Password must contain at least one digit")]
  PasswordMissingDigit,

  #[error("Password must contain at least one special character")]
  PasswordMissingSpecial,

  #[error("Password confirmation cannot be empty")]
  ConfirmationEmpty,

  #[error("Password and confirmation do not match")]
  ConfirmationMismatch,

  #[error("Password hash cannot be empty")]
  EmptyPasswordHash,

  #[error("Missing required field: {field}")]
  MissingField { field: String },

  #[error("Unknown role: {0}")]
  UnknownRole(i32),

  #[error("Unknown password status: {0}")]
  UnknownPasswordStatus(i32),
}

impl ValidationError {
  pub fn missing(field: impl Into<String>) -> Self {
    Self::MissingField {
      field: field.into(),
    }
  }
}

// Lets `TryInto<Role>` accept an already-typed `Role` alongside raw ordinals.
impl From<Infallible> for ValidationError {
  fn from(never: Infallible) -> Self {
    match never {}
  }
}

/// Programming or data-integrity faults. These are logged, never surfaced to end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
  #[error("Password for user {user_id} has no login attempt record")]
  MissingLoginAttempt { user_id: String },

  #[error("User {user_id} has no stored credential")]
  MissingCredential { user_id: String },
}
