use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::errors::ValidationError;

lazy_static! {
  static ref EMAIL_PATTERN: Regex =
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex");
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
  /// Creates a new Email after normalization and validation
  pub fn create(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
    let raw = raw.as_ref();

    if raw.trim().is_empty() {
      return Err(ValidationError::EmptyEmail);
    }

    let normalized = Self::normalize(raw);
    if !EMAIL_PATTERN.is_match(&normalized) {
      return Err(ValidationError::InvalidEmail(normalized));
    }

    Ok(Self(normalized))
  }

  /// Trims and lower-cases an address without validating it
  pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
  }

  /// Hides most of the local part, e.g. `jo***@example.com`
  pub fn mask(&self) -> String {
    let (local, domain) = self.split();
    let visible = if local.chars().count() <= 2 { 1 } else { 2 };
    let prefix: String = local.chars().take(visible).collect();

    format!("{}***@{}", prefix, domain)
  }

  /// Returns the full normalized address
  pub fn unmask(&self) -> String {
    self.0.clone()
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }

  fn split(&self) -> (&str, &str) {
    // The pattern guarantees exactly one '@' with non-empty sides.
    self.0.split_once('@').unwrap_or((self.0.as_str(), ""))
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl TryFrom<String> for Email {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::create(value)
  }
}

impl From<Email> for String {
  fn from(email: Email) -> Self {
    email.0
  }
}

// ============================================================================
// PlainPassword Value Object (Never Stored)
// ============================================================================

/// Plain-text secret on its way to the hashing collaborator.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PlainPassword(String);

impl PlainPassword {
  /// Wraps a plain-text password without checking the strength policy.
  /// Login attempts must not leak the policy, so only registration and
  /// password changes go through `Password::validate`.
  pub fn new(password: impl Into<String>) -> Self {
    Self(password.into())
  }

  /// Returns the password as a string slice (use with caution)
  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for PlainPassword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PlainPassword(***)")
  }
}

impl fmt::Display for PlainPassword {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object (Opaque, produced by the hashing collaborator)
// ============================================================================

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PasswordHash(String);

impl PasswordHash {
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValidationError> {
    let hash = hash.into();

    if hash.trim().is_empty() {
      return Err(ValidationError::EmptyPasswordHash);
    }

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Debug for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("PasswordHash([REDACTED])")
  }
}

impl TryFrom<String> for PasswordHash {
  type Error = ValidationError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    Self::from_hash(value)
  }
}

impl From<PasswordHash> for String {
  fn from(hash: PasswordHash) -> Self {
    hash.0
  }
}

// ============================================================================
// UserId / UserIdentifier Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn from_uuid(uuid: Uuid) -> Self {
    Self(uuid)
  }

  pub fn into_inner(self) -> Uuid {
    self.0
  }

  pub fn as_uuid(&self) -> &Uuid {
    &self.0
  }
}

impl Default for UserId {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<Uuid> for UserId {
  fn from(uuid: Uuid) -> Self {
    Self(uuid)
  }
}

/// Secondary identifier carried in token claims; never the same as `UserId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentifier(Uuid);

impl UserIdentifier {
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn from_uuid(uuid: Uuid) -> Self {
    Self(uuid)
  }

  pub fn into_inner(self) -> Uuid {
    self.0
  }
}

impl Default for UserIdentifier {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Display for UserIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ============================================================================
// Role Enum
// ============================================================================

/// User profiles. Persisted by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
  /// Full administrative permissions
  Administrator,
  /// Permissions needed to build on the platform
  Developer,
  /// Default permissions
  User,
}

impl Role {
  pub fn as_i32(self) -> i32 {
    match self {
      Self::Administrator => 0,
      Self::Developer => 1,
      Self::User => 2,
    }
  }
}

impl TryFrom<i32> for Role {
  type Error = ValidationError;

  fn try_from(value: i32) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::Administrator),
      1 => Ok(Self::Developer),
      2 => Ok(Self::User),
      other => Err(ValidationError::UnknownRole(other)),
    }
  }
}

impl fmt::Display for Role {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Administrator => write!(f, "administrator"),
      Self::Developer => write!(f, "developer"),
      Self::User => write!(f, "user"),
    }
  }
}

// ============================================================================
// PasswordStatus Enum
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PasswordStatus {
  FirstAccess,
  Active,
  Blocked,
  Deactivated,
  /// Soft-deleted credential
  Removed,
}

impl PasswordStatus {
  pub fn as_i32(self) -> i32 {
    match self {
      Self::FirstAccess => 0,
      Self::Active => 1,
      Self::Blocked => 2,
      Self::Deactivated => 3,
      Self::Removed => 4,
    }
  }

  /// Whether a credential in this status may be used to sign in
  pub fn can_authenticate(self) -> bool {
    matches!(self, Self::FirstAccess | Self::Active)
  }
}

impl TryFrom<i32> for PasswordStatus {
  type Error = ValidationError;

  fn try_from(value: i32) -> Result<Self, Self::Error> {
    match value {
      0 => Ok(Self::FirstAccess),
      1 => Ok(Self::Active),
      2 => Ok(Self::Blocked),
      3 => Ok(Self::Deactivated),
      4 => Ok(Self::Removed),
      other => Err(ValidationError::UnknownPasswordStatus(other)),
    }
  }
}

impl fmt::Display for PasswordStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FirstAccess => write!(f, "first access"),
      Self::Active => write!(f, "active"),
      Self::Blocked => write!(f, "blocked"),
      Self::Deactivated => write!(f, "deactivated"),
      Self::Removed => write!(f, "removed"),
    }
  }
}
