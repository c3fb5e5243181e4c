use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, InvariantViolation, ValidationError};
use super::value_objects::{
  Email, PasswordHash, PasswordStatus, Role, UserId, UserIdentifier,
};

// ============================================================================
// EntityBase
// ============================================================================

/// Identity, audit and soft-delete fields of the user aggregate.
///
/// The id is the user's persistence key, so it is typed as [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityBase {
  id: UserId,
  is_active: bool,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl EntityBase {
  /// Creates a fresh, active entity stamped with `now`
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      id: UserId::new(),
      is_active: true,
      created_at: now,
      updated_at: now,
    }
  }

  /// Rebuilds the base from persisted fields
  pub fn restore(
    id: UserId,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      is_active,
      created_at,
      updated_at,
    }
  }

  pub fn id(&self) -> UserId {
    self.id
  }

  pub fn is_active(&self) -> bool {
    self.is_active
  }

  pub fn created_at(&self) -> DateTime<Utc> {
    self.created_at
  }

  pub fn updated_at(&self) -> DateTime<Utc> {
    self.updated_at
  }

  /// Soft delete. Calling it on an inactive entity is a no-op.
  pub fn deactivate(&mut self, now: DateTime<Utc>) {
    if !self.is_active {
      return;
    }
    self.is_active = false;
    self.updated_at = now;
  }

  /// Marks the entity visible again
  pub fn activate(&mut self, now: DateTime<Utc>) {
    if self.is_active {
      return;
    }
    self.is_active = true;
    self.updated_at = now;
  }
}

// ============================================================================
// LoginAttempt
// ============================================================================

/// Something that happened to a credential during authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAttemptEvent {
  Failure { at: DateTime<Utc> },
  Success,
  AdministrativeUnlock,
}

/// Consecutive authentication failures and the temporary lock they produce.
///
/// Values never change in place: every transition returns the next version,
/// and the owning `Password` keeps only the latest one. Lock expiry is observed
/// lazily by comparing `locked_until` with the caller's clock.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoginAttempt {
  failed_attempts: u32,
  last_failed_at: Option<DateTime<Utc>>,
  locked_until: Option<DateTime<Utc>>,
}

impl LoginAttempt {
  pub const MAX_FAILED_ATTEMPTS: u32 = 5;
  pub const LOCK_DURATION_MINUTES: i64 = 15;

  /// Initial state for a brand-new credential
  pub fn create() -> Self {
    Self::default()
  }

  /// Rebuilds a persisted record as-is; stored records are trusted
  pub fn restore(
    failed_attempts: u32,
    last_failed_at: Option<DateTime<Utc>>,
    locked_until: Option<DateTime<Utc>>,
  ) -> Self {
    Self {
      failed_attempts,
      last_failed_at,
      locked_until,
    }
  }

  pub fn lock_duration() -> Duration {
    Duration::minutes(Self::LOCK_DURATION_MINUTES)
  }

  pub fn failed_attempts(&self) -> u32 {
    self.failed_attempts
  }

  pub fn last_failed_at(&self) -> Option<DateTime<Utc>> {
    self.last_failed_at
  }

  pub fn locked_until(&self) -> Option<DateTime<Utc>> {
    self.locked_until
  }

  /// Computes the next version for `event`
  pub fn apply(&self, event: LoginAttemptEvent) -> Self {
    match event {
      LoginAttemptEvent::Failure { at } => {
        let failed_attempts = self.failed_attempts.saturating_add(1);
        let locked_until = if failed_attempts >= Self::MAX_FAILED_ATTEMPTS {
          Some(at + Self::lock_duration())
        } else {
          self.locked_until
        };

        Self {
          failed_attempts,
          last_failed_at: Some(at),
          locked_until,
        }
      }
      LoginAttemptEvent::Success | LoginAttemptEvent::AdministrativeUnlock => Self::create(),
    }
  }

  pub fn register_failure(&self, now: DateTime<Utc>) -> Self {
    self.apply(LoginAttemptEvent::Failure { at: now })
  }

  pub fn reset(&self) -> Self {
    self.apply(LoginAttemptEvent::Success)
  }

  /// True when nothing has been recorded since the last reset
  pub fn is_clean(&self) -> bool {
    *self == Self::create()
  }

  pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
    matches!(self.locked_until, Some(until) if until > now)
  }

  /// Time left until the lock expires, if currently locked
  pub fn remaining_lock(&self, now: DateTime<Utc>) -> Option<Duration> {
    self
      .locked_until
      .filter(|until| *until > now)
      .map(|until| until - now)
  }

  /// Human-readable remaining lock time, rounded up
  pub fn lock_message(&self, now: DateTime<Utc>) -> Option<String> {
    let remaining_us = self
      .remaining_lock(now)?
      .num_microseconds()
      .unwrap_or(i64::MAX);

    let (amount, unit) = if remaining_us < 60_000_000 {
      (ceil_div(remaining_us, 1_000_000), "second")
    } else {
      (ceil_div(remaining_us, 60_000_000), "minute")
    };
    let plural = if amount == 1 { "" } else { "s" };

    Some(format!(
      "Account is temporarily locked. Try again in {} {}{}.",
      amount, unit, plural
    ))
  }
}

fn ceil_div(value: i64, divisor: i64) -> i64 {
  value / divisor + i64::from(value % divisor != 0)
}

// ============================================================================
// Password
// ============================================================================

/// Stored credential for a user, keyed by `user_id`.
///
/// The hash comes from the hashing collaborator; this type never sees or
/// compares raw secrets beyond the strength policy in [`Password::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Password {
  user_id: UserId,
  value: PasswordHash,
  login_attempt: LoginAttempt,
  status: PasswordStatus,
}

impl Password {
  pub const MIN_LENGTH: usize = 8;
  pub const MAX_LENGTH: usize = 24;

  /// Creates a credential from an already-hashed value with a clean attempt record
  pub fn create(
    user_id: UserId,
    hashed_value: impl Into<String>,
    status: PasswordStatus,
  ) -> Result<Self, ValidationError> {
    let value = PasswordHash::from_hash(hashed_value)?;

    Ok(Self {
      user_id,
      value,
      login_attempt: LoginAttempt::create(),
      status,
    })
  }

  /// Rebuilds a persisted credential. A missing attempt record is a data fault.
  pub fn restore(
    user_id: UserId,
    hashed_value: impl Into<String>,
    status: PasswordStatus,
    login_attempt: Option<LoginAttempt>,
  ) -> Result<Self, AuthError> {
    let login_attempt = login_attempt.ok_or_else(|| InvariantViolation::MissingLoginAttempt {
      user_id: user_id.to_string(),
    })?;
    let value = PasswordHash::from_hash(hashed_value)?;

    Ok(Self {
      user_id,
      value,
      login_attempt,
      status,
    })
  }

  /// Checks the strength policy for a candidate plain-text password
  pub fn validate(plaintext: &str) -> Result<(), ValidationError> {
    if plaintext.is_empty() {
      return Err(ValidationError::PasswordEmpty);
    }

    let length = plaintext.chars().count();
    if length < Self::MIN_LENGTH {
      return Err(ValidationError::PasswordTooShort {
        min: Self::MIN_LENGTH,
      });
    }
    if length > Self::MAX_LENGTH {
      return Err(ValidationError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    if !plaintext.chars().any(char::is_lowercase) {
      return Err(ValidationError::PasswordMissingLowercase);
    }
    if !plaintext.chars().any(char::is_uppercase) {
      return Err(ValidationError::PasswordMissingUppercase);
    }
    if !plaintext.chars().any(|c| c.is_ascii_digit()) {
      return Err(ValidationError::PasswordMissingDigit);
    }
    // Special means a non-word character: not a letter, digit or underscore.
    if !plaintext.chars().any(|c| !c.is_alphanumeric() && c != '_') {
      return Err(ValidationError::PasswordMissingSpecial);
    }

    Ok(())
  }

  pub fn validate_with_confirmation(plaintext: &str, confirm: &str) -> Result<(), ValidationError> {
    Self::validate(plaintext)?;

    if confirm.is_empty() {
      return Err(ValidationError::ConfirmationEmpty);
    }
    if plaintext != confirm {
      return Err(ValidationError::ConfirmationMismatch);
    }

    Ok(())
  }

  pub fn user_id(&self) -> UserId {
    self.user_id
  }

  pub fn value(&self) -> &PasswordHash {
    &self.value
  }

  pub fn login_attempt(&self) -> &LoginAttempt {
    &self.login_attempt
  }

  pub fn status(&self) -> PasswordStatus {
    self.status
  }

  pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
    self.login_attempt.is_locked(now)
  }

  /// Usable status and no active lock
  pub fn can_authenticate(&self, now: DateTime<Utc>) -> bool {
    self.status.can_authenticate() && !self.is_locked(now)
  }

  pub fn record_failure(&mut self, now: DateTime<Utc>) {
    self.login_attempt = self.login_attempt.register_failure(now);
  }

  pub fn record_success(&mut self) {
    self.login_attempt = self.login_attempt.apply(LoginAttemptEvent::Success);
  }

  pub fn unlock(&mut self) {
    self.login_attempt = self
      .login_attempt
      .apply(LoginAttemptEvent::AdministrativeUnlock);
  }

  pub fn set_status(&mut self, status: PasswordStatus) {
    self.status = status;
  }

  /// Replaces the hash after a password change; the credential becomes active
  /// and previous failures are forgotten
  pub fn change(&mut self, hashed_value: impl Into<String>) -> Result<(), ValidationError> {
    self.value = PasswordHash::from_hash(hashed_value)?;
    self.status = PasswordStatus::Active;
    self.login_attempt = LoginAttempt::create();
    Ok(())
  }
}

// ============================================================================
// User
// ============================================================================

/// Raw persisted user fields, as read by a persistence collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
  pub id: Uuid,
  pub user_identifier: Uuid,
  pub first_name: String,
  pub last_name: String,
  pub full_name: String,
  pub email: String,
  pub contact: String,
  pub role: i32,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// User aggregate root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  #[serde(flatten)]
  base: EntityBase,
  first_name: String,
  last_name: String,
  full_name: String,
  email: Email,
  contact: String,
  user_identifier: UserIdentifier,
  role: Role,
}

/// Trimmed and validated identity attributes shared by `create` and `read`
struct Profile {
  first_name: String,
  last_name: String,
  full_name: String,
  email: Email,
  contact: String,
  role: Role,
}

impl Profile {
  fn build<R>(
    first_name: &str,
    last_name: &str,
    full_name: &str,
    email: &str,
    contact: &str,
    role: R,
  ) -> Result<Self, ValidationError>
  where
    R: TryInto<Role>,
    ValidationError: From<R::Error>,
  {
    let first_name = first_name.trim();
    if first_name.is_empty() {
      return Err(ValidationError::missing("first_name"));
    }

    let last_name = last_name.trim();
    if last_name.is_empty() {
      return Err(ValidationError::missing("last_name"));
    }

    let email = Email::create(email)?;
    let role = role.try_into()?;

    let full_name = match full_name.trim() {
      "" => format!("{} {}", first_name, last_name),
      name => name.to_string(),
    };

    Ok(Self {
      first_name: first_name.to_string(),
      last_name: last_name.to_string(),
      full_name,
      email,
      contact: contact.trim().to_string(),
      role,
    })
  }
}

impl User {
  /// Creates a validated user with fresh identifiers.
  ///
  /// `role` accepts either a [`Role`] or its persisted ordinal.
  #[allow(clippy::too_many_arguments)]
  pub fn create<R>(
    first_name: &str,
    last_name: &str,
    full_name: &str,
    email: &str,
    contact: &str,
    role: R,
    now: DateTime<Utc>,
  ) -> Result<Self, ValidationError>
  where
    R: TryInto<Role>,
    ValidationError: From<R::Error>,
  {
    let profile = Profile::build(first_name, last_name, full_name, email, contact, role)?;

    Ok(Self::assemble(
      EntityBase::new(now),
      UserIdentifier::new(),
      profile,
    ))
  }

  /// Rebuilds a user from storage, running the same validation as `create`
  pub fn read(record: UserRecord) -> Result<Self, ValidationError> {
    let profile = Profile::build(
      &record.first_name,
      &record.last_name,
      &record.full_name,
      &record.email,
      &record.contact,
      record.role,
    )?;
    let base = EntityBase::restore(
      UserId::from_uuid(record.id),
      record.is_active,
      record.created_at,
      record.updated_at,
    );

    Ok(Self::assemble(
      base,
      UserIdentifier::from_uuid(record.user_identifier),
      profile,
    ))
  }

  fn assemble(base: EntityBase, user_identifier: UserIdentifier, profile: Profile) -> Self {
    Self {
      base,
      first_name: profile.first_name,
      last_name: profile.last_name,
      full_name: profile.full_name,
      email: profile.email,
      contact: profile.contact,
      user_identifier,
      role: profile.role,
    }
  }

  /// Flattens the aggregate into raw fields for persistence
  pub fn to_record(&self) -> UserRecord {
    UserRecord {
      id: self.id().into_inner(),
      user_identifier: self.user_identifier.into_inner(),
      first_name: self.first_name.clone(),
      last_name: self.last_name.clone(),
      full_name: self.full_name.clone(),
      email: self.email.unmask(),
      contact: self.contact.clone(),
      role: self.role.as_i32(),
      is_active: self.base.is_active(),
      created_at: self.base.created_at(),
      updated_at: self.base.updated_at(),
    }
  }

  pub fn base(&self) -> &EntityBase {
    &self.base
  }

  pub fn id(&self) -> UserId {
    self.base.id()
  }

  pub fn is_active(&self) -> bool {
    self.base.is_active()
  }

  pub fn first_name(&self) -> &str {
    &self.first_name
  }

  pub fn last_name(&self) -> &str {
    &self.last_name
  }

  pub fn full_name(&self) -> &str {
    &self.full_name
  }

  pub fn email(&self) -> &Email {
    &self.email
  }

  pub fn contact(&self) -> &str {
    &self.contact
  }

  pub fn user_identifier(&self) -> UserIdentifier {
    self.user_identifier
  }

  pub fn role(&self) -> Role {
    self.role
  }

  pub fn deactivate(&mut self, now: DateTime<Utc>) {
    self.base.deactivate(now);
  }

  pub fn activate(&mut self, now: DateTime<Utc>) {
    self.base.activate(now);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
  }

  fn failed_times(attempt: LoginAttempt, times: u32, now: DateTime<Utc>) -> LoginAttempt {
    (0..times).fold(attempt, |acc, _| acc.register_failure(now))
  }

  fn ana(role: Role) -> Result<User, ValidationError> {
    User::create(
      "  Ana  ",
      "  Silva  ",
      "",
      "Ana.Silva@Example.com",
      " +55 11 99999-0000 ",
      role,
      t0(),
    )
  }

  // --- EntityBase ---------------------------------------------------------

  #[test]
  fn test_entity_base_soft_delete_is_idempotent() {
    let mut base = EntityBase::new(t0());
    let id = base.id();
    assert!(base.is_active());

    let later = t0() + Duration::hours(1);
    base.deactivate(later);
    assert!(!base.is_active());
    assert_eq!(base.updated_at(), later);

    base.deactivate(later + Duration::hours(1));
    assert_eq!(base.updated_at(), later);

    base.activate(later + Duration::hours(2));
    assert!(base.is_active());
    assert_eq!(base.id(), id);
    assert_eq!(base.created_at(), t0());
  }

  // --- LoginAttempt -------------------------------------------------------

  #[test]
  fn test_login_attempt_starts_clean() {
    let attempt = LoginAttempt::create();

    assert_eq!(attempt.failed_attempts(), 0);
    assert_eq!(attempt.last_failed_at(), None);
    assert_eq!(attempt.locked_until(), None);
    assert!(!attempt.is_locked(t0()));
    assert_eq!(attempt.lock_message(t0()), None);
  }

  #[test]
  fn test_failures_below_threshold_do_not_lock() {
    let attempt = failed_times(LoginAttempt::create(), 4, t0());

    assert_eq!(attempt.failed_attempts(), 4);
    assert_eq!(attempt.last_failed_at(), Some(t0()));
    assert!(!attempt.is_locked(t0()));
  }

  #[test]
  fn test_fifth_failure_locks_for_fifteen_minutes() {
    let attempt = failed_times(LoginAttempt::create(), 5, t0());

    assert_eq!(attempt.failed_attempts(), 5);
    assert_eq!(attempt.locked_until(), Some(t0() + Duration::minutes(15)));
    assert!(attempt.is_locked(t0()));
  }

  #[test]
  fn test_failure_carries_forward_previous_lock_below_threshold() {
    let until = t0() + Duration::minutes(3);
    let restored = LoginAttempt::restore(1, Some(t0()), Some(until));

    let next = restored.register_failure(t0() + Duration::seconds(5));

    assert_eq!(next.failed_attempts(), 2);
    assert_eq!(next.locked_until(), Some(until));
  }

  #[test]
  fn test_lock_expires_lazily() {
    let attempt = failed_times(LoginAttempt::create(), 5, t0());
    let until = attempt.locked_until().unwrap();

    assert!(attempt.is_locked(until - Duration::seconds(1)));
    assert!(!attempt.is_locked(until));
    assert!(!attempt.is_locked(until + Duration::seconds(1)));
    assert_eq!(attempt.failed_attempts(), 5);
  }

  #[test]
  fn test_reset_after_lock() {
    let locked = failed_times(LoginAttempt::create(), 5, t0());
    let reset = locked.reset();

    assert_eq!(reset.failed_attempts(), 0);
    assert_eq!(reset.locked_until(), None);
    assert!(!reset.is_locked(t0()));
  }

  #[test]
  fn test_success_after_four_failures_matches_fresh_record() {
    let attempt = failed_times(LoginAttempt::create(), 4, t0());
    assert!(!attempt.is_locked(t0()));

    let after_success = attempt.apply(LoginAttemptEvent::Success);

    assert_eq!(after_success, LoginAttempt::create());
    assert!(after_success.is_clean());
  }

  #[test]
  fn test_transitions_do_not_mutate_previous_version() {
    let first = LoginAttempt::create();
    let second = first.register_failure(t0());

    assert_eq!(first.failed_attempts(), 0);
    assert_eq!(second.failed_attempts(), 1);
  }

  #[test]
  fn test_lock_message_units() {
    let attempt = failed_times(LoginAttempt::create(), 5, t0());
    let until = attempt.locked_until().unwrap();

    assert_eq!(
      attempt.lock_message(t0()).as_deref(),
      Some("Account is temporarily locked. Try again in 15 minutes.")
    );
    assert_eq!(
      attempt
        .lock_message(until - Duration::seconds(61))
        .as_deref(),
      Some("Account is temporarily locked. Try again in 2 minutes.")
    );
    assert_eq!(
      attempt
        .lock_message(until - Duration::milliseconds(59_500))
        .as_deref(),
      Some("Account is temporarily locked. Try again in 60 seconds.")
    );
    assert_eq!(
      attempt
        .lock_message(until - Duration::seconds(10))
        .as_deref(),
      Some("Account is temporarily locked. Try again in 10 seconds.")
    );
    assert_eq!(
      attempt
        .lock_message(until - Duration::microseconds(500))
        .as_deref(),
      Some("Account is temporarily locked. Try again in 1 second.")
    );
    assert_eq!(
      attempt
        .lock_message(until - Duration::seconds(60))
        .as_deref(),
      Some("Account is temporarily locked. Try again in 1 minute.")
    );
    assert_eq!(attempt.lock_message(until), None);
  }

  #[test]
  fn test_sub_millisecond_lock_rounds_up() {
    let attempt = LoginAttempt::restore(5, Some(t0()), Some(t0() + Duration::microseconds(500)));

    assert!(attempt.is_locked(t0()));
    assert_eq!(
      attempt.lock_message(t0()).as_deref(),
      Some("Account is temporarily locked. Try again in 1 second.")
    );
  }

  #[test]
  fn test_failure_after_expired_lock_relocks() {
    let attempt = failed_times(LoginAttempt::create(), 5, t0());
    let expired_at = attempt.locked_until().unwrap() + Duration::minutes(1);
    assert!(!attempt.is_locked(expired_at));

    let next = attempt.register_failure(expired_at);

    assert_eq!(next.failed_attempts(), 6);
    assert_eq!(next.locked_until(), Some(expired_at + Duration::minutes(15)));
    assert!(next.is_locked(expired_at));
  }

  // --- Password -----------------------------------------------------------

  #[test]
  fn test_password_policy() {
    assert_eq!(Password::validate("Abcdef1!"), Ok(()));
    assert_eq!(Password::validate(""), Err(ValidationError::PasswordEmpty));
    assert_eq!(
      Password::validate("abcdefgh"),
      Err(ValidationError::PasswordMissingUppercase)
    );
    assert_eq!(
      Password::validate("Abc1!"),
      Err(ValidationError::PasswordTooShort { min: 8 })
    );
    assert_eq!(
      Password::validate(&format!("Abcdef1!{}", "x".repeat(17))),
      Err(ValidationError::PasswordTooLong { max: 24 })
    );
    assert_eq!(
      Password::validate("ABCDEFG1!"),
      Err(ValidationError::PasswordMissingLowercase)
    );
    assert_eq!(
      Password::validate("Abcdefgh!"),
      Err(ValidationError::PasswordMissingDigit)
    );
    assert_eq!(
      Password::validate("Abcdefg1_"),
      Err(ValidationError::PasswordMissingSpecial)
    );
  }

  #[test]
  fn test_password_length_counts_characters() {
    // 24 characters, several of them multi-byte
    let password = format!("Ábcdéf1!{}", "ç".repeat(16));
    assert_eq!(password.chars().count(), 24);
    assert_eq!(Password::validate(&password), Ok(()));
  }

  #[test]
  fn test_password_confirmation() {
    assert_eq!(
      Password::validate_with_confirmation("Abcdef1!", "Abcdef1!"),
      Ok(())
    );
    assert_eq!(
      Password::validate_with_confirmation("Abcdef1!", ""),
      Err(ValidationError::ConfirmationEmpty)
    );
    assert_eq!(
      Password::validate_with_confirmation("Abcdef1!", "Abcdef1?"),
      Err(ValidationError::ConfirmationMismatch)
    );
    assert_eq!(
      Password::validate_with_confirmation("weak", "weak"),
      Err(ValidationError::PasswordTooShort { min: 8 })
    );
  }

  #[test]
  fn test_password_create() {
    let user_id = UserId::new();
    let password = Password::create(user_id, "hashed", PasswordStatus::FirstAccess).unwrap();

    assert_eq!(password.user_id(), user_id);
    assert_eq!(password.value().as_str(), "hashed");
    assert_eq!(password.status(), PasswordStatus::FirstAccess);
    assert!(password.login_attempt().is_clean());

    assert_eq!(
      Password::create(user_id, "", PasswordStatus::Active),
      Err(ValidationError::EmptyPasswordHash)
    );
  }

  #[test]
  fn test_password_restore_requires_login_attempt() {
    let user_id = UserId::new();

    let err = Password::restore(user_id, "hashed", PasswordStatus::Active, None).unwrap_err();
    assert!(matches!(
      err,
      AuthError::Invariant(InvariantViolation::MissingLoginAttempt { .. })
    ));

    let attempt = LoginAttempt::restore(2, Some(t0()), None);
    let restored =
      Password::restore(user_id, "hashed", PasswordStatus::Active, Some(attempt.clone())).unwrap();
    assert_eq!(restored.login_attempt(), &attempt);
  }

  #[test]
  fn test_password_lifecycle() {
    let mut password =
      Password::create(UserId::new(), "hashed", PasswordStatus::Active).unwrap();

    for _ in 0..5 {
      password.record_failure(t0());
    }
    assert!(password.is_locked(t0()));
    assert!(!password.can_authenticate(t0()));

    password.unlock();
    assert!(password.can_authenticate(t0()));

    password.record_failure(t0());
    password.change("new-hash").unwrap();
    assert_eq!(password.value().as_str(), "new-hash");
    assert_eq!(password.status(), PasswordStatus::Active);
    assert!(password.login_attempt().is_clean());

    password.set_status(PasswordStatus::Blocked);
    assert!(!password.can_authenticate(t0()));
  }

  // --- User ---------------------------------------------------------------

  #[test]
  fn test_user_create_trims_and_normalizes() {
    let user = ana(Role::User).unwrap();

    assert_eq!(user.first_name(), "Ana");
    assert_eq!(user.last_name(), "Silva");
    assert_eq!(user.full_name(), "Ana Silva");
    assert_eq!(user.email().as_str(), "ana.silva@example.com");
    assert_eq!(user.contact(), "+55 11 99999-0000");
    assert_eq!(user.role(), Role::User);
    assert!(user.is_active());
    assert_ne!(user.id().into_inner(), user.user_identifier().into_inner());
  }

  #[test]
  fn test_user_create_rejects_invalid_input() {
    assert_eq!(
      User::create("  ", "Silva", "", "ana@x.com", "", Role::User, t0()),
      Err(ValidationError::missing("first_name"))
    );
    assert_eq!(
      User::create("Ana", "", "", "ana@x.com", "", Role::User, t0()),
      Err(ValidationError::missing("last_name"))
    );
    assert_eq!(
      User::create("Ana", "Silva", "", "  ", "", Role::User, t0()),
      Err(ValidationError::EmptyEmail)
    );
    assert_eq!(
      User::create("Ana", "Silva", "", "ana@x.com", "", 9_i32, t0()),
      Err(ValidationError::UnknownRole(9))
    );
    assert!(User::create("Ana", "Silva", "", "ana@x.com", "", 1_i32, t0()).is_ok());
  }

  #[test]
  fn test_user_identifiers_are_unique() {
    let first = ana(Role::Developer).unwrap();
    let second = ana(Role::Developer).unwrap();

    assert_ne!(first.id(), second.id());
    assert_ne!(first.user_identifier(), second.user_identifier());
  }

  #[test]
  fn test_user_read_revalidates_record() {
    let user = ana(Role::Administrator).unwrap();
    let record = user.to_record();

    let restored = User::read(record.clone()).unwrap();
    assert_eq!(restored, user);

    let tampered = UserRecord { role: 42, ..record };
    assert_eq!(User::read(tampered), Err(ValidationError::UnknownRole(42)));
  }

  #[test]
  fn test_user_soft_delete_keeps_identity() {
    let mut user = ana(Role::User).unwrap();
    let id = user.id();

    user.deactivate(t0() + Duration::days(1));
    assert!(!user.is_active());
    assert_eq!(user.id(), id);

    user.activate(t0() + Duration::days(2));
    assert!(user.is_active());
  }
}
