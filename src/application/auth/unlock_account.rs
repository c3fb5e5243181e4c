use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::UserId;

/// Response after an administrative unlock
#[derive(Debug, Clone)]
pub struct UnlockAccountResponse {
  pub user_id: Uuid,
  pub failed_attempts: u32,
}

/// Use case for clearing a user's lockout
pub struct UnlockAccountUseCase {
  auth_service: Arc<AuthService>,
}

impl UnlockAccountUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<UnlockAccountResponse, AuthError> {
    let password = self
      .auth_service
      .unlock_account(UserId::from_uuid(user_id))
      .await?;

    Ok(UnlockAccountResponse {
      user_id: password.user_id().into_inner(),
      failed_attempts: password.login_attempt().failed_attempts(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::ports::{
    MockPasswordHasher, MockPasswordRepository, MockUserRepository,
  };
  use crate::domain::auth::services::AuthServiceConfig;
  use crate::infrastructure::clock::SystemClock;

  #[tokio::test]
  async fn test_unlock_unknown_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().returning(|_| Ok(None));

    let service = AuthService::new(
      Arc::new(users),
      Arc::new(MockPasswordRepository::new()),
      Arc::new(MockPasswordHasher::new()),
      Arc::new(SystemClock),
      AuthServiceConfig::default(),
    );

    let result = UnlockAccountUseCase::new(Arc::new(service))
      .execute(Uuid::new_v4())
      .await;

    assert!(matches!(result, Err(AuthError::UserNotFound)));
  }
}
