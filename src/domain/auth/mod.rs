pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{EntityBase, LoginAttempt, LoginAttemptEvent, Password, User, UserRecord};
pub use errors::{AuthError, HashError, InvariantViolation, RepositoryError, ValidationError};
pub use services::{AuthService, AuthServiceConfig, RegisterUser};
pub use value_objects::{
  Email, PasswordHash, PasswordStatus, PlainPassword, Role, UserId, UserIdentifier,
};
