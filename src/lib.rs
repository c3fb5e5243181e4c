//! Credential lifecycle and account lockout for user authentication.
//!
//! The `domain` layer holds the validated entities (`User`, `Email`,
//! `Password`, `LoginAttempt`) and the ports external collaborators
//! implement. The `application` layer wraps `AuthService` in use cases, and
//! `infrastructure` provides clocks and configuration loading.

pub mod application;
pub mod domain;
pub mod infrastructure;
