//! Authentication use cases
//!
//! This module contains all authentication-related use cases that orchestrate
//! domain services to implement application-specific workflows.

mod login_user;
mod register_user;
mod unlock_account;

pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
pub use unlock_account::{UnlockAccountResponse, UnlockAccountUseCase};
