//! Application layer
//!
//! This layer contains use cases that orchestrate domain logic to implement
//! application-specific workflows. Use cases turn raw commands into domain
//! values, call the domain services and shape the responses handed to
//! presentation and token collaborators.

pub mod auth;
