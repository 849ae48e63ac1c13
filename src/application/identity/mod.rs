//! Identity module - users and permissions
//!
//! Contains the `UserService` which orchestrates sign-up, credential
//! checks and permission checks.

pub mod service;

pub use service::UserService;
