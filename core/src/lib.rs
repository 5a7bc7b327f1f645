//! Core business logic for the VeriMail authentication backend.
//!
//! Implements passwordless email authentication: a short-lived one-time
//! code is mailed to the user, and confirming it either creates an account
//! (registration) or signs a session token (login). The crate is transport
//! agnostic; persistence, mail delivery, and token verification sit behind
//! traits so an HTTP layer or a test harness can wire in its own
//! implementations.
//!
//! # Layout
//!
//! - [`domain`] - Entities and value objects (users, challenges, claims)
//! - [`services`] - The OTP registry, auth orchestration, and JWT service
//! - [`repositories`] - Persistence traits plus an in-memory implementation
//! - [`errors`] - Error taxonomy shared by every layer

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use domain::entities::user::{User, UserRole, UserStatus};
pub use domain::value_objects::{AuthResponse, OtpRequestAck, RegistrationProfile};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::user::{InMemoryUserRepository, UserRepository};
pub use services::{
    AuthService, AuthServiceConfig, Clock, JwtTokenService, Mailer, OtpRegistry, SystemClock,
    TokenIssuer, TokenServiceConfig,
};
