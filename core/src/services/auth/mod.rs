//! Authentication service module
//!
//! Orchestrates the two-phase email OTP registration and login flows over
//! the OTP registry, the user repository, the token service, and the
//! mailer.

mod config;
pub mod email_utils;
mod service;
mod traits;


pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use traits::Mailer;
