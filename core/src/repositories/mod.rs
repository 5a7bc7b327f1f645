//! Repository traits abstracting persistence away from the domain core.

pub mod user;

pub use user::{InMemoryUserRepository, UserRepository};
