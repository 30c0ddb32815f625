//! Users domain module.
//!
//! User identity is assigned outside this system (identity provider subject),
//! so the id travels in with the record rather than being generated here.

pub mod user;

pub use user::{User, UserDto};
