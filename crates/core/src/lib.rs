//! `carrent-core` — shared domain building blocks.
//!
//! Identifiers and the entity trait. No infrastructure or HTTP concerns live here.

pub mod entity;
pub mod id;

pub use entity::Entity;
pub use id::{BookingId, UserId};
