//! HTTP API: controllers for bookings and users, plus server wiring.

pub mod app;
pub mod config;
pub mod middleware;
