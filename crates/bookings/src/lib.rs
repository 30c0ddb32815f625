//! Bookings domain module (car rentals booked by users).
//!
//! Plain records only. No IO, no HTTP, no storage.

pub mod booking;

pub use booking::{Booking, BookingDto};
