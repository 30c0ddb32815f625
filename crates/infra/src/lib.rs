//! Infrastructure layer: persistence behind the repository contracts.

pub mod repository;
