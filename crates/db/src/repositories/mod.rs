//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod candy_item_repo;

pub use candy_item_repo::CandyItemRepo;
