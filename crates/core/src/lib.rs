//! Domain types and rules for the candy catalog.
//!
//! This crate performs no I/O. It owns the shared id/timestamp aliases, the
//! domain error type, and the field rules every candy item must satisfy.

pub mod candy;
pub mod error;
pub mod types;
