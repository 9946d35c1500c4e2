//! Request handlers.
//!
//! Each submodule provides async handler functions for a single resource.
//! Handlers validate request bodies through `candy_core`, delegate to the
//! record store held in [`crate::state::AppState`] and map errors via
//! [`crate::error::AppError`].

pub mod candy_item;
