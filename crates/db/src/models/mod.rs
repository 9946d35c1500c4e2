//! Row models.
//!
//! Each submodule contains a `FromRow` + `Serialize` struct matching a table.
//! Validated insert/update inputs live in `candy_core`.

pub mod candy_item;
