//! # recx Storage
//!
//! Storage layer for the recx recommendation engine: a durable, ordered
//! catalog of [`recx_core::Record`]s with atomic writes and a title
//! uniqueness invariant.

pub mod catalog;

pub use catalog::Catalog;
