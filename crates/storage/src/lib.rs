//! Storage abstraction and implementations for DevMate.
//!
//! This crate provides a trait-based storage interface with a JSON-file
//! reference implementation and an in-memory backend for tests and
//! ephemeral runs.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{Result, Storage, StorageError};
pub use json_storage::JsonStorage;
pub use memory::MemoryStorage;
