//! # Storage Layer
//!
//! This module defines the storage abstraction for taskz. The [`StringStore`]
//! trait is a deliberately small key-value string facility: the book hands it
//! one serialized value under one fixed key and expects it back verbatim.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (database, cloud, etc.) without changing core logic
//! - Keep the book **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Each key is stored as `<key>.json` under a root directory
//!   - The directory is created on first write
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Failure Semantics
//!
//! `read` distinguishes "absent" (`Ok(None)`) from real I/O failures; callers
//! that want the weaker "absent or unreadable, same thing" contract flatten
//! it themselves. `remove` on an absent key is not an error.

use crate::error::Result;
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract key-value string storage.
pub trait StringStore {
    /// Read the value under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, overwriting any prior value.
    fn write(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Where the value for `key` lives on disk, for backends that have one.
    fn location(&self, _key: &str) -> Option<PathBuf> {
        None
    }
}
