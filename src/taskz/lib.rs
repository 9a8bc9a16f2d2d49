//! # Taskz Architecture
//!
//! Taskz is a **UI-agnostic task-list library**. The CLI in `main.rs` is one
//! client of it, not the point of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, paints the terminal, sets exit codes   │
//! │  - The ONLY place that knows about stdout/stderr            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (book.rs)                                             │
//! │  - TaskBook: the ordered collection + id counter            │
//! │  - Every mutation runs: mutate → persist → render           │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                       │
//!                    ▼                       ▼
//! ┌───────────────────────────┐ ┌───────────────────────────────┐
//! │  Storage (store/)         │ │  Display (display.rs)         │
//! │  - StringStore trait      │ │  - DisplaySurface trait       │
//! │  - FileStore, InMemory    │ │  - terminal impl lives in the │
//! │                           │ │    binary; tests record paints│
//! └───────────────────────────┘ └───────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `book.rs` inward, code takes regular Rust arguments, returns regular
//! Rust types, and never touches stdout, stderr, or `std::process::exit`.
//! Persistence goes through [`store::StringStore`]; painting goes through
//! [`display::DisplaySurface`]. The same core can sit behind a TUI, a web
//! handler, or a test harness.
//!
//! ## Durability Contract
//!
//! After every successful mutation the persisted value under the store key
//! equals the in-memory collection, serialized as one JSON array. Corrupt or
//! absent persisted data is never fatal: the book opens empty and the next
//! mutation overwrites whatever was there.
//!
//! ## Module Overview
//!
//! - [`book`]: the task store & renderer, the heart of the crate
//! - [`store`]: key-value string storage abstraction and backends
//! - [`display`]: the display-surface seam
//! - [`model`]: core data types (`Task`, `Priority`)
//! - [`config`]: user configuration
//! - [`error`]: error types

pub mod book;
pub mod config;
pub mod display;
pub mod error;
pub mod model;
pub mod store;
