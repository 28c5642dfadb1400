//! # shop-store
//!
//! Document store seam for the tool-house backend.
//!
//! This crate provides:
//! - `Store` trait: filter-based find/insert/update/delete over the
//!   `tools`, `users`, `orders`, and `reviews` collections
//! - `MongoStore`: implementation on the official MongoDB driver
//! - `MemoryStore`: in-process implementation for tests and local runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use shop_store::{BoxedStore, MongoStore};
//! use std::sync::Arc;
//!
//! let store = MongoStore::connect("mongodb://127.0.0.1:27017", "tool-house").await?;
//! let store: BoxedStore = Arc::new(store);
//!
//! let tools = store.list_tools().await?;
//!
//! // On shutdown
//! store.close().await;
//! ```

pub mod memory;
pub mod mongo;
pub mod store;

// Re-exports
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{
    parse_object_id, BoxedStore, DeleteOutcome, InsertOutcome, Store, UpdateOutcome, UpsertOutcome,
};
