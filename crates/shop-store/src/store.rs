//! # Store Trait
//!
//! Trait boundary over the document store. One method per store operation
//! the API performs; handlers receive a shared handle and never touch the
//! driver directly, so the connection lifecycle stays explicit and tests
//! can swap in [`crate::MemoryStore`].

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Bson, Document};
use serde::{Deserialize, Serialize};
use shop_core::{Order, ShopError, ShopResult, Tool, User};
use std::sync::Arc;

/// Outcome of an insert, echoed back as the response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertOutcome {
    /// Hex form of the new document's id
    pub inserted_id: String,
}

/// Outcome of an upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
    /// Set when the upsert inserted rather than updated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upserted_id: Option<String>,
}

/// Outcome of an update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Outcome of a delete; deleting an absent document is count 0, not an error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted_count: u64,
}

/// Filter-based operations against the marketplace collections.
///
/// "Not found" is `Ok(None)` throughout; only store failures and malformed
/// identifiers are errors.
#[async_trait]
pub trait Store: Send + Sync {
    // Tools
    async fn list_tools(&self) -> ShopResult<Vec<Tool>>;
    async fn insert_tool(&self, tool: &Tool) -> ShopResult<InsertOutcome>;
    async fn get_tool(&self, id: &str) -> ShopResult<Option<Tool>>;
    async fn delete_tool(&self, id: &str) -> ShopResult<DeleteOutcome>;

    // Users
    /// Insert-or-update by email with field-level merge: only the submitted
    /// top-level fields change, everything else on the record is kept.
    async fn upsert_user(&self, email: &str, fields: Document) -> ShopResult<UpsertOutcome>;
    async fn get_user(&self, email: &str) -> ShopResult<Option<User>>;
    async fn list_users(&self) -> ShopResult<Vec<User>>;

    // Orders
    async fn insert_order(&self, order: &Order) -> ShopResult<InsertOutcome>;
    async fn orders_for_email(&self, email: &str) -> ShopResult<Vec<Order>>;
    async fn get_order(&self, id: &str) -> ShopResult<Option<Order>>;
    async fn delete_order(&self, id: &str) -> ShopResult<DeleteOutcome>;
    /// Set `paid = true` and record the provider transaction id.
    /// Idempotent: repeating the call matches but modifies nothing.
    async fn mark_order_paid(&self, id: &str, transaction_id: &str) -> ShopResult<UpdateOutcome>;

    // Reviews
    async fn insert_review(&self, review: Document) -> ShopResult<InsertOutcome>;

    /// Release the underlying connection. Default is a no-op.
    async fn close(&self) {}
}

/// Type alias for a shared store handle (dynamic dispatch)
pub type BoxedStore = Arc<dyn Store>;

/// Parse a path identifier into a store-native ObjectId.
/// Malformed ids are rejected before they reach the store.
pub fn parse_object_id(id: &str) -> ShopResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| ShopError::InvalidId { id: id.to_string() })
}

/// Hex form of an inserted id, falling back to the raw BSON display
pub(crate) fn hex_id(id: Bson) -> String {
    id.as_object_id()
        .map(|oid| oid.to_hex())
        .unwrap_or_else(|| id.to_string())
}
