//! # User Types
//!
//! Users are keyed by email (unique per account). The profile is whatever
//! the client submits; the service never interprets it.

use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

/// A user record, upserted by email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Upsert key, unique per account
    pub email: String,

    /// Opaque profile fields
    #[serde(flatten)]
    pub profile: Document,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            profile: Document::new(),
        }
    }
}
