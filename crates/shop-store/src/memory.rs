//! # In-Memory Store
//!
//! [`Store`] implementation over plain vectors of documents. Used by the
//! API tests and for local development without a running MongoDB.
//! Mirrors the store's semantics: upserts merge field-level, deletes of
//! absent documents count zero, lookups of absent ids are `None`.

use crate::store::{
    parse_object_id, DeleteOutcome, InsertOutcome, Store, UpdateOutcome, UpsertOutcome,
};
use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::Document;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shop_core::{Order, ShopError, ShopResult, Tool, User};
use std::sync::RwLock;

/// Document store held entirely in process memory
#[derive(Default)]
pub struct MemoryStore {
    tools: RwLock<Vec<Document>>,
    users: RwLock<Vec<Document>>,
    orders: RwLock<Vec<Document>>,
    reviews: RwLock<Vec<Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn decode<T: DeserializeOwned>(doc: &Document) -> ShopResult<T> {
    bson::from_document(doc.clone()).map_err(|e| ShopError::Serialization(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> ShopResult<Document> {
    bson::to_document(value).map_err(|e| ShopError::Serialization(e.to_string()))
}

fn has_id(doc: &Document, oid: ObjectId) -> bool {
    doc.get_object_id("_id").map_or(false, |id| id == oid)
}

fn has_email(doc: &Document, email: &str) -> bool {
    doc.get_str("email").map_or(false, |e| e == email)
}

fn insert_doc(rows: &RwLock<Vec<Document>>, mut doc: Document) -> InsertOutcome {
    let oid = ObjectId::new();
    doc.insert("_id", oid);
    rows.write().expect("store lock poisoned").push(doc);
    InsertOutcome {
        inserted_id: oid.to_hex(),
    }
}

fn find_doc<T: DeserializeOwned>(rows: &RwLock<Vec<Document>>, id: &str) -> ShopResult<Option<T>> {
    let oid = parse_object_id(id)?;
    let rows = rows.read().expect("store lock poisoned");
    rows.iter()
        .find(|doc| has_id(doc, oid))
        .map(decode)
        .transpose()
}

fn delete_doc(rows: &RwLock<Vec<Document>>, id: &str) -> ShopResult<DeleteOutcome> {
    let oid = parse_object_id(id)?;
    let mut rows = rows.write().expect("store lock poisoned");
    let before = rows.len();
    rows.retain(|doc| !has_id(doc, oid));
    Ok(DeleteOutcome {
        deleted_count: (before - rows.len()) as u64,
    })
}

fn list_docs<T: DeserializeOwned>(rows: &RwLock<Vec<Document>>) -> ShopResult<Vec<T>> {
    let rows = rows.read().expect("store lock poisoned");
    rows.iter().map(decode).collect()
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_tools(&self) -> ShopResult<Vec<Tool>> {
        list_docs(&self.tools)
    }

    async fn insert_tool(&self, tool: &Tool) -> ShopResult<InsertOutcome> {
        Ok(insert_doc(&self.tools, encode(tool)?))
    }

    async fn get_tool(&self, id: &str) -> ShopResult<Option<Tool>> {
        find_doc(&self.tools, id)
    }

    async fn delete_tool(&self, id: &str) -> ShopResult<DeleteOutcome> {
        delete_doc(&self.tools, id)
    }

    async fn upsert_user(&self, email: &str, fields: Document) -> ShopResult<UpsertOutcome> {
        let mut set = fields;
        set.insert("email", email);

        let mut users = self.users.write().expect("store lock poisoned");
        if let Some(doc) = users.iter_mut().find(|d| has_email(d, email)) {
            let before = doc.clone();
            for (key, value) in set {
                doc.insert(key, value);
            }
            let modified = u64::from(*doc != before);
            Ok(UpsertOutcome {
                matched_count: 1,
                modified_count: modified,
                upserted_id: None,
            })
        } else {
            let oid = ObjectId::new();
            let mut doc = Document::new();
            doc.insert("_id", oid);
            for (key, value) in set {
                doc.insert(key, value);
            }
            users.push(doc);
            Ok(UpsertOutcome {
                matched_count: 0,
                modified_count: 0,
                upserted_id: Some(oid.to_hex()),
            })
        }
    }

    async fn get_user(&self, email: &str) -> ShopResult<Option<User>> {
        let users = self.users.read().expect("store lock poisoned");
        users
            .iter()
            .find(|doc| has_email(doc, email))
            .map(decode)
            .transpose()
    }

    async fn list_users(&self) -> ShopResult<Vec<User>> {
        list_docs(&self.users)
    }

    async fn insert_order(&self, order: &Order) -> ShopResult<InsertOutcome> {
        Ok(insert_doc(&self.orders, encode(order)?))
    }

    async fn orders_for_email(&self, email: &str) -> ShopResult<Vec<Order>> {
        let orders = self.orders.read().expect("store lock poisoned");
        orders
            .iter()
            .filter(|doc| doc.get_str("customer_email").map_or(false, |e| e == email))
            .map(decode)
            .collect()
    }

    async fn get_order(&self, id: &str) -> ShopResult<Option<Order>> {
        find_doc(&self.orders, id)
    }

    async fn delete_order(&self, id: &str) -> ShopResult<DeleteOutcome> {
        delete_doc(&self.orders, id)
    }

    async fn mark_order_paid(&self, id: &str, transaction_id: &str) -> ShopResult<UpdateOutcome> {
        let oid = parse_object_id(id)?;
        let mut orders = self.orders.write().expect("store lock poisoned");
        match orders.iter_mut().find(|doc| has_id(doc, oid)) {
            Some(doc) => {
                let before = doc.clone();
                doc.insert("paid", true);
                doc.insert("transaction_id", transaction_id);
                Ok(UpdateOutcome {
                    matched_count: 1,
                    modified_count: u64::from(*doc != before),
                })
            }
            None => Ok(UpdateOutcome {
                matched_count: 0,
                modified_count: 0,
            }),
        }
    }

    async fn insert_review(&self, review: Document) -> ShopResult<InsertOutcome> {
        Ok(insert_doc(&self.reviews, review))
    }
}
