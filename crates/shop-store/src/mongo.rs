//! # MongoDB Store
//!
//! [`Store`] implementation on the official MongoDB driver. The client is
//! opened once at startup by [`MongoStore::connect`] and handed to the
//! application state; `close` shuts the connection pool down.

use crate::store::{
    hex_id, parse_object_id, DeleteOutcome, InsertOutcome, Store, UpdateOutcome, UpsertOutcome,
};
use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database};
use shop_core::{Order, ShopError, ShopResult, Tool, User};
use tracing::{debug, info};

/// Collection names
pub const TOOLS: &str = "tools";
pub const USERS: &str = "users";
pub const ORDERS: &str = "orders";
pub const REVIEWS: &str = "reviews";

/// Document store backed by MongoDB
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect to the store and verify the connection with a ping.
    pub async fn connect(uri: &str, db_name: &str) -> ShopResult<Self> {
        let client = Client::with_uri_str(uri).await.map_err(store_err)?;
        let db = client.database(db_name);

        // Fail fast at startup instead of on the first request
        db.run_command(doc! { "ping": 1 }).await.map_err(store_err)?;
        info!("Connected to document store: db={}", db_name);

        Ok(Self { client, db })
    }

    fn tools(&self) -> Collection<Tool> {
        self.db.collection(TOOLS)
    }

    fn users(&self) -> Collection<User> {
        self.db.collection(USERS)
    }

    fn orders(&self) -> Collection<Order> {
        self.db.collection(ORDERS)
    }

    fn reviews(&self) -> Collection<Document> {
        self.db.collection(REVIEWS)
    }
}

fn store_err(err: mongodb::error::Error) -> ShopError {
    ShopError::Store(err.to_string())
}

#[async_trait]
impl Store for MongoStore {
    async fn list_tools(&self) -> ShopResult<Vec<Tool>> {
        let cursor = self.tools().find(doc! {}).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn insert_tool(&self, tool: &Tool) -> ShopResult<InsertOutcome> {
        let result = self.tools().insert_one(tool).await.map_err(store_err)?;
        Ok(InsertOutcome {
            inserted_id: hex_id(result.inserted_id),
        })
    }

    async fn get_tool(&self, id: &str) -> ShopResult<Option<Tool>> {
        let oid = parse_object_id(id)?;
        self.tools()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(store_err)
    }

    async fn delete_tool(&self, id: &str) -> ShopResult<DeleteOutcome> {
        let oid = parse_object_id(id)?;
        let result = self
            .tools()
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(store_err)?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn upsert_user(&self, email: &str, fields: Document) -> ShopResult<UpsertOutcome> {
        // Field-level merge: $set only the submitted top-level fields, with
        // the email key pinned to the path parameter.
        let mut set = fields;
        set.insert("email", email);

        let result = self
            .users()
            .update_one(doc! { "email": email }, doc! { "$set": set })
            .upsert(true)
            .await
            .map_err(store_err)?;

        debug!(
            "Upserted user {}: matched={}, modified={}",
            email, result.matched_count, result.modified_count
        );

        Ok(UpsertOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(hex_id),
        })
    }

    async fn get_user(&self, email: &str) -> ShopResult<Option<User>> {
        self.users()
            .find_one(doc! { "email": email })
            .await
            .map_err(store_err)
    }

    async fn list_users(&self) -> ShopResult<Vec<User>> {
        let cursor = self.users().find(doc! {}).await.map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn insert_order(&self, order: &Order) -> ShopResult<InsertOutcome> {
        let result = self.orders().insert_one(order).await.map_err(store_err)?;
        Ok(InsertOutcome {
            inserted_id: hex_id(result.inserted_id),
        })
    }

    async fn orders_for_email(&self, email: &str) -> ShopResult<Vec<Order>> {
        let cursor = self
            .orders()
            .find(doc! { "customer_email": email })
            .await
            .map_err(store_err)?;
        cursor.try_collect().await.map_err(store_err)
    }

    async fn get_order(&self, id: &str) -> ShopResult<Option<Order>> {
        let oid = parse_object_id(id)?;
        self.orders()
            .find_one(doc! { "_id": oid })
            .await
            .map_err(store_err)
    }

    async fn delete_order(&self, id: &str) -> ShopResult<DeleteOutcome> {
        let oid = parse_object_id(id)?;
        let result = self
            .orders()
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(store_err)?;
        Ok(DeleteOutcome {
            deleted_count: result.deleted_count,
        })
    }

    async fn mark_order_paid(&self, id: &str, transaction_id: &str) -> ShopResult<UpdateOutcome> {
        let oid = parse_object_id(id)?;
        let result = self
            .orders()
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "paid": true, "transaction_id": transaction_id } },
            )
            .await
            .map_err(store_err)?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn insert_review(&self, review: Document) -> ShopResult<InsertOutcome> {
        let result = self.reviews().insert_one(review).await.map_err(store_err)?;
        Ok(InsertOutcome {
            inserted_id: hex_id(result.inserted_id),
        })
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
        info!("Document store connection closed");
    }
}
