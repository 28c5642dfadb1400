//! # Request Handlers
//!
//! Axum request handlers for the marketplace API. Each handler performs
//! exactly one store operation (or one payment-provider call) and returns
//! its result as the response body.

use crate::auth::Claims;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bson::Document;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shop_core::{intent_amount, Currency, Order, ShopError, Tool, User};
use shop_store::{DeleteOutcome, InsertOutcome, UpdateOutcome, UpsertOutcome};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create order request; any extra checkout-form fields ride along opaquely
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Customer email (caller-supplied, trusted)
    pub customer_email: String,
    /// Unit price in major units
    pub price: f64,
    /// Quantity ordered
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    /// Opaque extra fields (address, phone, ...)
    #[serde(flatten)]
    pub extra: Document,
}

fn default_quantity() -> i64 {
    1
}

/// Mark-paid request carrying the provider transaction id
#[derive(Debug, Deserialize)]
pub struct MarkPaidRequest {
    pub transaction_id: String,
}

/// Payment intent request
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    /// Unit price in major units
    pub price: f64,
    /// Quantity
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Payment intent response: the provider's client secret, verbatim
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// Upsert response: the store outcome plus a fresh token for the account
#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertUserResponse {
    pub result: UpsertOutcome,
    pub token: String,
}

/// Query string for the my-orders listing
#[derive(Debug, Deserialize)]
pub struct MyOrdersQuery {
    pub email: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

pub(crate) fn error_response(err: ShopError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.to_string())))
}

/// Convert an opaque JSON body into a store document
fn body_to_document(body: &Value, what: &str) -> Result<Document, (StatusCode, Json<ErrorResponse>)> {
    if !body.is_object() {
        return Err(error_response(ShopError::InvalidRequest(format!(
            "{what} body must be a JSON object"
        ))));
    }
    bson::to_document(body).map_err(|e| error_response(ShopError::Serialization(e.to_string())))
}

type HandlerResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

// =============================================================================
// Liveness
// =============================================================================

/// Liveness string at the root path
pub async fn liveness() -> &'static str {
    "Tool House server is running"
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "tool-house",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

// =============================================================================
// Catalog Handlers
// =============================================================================

/// List all tools (full collection scan, no pagination)
pub async fn list_tools(State(state): State<AppState>) -> HandlerResult<Vec<Tool>> {
    state.store.list_tools().await.map(Json).map_err(error_response)
}

/// Add a tool to the catalog
#[instrument(skip(state, tool), fields(price = tool.price))]
pub async fn create_tool(
    State(state): State<AppState>,
    Json(tool): Json<Tool>,
) -> HandlerResult<InsertOutcome> {
    let outcome = state.store.insert_tool(&tool).await.map_err(error_response)?;
    info!("Added tool to catalog: id={}", outcome.inserted_id);
    Ok(Json(outcome))
}

/// Get one tool by id; an absent id is `null`, not an error
pub async fn get_tool(
    _claims: Claims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Option<Tool>> {
    state.store.get_tool(&id).await.map(Json).map_err(error_response)
}

/// Delete one tool by id; deleting an absent tool counts zero
pub async fn delete_tool(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<DeleteOutcome> {
    state.store.delete_tool(&id).await.map(Json).map_err(error_response)
}

// =============================================================================
// User Handlers
// =============================================================================

/// Upsert a user by email and issue a fresh token.
///
/// The submitted fields merge field-level into any existing record; the
/// email path parameter always wins over an email field in the body.
#[instrument(skip(state, body), fields(email = %email))]
pub async fn upsert_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(body): Json<Value>,
) -> HandlerResult<UpsertUserResponse> {
    let fields = body_to_document(&body, "user")?;

    let result = state
        .store
        .upsert_user(&email, fields)
        .await
        .map_err(error_response)?;

    let token = state.tokens.issue(&email).map_err(error_response)?;

    Ok(Json(UpsertUserResponse { result, token }))
}

/// List all users
pub async fn list_users(
    _claims: Claims,
    State(state): State<AppState>,
) -> HandlerResult<Vec<User>> {
    state.store.list_users().await.map(Json).map_err(error_response)
}

/// Get one user by email
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> HandlerResult<Option<User>> {
    state.store.get_user(&email).await.map(Json).map_err(error_response)
}

// =============================================================================
// Order Handlers
// =============================================================================

/// Place an order; `paid` starts false until payment is confirmed
#[instrument(skip(state, request), fields(email = %request.customer_email))]
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> HandlerResult<InsertOutcome> {
    let order = Order::new(request.customer_email, request.price, request.quantity)
        .with_extra(request.extra);

    let outcome = state.store.insert_order(&order).await.map_err(error_response)?;
    info!("Order placed: id={}", outcome.inserted_id);
    Ok(Json(outcome))
}

/// List the authenticated user's orders.
///
/// The one access-control decision in the system: the token email must
/// match the query email, otherwise 403 and no orders are returned.
pub async fn my_orders(
    claims: Claims,
    State(state): State<AppState>,
    Query(query): Query<MyOrdersQuery>,
) -> HandlerResult<Vec<Order>> {
    if claims.email != query.email {
        return Err(error_response(ShopError::Forbidden));
    }

    state
        .store
        .orders_for_email(&query.email)
        .await
        .map(Json)
        .map_err(error_response)
}

/// Get one order by id
pub async fn get_order(
    _claims: Claims,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Option<Order>> {
    state.store.get_order(&id).await.map(Json).map_err(error_response)
}

/// Delete one order by id
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<DeleteOutcome> {
    state.store.delete_order(&id).await.map(Json).map_err(error_response)
}

/// Mark an order paid, storing the provider transaction id
#[instrument(skip(state, request), fields(order_id = %id))]
pub async fn mark_order_paid(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<MarkPaidRequest>,
) -> HandlerResult<UpdateOutcome> {
    let outcome = state
        .store
        .mark_order_paid(&id, &request.transaction_id)
        .await
        .map_err(error_response)?;

    info!(
        "Order {} marked paid: matched={}, txn={}",
        id, outcome.matched_count, request.transaction_id
    );
    Ok(Json(outcome))
}

// =============================================================================
// Payment Handler
// =============================================================================

/// Create a payment intent for price x quantity, in minor units
#[instrument(skip(state, request), fields(price = request.price, quantity = request.quantity))]
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> HandlerResult<CreateIntentResponse> {
    let amount = intent_amount(request.price, request.quantity, Currency::USD);

    let intent = state
        .payments
        .create_intent(amount, Currency::USD)
        .await
        .map_err(|e| {
            error!("Failed to create payment intent: {}", e);
            error_response(e)
        })?;

    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

// =============================================================================
// Review Handler
// =============================================================================

/// Append a review document; no validation, no association check
pub async fn add_review(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> HandlerResult<InsertOutcome> {
    let review = body_to_document(&body, "review")?;
    state.store.insert_review(review).await.map(Json).map_err(error_response)
}
