//! Typed REST helpers for the warehouse endpoints.
//!
//! ERROR HANDLING
//! ==============
//! Every helper routes through the authenticated gateway, so token refresh
//! and session expiry are already handled by the time a result comes back.
//! Bodies that do not match the expected shape map to `MalformedResponse`;
//! pages render the error inline instead of crashing.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde_json::{Value, json};
use session::error::ApiError;
use session::gateway::ApiGateway;

/// An inventory item row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub quantity: i64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Fields for creating an inventory item.
#[derive(Debug, Clone)]
pub struct ItemDraft {
    pub name: String,
    pub sku: String,
    pub quantity: i64,
}

/// An item category with its search keywords.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A storage location.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageLocation {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub capacity: Option<i64>,
}

/// One stock movement (receipt, issue, or transfer).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub item_name: String,
    pub quantity: i64,
    pub created_at: String,
}

/// Aggregate stock counts for the dashboard and reports.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSummary {
    pub total_items: i64,
    pub total_quantity: i64,
    pub low_stock: i64,
}

fn items_path(search: &str) -> String {
    let search = search.trim();
    if search.is_empty() {
        "/items".to_owned()
    } else {
        format!("/items?search={search}")
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|_| ApiError::MalformedResponse)
}

/// List items, optionally filtered by a search term.
///
/// # Errors
///
/// Propagates gateway errors; a body that is not an item list is
/// `MalformedResponse`.
pub async fn fetch_items(gateway: &ApiGateway, search: &str) -> Result<Vec<Item>, ApiError> {
    decode(gateway.get(&items_path(search)).await?)
}

/// Create an inventory item and return the stored row.
///
/// # Errors
///
/// Propagates gateway errors; an unexpected body is `MalformedResponse`.
pub async fn create_item(gateway: &ApiGateway, draft: &ItemDraft) -> Result<Item, ApiError> {
    let body = json!({
        "name": draft.name,
        "sku": draft.sku,
        "quantity": draft.quantity,
    });
    decode(gateway.post("/items", body).await?)
}

/// List item categories.
///
/// # Errors
///
/// Propagates gateway errors; an unexpected body is `MalformedResponse`.
pub async fn fetch_categories(gateway: &ApiGateway) -> Result<Vec<Category>, ApiError> {
    decode(gateway.get("/categories").await?)
}

/// List storage locations.
///
/// # Errors
///
/// Propagates gateway errors; an unexpected body is `MalformedResponse`.
pub async fn fetch_locations(gateway: &ApiGateway) -> Result<Vec<StorageLocation>, ApiError> {
    decode(gateway.get("/locations").await?)
}

/// List stock movements, newest first as served.
///
/// # Errors
///
/// Propagates gateway errors; an unexpected body is `MalformedResponse`.
pub async fn fetch_transactions(gateway: &ApiGateway) -> Result<Vec<TransactionRecord>, ApiError> {
    decode(gateway.get("/transactions").await?)
}

/// Fetch aggregate stock counts.
///
/// # Errors
///
/// Propagates gateway errors; an unexpected body is `MalformedResponse`.
pub async fn fetch_stock_summary(gateway: &ApiGateway) -> Result<StockSummary, ApiError> {
    decode(gateway.get("/reports/stock-summary").await?)
}
