//! Report shapes: batch outcome, period aggregates and search results.

use crate::model::{IngredientUsage, MenuItemId, OrderId, OrderStatus};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;

/// Outcome of one draft in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReport {
    /// Absent when the order was rejected before being stored.
    pub order_id: Option<OrderId>,
    pub customer_name: String,
    pub status: BatchOutcome,
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOutcome {
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_orders: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub total_revenue: Decimal,
    pub inventory_updates: Vec<IngredientUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResponse {
    /// In completion order.
    pub order_reports: Vec<OrderReport>,
    pub summary: BatchSummary,
}

/// Bucket granularity of the period report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Month,
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Day => "day",
            Self::Month => "month",
        })
    }
}

/// Units ordered in closed orders, per day of a month or per month of a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderedItemsByPeriod {
    pub period: Period,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    pub year: i32,
    /// Day of month or month number -> units. Empty buckets are omitted.
    pub ordered_items: BTreeMap<u32, u64>,
}

/// A menu item matching a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuMatch {
    pub product_id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub relevance: f64,
}

/// An order matching a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderMatch {
    pub order_id: OrderId,
    pub customer_name: String,
    pub status: OrderStatus,
    /// Names of the ordered menu items.
    pub items: Vec<String>,
    pub total: Decimal,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub menu_items: Vec<MenuMatch>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub orders: Vec<OrderMatch>,
    pub total_matches: usize,
}
