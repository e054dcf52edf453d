//! # Search
//!
//! Full-text search over the menu and the orders. Each store scores its own entities
//! (see the `Search` commands of the menu and order actors); this module validates the
//! request, prices the order matches and merges the two lists.

pub mod text;

use crate::error::ErrorKind;
use crate::model::{MenuItemId, OrderMatch, SearchReport};
use crate::order_actor::OrderError;
use crate::service::order_service::revenue;
use crate::service::OrderService;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("Search query is empty")]
    EmptyQuery,

    #[error("Invalid filter {0:?}, expected menu, orders or all")]
    InvalidFilter(String),

    #[error("Filter \"all\" cannot be combined with other filters")]
    TooManyFilters,

    #[error("Price bounds must not be negative")]
    NegativePrice,

    #[error("Minimum price {min} must be below maximum price {max}")]
    MinNotBelowMax { min: Decimal, max: Decimal },

    /// An order matched but its total could not be computed.
    #[error("Order total unavailable: {0}")]
    Total(#[source] OrderError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unavailable(_) => ErrorKind::Internal,
            Self::Total(e) => e.kind(),
            _ => ErrorKind::Validation,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchRequest {
    pub query: String,
    /// Comma separated subset of `menu`, `orders`, `all`. Absent means both.
    pub filter: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }
}

/// Which stores a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub menu: bool,
    pub orders: bool,
}

/// Parses the filter parameter.
pub fn parse_filter(filter: Option<&str>) -> Result<Scope, SearchError> {
    let Some(filter) = filter.map(str::trim).filter(|f| !f.is_empty()) else {
        return Ok(Scope {
            menu: true,
            orders: true,
        });
    };
    let words: Vec<String> = filter
        .split(',')
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect();

    let mut scope = Scope {
        menu: false,
        orders: false,
    };
    let mut all = false;
    for word in &words {
        match word.as_str() {
            "menu" => scope.menu = true,
            "orders" => scope.orders = true,
            "all" => all = true,
            other => return Err(SearchError::InvalidFilter(other.to_string())),
        }
    }
    if all {
        if words.iter().any(|w| w != "all") {
            return Err(SearchError::TooManyFilters);
        }
        scope = Scope {
            menu: true,
            orders: true,
        };
    }
    Ok(scope)
}

fn validate_prices(min: Option<Decimal>, max: Option<Decimal>) -> Result<(), SearchError> {
    if min.is_some_and(|p| p.is_sign_negative()) || max.is_some_and(|p| p.is_sign_negative()) {
        return Err(SearchError::NegativePrice);
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min >= max {
            return Err(SearchError::MinNotBelowMax { min, max });
        }
    }
    Ok(())
}

/// Searches menu items and orders through their stores.
#[derive(Clone)]
pub struct SearchService {
    orders: OrderService,
}

impl SearchService {
    pub fn new(orders: OrderService) -> Self {
        Self { orders }
    }

    #[instrument(skip(self))]
    pub async fn search(&self, request: SearchRequest) -> Result<SearchReport, SearchError> {
        let terms = text::terms(&request.query);
        if terms.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        let scope = parse_filter(request.filter.as_deref())?;
        validate_prices(request.min_price, request.max_price)?;
        debug!(?terms, ?scope, "Searching");

        let menu_items = if scope.menu {
            self.orders
                .menu
                .search(terms.clone(), request.min_price, request.max_price)
                .await
                .map_err(|e| SearchError::Unavailable(e.to_string()))?
        } else {
            Vec::new()
        };

        let orders = if scope.orders {
            self.search_orders(terms, request.min_price, request.max_price)
                .await?
        } else {
            Vec::new()
        };

        let total_matches = menu_items.len() + orders.len();
        Ok(SearchReport {
            menu_items,
            orders,
            total_matches,
        })
    }

    async fn search_orders(
        &self,
        terms: Vec<String>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> Result<Vec<OrderMatch>, SearchError> {
        let menu = self
            .orders
            .menu_snapshot()
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;
        let item_names: BTreeMap<MenuItemId, String> = menu
            .values()
            .map(|item| (item.id, item.name.clone()))
            .collect();

        let scored = self
            .orders
            .orders
            .search(terms, item_names.clone())
            .await
            .map_err(|e| SearchError::Unavailable(e.to_string()))?;

        let mut matches = Vec::with_capacity(scored.len());
        for found in scored {
            let total = revenue(&found.order, &menu).map_err(SearchError::Total)?;
            if !text::price_in_range(total, min_price, max_price) {
                continue;
            }
            let items = found
                .order
                .items
                .iter()
                .map(|item| {
                    item_names
                        .get(&item.product_id)
                        .cloned()
                        .unwrap_or_else(|| item.product_id.to_string())
                })
                .collect();
            matches.push(OrderMatch {
                order_id: found.order.id,
                customer_name: found.order.customer_name,
                status: found.order.status,
                items,
                total,
                relevance: found.relevance,
            });
        }
        Ok(matches)
    }
}
