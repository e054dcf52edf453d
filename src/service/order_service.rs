//! # Order Service
//!
//! Validates drafts, decides status transitions and computes revenue. The stores do the
//! bookkeeping: the order actor applies transitions as compare-and-set and moves stock
//! through its hooks, the menu actor supplies prices and recipes.
//!
//! ```text
//! create_order(draft)
//!   ├─ validate draft (id, name, status, items, quantities)
//!   ├─ menu snapshot: every product must exist, requirement = Σ quantity × recipe
//!   └─ OrderClient::create_order ── Order::on_create ── InventoryClient::allocate
//! ```

use crate::clients::{MenuClient, OrderClient};
use crate::framework::ActorClient;
use crate::model::{
    MenuItem, MenuItemId, MenuItemSales, Order, OrderCreate, OrderDraft, OrderId, OrderItem,
    OrderStatus, OrderUpdate, Requirement, StatusChange,
};
use crate::order_actor::OrderError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Source of "now" for timestamps and the default report year.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Menu items by id, read once per operation.
pub(crate) type MenuSnapshot = BTreeMap<MenuItemId, MenuItem>;

/// Validation, status transitions and revenue over the order and menu stores.
#[derive(Clone)]
pub struct OrderService {
    pub(crate) orders: OrderClient,
    pub(crate) menu: MenuClient,
    pub(crate) clock: Clock,
}

impl OrderService {
    pub fn new(orders: OrderClient, menu: MenuClient) -> Self {
        Self::with_clock(orders, menu, Arc::new(Utc::now))
    }

    /// Same service with a fixed or simulated clock.
    pub fn with_clock(orders: OrderClient, menu: MenuClient, clock: Clock) -> Self {
        Self {
            orders,
            menu,
            clock,
        }
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Validates `draft`, then stores it with its ingredients taken from inventory.
    #[instrument(skip(self, draft), fields(customer = %draft.customer_name))]
    pub async fn create_order(&self, draft: OrderDraft) -> Result<OrderId, OrderError> {
        if let Some(id) = draft.id {
            return Err(OrderError::IdAssigned(id));
        }
        let customer_name = validate_customer(&draft.customer_name)?;
        if let Some(status) = draft.status.filter(|s| *s != OrderStatus::Open) {
            return Err(OrderError::IncorrectStatus {
                current: OrderStatus::Open,
                requested: status,
            });
        }
        validate_items(&draft.items)?;

        let menu = self.menu_snapshot().await?;
        let allocation = requirement(&draft.items, &menu)?;

        let id = self
            .orders
            .create_order(OrderCreate {
                customer_name,
                items: draft.items,
                created_at: self.now(),
                allocation,
            })
            .await?;
        info!(order_id = %id, "Order created");
        Ok(id)
    }

    /// Replaces customer and items of an open order, optionally moving it to
    /// `in progress`. Stock is re-allocated for the new items; on any failure neither the
    /// order nor inventory changes.
    #[instrument(skip(self, draft))]
    pub async fn update_order(
        &self,
        id: OrderId,
        draft: OrderDraft,
    ) -> Result<Order, OrderError> {
        if let Some(body) = draft.id.filter(|body| *body != id) {
            return Err(OrderError::IdMismatch { path: id, body });
        }
        let stored = self.get_order(id).await?;
        if !stored.is_modifiable() {
            return Err(OrderError::NotModifiable {
                id,
                status: stored.status,
            });
        }
        let customer_name = validate_customer(&draft.customer_name)?;
        let status = draft.status.unwrap_or(stored.status);
        if status == OrderStatus::Closed {
            return Err(OrderError::IncorrectStatus {
                current: stored.status,
                requested: status,
            });
        }
        validate_items(&draft.items)?;

        let menu = self.menu_snapshot().await?;
        let allocation = requirement(&draft.items, &menu)?;

        let updated = self
            .orders
            .update_order(
                id,
                OrderUpdate {
                    customer_name,
                    items: draft.items,
                    status,
                    allocation,
                    at: self.now(),
                },
            )
            .await?;
        info!(order_id = %id, status = %updated.status, "Order updated");
        Ok(updated)
    }

    /// `open -> in progress`. Stock was taken at creation, nothing to check here.
    #[instrument(skip(self))]
    pub async fn set_in_progress(&self, id: OrderId) -> Result<StatusChange, OrderError> {
        self.orders
            .transition(id, OrderStatus::Open, OrderStatus::InProgress, self.now())
            .await
    }

    /// `in progress -> closed`.
    #[instrument(skip(self))]
    pub async fn close_order(&self, id: OrderId) -> Result<StatusChange, OrderError> {
        self.orders
            .transition(id, OrderStatus::InProgress, OrderStatus::Closed, self.now())
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.list().await
    }

    /// Open orders only; their ingredients go back to inventory.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), OrderError> {
        self.orders.delete(id).await?;
        info!(order_id = %id, "Order deleted");
        Ok(())
    }

    /// Σ price × quantity over the order's items, at current menu prices.
    #[instrument(skip(self))]
    pub async fn order_revenue(&self, id: OrderId) -> Result<Decimal, OrderError> {
        let order = self.get_order(id).await?;
        let menu = self.menu_snapshot().await?;
        revenue(&order, &menu)
    }

    /// Revenue of all closed orders.
    #[instrument(skip(self))]
    pub async fn total_sales(&self) -> Result<Decimal, OrderError> {
        let closed = self.orders.with_status(OrderStatus::Closed).await?;
        let menu = self.menu_snapshot().await?;
        closed.iter().try_fold(Decimal::ZERO, |sum, order| {
            sum.checked_add(revenue(order, &menu)?)
                .ok_or(OrderError::SalesOverflow)
        })
    }

    /// Every product tied at the highest number of units sold in closed orders.
    #[instrument(skip(self))]
    pub async fn popular_menu_items(&self) -> Result<Vec<MenuItemSales>, OrderError> {
        let closed = self.orders.with_status(OrderStatus::Closed).await?;
        let mut sold: BTreeMap<MenuItemId, u64> = BTreeMap::new();
        for item in closed.iter().flat_map(|order| &order.items) {
            let units = u64::try_from(item.quantity).unwrap_or(0);
            let count = sold.entry(item.product_id).or_insert(0);
            *count = u64::saturating_add(*count, units);
        }

        let menu = self.menu_snapshot().await?;
        Ok(top_sellers(&sold)
            .into_iter()
            .map(|(product_id, total_sales_count)| MenuItemSales {
                product_id,
                product_name: menu
                    .get(&product_id)
                    .map(|item| item.name.clone())
                    .unwrap_or_else(|| product_id.to_string()),
                total_sales_count,
            })
            .collect())
    }

    /// Orders still `open`, by id.
    pub async fn open_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.orders.with_status(OrderStatus::Open).await
    }

    pub(crate) async fn menu_snapshot(&self) -> Result<MenuSnapshot, OrderError> {
        let items = self
            .menu
            .list()
            .await
            .map_err(|e| OrderError::Unavailable(e.to_string()))?;
        Ok(items.into_iter().map(|item| (item.id, item)).collect())
    }
}

/// Parses a caller-supplied order id (`"12"` or `"order_12"`).
pub fn parse_order_id(raw: &str) -> Result<OrderId, OrderError> {
    raw.parse()
        .map_err(|_| OrderError::MalformedId(raw.to_string()))
}

/// Products at the maximum count, by id. Empty when nothing sold.
pub fn top_sellers(sold: &BTreeMap<MenuItemId, u64>) -> Vec<(MenuItemId, u64)> {
    let Some(max) = sold.values().copied().max().filter(|max| *max > 0) else {
        return Vec::new();
    };
    sold.iter()
        .filter(|(_, count)| **count == max)
        .map(|(id, count)| (*id, *count))
        .collect()
}

fn validate_customer(name: &str) -> Result<String, OrderError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(OrderError::EmptyCustomerName);
    }
    Ok(trimmed.to_string())
}

fn validate_items(items: &[OrderItem]) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::NoItems);
    }
    if let Some(bad) = items.iter().find(|item| item.quantity <= 0) {
        return Err(OrderError::NonPositiveQuantity {
            product_id: bad.product_id,
            quantity: bad.quantity,
        });
    }
    Ok(())
}

/// Ingredients the items consume. Fails on the first product missing from the menu, or
/// on the first one whose ingredient amounts or line total overflow.
fn requirement(items: &[OrderItem], menu: &MenuSnapshot) -> Result<Requirement, OrderError> {
    let mut requirement = Requirement::new();
    let mut total = Decimal::ZERO;
    for item in items {
        let menu_item = menu
            .get(&item.product_id)
            .ok_or(OrderError::UnknownMenuItem(item.product_id))?;
        let too_large = || OrderError::QuantityTooLarge {
            product_id: item.product_id,
        };
        let units = Decimal::from(item.quantity);
        // A stored order must stay priceable.
        total = menu_item
            .price
            .checked_mul(units)
            .and_then(|line| total.checked_add(line))
            .ok_or_else(too_large)?;
        menu_item
            .add_requirement(units, &mut requirement)
            .ok_or_else(too_large)?;
    }
    Ok(requirement)
}

/// Items whose menu entry has since been deleted count for nothing.
pub(crate) fn revenue(order: &Order, menu: &MenuSnapshot) -> Result<Decimal, OrderError> {
    let mut total = Decimal::ZERO;
    for item in &order.items {
        let Some(menu_item) = menu.get(&item.product_id) else {
            warn!(
                order_id = %order.id,
                product_id = %item.product_id,
                "Ordered item is no longer on the menu"
            );
            continue;
        };
        total = menu_item
            .price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| total.checked_add(line))
            .ok_or(OrderError::RevenueOverflow(order.id))?;
    }
    Ok(total)
}
