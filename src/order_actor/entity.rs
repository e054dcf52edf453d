//! [`ActorEntity`] implementation for [`Order`].
//!
//! The hooks keep inventory in step with the order store: create allocates before the
//! order is inserted, update re-allocates before the new version is committed, delete
//! releases before removal. A failed allocation fails the hook, so the order store never
//! holds an order whose ingredients were not taken.

use super::commands::{
    OrderAction, OrderActionResult, OrderCommand, OrderCommandResult, ScoredOrder,
};
use super::error::OrderError;
use crate::clients::InventoryClient;
use crate::framework::{ActorEntity, Store};
use crate::model::{
    MenuItemId, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, StatusChange,
};
use crate::search::text;
use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::debug;

impl Order {
    fn record(&mut self, to: OrderStatus, at: DateTime<Utc>) -> StatusChange {
        let change = StatusChange {
            order_id: self.id,
            from: Some(self.status),
            to,
            at,
        };
        self.status = to;
        self.history.push(change.clone());
        change
    }

    fn units(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::try_from(item.quantity).unwrap_or(0))
            .fold(0, u64::saturating_add)
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Command = OrderCommand;
    type CommandResult = OrderCommandResult;
    type Context = InventoryClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            customer_name: params.customer_name,
            items: params.items,
            status: OrderStatus::Open,
            created_at: params.created_at,
            history: vec![StatusChange {
                order_id: id,
                from: None,
                to: OrderStatus::Open,
                at: params.created_at,
            }],
            allocation: params.allocation,
        })
    }

    /// Takes the order's ingredients from inventory.
    async fn on_create(&mut self, inventory: &InventoryClient) -> Result<(), Self::Error> {
        debug!(order_id = %self.id, ingredients = self.allocation.len(), "Allocating");
        inventory
            .allocate(self.id, self.allocation.clone())
            .await
            .map_err(OrderError::from)
    }

    /// Replaces customer, items and allocation, and moves `open -> in progress` if asked.
    async fn on_update(
        &mut self,
        update: OrderUpdate,
        inventory: &InventoryClient,
    ) -> Result<(), Self::Error> {
        if !self.is_modifiable() {
            return Err(OrderError::NotModifiable {
                id: self.id,
                status: self.status,
            });
        }
        if update.status != self.status && self.status.next() != Some(update.status) {
            return Err(OrderError::IncorrectStatus {
                current: self.status,
                requested: update.status,
            });
        }

        self.customer_name = update.customer_name;
        self.items = update.items;
        if update.status != self.status {
            self.record(update.status, update.at);
        }

        inventory
            .allocate(self.id, update.allocation.clone())
            .await
            .map_err(OrderError::from)?;
        self.allocation = update.allocation;
        Ok(())
    }

    /// Open orders only. Gives their ingredients back.
    async fn on_delete(&self, inventory: &InventoryClient) -> Result<(), Self::Error> {
        if !self.is_modifiable() {
            return Err(OrderError::NotModifiable {
                id: self.id,
                status: self.status,
            });
        }
        inventory
            .release(self.id)
            .await
            .map(|_| ())
            .map_err(OrderError::from)
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _inventory: &InventoryClient,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::Transition { from, to, at } => {
                if self.status != from || from.next() != Some(to) {
                    return Err(OrderError::IncorrectStatus {
                        current: self.status,
                        requested: to,
                    });
                }
                Ok(OrderActionResult::Transition(self.record(to, at)))
            }
        }
    }

    async fn handle_command(
        store: &mut Store<Self>,
        command: OrderCommand,
        _inventory: &InventoryClient,
    ) -> Result<OrderCommandResult, Self::Error> {
        let result = match command {
            OrderCommand::WithStatus(status) => OrderCommandResult::WithStatus(
                store
                    .values()
                    .filter(|order| order.status == status)
                    .cloned()
                    .collect(),
            ),
            OrderCommand::ClosedUnitsByPeriod { year, month } => {
                let buckets = closed_units_by_period(store, year, month);
                OrderCommandResult::ClosedUnitsByPeriod(buckets)
            }
            OrderCommand::ItemCounts { start, end } => {
                OrderCommandResult::ItemCounts(item_counts(store, start, end))
            }
            OrderCommand::Search { terms, item_names } => {
                OrderCommandResult::Search(search(store, &terms, &item_names))
            }
        };
        Ok(result)
    }
}

fn closed_units_by_period(
    store: &Store<Order>,
    year: i32,
    month: Option<u32>,
) -> BTreeMap<u32, u64> {
    let mut buckets = BTreeMap::new();
    for order in store.values() {
        let created = order.created_at.date_naive();
        if order.status != OrderStatus::Closed || created.year() != year {
            continue;
        }
        let key = match month {
            Some(m) if created.month() != m => continue,
            Some(_) => created.day(),
            None => created.month(),
        };
        let units = buckets.entry(key).or_insert(0);
        *units = u64::saturating_add(*units, order.units());
    }
    buckets.retain(|_, units| *units > 0);
    buckets
}

fn item_counts(
    store: &Store<Order>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> BTreeMap<MenuItemId, u64> {
    let mut counts = BTreeMap::new();
    let in_window = |date: NaiveDate| {
        start.map_or(true, |start| date >= start) && end.map_or(true, |end| date <= end)
    };
    for order in store.values() {
        if !in_window(order.created_at.date_naive()) {
            continue;
        }
        for item in &order.items {
            let units = u64::try_from(item.quantity).unwrap_or(0);
            let count = counts.entry(item.product_id).or_insert(0);
            *count = u64::saturating_add(*count, units);
        }
    }
    counts
}

fn search(
    store: &Store<Order>,
    terms: &[String],
    item_names: &BTreeMap<MenuItemId, String>,
) -> Vec<ScoredOrder> {
    let mut found: Vec<ScoredOrder> = store
        .values()
        .filter_map(|order| {
            let names = order
                .items
                .iter()
                .filter_map(|item| item_names.get(&item.product_id))
                .map(String::as_str);
            let fields = std::iter::once(order.customer_name.as_str()).chain(names);
            let relevance = text::relevance(terms, fields);
            (relevance > 0.0).then(|| ScoredOrder {
                order: order.clone(),
                relevance,
            })
        })
        .collect();
    found.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then(a.order.id.cmp(&b.order.id))
    });
    found
}
