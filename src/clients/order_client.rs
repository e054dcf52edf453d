//! # Order Client
//!
//! High-level API for the order actor. Validation of drafts happens one level up, in
//! [`OrderService`](crate::service::OrderService); stock moves in the actor's hooks.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    MenuItemId, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, StatusChange,
};
use crate::order_actor::{
    OrderAction, OrderActionResult, OrderCommand, OrderCommandResult, OrderError, ScoredOrder,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError<OrderError>) -> Self::Error {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            other => OrderError::Unavailable(other.to_string()),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(customer = %params.customer_name))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!(?params, "create_order called");
        info!("Sending create_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, update))]
    pub async fn update_order(
        &self,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Order, OrderError> {
        debug!(?update, "update_order called");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Compare-and-set on the status. Returns the appended history entry.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
        at: DateTime<Utc>,
    ) -> Result<StatusChange, OrderError> {
        let OrderActionResult::Transition(change) = self
            .inner
            .perform_action(id, OrderAction::Transition { from, to, at })
            .await
            .map_err(Self::map_error)?;
        Ok(change)
    }

    #[instrument(skip(self))]
    pub async fn with_status(&self, status: OrderStatus) -> Result<Vec<Order>, OrderError> {
        match self.command(OrderCommand::WithStatus(status)).await? {
            OrderCommandResult::WithStatus(orders) => Ok(orders),
            _ => unreachable!("WithStatus command must return WithStatus result"),
        }
    }

    /// Units of closed orders per day of `month`, or per month of `year` without a month.
    #[instrument(skip(self))]
    pub async fn closed_units_by_period(
        &self,
        year: i32,
        month: Option<u32>,
    ) -> Result<BTreeMap<u32, u64>, OrderError> {
        match self
            .command(OrderCommand::ClosedUnitsByPeriod { year, month })
            .await?
        {
            OrderCommandResult::ClosedUnitsByPeriod(buckets) => Ok(buckets),
            _ => unreachable!("ClosedUnitsByPeriod command must return ClosedUnitsByPeriod result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn item_counts(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<BTreeMap<MenuItemId, u64>, OrderError> {
        match self.command(OrderCommand::ItemCounts { start, end }).await? {
            OrderCommandResult::ItemCounts(counts) => Ok(counts),
            _ => unreachable!("ItemCounts command must return ItemCounts result"),
        }
    }

    #[instrument(skip(self, item_names))]
    pub async fn search(
        &self,
        terms: Vec<String>,
        item_names: BTreeMap<MenuItemId, String>,
    ) -> Result<Vec<ScoredOrder>, OrderError> {
        match self
            .command(OrderCommand::Search { terms, item_names })
            .await?
        {
            OrderCommandResult::Search(found) => Ok(found),
            _ => unreachable!("Search command must return Search result"),
        }
    }

    async fn command(&self, command: OrderCommand) -> Result<OrderCommandResult, OrderError> {
        self.inner.command(command).await.map_err(Self::map_error)
    }
}
