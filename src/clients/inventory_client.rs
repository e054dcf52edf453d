//! # Inventory Client
//!
//! High-level API for the inventory actor.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::inventory_actor::{
    InventoryAction, InventoryActionResult, InventoryCommand, InventoryCommandResult,
    InventoryError,
};
use crate::model::{
    IngredientId, IngredientUsage, InventoryCreate, InventoryItem, InventoryPage, InventorySort,
    InventoryUpdate, OrderId, Requirement,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<InventoryItem>,
}

#[async_trait]
impl ActorClient<InventoryItem> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<InventoryItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError<InventoryError>) -> Self::Error {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => InventoryError::NotFound(id),
            other => InventoryError::Unavailable(other.to_string()),
        }
    }
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<InventoryItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_ingredient(
        &self,
        params: InventoryCreate,
    ) -> Result<IngredientId, InventoryError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_ingredient(
        &self,
        id: IngredientId,
        update: InventoryUpdate,
    ) -> Result<InventoryItem, InventoryError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Add delivered stock. Returns the new quantity on hand.
    #[instrument(skip(self))]
    pub async fn restock(
        &self,
        id: IngredientId,
        amount: Decimal,
    ) -> Result<Decimal, InventoryError> {
        match self
            .inner
            .perform_action(id, InventoryAction::Restock(amount))
            .await
            .map_err(Self::map_error)?
        {
            InventoryActionResult::Restock(quantity) => Ok(quantity),
        }
    }

    /// Make `requirement` the order's allocation. All or nothing.
    #[instrument(skip(self, requirement), fields(ingredients = requirement.len()))]
    pub async fn allocate(
        &self,
        order_id: OrderId,
        requirement: Requirement,
    ) -> Result<(), InventoryError> {
        debug!("Allocating for {}", order_id);
        match self
            .inner
            .command(InventoryCommand::Allocate {
                order_id,
                requirement,
            })
            .await
            .map_err(Self::map_error)?
        {
            InventoryCommandResult::Allocate(()) => Ok(()),
            _ => unreachable!("Allocate command must return Allocate result"),
        }
    }

    /// Give back everything the order holds. Returns what was released.
    #[instrument(skip(self))]
    pub async fn release(&self, order_id: OrderId) -> Result<Requirement, InventoryError> {
        match self
            .inner
            .command(InventoryCommand::Release { order_id })
            .await
            .map_err(Self::map_error)?
        {
            InventoryCommandResult::Release(released) => Ok(released),
            _ => unreachable!("Release command must return Release result"),
        }
    }

    /// Consumption by the listed orders, in one request.
    #[instrument(skip(self, order_ids), fields(orders = order_ids.len()))]
    pub async fn usage(
        &self,
        order_ids: Vec<OrderId>,
    ) -> Result<Vec<IngredientUsage>, InventoryError> {
        match self
            .inner
            .command(InventoryCommand::Usage { order_ids })
            .await
            .map_err(Self::map_error)?
        {
            InventoryCommandResult::Usage(usage) => Ok(usage),
            _ => unreachable!("Usage command must return Usage result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn page(
        &self,
        sort: InventorySort,
        page: usize,
        page_size: usize,
    ) -> Result<InventoryPage, InventoryError> {
        match self
            .inner
            .command(InventoryCommand::Page {
                sort,
                page,
                page_size,
            })
            .await
            .map_err(Self::map_error)?
        {
            InventoryCommandResult::Page(page) => Ok(page),
            _ => unreachable!("Page command must return Page result"),
        }
    }
}
