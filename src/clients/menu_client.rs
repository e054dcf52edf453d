//! # Menu Client
//!
//! High-level API for the menu actor.

use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::menu_actor::{MenuCommand, MenuCommandResult, MenuError};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, MenuMatch};
use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError<MenuError>) -> Self::Error {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => MenuError::NotFound(id),
            other => MenuError::Unavailable(other.to_string()),
        }
    }
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    /// Validated against inventory before it is stored.
    #[instrument(skip(self))]
    pub async fn create_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// `terms` are expected lowercase, see [`text::terms`](crate::search::text::terms).
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        terms: Vec<String>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    ) -> Result<Vec<MenuMatch>, MenuError> {
        let MenuCommandResult::Search(found) = self
            .inner
            .command(MenuCommand::Search {
                terms,
                min_price,
                max_price,
            })
            .await
            .map_err(Self::map_error)?;
        Ok(found)
    }
}
