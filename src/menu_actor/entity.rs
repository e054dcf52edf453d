//! [`ActorEntity`] implementation for [`MenuItem`].

use super::error::MenuError;
use crate::clients::InventoryClient;
use crate::framework::{ActorClient, ActorEntity, Store};
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate, MenuMatch};
use crate::search::text;
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Menu items have no per-item operations beyond CRUD.
#[derive(Debug, Clone)]
pub enum MenuAction {}

#[derive(Debug, Clone)]
pub enum MenuCommand {
    /// Full-text match over name and description, within an optional price range
    /// (both bounds inclusive). Results by relevance, then id.
    Search {
        terms: Vec<String>,
        min_price: Option<Decimal>,
        max_price: Option<Decimal>,
    },
}

/// Results from MenuCommand - variants match 1:1 with MenuCommand
#[derive(Debug, Clone)]
pub enum MenuCommandResult {
    Search(Vec<MenuMatch>),
}

impl MenuItem {
    /// Rules that need no other actor.
    fn validate_shape(&self) -> Result<(), MenuError> {
        if self.name.trim().is_empty() {
            return Err(MenuError::EmptyName);
        }
        if self.price <= Decimal::ZERO {
            return Err(MenuError::NonPositivePrice(self.price));
        }
        if self.recipe.is_empty() {
            return Err(MenuError::EmptyRecipe);
        }
        let mut seen = BTreeSet::new();
        for line in &self.recipe {
            if !seen.insert(line.ingredient_id) {
                return Err(MenuError::DuplicateIngredient(line.ingredient_id));
            }
            if line.quantity <= Decimal::ZERO {
                return Err(MenuError::NonPositiveIngredientQuantity(line.ingredient_id));
            }
        }
        Ok(())
    }

    async fn validate(&self, inventory: &InventoryClient) -> Result<(), MenuError> {
        self.validate_shape()?;
        for line in &self.recipe {
            let found = inventory
                .get(line.ingredient_id)
                .await
                .map_err(|e| MenuError::Unavailable(e.to_string()))?;
            if found.is_none() {
                return Err(MenuError::UnknownIngredient(line.ingredient_id));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = MenuAction;
    type ActionResult = ();
    type Command = MenuCommand;
    type CommandResult = MenuCommandResult;
    type Context = InventoryClient;
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            name: params.name,
            description: params.description,
            price: params.price,
            recipe: params.recipe,
        })
    }

    async fn on_create(&mut self, inventory: &InventoryClient) -> Result<(), Self::Error> {
        self.validate(inventory).await
    }

    async fn on_update(
        &mut self,
        update: MenuItemUpdate,
        inventory: &InventoryClient,
    ) -> Result<(), Self::Error> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(recipe) = update.recipe {
            self.recipe = recipe;
        }
        self.validate(inventory).await
    }

    async fn handle_action(
        &mut self,
        action: MenuAction,
        _inventory: &InventoryClient,
    ) -> Result<(), Self::Error> {
        match action {}
    }

    async fn handle_command(
        store: &mut Store<Self>,
        command: MenuCommand,
        _inventory: &InventoryClient,
    ) -> Result<MenuCommandResult, Self::Error> {
        match command {
            MenuCommand::Search {
                terms,
                min_price,
                max_price,
            } => Ok(MenuCommandResult::Search(search(
                store, &terms, min_price, max_price,
            ))),
        }
    }
}

fn search(
    store: &Store<MenuItem>,
    terms: &[String],
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
) -> Vec<MenuMatch> {
    let mut matches: Vec<MenuMatch> = store
        .values()
        .filter(|item| text::price_in_range(item.price, min_price, max_price))
        .filter_map(|item| {
            let fields = [item.name.as_str(), item.description.as_str()];
            let relevance = text::relevance(terms, fields);
            (relevance > 0.0).then(|| MenuMatch {
                product_id: item.id,
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price,
                relevance,
            })
        })
        .collect();
    matches.sort_by(|a, b| {
        b.relevance
            .total_cmp(&a.relevance)
            .then(a.product_id.cmp(&b.product_id))
    });
    matches
}
