use crate::batch::BatchCoordinator;
use crate::clients::{InventoryClient, MenuClient, OrderClient};
use crate::lifecycle::ShopConfig;
use crate::search::SearchService;
use crate::service::OrderService;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running back office: three store actors and the services over them.
///
/// # Wiring
///
/// ```text
/// inventory actor  (Context = ())
///     ▲        ▲
///     │        └──── menu actor   (Context = InventoryClient)
///     └───────────── order actor  (Context = InventoryClient)
///
/// OrderService(OrderClient, MenuClient)
///   ├─ BatchCoordinator(OrderService, InventoryClient)
///   └─ SearchService(OrderService)
/// ```
///
/// # Example
///
/// ```ignore
/// let shop = CoffeeShop::new(&ShopConfig::default());
/// let milk = shop.inventory.create_ingredient(milk).await?;
/// let latte = shop.menu.create_item(latte).await?;
/// let order = shop.order_service.create_order(draft).await?;
/// shop.shutdown().await?;
/// ```
pub struct CoffeeShop {
    pub inventory: InventoryClient,
    pub menu: MenuClient,
    pub orders: OrderClient,
    pub order_service: OrderService,
    pub batch: BatchCoordinator,
    pub search: SearchService,

    /// Order, menu, inventory: dependents first.
    handles: Vec<(&'static str, JoinHandle<()>)>,
}

impl CoffeeShop {
    /// Spawns the store actors and wires the services. Must run inside a Tokio runtime.
    pub fn new(config: &ShopConfig) -> Self {
        let (inventory_actor, inventory_client) =
            crate::inventory_actor::new(config.mailbox_capacity);
        let (menu_actor, menu_client) = crate::menu_actor::new(config.mailbox_capacity);
        let (order_actor, order_client) = crate::order_actor::new(config.mailbox_capacity);

        let inventory = InventoryClient::new(inventory_client);
        let menu = MenuClient::new(menu_client);
        let orders = OrderClient::new(order_client);

        let inventory_handle = tokio::spawn(inventory_actor.run(()));
        let menu_handle = tokio::spawn(menu_actor.run(inventory.clone()));
        let order_handle = tokio::spawn(order_actor.run(inventory.clone()));

        let order_service = OrderService::new(orders.clone(), menu.clone());
        let batch = BatchCoordinator::new(
            order_service.clone(),
            inventory.clone(),
            config.batch_concurrency,
        );
        let search = SearchService::new(order_service.clone());

        info!(
            mailbox_capacity = config.mailbox_capacity,
            batch_concurrency = config.batch_concurrency,
            "Coffee shop started"
        );
        Self {
            inventory,
            menu,
            orders,
            order_service,
            batch,
            search,
            handles: vec![
                ("order", order_handle),
                ("menu", menu_handle),
                ("inventory", inventory_handle),
            ],
        }
    }

    /// Stops every actor.
    ///
    /// Dropping the shop's clients closes the mailboxes. The order and menu actors hold
    /// an inventory client in their context, so they are awaited before the inventory
    /// actor. Clones of the clients kept elsewhere keep their actor alive, and this call
    /// waits for them to be dropped too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down coffee shop...");
        let Self {
            inventory,
            menu,
            orders,
            order_service,
            batch,
            search,
            handles,
        } = self;
        drop(search);
        drop(batch);
        drop(order_service);
        drop(orders);
        drop(menu);
        drop(inventory);

        for (name, handle) in handles {
            if let Err(e) = handle.await {
                error!(actor = name, "Actor task failed: {:?}", e);
                return Err(format!("{name} actor task failed: {e:?}"));
            }
        }

        info!("Coffee shop shutdown complete.");
        Ok(())
    }
}
