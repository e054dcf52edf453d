//! # Hot Coffee demo
//!
//! Runs one business day against an in-process [`CoffeeShop`]:
//! 1. Stock the pantry and write the menu.
//! 2. Take an order through `open -> in progress -> closed`.
//! 3. Submit a batch of drafts, some of which cannot be served.
//! 4. Print sales, the period report and a search.

use chrono::{Datelike, Utc};
use hot_coffee::lifecycle::{load_config, setup_tracing, CoffeeShop};
use hot_coffee::model::{
    InventoryCreate, InventorySort, MenuItemCreate, OrderDraft, OrderItem, RecipeLine,
};
use hot_coffee::search::SearchRequest;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, Instrument};

fn show(label: &str, value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => info!("{label}:\n{json}"),
        Err(e) => info!(error = %e, "{label}: not serialisable"),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = load_config().map_err(|e| e.to_string())?;
    setup_tracing(&config.log_filter);

    info!("Opening the coffee shop");
    let shop = CoffeeShop::new(&config);

    let span = tracing::info_span!("stocking");
    let (beans, milk, flour) = async {
        let mut ids = Vec::new();
        for (name, unit, quantity, price) in [
            ("Espresso beans", "g", 1_000, Decimal::new(3, 2)),
            ("Milk", "ml", 5_000, Decimal::new(1, 3)),
            ("Flour", "g", 200, Decimal::new(2, 3)),
        ] {
            let id = shop
                .inventory
                .create_ingredient(InventoryCreate {
                    name: name.to_string(),
                    unit: unit.to_string(),
                    quantity: Decimal::from(quantity),
                    unit_price: price,
                })
                .await
                .map_err(|e| e.to_string())?;
            ids.push(id);
        }
        Ok::<_, String>((ids[0], ids[1], ids[2]))
    }
    .instrument(span)
    .await?;

    let latte = shop
        .menu
        .create_item(MenuItemCreate {
            name: "Latte".to_string(),
            description: "Espresso with steamed milk".to_string(),
            price: Decimal::new(300, 2),
            recipe: vec![
                RecipeLine::new(beans, Decimal::from(18)),
                RecipeLine::new(milk, Decimal::from(200)),
            ],
        })
        .await
        .map_err(|e| e.to_string())?;
    let muffin = shop
        .menu
        .create_item(MenuItemCreate {
            name: "Blueberry muffin".to_string(),
            description: "Baked every morning".to_string(),
            price: Decimal::new(500, 2),
            recipe: vec![RecipeLine::new(flour, Decimal::from(80))],
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%latte, %muffin, "Menu ready");

    let span = tracing::info_span!("order_processing");
    async {
        let service = &shop.order_service;
        let draft = OrderDraft::new(
            "Alice",
            vec![
                OrderItem::new(latte, 2).with_customization("oat milk"),
                OrderItem::new(muffin, 1),
            ],
        );
        let id = service.create_order(draft).await?;
        service.set_in_progress(id).await?;
        service.close_order(id).await?;
        info!(order_id = %id, revenue = %service.order_revenue(id).await?, "Order closed");
        Ok::<_, hot_coffee::order_actor::OrderError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let drafts = vec![
        OrderDraft::new("Bob", vec![OrderItem::new(latte, 1)]),
        OrderDraft::new("", vec![OrderItem::new(latte, 1)]),
        OrderDraft::new("Carol", vec![OrderItem::new(muffin, 5)]),
        OrderDraft::new("Dan", vec![OrderItem::new(latte, 0)]),
    ];
    let batch = shop
        .batch
        .create_orders(drafts)
        .instrument(tracing::info_span!("batch"))
        .await
        .map_err(|e| e.to_string())?;
    show("Batch", &batch);

    let service = &shop.order_service;
    let total = service.total_sales().await.map_err(|e| e.to_string())?;
    info!(%total, "Total sales");
    show(
        "Popular items",
        &service.popular_menu_items().await.map_err(|e| e.to_string())?,
    );
    show(
        "Ordered items by month",
        &service
            .ordered_items_by_period("month", None, Some(Utc::now().year()))
            .await
            .map_err(|e| e.to_string())?,
    );
    show(
        "Ordered items overall",
        &service
            .ordered_menu_items_count(None, None)
            .await
            .map_err(|e| e.to_string())?,
    );
    show(
        "Pantry",
        &shop
            .inventory
            .page(InventorySort::Quantity, 1, 10)
            .await
            .map_err(|e| e.to_string())?,
    );
    show(
        "Search \"latte\"",
        &shop
            .search
            .search(SearchRequest::new("latte"))
            .await
            .map_err(|e| e.to_string())?,
    );

    shop.shutdown().await?;
    info!("Coffee shop closed");
    Ok(())
}
