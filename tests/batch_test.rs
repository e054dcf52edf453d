use hot_coffee::lifecycle::{CoffeeShop, ShopConfig};
use hot_coffee::model::{
    BatchOutcome, IngredientId, InventoryCreate, MenuItemCreate, MenuItemId, OrderDraft,
    OrderItem, RecipeLine,
};
use hot_coffee::framework::ActorClient;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tokio::task::JoinSet;

/// Milk for exactly `lattes` lattes (200 ml each), beans to spare.
async fn shop_with_milk_for(lattes: i64, batch_concurrency: usize) -> (CoffeeShop, MenuItemId) {
    let config = ShopConfig {
        batch_concurrency,
        ..ShopConfig::default()
    };
    let shop = CoffeeShop::new(&config);
    let beans = shop
        .inventory
        .create_ingredient(InventoryCreate {
            name: "Beans".to_string(),
            unit: "g".to_string(),
            quantity: dec!(100000),
            unit_price: dec!(0.03),
        })
        .await
        .expect("Failed to create beans");
    let milk = shop
        .inventory
        .create_ingredient(InventoryCreate {
            name: "Milk".to_string(),
            unit: "ml".to_string(),
            quantity: Decimal::from(lattes * 200),
            unit_price: dec!(0.001),
        })
        .await
        .expect("Failed to create milk");
    let latte = shop
        .menu
        .create_item(MenuItemCreate {
            name: "Latte".to_string(),
            description: "Espresso and steamed milk".to_string(),
            price: dec!(3.50),
            recipe: vec![
                RecipeLine::new(beans, dec!(18)),
                RecipeLine::new(milk, dec!(200)),
            ],
        })
        .await
        .expect("Failed to create latte");
    (shop, latte)
}

fn latte_for(customer: &str, latte: MenuItemId, quantity: i64) -> OrderDraft {
    OrderDraft::new(customer, vec![OrderItem::new(latte, quantity)])
}

#[tokio::test]
async fn test_batch_mixes_accepted_and_rejected() {
    let (shop, latte) = shop_with_milk_for(100, 4).await;

    let drafts = vec![
        latte_for("Ann", latte, 2),
        latte_for("", latte, 1),
        latte_for("Bob", latte, 1),
        latte_for("Cid", latte, 0),
        latte_for("Dee", MenuItemId(77), 1),
        latte_for("Eve", latte, 1000),
    ];
    let response = shop.batch.create_orders(drafts).await.expect("batch");

    assert_eq!(response.order_reports.len(), 6);
    assert_eq!(response.summary.total_orders, 6);
    assert_eq!(response.summary.accepted, 2);
    assert_eq!(response.summary.rejected, 4);
    assert_eq!(response.summary.total_revenue, dec!(10.50));

    let reason_of = |name: &str| {
        response
            .order_reports
            .iter()
            .find(|r| r.customer_name == name)
            .and_then(|r| r.reason.clone())
    };
    assert_eq!(reason_of("").as_deref(), Some("empty customer name"));
    assert_eq!(
        reason_of("Cid").as_deref(),
        Some("non-positive product quantity provided")
    );
    assert_eq!(
        reason_of("Dee").as_deref(),
        Some("non-existing menu item provided")
    );
    assert_eq!(reason_of("Eve").as_deref(), Some("insufficient inventory"));

    let ann = response
        .order_reports
        .iter()
        .find(|r| r.customer_name == "Ann")
        .expect("Ann reported");
    assert_eq!(ann.status, BatchOutcome::Accepted);
    assert_eq!(ann.total, dec!(7.00));
    assert!(ann.order_id.is_some());

    // Three lattes accepted in total.
    let updates = &response.summary.inventory_updates;
    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].ingredient_id, IngredientId(1));
    assert_eq!(updates[0].quantity_used, dec!(54));
    assert_eq!(updates[0].remaining, dec!(99946));
    assert_eq!(updates[1].name, "Milk");
    assert_eq!(updates[1].quantity_used, dec!(600));
    assert_eq!(updates[1].remaining, dec!(19400));

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_batch_never_oversells() {
    for _ in 0..100 {
        let (shop, latte) = shop_with_milk_for(5, 8).await;
        let drafts = (0..12)
            .map(|i| latte_for(&format!("Customer {i}"), latte, 1))
            .collect();

        let response = shop.batch.create_orders(drafts).await.expect("batch");

        assert_eq!(response.order_reports.len(), 12);
        assert_eq!(response.summary.accepted, 5);
        assert_eq!(response.summary.rejected, 7);
        assert_eq!(response.summary.total_revenue, dec!(17.50));
        assert!(response
            .order_reports
            .iter()
            .filter(|r| r.status == BatchOutcome::Rejected)
            .all(|r| r.reason.as_deref() == Some("insufficient inventory")));
        let milk = &response.summary.inventory_updates[1];
        assert_eq!(milk.quantity_used, dec!(1000));
        assert_eq!(milk.remaining, dec!(0));

        shop.shutdown().await.expect("shutdown");
    }
}

/// Five good drafts and three that fail validation.
fn mixed_drafts(run: usize, latte: MenuItemId) -> Vec<OrderDraft> {
    vec![
        latte_for(&format!("Ann {run}"), latte, 1),
        latte_for("", latte, 1),
        latte_for(&format!("Bob {run}"), latte, 1),
        latte_for(&format!("Cid {run}"), latte, 0),
        latte_for(&format!("Dee {run}"), latte, 1),
        latte_for(&format!("Eve {run}"), MenuItemId(77), 1),
        latte_for(&format!("Fay {run}"), latte, 1),
        latte_for(&format!("Gus {run}"), latte, 1),
    ]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mixed_batches_agree() {
    const RUNS: usize = 100;
    let (shop, latte) = shop_with_milk_for(5 * RUNS as i64, 4).await;

    let mut batches = JoinSet::new();
    for run in 0..RUNS {
        let batch = shop.batch.clone();
        batches.spawn(async move { batch.create_orders(mixed_drafts(run, latte)).await });
    }

    let mut finished = 0;
    while let Some(joined) = batches.join_next().await {
        let response = joined.expect("batch task").expect("batch");
        finished += 1;

        assert_eq!(response.order_reports.len(), 8);
        assert_eq!(response.summary.total_orders, 8);
        assert_eq!(response.summary.accepted, 5);
        assert_eq!(response.summary.rejected, 3);
        assert_eq!(response.summary.total_revenue, dec!(17.50));
        let mut reasons: Vec<&str> = response
            .order_reports
            .iter()
            .filter(|r| r.status == BatchOutcome::Rejected)
            .filter_map(|r| r.reason.as_deref())
            .collect();
        reasons.sort_unstable();
        assert_eq!(
            reasons,
            vec![
                "empty customer name",
                "non-existing menu item provided",
                "non-positive product quantity provided",
            ]
        );
        // Usage covers this batch's orders only.
        let milk = &response.summary.inventory_updates[1];
        assert_eq!(milk.quantity_used, dec!(1000));
    }
    assert_eq!(finished, RUNS);

    let orders = shop.orders.list().await.expect("list");
    assert_eq!(orders.len(), 5 * RUNS);
    let milk = shop
        .inventory
        .get(IngredientId(2))
        .await
        .expect("get milk")
        .expect("milk stocked");
    assert_eq!(milk.quantity, Decimal::ZERO);

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_empty_batch() {
    let (shop, _) = shop_with_milk_for(1, 1).await;

    let response = shop.batch.create_orders(Vec::new()).await.expect("batch");
    assert!(response.order_reports.is_empty());
    assert_eq!(response.summary.total_orders, 0);
    assert_eq!(response.summary.total_revenue, Decimal::ZERO);
    assert!(response.summary.inventory_updates.is_empty());

    shop.shutdown().await.expect("shutdown");
}
