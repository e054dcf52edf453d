use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use hot_coffee::clients::{MenuClient, OrderClient};
use hot_coffee::framework::{mock::MockClient, ActorClient};
use hot_coffee::lifecycle::{CoffeeShop, ShopConfig};
use hot_coffee::model::{
    BatchOutcome, IngredientId, InventoryCreate, MenuItem, MenuItemCreate, MenuItemId,
    MenuItemUpdate, Order, OrderDraft, OrderId, OrderItem, OrderStatus, Period, RecipeLine,
};
use hot_coffee::order_actor::{OrderCommandResult, OrderError};
use hot_coffee::search::{SearchError, SearchRequest};
use hot_coffee::service::{OrderService, ReportError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

struct Menu {
    beans: IngredientId,
    milk: IngredientId,
    flour: IngredientId,
    latte: MenuItemId,
    muffin: MenuItemId,
    espresso: MenuItemId,
}

/// Beans 1000 g, milk 1000 ml, flour 1000 g.
/// Latte 3.00 (18 g beans, 200 ml milk), muffin 5.00 (50 g flour), espresso 2.00 (10 g beans).
async fn open_shop() -> (CoffeeShop, Menu) {
    let shop = CoffeeShop::new(&ShopConfig::default());

    let ingredient = |name: &str, unit: &str| InventoryCreate {
        name: name.to_string(),
        unit: unit.to_string(),
        quantity: dec!(1000),
        unit_price: dec!(0.01),
    };
    let beans = shop
        .inventory
        .create_ingredient(ingredient("Beans", "g"))
        .await
        .expect("Failed to create beans");
    let milk = shop
        .inventory
        .create_ingredient(ingredient("Milk", "ml"))
        .await
        .expect("Failed to create milk");
    let flour = shop
        .inventory
        .create_ingredient(ingredient("Flour", "g"))
        .await
        .expect("Failed to create flour");

    let item = |name: &str, price: Decimal, recipe: Vec<RecipeLine>| MenuItemCreate {
        name: name.to_string(),
        description: format!("{name} from the counter"),
        price,
        recipe,
    };
    let latte = shop
        .menu
        .create_item(item(
            "Latte",
            dec!(3.00),
            vec![
                RecipeLine::new(beans, dec!(18)),
                RecipeLine::new(milk, dec!(200)),
            ],
        ))
        .await
        .expect("Failed to create latte");
    let muffin = shop
        .menu
        .create_item(item("Muffin", dec!(5.00), vec![RecipeLine::new(flour, dec!(50))]))
        .await
        .expect("Failed to create muffin");
    let espresso = shop
        .menu
        .create_item(item("Espresso", dec!(2.00), vec![RecipeLine::new(beans, dec!(10))]))
        .await
        .expect("Failed to create espresso");

    let menu = Menu {
        beans,
        milk,
        flour,
        latte,
        muffin,
        espresso,
    };
    (shop, menu)
}

async fn stock(shop: &CoffeeShop, id: IngredientId) -> Decimal {
    shop.inventory
        .get(id)
        .await
        .expect("Failed to get ingredient")
        .expect("Ingredient not found")
        .quantity
}

async fn place_closed(service: &OrderService, draft: OrderDraft) -> OrderId {
    let id = service.create_order(draft).await.expect("create");
    service.set_in_progress(id).await.expect("in progress");
    service.close_order(id).await.expect("close");
    id
}

fn one(customer: &str, product: MenuItemId, quantity: i64) -> OrderDraft {
    OrderDraft::new(customer, vec![OrderItem::new(product, quantity)])
}

#[tokio::test]
async fn test_total_sales_counts_closed_orders_only() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;

    let closed = place_closed(
        service,
        OrderDraft::new(
            "Ann",
            vec![
                OrderItem::new(menu.latte, 2),
                OrderItem::new(menu.muffin, 1),
            ],
        ),
    )
    .await;
    let open = service
        .create_order(one("Bob", menu.latte, 1))
        .await
        .expect("create");

    assert_eq!(service.total_sales().await.expect("sales"), dec!(11.00));
    assert_eq!(service.order_revenue(closed).await.expect("revenue"), dec!(11.00));
    assert_eq!(service.order_revenue(open).await.expect("revenue"), dec!(3.00));

    let popular = service.popular_menu_items().await.expect("popular");
    assert_eq!(popular.len(), 1);
    assert_eq!(popular[0].product_id, menu.latte);
    assert_eq!(popular[0].product_name, "Latte");
    assert_eq!(popular[0].total_sales_count, 2);

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_popular_items_returns_every_tie() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;

    assert!(service.popular_menu_items().await.expect("popular").is_empty());

    place_closed(service, one("Ann", menu.latte, 5)).await;
    place_closed(service, one("Bob", menu.muffin, 5)).await;
    place_closed(service, one("Cid", menu.espresso, 2)).await;

    let popular = service.popular_menu_items().await.expect("popular");
    let ids: Vec<MenuItemId> = popular.iter().map(|p| p.product_id).collect();
    assert_eq!(ids, vec![menu.latte, menu.muffin]);
    assert!(popular.iter().all(|p| p.total_sales_count == 5));

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_shortage_rejects_whole_order() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;

    // 6 lattes need 1200 ml of milk.
    let err = service
        .create_order(one("Ann", menu.latte, 6))
        .await
        .expect_err("not enough milk");
    assert_eq!(
        err,
        OrderError::InsufficientIngredient {
            ingredient_id: menu.milk,
            name: "Milk".to_string(),
        }
    );

    // Beans and milk both short: the lowest id is named.
    let err = service
        .create_order(one("Ann", menu.latte, 60))
        .await
        .expect_err("not enough of anything");
    assert!(matches!(
        err,
        OrderError::InsufficientIngredient { ingredient_id, .. } if ingredient_id == menu.beans
    ));

    assert_eq!(stock(&shop, menu.beans).await, dec!(1000));
    assert_eq!(stock(&shop, menu.milk).await, dec!(1000));
    assert!(service.list_orders().await.expect("list").is_empty());

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_validation_errors() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;

    let cases = [
        (one("  ", menu.latte, 1), OrderError::EmptyCustomerName),
        (OrderDraft::new("Ann", vec![]), OrderError::NoItems),
        (
            one("Ann", menu.latte, 0),
            OrderError::NonPositiveQuantity {
                product_id: menu.latte,
                quantity: 0,
            },
        ),
        (
            one("Ann", MenuItemId(99), 1),
            OrderError::UnknownMenuItem(MenuItemId(99)),
        ),
    ];
    for (draft, expected) in cases {
        assert_eq!(service.create_order(draft).await, Err(expected));
    }

    let mut with_id = one("Ann", menu.latte, 1);
    with_id.id = Some(OrderId(7));
    assert_eq!(
        service.create_order(with_id).await,
        Err(OrderError::IdAssigned(OrderId(7)))
    );

    let mut closed = one("Ann", menu.latte, 1);
    closed.status = Some(OrderStatus::Closed);
    assert_eq!(
        service.create_order(closed).await,
        Err(OrderError::IncorrectStatus {
            current: OrderStatus::Open,
            requested: OrderStatus::Closed,
        })
    );

    assert_eq!(stock(&shop, menu.beans).await, dec!(1000));
    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_status_rules() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;
    let id = service
        .create_order(one("Ann", menu.espresso, 1))
        .await
        .expect("create");

    assert_eq!(
        service.close_order(id).await,
        Err(OrderError::IncorrectStatus {
            current: OrderStatus::Open,
            requested: OrderStatus::Closed,
        })
    );
    assert_eq!(
        service.get_order(id).await.expect("get").status,
        OrderStatus::Open
    );

    let change = service.set_in_progress(id).await.expect("in progress");
    assert_eq!(change.from, Some(OrderStatus::Open));
    assert_eq!(change.to, OrderStatus::InProgress);
    assert!(service.set_in_progress(id).await.is_err());

    assert_eq!(
        service.update_order(id, one("Ann", menu.espresso, 2)).await,
        Err(OrderError::NotModifiable {
            id,
            status: OrderStatus::InProgress,
        })
    );
    assert_eq!(
        service.delete_order(id).await,
        Err(OrderError::NotModifiable {
            id,
            status: OrderStatus::InProgress,
        })
    );

    service.close_order(id).await.expect("close");
    assert_eq!(
        service.close_order(id).await,
        Err(OrderError::IncorrectStatus {
            current: OrderStatus::Closed,
            requested: OrderStatus::Closed,
        })
    );

    let order = service.get_order(id).await.expect("get");
    let path: Vec<(Option<OrderStatus>, OrderStatus)> =
        order.history.iter().map(|h| (h.from, h.to)).collect();
    assert_eq!(
        path,
        vec![
            (None, OrderStatus::Open),
            (Some(OrderStatus::Open), OrderStatus::InProgress),
            (Some(OrderStatus::InProgress), OrderStatus::Closed),
        ]
    );

    assert_eq!(
        service.get_order(OrderId(42)).await,
        Err(OrderError::NotFound("order_42".to_string()))
    );

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_open_orders_is_read_only() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;
    let first = service.create_order(one("Ann", menu.espresso, 1)).await.expect("create");
    let second = service.create_order(one("Bob", menu.espresso, 1)).await.expect("create");
    place_closed(service, one("Cid", menu.espresso, 1)).await;

    let once = service.open_orders().await.expect("open orders");
    let twice = service.open_orders().await.expect("open orders");
    assert_eq!(once, twice);
    let ids: Vec<OrderId> = once.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![first, second]);

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_update_reallocates_atomically() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;
    let id = service.create_order(one("Ann", menu.latte, 1)).await.expect("create");
    assert_eq!(stock(&shop, menu.milk).await, dec!(800));

    let updated = service
        .update_order(id, one("Ann Lee", menu.latte, 2))
        .await
        .expect("update");
    assert_eq!(updated.customer_name, "Ann Lee");
    assert_eq!(stock(&shop, menu.beans).await, dec!(964));
    assert_eq!(stock(&shop, menu.milk).await, dec!(600));

    // 10 lattes need 2000 ml; 600 on hand plus the 400 this order holds is not enough.
    let err = service
        .update_order(id, one("Ann", menu.latte, 10))
        .await
        .expect_err("too large");
    assert!(matches!(err, OrderError::InsufficientIngredient { .. }));
    let order = service.get_order(id).await.expect("get");
    assert_eq!(order.customer_name, "Ann Lee");
    assert_eq!(order.items, vec![OrderItem::new(menu.latte, 2)]);
    assert_eq!(stock(&shop, menu.beans).await, dec!(964));
    assert_eq!(stock(&shop, menu.milk).await, dec!(600));

    let mut body = one("Ann", menu.muffin, 1);
    body.id = Some(OrderId(99));
    assert_eq!(
        service.update_order(id, body).await,
        Err(OrderError::IdMismatch {
            path: id,
            body: OrderId(99),
        })
    );

    let mut start = one("Ann", menu.muffin, 1);
    start.status = Some(OrderStatus::InProgress);
    let order = service.update_order(id, start).await.expect("update");
    assert_eq!(order.status, OrderStatus::InProgress);
    assert_eq!(order.history.len(), 2);
    assert_eq!(stock(&shop, menu.milk).await, dec!(1000));
    assert_eq!(stock(&shop, menu.flour).await, dec!(950));

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_delete_restores_stock() {
    let (shop, menu) = open_shop().await;
    let service = &shop.order_service;
    let id = service.create_order(one("Ann", menu.latte, 2)).await.expect("create");
    assert_eq!(stock(&shop, menu.milk).await, dec!(600));

    service.delete_order(id).await.expect("delete");
    assert_eq!(stock(&shop, menu.beans).await, dec!(1000));
    assert_eq!(stock(&shop, menu.milk).await, dec!(1000));
    assert!(matches!(
        service.get_order(id).await,
        Err(OrderError::NotFound(_))
    ));

    shop.shutdown().await.expect("shutdown");
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

#[tokio::test]
async fn test_reports_by_period_and_window() {
    let (shop, menu) = open_shop().await;
    let now = Arc::new(Mutex::new(at(2024, 3, 5)));
    let clock_now = Arc::clone(&now);
    let service = OrderService::with_clock(
        shop.orders.clone(),
        shop.menu.clone(),
        Arc::new(move || *clock_now.lock().expect("clock")),
    );

    place_closed(&service, one("Ann", menu.latte, 2)).await;
    place_closed(&service, one("Bob", menu.muffin, 1)).await;
    service.create_order(one("Cid", menu.latte, 3)).await.expect("open order");
    *now.lock().expect("clock") = at(2024, 4, 10);
    place_closed(&service, one("Dee", menu.espresso, 1)).await;

    let days = service
        .ordered_items_by_period("day", Some("march"), Some(2024))
        .await
        .expect("day report");
    assert_eq!(days.period, Period::Day);
    assert_eq!(days.month.as_deref(), Some("March"));
    assert_eq!(days.ordered_items, BTreeMap::from([(5, 3)]));

    // Year defaults to the clock's year.
    let defaulted = service
        .ordered_items_by_period("Day", Some("April"), None)
        .await
        .expect("day report");
    assert_eq!(defaulted.year, 2024);
    assert_eq!(defaulted.ordered_items, BTreeMap::from([(10, 1)]));

    let months = service
        .ordered_items_by_period("month", None, Some(2024))
        .await
        .expect("month report");
    assert_eq!(months.ordered_items, BTreeMap::from([(3, 3), (4, 1)]));

    assert_eq!(
        service
            .ordered_items_by_period("month", Some("March"), Some(2024))
            .await,
        Err(ReportError::ConflictingParameters)
    );
    assert_eq!(
        service.ordered_items_by_period("day", None, Some(2024)).await,
        Err(ReportError::MissingMonth)
    );

    let start = NaiveDate::from_ymd_opt(2024, 3, 1);
    let end = NaiveDate::from_ymd_opt(2024, 3, 5);
    let counts = service
        .ordered_menu_items_count(start, end)
        .await
        .expect("window counts");
    assert_eq!(
        counts,
        BTreeMap::from([("Latte".to_string(), 5), ("Muffin".to_string(), 1)])
    );

    let everything = service
        .ordered_menu_items_count(None, None)
        .await
        .expect("all counts");
    assert_eq!(everything.get("Espresso"), Some(&1));

    assert!(matches!(
        service.ordered_menu_items_count(end, start).await,
        Err(ReportError::EndBeforeStart { .. })
    ));

    drop(service);
    shop.shutdown().await.expect("shutdown");
}

/// Saffron 1000 g, with one menu item of the given price using a microgram per unit.
async fn saffron_item(shop: &CoffeeShop, name: &str, price: Decimal) -> (IngredientId, MenuItemId) {
    let saffron = shop
        .inventory
        .create_ingredient(InventoryCreate {
            name: format!("Saffron for {name}"),
            unit: "g".to_string(),
            quantity: dec!(1000),
            unit_price: dec!(9.00),
        })
        .await
        .expect("Failed to create saffron");
    let item = shop
        .menu
        .create_item(MenuItemCreate {
            name: name.to_string(),
            description: "Sold by the million".to_string(),
            price,
            recipe: vec![RecipeLine::new(saffron, dec!(0.000001))],
        })
        .await
        .expect("Failed to create item");
    (saffron, item)
}

#[tokio::test]
async fn test_unpriceable_order_is_rejected_on_create() {
    let (shop, _) = open_shop().await;
    let (saffron, gold) = saffron_item(&shop, "Gold latte", dec!(100000000000000000000)).await;
    let service = &shop.order_service;

    // 1e9 units need only 1000 g of saffron, but 1e29 does not fit a Decimal.
    assert_eq!(
        service.create_order(one("Ann", gold, 1_000_000_000)).await,
        Err(OrderError::QuantityTooLarge { product_id: gold })
    );
    assert_eq!(stock(&shop, saffron).await, dec!(1000));

    let response = shop
        .batch
        .create_orders(vec![one("Ann", gold, 1_000_000_000), one("Bob", gold, 1)])
        .await
        .expect("batch");
    assert_eq!(response.summary.accepted, 1);
    assert_eq!(response.summary.rejected, 1);
    let ann = response
        .order_reports
        .iter()
        .find(|r| r.customer_name == "Ann")
        .expect("Ann reported");
    assert_eq!(ann.status, BatchOutcome::Rejected);
    assert_eq!(ann.reason.as_deref(), Some("product quantity too large"));
    assert_eq!(response.summary.inventory_updates.len(), 1);
    assert_eq!(
        response.summary.inventory_updates[0].quantity_used,
        dec!(0.000001)
    );

    let stored = service.list_orders().await.expect("list");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].customer_name, "Bob");

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_revenue_overflow_after_price_change_is_an_error() {
    let (shop, _) = open_shop().await;
    let (_, bulk) = saffron_item(&shop, "Bulk latte", dec!(0.01)).await;
    let service = &shop.order_service;

    let id = place_closed(service, one("Ann", bulk, 1_000_000_000)).await;
    assert_eq!(service.total_sales().await, Ok(dec!(10000000)));

    shop.menu
        .update_item(
            bulk,
            MenuItemUpdate {
                price: Some(dec!(100000000000000000000)),
                ..MenuItemUpdate::default()
            },
        )
        .await
        .expect("reprice");

    assert_eq!(
        service.order_revenue(id).await,
        Err(OrderError::RevenueOverflow(id))
    );
    assert_eq!(
        service.total_sales().await,
        Err(OrderError::RevenueOverflow(id))
    );
    assert_eq!(
        shop.search.search(SearchRequest::new("Ann")).await,
        Err(SearchError::Total(OrderError::RevenueOverflow(id)))
    );

    // Still served after the failures.
    let menu_only = SearchRequest {
        filter: Some("menu".to_string()),
        ..SearchRequest::new("bulk")
    };
    let report = shop.search.search(menu_only).await.expect("menu search");
    assert_eq!(report.menu_items.len(), 1);

    shop.shutdown().await.expect("shutdown");
}

#[tokio::test]
async fn test_sales_overflow_across_orders_is_an_error() {
    let (shop, _) = open_shop().await;
    let big = dec!(40000000000000000000000000000);
    let (_, item) = saffron_item(&shop, "Coronation cake", big).await;
    let service = &shop.order_service;

    let first = place_closed(service, one("Ann", item, 1)).await;
    let second = place_closed(service, one("Bob", item, 1)).await;

    assert_eq!(service.order_revenue(first).await, Ok(big));
    assert_eq!(service.order_revenue(second).await, Ok(big));
    assert_eq!(service.total_sales().await, Err(OrderError::SalesOverflow));

    shop.shutdown().await.expect("shutdown");
}

/// Stores that answer nothing unless told to: any early query would kill them.
#[tokio::test]
async fn test_end_before_start_queries_no_store() {
    let mut order_mock = MockClient::<Order>::new();
    let mut menu_mock = MockClient::<MenuItem>::new();
    let service = OrderService::new(
        OrderClient::new(order_mock.client()),
        MenuClient::new(menu_mock.client()),
    );

    let start = NaiveDate::from_ymd_opt(2024, 3, 5);
    let end = NaiveDate::from_ymd_opt(2024, 3, 1);
    assert!(matches!(
        service.ordered_menu_items_count(start, end).await,
        Err(ReportError::EndBeforeStart { .. })
    ));

    // Both mocks are still serving, so neither saw a request above.
    order_mock
        .expect_command()
        .return_ok(OrderCommandResult::ItemCounts(BTreeMap::new()));
    menu_mock.expect_list().return_ok(Vec::new());
    let counts = service
        .ordered_menu_items_count(end, start)
        .await
        .expect("empty window");
    assert!(counts.is_empty());

    order_mock.verify();
    menu_mock.verify();
}
