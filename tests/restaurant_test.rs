use kitchen_engine::bootstrap::{EmployeeSeed, RestaurantSeed};
use kitchen_engine::config::RestaurantConfig;
use kitchen_engine::journal::MemoryJournal;
use kitchen_engine::lifecycle::Restaurant;
use kitchen_engine::model::{
    DishId, DishStatus, DishTemplate, Ingredient, Inventory, Menu, OrderNumber, TableNumber,
};
use kitchen_engine::roles::{Employee, Role};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Duration;

const WAIT: Duration = Duration::from_secs(1);

fn dish(name: &str, cents: i64, requirements: &[(&str, f64)]) -> DishTemplate {
    DishTemplate {
        name: name.to_string(),
        price: Decimal::new(cents, 2),
        requirements: requirements
            .iter()
            .map(|(n, a)| Ingredient::new(*n, *a))
            .collect(),
    }
}

fn seed(stock: &[(&str, f64, f64)], dishes: Vec<DishTemplate>) -> RestaurantSeed {
    let mut inventory = Inventory::new();
    for (name, amount, threshold) in stock {
        inventory.seed(name, *amount, *threshold);
    }
    RestaurantSeed {
        inventory,
        menu: Menu::new(dishes),
        employees: Vec::new(),
    }
}

fn ramen_seed() -> RestaurantSeed {
    seed(
        &[("Noodles", 10.0, 2.0), ("Broth", 10.0, 2.0)],
        vec![dish("Ramen", 1250, &[("Noodles", 1.0), ("Broth", 1.0)])],
    )
}

async fn open(seed: RestaurantSeed) -> (Restaurant, Arc<MemoryJournal>) {
    let journal = Arc::new(MemoryJournal::new());
    let restaurant = Restaurant::start(seed, journal.clone(), &RestaurantConfig::default())
        .await
        .expect("Failed to start restaurant");
    (restaurant, journal)
}

/// Full lifecycle of one dish: order, cook, serve, bill, resolve.
#[tokio::test]
async fn test_dish_from_order_to_payment() {
    let (restaurant, journal) = open(ramen_seed()).await;
    let mut ana = restaurant.server("Ana");
    let mut mo = restaurant.cook("Mo");
    let table = TableNumber(1);

    assert!(ana.add_table(table).await.unwrap());
    let order = ana.add_order(table).await.unwrap().expect("order opened");
    assert_eq!(order, OrderNumber(0));
    let id = ana
        .add_to_order(table, order, "Ramen")
        .await
        .unwrap()
        .expect("dish added");
    assert_eq!(id, DishId(0));
    assert_eq!(ana.finalize_table(table).await.unwrap(), 1);

    let label = mo.await_next_dish(WAIT).await.expect("dish queued");
    assert_eq!(label, "#0, Ramen, with 1 Noodles, 1 Broth");
    assert_eq!(mo.mark_seen_and_parse().await.unwrap(), Some(DishStatus::Seen));
    assert!(mo.is_busy());
    assert!(mo.complete_dish().await.unwrap());
    assert!(!mo.is_busy());

    let waiting = ana.awaiting_delivery().await.unwrap();
    assert_eq!(waiting.len(), 1);
    assert!(ana.confirm_served(id, table, order).await.unwrap());
    assert!(ana.awaiting_delivery().await.unwrap().is_empty());
    assert_eq!(
        ana.notifications(),
        vec!["#0, Ramen, with 1 Noodles, 1 Broth for Table #1, Order #0 is ready to be served"]
    );

    let bill = ana.individual_bill(table, order).await.unwrap().expect("bill");
    assert_eq!(bill.subtotal, Decimal::new(1250, 2));
    assert_eq!(bill.tax, Decimal::new(163, 2));
    assert_eq!(bill.gratuity, None);
    assert_eq!(bill.total, Decimal::new(1413, 2));

    assert!(ana.resolve_order(order).await.unwrap());
    assert!(!ana.resolve_order(order).await.unwrap(), "second resolve is a no-op");
    assert!(ana.active_tables().is_empty(), "table closes with its last order");

    let payments = journal.payments();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].1.total, Decimal::new(1413, 2));

    assert_eq!(restaurant.kitchen().stock("Noodles").await.unwrap(), Some(9.0));

    let log = journal.log_messages();
    assert!(log.contains(&"Ana added table number #1 to the active tables.".to_string()));
    assert!(log.contains(&"Ana added order #0 to table #1.".to_string()));
    assert!(log.contains(&"Mo has seen #0, Ramen, with 1 Noodles, 1 Broth".to_string()));
    assert!(log.contains(&"Mo has finished cooking #0, Ramen, with 1 Noodles, 1 Broth".to_string()));
    assert!(log.contains(&"Ana resolved order #0".to_string()));

    drop(ana);
    drop(mo);
    restaurant.shutdown().await.expect("clean shutdown");
}

/// A dish the kitchen cannot make is still accepted, then cancelled by the cook.
#[tokio::test]
async fn test_missing_ingredient_cancels_dish() {
    let (restaurant, journal) = open(seed(
        &[("Salt", 0.0, 1.0), ("Water", 5.0, 1.0)],
        vec![dish("Soup", 600, &[("Water", 1.0), ("Salt", 0.2)])],
    ))
    .await;
    let mut ana = restaurant.server("Ana");
    let mut mo = restaurant.cook("Mo");
    let table = TableNumber(1);

    ana.add_table(table).await.unwrap();
    let order = ana.add_order(table).await.unwrap().unwrap();
    let id = ana.add_to_order(table, order, "Soup").await.unwrap();
    assert!(id.is_some(), "added despite insufficient ingredients");
    assert!(journal
        .log_messages()
        .iter()
        .any(|l| l.starts_with("Ana added, despite insufficient ingredients,")));

    ana.finalize_table(table).await.unwrap();
    mo.await_next_dish(WAIT).await.expect("dish queued");
    assert_eq!(
        mo.mark_seen_and_parse().await.unwrap(),
        Some(DishStatus::Cancelled)
    );
    assert!(!mo.is_busy());
    assert_eq!(restaurant.kitchen().stock("Water").await.unwrap(), Some(5.0));

    assert_eq!(
        ana.notifications(),
        vec!["Tell Table #1, Order #0 that the Soup is currently unavailable, and remove #0, Soup, with 1 Water, 0.2 Salt from their ordered dishes"]
    );

    // Cancelled dishes are not served, so the order stays open until they are removed.
    assert!(!ana.resolve_order(order).await.unwrap());
    assert!(ana
        .remove_rejected_dish(table, order, DishId(0))
        .await
        .unwrap());
    assert!(ana.resolve_order(order).await.unwrap());

    drop(ana);
    drop(mo);
    restaurant.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_resolve_refused_while_dish_is_ready() {
    let (restaurant, _journal) = open(ramen_seed()).await;
    let mut ana = restaurant.server("Ana");
    let mut mo = restaurant.cook("Mo");
    let table = TableNumber(2);

    ana.add_table(table).await.unwrap();
    let order = ana.add_order(table).await.unwrap().unwrap();
    ana.add_to_order(table, order, "Ramen").await.unwrap();
    ana.finalize_table(table).await.unwrap();
    mo.mark_seen_and_parse().await.unwrap();
    mo.complete_dish().await.unwrap();

    assert!(!ana.resolve_order(order).await.unwrap());
    assert!(ana.order(table, order).await.unwrap().is_some(), "order remains");

    drop(ana);
    drop(mo);
    restaurant.shutdown().await.unwrap();
}

/// While a dish waits to be carried out, the server takes on nothing new.
#[tokio::test]
async fn test_pending_delivery_blocks_new_work() {
    let (restaurant, _journal) = open(ramen_seed()).await;
    let mut ana = restaurant.server("Ana");
    let mut mo = restaurant.cook("Mo");
    let table = TableNumber(1);

    ana.add_table(table).await.unwrap();
    let order = ana.add_order(table).await.unwrap().unwrap();
    let id = ana.add_to_order(table, order, "Ramen").await.unwrap().unwrap();
    ana.finalize_table(table).await.unwrap();
    mo.mark_seen_and_parse().await.unwrap();
    mo.complete_dish().await.unwrap();

    assert!(!ana.add_table(TableNumber(2)).await.unwrap());
    assert_eq!(ana.add_order(table).await.unwrap(), None);
    assert_eq!(ana.add_to_order(table, order, "Ramen").await.unwrap(), None);

    ana.confirm_served(id, table, order).await.unwrap();

    assert!(ana.add_table(TableNumber(2)).await.unwrap());
    assert!(ana.add_order(table).await.unwrap().is_some());

    drop(ana);
    drop(mo);
    restaurant.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_returned_dish_is_cooked_again() {
    let (restaurant, journal) = open(ramen_seed()).await;
    let mut ana = restaurant.server("Ana");
    let mut mo = restaurant.cook("Mo");
    let table = TableNumber(1);

    ana.add_table(table).await.unwrap();
    let order = ana.add_order(table).await.unwrap().unwrap();
    let id = ana.add_to_order(table, order, "Ramen").await.unwrap().unwrap();
    ana.finalize_table(table).await.unwrap();
    mo.mark_seen_and_parse().await.unwrap();
    mo.complete_dish().await.unwrap();
    ana.confirm_served(id, table, order).await.unwrap();

    assert!(ana.return_dish(table, order, id).await.unwrap());
    assert!(!ana.return_dish(table, order, id).await.unwrap(), "not served any more");
    assert!(journal.log_messages().contains(
        &"Ana found something wrong with dish #0, and sent it back to the kitchen.".to_string()
    ));

    let snapshot = ana.order(table, order).await.unwrap().unwrap();
    assert_eq!(snapshot.finalized()[0].status(), DishStatus::Ordered);
    assert_eq!(snapshot.finalized()[0].id, id);

    assert_eq!(mo.mark_seen_and_parse().await.unwrap(), Some(DishStatus::Seen));
    assert_eq!(restaurant.kitchen().stock("Broth").await.unwrap(), Some(8.0));

    drop(ana);
    drop(mo);
    restaurant.shutdown().await.unwrap();
}

/// Dishes are cooked in the order they were sent, and each server hears only about
/// their own tables.
#[tokio::test]
async fn test_fifo_across_servers() {
    let (restaurant, _journal) = open(ramen_seed()).await;
    let mut ana = restaurant.server("Ana");
    let mut bo = restaurant.server("Bo");
    let mut mo = restaurant.cook("Mo");

    ana.add_table(TableNumber(1)).await.unwrap();
    bo.add_table(TableNumber(2)).await.unwrap();
    assert!(!bo.add_table(TableNumber(1)).await.unwrap(), "number taken");

    let first = ana.add_order(TableNumber(1)).await.unwrap().unwrap();
    let second = bo.add_order(TableNumber(2)).await.unwrap().unwrap();
    assert_eq!((first, second), (OrderNumber(0), OrderNumber(1)));
    assert_eq!(bo.add_order(TableNumber(1)).await.unwrap(), None, "not Bo's table");

    ana.add_to_order(TableNumber(1), first, "Ramen").await.unwrap();
    bo.add_to_order(TableNumber(2), second, "Ramen").await.unwrap();
    ana.finalize_table(TableNumber(1)).await.unwrap();
    bo.finalize_table(TableNumber(2)).await.unwrap();

    let mut cooked = Vec::new();
    for _ in 0..2 {
        mo.mark_seen_and_parse().await.unwrap();
        cooked.push(mo.current_dish().unwrap().key.table);
        mo.complete_dish().await.unwrap();
    }
    assert_eq!(cooked, vec![TableNumber(1), TableNumber(2)]);
    assert_eq!(mo.next_dish_label(), "");

    let ana_notes = ana.notifications();
    let bo_notes = bo.notifications();
    assert_eq!(ana_notes.len(), 1);
    assert!(ana_notes[0].contains("Table #1, Order #0"));
    assert_eq!(bo_notes.len(), 1);
    assert!(bo_notes[0].contains("Table #2, Order #1"));

    drop(ana);
    drop(bo);
    drop(mo);
    restaurant.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_low_stock_reaches_manager() {
    let (restaurant, journal) = open(seed(
        &[("Flour", 5.0, 2.0)],
        vec![dish("Bread", 300, &[("Flour", 4.0)])],
    ))
    .await;
    let mut ana = restaurant.server("Ana");
    let mut mo = restaurant.cook("Mo");
    let mut lee = restaurant.manager("Lee");
    let table = TableNumber(1);

    ana.add_table(table).await.unwrap();
    let order = ana.add_order(table).await.unwrap().unwrap();
    ana.add_to_order(table, order, "Bread").await.unwrap();
    ana.finalize_table(table).await.unwrap();
    mo.mark_seen_and_parse().await.unwrap();

    assert_eq!(restaurant.kitchen().stock("Flour").await.unwrap(), Some(1.0));
    assert_eq!(lee.process_restock_requests(), vec!["Flour"]);
    assert!(lee.process_restock_requests().is_empty());
    assert_eq!(journal.restock_requests(), vec!["I'd like to Order 20 more Flour"]);

    let printout = lee.check_inventory().await.unwrap();
    assert!(printout.starts_with("=== Current Inventory ===\n"));
    assert!(printout.contains("1 Flour"));
    assert!(lee.orders_in_progress().await.unwrap().contains("Bread"));

    drop(ana);
    drop(mo);
    drop(lee);
    restaurant.shutdown().await.unwrap();
}

/// A busy floor between the restock trigger and the manager's next look must not
/// crowd out the request, nor the READY notice waiting for its server.
#[tokio::test]
async fn test_restock_request_survives_busy_floor() {
    let (restaurant, journal) = open(seed(
        &[("Flour", 5.0, 2.0)],
        vec![dish("Bread", 300, &[("Flour", 4.0)])],
    ))
    .await;
    let mut ana = restaurant.server("Ana");
    let mut bo = restaurant.server("Bo");
    let mut mo = restaurant.cook("Mo");
    let mut lee = restaurant.manager("Lee");

    let table = TableNumber(1);
    ana.add_table(table).await.unwrap();
    let order = ana.add_order(table).await.unwrap().unwrap();
    ana.add_to_order(table, order, "Bread").await.unwrap();
    ana.finalize_table(table).await.unwrap();
    assert_eq!(mo.mark_seen_and_parse().await.unwrap(), Some(DishStatus::Seen));
    assert!(mo.complete_dish().await.unwrap());

    let busy = TableNumber(2);
    bo.add_table(busy).await.unwrap();
    let bo_order = bo.add_order(busy).await.unwrap().unwrap();
    for _ in 0..600 {
        let id = bo
            .add_to_order(busy, bo_order, "Bread")
            .await
            .unwrap()
            .expect("dish added");
        assert!(bo.remove_tentative_dish(busy, bo_order, id).await.unwrap());
    }
    assert!(journal.log_entries().len() > 1200);

    assert_eq!(lee.process_restock_requests(), vec!["Flour"]);
    assert_eq!(journal.restock_requests().len(), 1);
    assert_eq!(ana.notifications().len(), 1);
    assert_eq!(ana.awaiting_delivery().await.unwrap().len(), 1);

    drop(ana);
    drop(bo);
    drop(mo);
    drop(lee);
    restaurant.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_any_employee_receives_shipments() {
    let (restaurant, journal) = open(seed(&[("Flour", 5.0, 2.0)], vec![])).await;
    let lee = restaurant.manager("Lee");
    let mo = restaurant.cook("Mo");

    lee.receive_shipment(Ingredient::new("Flour", 20.0)).await.unwrap();
    mo.receive_shipment(Ingredient::new("Sugar", 3.0)).await.unwrap();

    let kitchen = restaurant.kitchen();
    assert_eq!(kitchen.stock("Flour").await.unwrap(), Some(25.0));
    assert_eq!(kitchen.stock("Sugar").await.unwrap(), Some(3.0));
    assert!(journal
        .log_messages()
        .contains(&"Mo received a shipment of 3 Sugar".to_string()));

    drop(lee);
    drop(mo);
    restaurant.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_staff_built_from_seed() {
    let mut seed = ramen_seed();
    seed.employees = vec![
        EmployeeSeed { role: Role::Server, name: "Ana".into() },
        EmployeeSeed { role: Role::Cook, name: "Mo".into() },
        EmployeeSeed { role: Role::Server, name: "Bo".into() },
    ];
    let (restaurant, _journal) = open(seed).await;

    let staff = restaurant.staff();
    let servers: Vec<&str> = staff.servers.iter().map(|s| s.name()).collect();
    assert_eq!(servers, vec!["Ana", "Bo"]);
    assert_eq!(staff.cooks.len(), 1);
    assert_eq!(staff.cooks[0].role(), Role::Cook);
    assert!(staff.managers.is_empty());

    drop(staff);
    restaurant.shutdown().await.unwrap();
}

/// Seeds and journals on disk, as the binary runs it.
#[tokio::test]
async fn test_restaurant_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = RestaurantConfig::with_data_dir(dir.path());
    std::fs::write(config.inventory_path(), "Noodles | 10 | 2\nBroth | 10 | 2\n").unwrap();
    std::fs::write(config.menu_path(), "Ramen | 12.50 | Noodles, 1 | Broth, 1\n").unwrap();
    std::fs::write(config.employees_path(), "Server | Ana\nBusboy | Al\n").unwrap();

    let restaurant = Restaurant::from_config(&config).await.unwrap();
    let mut staff = restaurant.staff();
    assert_eq!(staff.servers.len(), 1);
    let ana = &mut staff.servers[0];
    assert!(ana.add_table(TableNumber(4)).await.unwrap());

    let log = std::fs::read_to_string(config.log_path()).unwrap();
    assert!(log.contains("Ana added table number #4 to the active tables."));

    drop(staff);
    restaurant.shutdown().await.unwrap();
}
