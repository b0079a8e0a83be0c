use kitchen_engine::clients::{KitchenClient, TableClient};
use kitchen_engine::events::{Audience, EventBus, RestaurantEvent};
use kitchen_engine::framework::mock::MockClient;
use kitchen_engine::journal::{Logbook, MemoryJournal};
use kitchen_engine::kitchen_actor::KitchenActionResult;
use kitchen_engine::model::{
    CookAttempt, DishIdRing, DishKey, DishSignal, DishStatus, DishTemplate, DishTicket,
    Ingredient, Kitchen, KitchenId, OrderSequence, OrderedDish, TableNumber,
};
use kitchen_engine::roles::Cook;
use kitchen_engine::table_actor::TableContext;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Real table actor with one finalized dish; returns its kitchen ticket.
async fn table_with_one_dish(bus: &EventBus) -> (TableClient, DishTicket, tokio::task::JoinHandle<()>) {
    let (table_actor, tables) = kitchen_engine::table_actor::new(8);
    let handle = tokio::spawn(table_actor.run(TableContext {
        bus: bus.clone(),
        order_numbers: Arc::new(OrderSequence::new()),
        journal: Arc::new(MemoryJournal::new()),
    }));

    let table = TableNumber(5);
    assert!(tables.open(table, "Ana").await.unwrap());
    let order = tables.open_order(table).await.unwrap().unwrap();
    let template = DishTemplate {
        name: "Salad".to_string(),
        price: Decimal::new(800, 2),
        requirements: vec![Ingredient::new("Lettuce", 1.0)],
    };
    let dish = OrderedDish::from_template(&template, &DishIdRing::new());
    assert!(tables.add_tentative(table, order, dish).await.unwrap());
    let mut tickets = tables.finalize_all(table).await.unwrap();
    assert_eq!(tickets.len(), 1);
    (tables, tickets.remove(0), handle)
}

fn cook(kitchen: &MockClient<Kitchen>, tables: TableClient, bus: &EventBus) -> Cook {
    let logbook = Logbook::new(Arc::new(MemoryJournal::new()), bus.clone());
    Cook::new(
        "Mo",
        KitchenClient::new(kitchen.client(), KitchenId(0)),
        tables,
        logbook,
        bus.subscribe(Audience::Cooks),
    )
}

/// Real Table actor with a mocked kitchen: the cook drives the dish to READY and the
/// table tells the owning server.
#[tokio::test]
async fn test_cook_with_mocked_kitchen() {
    let bus = EventBus::new();
    let mut ana = bus.subscribe(Audience::Server("Ana".into()));
    let (tables, ticket, handle) = table_with_one_dish(&bus).await;

    let mut kitchen = MockClient::<Kitchen>::new();
    kitchen
        .expect_action()
        .return_ok(KitchenActionResult::StartNext(Some(CookAttempt::Started(ticket.clone()))));
    kitchen
        .expect_action()
        .return_ok(KitchenActionResult::MoveToDeliverable(true));

    let mut mo = cook(&kitchen, tables.clone(), &bus);
    assert_eq!(mo.mark_seen_and_parse().await.unwrap(), Some(DishStatus::Seen));
    assert_eq!(mo.current_dish(), Some(&ticket));
    // Busy: the kitchen is not asked again.
    assert_eq!(mo.mark_seen_and_parse().await.unwrap(), None);
    assert!(mo.complete_dish().await.unwrap());

    kitchen.verify();
    assert_eq!(kitchen.seen().len(), 2);

    let events = ana.drain();
    assert_eq!(events.len(), 1);
    match &events[0] {
        RestaurantEvent::DishStatusChanged(notice) => {
            assert_eq!(notice.key, ticket.key);
            assert_eq!(notice.signal, DishSignal::Ready);
        }
        other => panic!("unexpected event {other:?}"),
    }

    drop(mo);
    drop(tables);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_rejected_attempt_cancels_dish() {
    let bus = EventBus::new();
    let mut ana = bus.subscribe(Audience::Server("Ana".into()));
    let (tables, ticket, handle) = table_with_one_dish(&bus).await;

    let mut kitchen = MockClient::<Kitchen>::new();
    kitchen
        .expect_action()
        .return_ok(KitchenActionResult::StartNext(Some(CookAttempt::Rejected(ticket.clone()))));

    let mut mo = cook(&kitchen, tables.clone(), &bus);
    assert_eq!(
        mo.mark_seen_and_parse().await.unwrap(),
        Some(DishStatus::Cancelled)
    );
    assert!(!mo.is_busy());
    assert!(!mo.complete_dish().await.unwrap());
    kitchen.verify();

    let events = ana.drain();
    assert!(matches!(
        &events[..],
        [RestaurantEvent::DishStatusChanged(n)] if n.signal == DishSignal::Cancelled
    ));

    drop(mo);
    drop(tables);
    handle.await.unwrap();
}

/// A ticket whose dish is gone from its order is discarded instead of cooked.
#[tokio::test]
async fn test_orphaned_ticket_is_discarded() {
    let bus = EventBus::new();
    let (tables, ticket, handle) = table_with_one_dish(&bus).await;
    let orphan = DishTicket {
        key: DishKey {
            table: TableNumber(99),
            ..ticket.key
        },
        ..ticket
    };

    let mut kitchen = MockClient::<Kitchen>::new();
    kitchen
        .expect_action()
        .return_ok(KitchenActionResult::StartNext(Some(CookAttempt::Started(orphan))));
    kitchen
        .expect_action()
        .return_ok(KitchenActionResult::Discard(true));

    let mut mo = cook(&kitchen, tables.clone(), &bus);
    assert_eq!(mo.mark_seen_and_parse().await.unwrap(), None);
    assert!(!mo.is_busy());
    kitchen.verify();

    drop(mo);
    drop(tables);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_empty_queue_leaves_cook_idle() {
    let bus = EventBus::new();
    let (tables, _ticket, handle) = table_with_one_dish(&bus).await;

    let mut kitchen = MockClient::<Kitchen>::new();
    kitchen
        .expect_action()
        .return_ok(KitchenActionResult::StartNext(None));

    let mut mo = cook(&kitchen, tables.clone(), &bus);
    assert_eq!(mo.mark_seen_and_parse().await.unwrap(), None);
    assert!(mo
        .await_next_dish(std::time::Duration::from_millis(20))
        .await
        .is_none());
    kitchen.verify();

    drop(mo);
    drop(tables);
    handle.await.unwrap();
}
