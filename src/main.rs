//! Demo run: one table, one order, every dish on the menu, from finalize to payment.
//!
//! Seed files and journals are read and written under `RESTAURANT_DATA_DIR`. Empty
//! seed files are created on the first run; fill them in and run again.

use kitchen_engine::config::RestaurantConfig;
use kitchen_engine::lifecycle::{setup_tracing, Restaurant};
use kitchen_engine::model::TableNumber;
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = RestaurantConfig::from_env();
    info!(data_dir = %config.data_dir.display(), "Starting restaurant");

    let restaurant = Restaurant::from_config(&config)
        .await
        .map_err(|e| e.to_string())?;

    if restaurant.menu().is_empty() {
        warn!(menu = %config.menu_path().display(), "Menu is empty; nothing to cook");
        return restaurant.shutdown().await;
    }

    let mut staff = restaurant.staff();
    let mut server = staff
        .servers
        .pop()
        .unwrap_or_else(|| restaurant.server("Server"));
    let mut cook = staff.cooks.pop().unwrap_or_else(|| restaurant.cook("Cook"));
    let mut manager = staff
        .managers
        .pop()
        .unwrap_or_else(|| restaurant.manager("Manager"));
    drop(staff);

    let dishes: Vec<String> = restaurant
        .menu()
        .dishes()
        .iter()
        .map(|d| d.name.clone())
        .collect();
    let table = TableNumber(1);

    let span = tracing::info_span!("ordering");
    let order = async {
        server.add_table(table).await?;
        let order = server.add_order(table).await?;
        if let Some(order) = order {
            for dish in &dishes {
                server.add_to_order(table, order, dish).await?;
            }
            server.finalize_table(table).await?;
        }
        Ok::<_, kitchen_engine::roles::RoleError>(order)
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let Some(order) = order else {
        return Err("Table could not be opened".to_string());
    };

    let span = tracing::info_span!("cooking");
    async {
        while cook.await_next_dish(Duration::from_millis(100)).await.is_some() {
            match cook.mark_seen_and_parse().await? {
                Some(status) => info!(%status, "Dish picked up"),
                None => break,
            }
            cook.complete_dish().await?;
        }
        Ok::<_, kitchen_engine::roles::RoleError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("serving");
    async {
        for key in server.awaiting_delivery().await? {
            server.confirm_served(key.dish, key.table, key.order).await?;
        }
        for note in server.notifications() {
            info!(%note, "Notification");
        }
        // Cancelled dishes block resolution until removed.
        if let Some(snapshot) = server.order(table, order).await? {
            for dish in snapshot.finalized().iter().filter(|d| d.is_cancelled()) {
                server.remove_rejected_dish(table, order, dish.id).await?;
            }
        }
        if let Some(bill) = server.individual_bill(table, order).await? {
            info!("\n{bill}");
        }
        server.resolve_order(order).await?;
        for ingredient in manager.process_restock_requests() {
            info!(%ingredient, "Restock requested");
        }
        info!("\n{}", manager.check_inventory().await?);
        Ok::<_, kitchen_engine::roles::RoleError>(())
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    drop(server);
    drop(cook);
    drop(manager);
    restaurant.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
