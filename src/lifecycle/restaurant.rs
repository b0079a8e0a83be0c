use crate::bootstrap::{ConfigurationError, EmployeeSeed, RestaurantSeed};
use crate::clients::{KitchenClient, TableClient};
use crate::config::RestaurantConfig;
use crate::events::{Audience, EventBus};
use crate::journal::{FileJournal, Journal, Logbook};
use crate::model::{DishIdRing, Menu, OrderSequence};
use crate::roles::{Cook, Manager, Role, Server};
use crate::table_actor::TableContext;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument};

/// Staff built from the employee seed, grouped by role.
#[derive(Default)]
pub struct Staff {
    pub servers: Vec<Server>,
    pub cooks: Vec<Cook>,
    pub managers: Vec<Manager>,
}

/// One running restaurant: the kitchen and table actors plus the shared pieces every
/// coordinator needs.
///
/// `Restaurant` is the only place that spawns actors. Everything else talks to them
/// through the clients handed out here.
///
/// # Example
///
/// ```ignore
/// let restaurant = Restaurant::start(seed, journal, &config).await?;
///
/// let mut ana = restaurant.server("Ana");
/// ana.add_table(TableNumber(1)).await?;
///
/// drop(ana);
/// restaurant.shutdown().await?;
/// ```
pub struct Restaurant {
    kitchen: KitchenClient,
    tables: TableClient,
    bus: EventBus,
    menu: Arc<Menu>,
    dish_ids: Arc<DishIdRing>,
    logbook: Logbook,
    employees: Vec<EmployeeSeed>,
    notification_capacity: usize,
    handles: Vec<JoinHandle<()>>,
}

impl Restaurant {
    /// Spawns the kitchen and table actors and registers the seeded kitchen.
    ///
    /// 1. Creates the event bus and the shared counters.
    /// 2. Spawns both actors with their injected context.
    /// 3. Opens the kitchen with the seeded inventory.
    #[instrument(skip_all)]
    pub async fn start(
        seed: RestaurantSeed,
        journal: Arc<dyn Journal>,
        config: &RestaurantConfig,
    ) -> Result<Self, ConfigurationError> {
        let bus = EventBus::new();
        let order_numbers = Arc::new(OrderSequence::new());

        let (kitchen_actor, kitchen_inner) = crate::kitchen_actor::new(config.actor_buffer);
        let (table_actor, tables) = crate::table_actor::new(config.actor_buffer);

        let kitchen_handle = tokio::spawn(kitchen_actor.run(bus.clone()));
        let table_handle = tokio::spawn(table_actor.run(TableContext {
            bus: bus.clone(),
            order_numbers,
            journal: journal.clone(),
        }));

        let kitchen = KitchenClient::open(kitchen_inner, seed.inventory)
            .await
            .map_err(|e| ConfigurationError::Kitchen(e.to_string()))?;

        info!(
            kitchen = %kitchen.id(),
            dishes = seed.menu.dishes().len(),
            staff = seed.employees.len(),
            "Restaurant open"
        );

        Ok(Self {
            kitchen,
            tables,
            logbook: Logbook::new(journal, bus.clone()),
            bus,
            menu: Arc::new(seed.menu),
            dish_ids: Arc::new(DishIdRing::new()),
            employees: seed.employees,
            notification_capacity: config.notification_capacity,
            handles: vec![kitchen_handle, table_handle],
        })
    }

    /// Loads the seed files and opens file journals, all as named by `config`.
    pub async fn from_config(config: &RestaurantConfig) -> Result<Self, ConfigurationError> {
        let seed = RestaurantSeed::load(config)?;
        let journal = Arc::new(FileJournal::new(
            config.log_path(),
            config.requests_path(),
            config.payments_dir(),
        ));
        Self::start(seed, journal, config).await
    }

    pub fn kitchen(&self) -> &KitchenClient {
        &self.kitchen
    }

    pub fn tables(&self) -> &TableClient {
        &self.tables
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    /// A server subscribed to notices for tables it opens.
    pub fn server(&self, name: &str) -> Server {
        Server::new(
            name,
            self.kitchen.clone(),
            self.tables.clone(),
            self.menu.clone(),
            self.dish_ids.clone(),
            self.logbook.clone(),
            self.bus.subscribe(Audience::Server(name.to_string())),
            self.notification_capacity,
        )
    }

    pub fn cook(&self, name: &str) -> Cook {
        Cook::new(
            name,
            self.kitchen.clone(),
            self.tables.clone(),
            self.logbook.clone(),
            self.bus.subscribe(Audience::Cooks),
        )
    }

    pub fn manager(&self, name: &str) -> Manager {
        Manager::new(
            name,
            self.kitchen.clone(),
            self.logbook.clone(),
            self.bus.subscribe(Audience::Managers),
        )
    }

    /// One coordinator per seeded employee, in seed order within each role.
    pub fn staff(&self) -> Staff {
        let mut staff = Staff::default();
        for employee in &self.employees {
            match employee.role {
                Role::Server => staff.servers.push(self.server(&employee.name)),
                Role::Cook => staff.cooks.push(self.cook(&employee.name)),
                Role::Manager => staff.managers.push(self.manager(&employee.name)),
            }
        }
        staff
    }

    /// Gracefully shuts the restaurant down.
    ///
    /// Actors stop once every client is gone, so all coordinators handed out by this
    /// restaurant must be dropped first; otherwise this waits for them.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if both actors stopped cleanly
    /// - `Err(String)` if an actor task panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Closing restaurant...");

        // Closing the request channels ends each actor's loop.
        drop(self.kitchen);
        drop(self.tables);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Restaurant closed.");
        Ok(())
    }
}
