use super::{Employee, NotificationFeed, Role, RoleError};
use crate::clients::{KitchenClient, TableClient};
use crate::events::{RestaurantEvent, Subscription};
use crate::framework::ActorClient;
use crate::journal::Logbook;
use crate::model::{
    Bill, DishId, DishIdRing, DishKey, DishStatus, Menu, Order, OrderNumber, OrderedDish,
    TableNumber,
};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Takes orders, relays them to the kitchen, carries dishes out and settles bills.
///
/// A server only acts on tables it opened. While any dish at those tables is READY
/// and not yet confirmed served, the server takes no new tables, orders or dishes.
pub struct Server {
    name: String,
    kitchen: KitchenClient,
    tables: TableClient,
    menu: Arc<Menu>,
    dish_ids: Arc<DishIdRing>,
    logbook: Logbook,
    feed: Subscription,
    notifications: NotificationFeed,
    active: BTreeSet<TableNumber>,
}

impl Server {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        kitchen: KitchenClient,
        tables: TableClient,
        menu: Arc<Menu>,
        dish_ids: Arc<DishIdRing>,
        logbook: Logbook,
        feed: Subscription,
        notification_capacity: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kitchen,
            tables,
            menu,
            dish_ids,
            logbook,
            feed,
            notifications: NotificationFeed::new(notification_capacity),
            active: BTreeSet::new(),
        }
    }

    /// Moves delivered dish notices into the notification feed.
    fn absorb_feed(&mut self) {
        for event in self.feed.drain() {
            if let RestaurantEvent::DishStatusChanged(notice) = event {
                let text = notice.text();
                self.logbook.record(&self.name, "was told:", &text);
                self.notifications.push(text);
            }
        }
    }

    fn owns(&self, table: TableNumber) -> bool {
        self.active.contains(&table)
    }

    /// Notifications, oldest first.
    pub fn notifications(&mut self) -> Vec<String> {
        self.absorb_feed();
        self.notifications.messages()
    }

    /// READY dishes at this server's tables that still need confirming.
    pub async fn awaiting_delivery(&mut self) -> Result<Vec<DishKey>, RoleError> {
        self.absorb_feed();
        let mut waiting = Vec::new();
        for table in &self.active {
            waiting.extend(self.tables.pending_delivery(*table).await?);
        }
        Ok(waiting)
    }

    async fn is_blocked(&mut self) -> Result<bool, RoleError> {
        let waiting = self.awaiting_delivery().await?;
        if !waiting.is_empty() {
            debug!(server = %self.name, waiting = waiting.len(), "Deliveries pending");
        }
        Ok(!waiting.is_empty())
    }

    pub fn active_tables(&self) -> Vec<TableNumber> {
        self.active.iter().copied().collect()
    }

    pub async fn active_orders(&self, table: TableNumber) -> Result<Vec<OrderNumber>, RoleError> {
        Ok(self
            .table_snapshot(table)
            .await?
            .map(|t| t.orders().iter().map(|o| o.number).collect())
            .unwrap_or_default())
    }

    /// Snapshot of one order.
    pub async fn order(&self, table: TableNumber, order: OrderNumber) -> Result<Option<Order>, RoleError> {
        Ok(self
            .table_snapshot(table)
            .await?
            .and_then(|t| t.order(order).cloned()))
    }

    async fn table_snapshot(&self, table: TableNumber) -> Result<Option<crate::model::Table>, RoleError> {
        if !self.owns(table) {
            return Ok(None);
        }
        Ok(self.tables.get(table).await?)
    }

    /// Refused while deliveries are pending, or if the number is taken.
    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn add_table(&mut self, table: TableNumber) -> Result<bool, RoleError> {
        if self.is_blocked().await? {
            return Ok(false);
        }
        if !self.tables.open(table, &self.name).await? {
            return Ok(false);
        }
        self.active.insert(table);
        self.logbook.record(
            &self.name,
            "added table number",
            format!("#{table} to the active tables."),
        );
        Ok(true)
    }

    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn add_order(&mut self, table: TableNumber) -> Result<Option<OrderNumber>, RoleError> {
        if !self.owns(table) || self.is_blocked().await? {
            return Ok(None);
        }
        let number = self.tables.open_order(table).await?;
        if let Some(number) = number {
            self.logbook
                .record(&self.name, "added order", format!("#{number} to table #{table}."));
        }
        Ok(number)
    }

    /// Adds a menu dish to an order's tentative list.
    ///
    /// Stock is checked but not reserved; a dish the kitchen cannot make is still
    /// added and will be cancelled when a cook picks it up.
    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn add_to_order(
        &mut self,
        table: TableNumber,
        order: OrderNumber,
        dish_name: &str,
    ) -> Result<Option<DishId>, RoleError> {
        if !self.owns(table) || self.is_blocked().await? {
            return Ok(None);
        }
        let Some(template) = self.menu.find(dish_name) else {
            debug!(dish_name, "Not on the menu");
            return Ok(None);
        };
        let available = self
            .kitchen
            .sufficient_for(template.requirements.clone())
            .await?;
        let dish = OrderedDish::from_template(template, &self.dish_ids);
        let id = dish.id;
        let label = dish.to_string();
        if !self.tables.add_tentative(table, order, dish).await? {
            return Ok(None);
        }
        let action = if available {
            "added"
        } else {
            "added, despite insufficient ingredients,"
        };
        self.logbook.record(
            &self.name,
            action,
            format!("{label} to table #{table}, order #{order}'s tentative order"),
        );
        Ok(Some(id))
    }

    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn remove_tentative_dish(
        &mut self,
        table: TableNumber,
        order: OrderNumber,
        dish: DishId,
    ) -> Result<bool, RoleError> {
        if !self.owns(table) || !self.tables.remove_tentative(table, order, dish).await? {
            return Ok(false);
        }
        self.logbook.record(
            &self.name,
            "removed ordered dish",
            format!("#{dish} from table #{table}'s tentative order."),
        );
        Ok(true)
    }

    /// Drops a finalized dish the kitchen cancelled.
    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn remove_rejected_dish(
        &mut self,
        table: TableNumber,
        order: OrderNumber,
        dish: DishId,
    ) -> Result<bool, RoleError> {
        if !self.owns(table) || !self.tables.remove_rejected(table, order, dish).await? {
            return Ok(false);
        }
        self.logbook.record(
            &self.name,
            "removed ordered dish",
            format!("#{dish} from table #{table}'s order."),
        );
        Ok(true)
    }

    /// Sends every tentative dish at the table to the kitchen. Returns how many went.
    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn finalize_table(&mut self, table: TableNumber) -> Result<usize, RoleError> {
        if !self.owns(table) {
            return Ok(0);
        }
        let tickets = self.tables.finalize_all(table).await?;
        let sent = tickets.len();
        if sent > 0 {
            self.kitchen.enqueue(tickets).await?;
        }
        self.logbook.record(
            &self.name,
            "sent the orders for",
            format!("table #{table} to the kitchen."),
        );
        Ok(sent)
    }

    pub async fn finalize_tables(&mut self, tables: &[TableNumber]) -> Result<usize, RoleError> {
        let mut sent = 0;
        for table in tables {
            sent += self.finalize_table(*table).await?;
        }
        Ok(sent)
    }

    /// READY -> SERVED. Anything else is ignored.
    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn confirm_served(
        &mut self,
        dish: DishId,
        table: TableNumber,
        order: OrderNumber,
    ) -> Result<bool, RoleError> {
        if !self.owns(table) {
            return Ok(false);
        }
        let key = DishKey { table, order, dish };
        let status = self.tables.transition(key, DishStatus::Ready, true).await?;
        if status != Some(DishStatus::Served) {
            return Ok(false);
        }
        self.kitchen.mark_delivered(key).await?;
        self.logbook.record(
            &self.name,
            "delivered",
            format!("dish #{dish} to Table #{table}, Order #{order}"),
        );
        Ok(true)
    }

    /// Sends a served dish back to the kitchen to be made again.
    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn return_dish(
        &mut self,
        table: TableNumber,
        order: OrderNumber,
        dish: DishId,
    ) -> Result<bool, RoleError> {
        if !self.owns(table) {
            return Ok(false);
        }
        let key = DishKey { table, order, dish };
        let Some(ticket) = self.tables.return_dish(key).await? else {
            return Ok(false);
        };
        self.kitchen.enqueue(vec![ticket]).await?;
        self.logbook.record(
            &self.name,
            "found something wrong with",
            format!("dish #{dish}, and sent it back to the kitchen."),
        );
        Ok(true)
    }

    /// Whole-table bill over served dishes.
    pub async fn bill(&self, table: TableNumber) -> Result<Option<Bill>, RoleError> {
        if !self.owns(table) {
            return Ok(None);
        }
        Ok(self.tables.bill(table, None).await?)
    }

    pub async fn individual_bill(
        &self,
        table: TableNumber,
        order: OrderNumber,
    ) -> Result<Option<Bill>, RoleError> {
        if !self.owns(table) {
            return Ok(None);
        }
        Ok(self.tables.bill(table, Some(order)).await?)
    }

    /// Settles an order once all its dishes are served. The table closes with its
    /// last order.
    #[instrument(skip(self), fields(server = %self.name))]
    pub async fn resolve_order(&mut self, order: OrderNumber) -> Result<bool, RoleError> {
        for table in self.active_tables() {
            let Some(resolved) = self.tables.resolve(table, order).await? else {
                continue;
            };
            if resolved.remaining == 0 && self.tables.close(table).await? {
                self.active.remove(&table);
            }
            self.logbook
                .record(&self.name, "resolved order", format!("#{order}"));
            return Ok(true);
        }
        Ok(false)
    }
}

impl Employee for Server {
    fn name(&self) -> &str {
        &self.name
    }

    fn role(&self) -> Role {
        Role::Server
    }

    fn kitchen(&self) -> &KitchenClient {
        &self.kitchen
    }

    fn logbook(&self) -> &Logbook {
        &self.logbook
    }
}
