use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    Bill, DishId, DishKey, DishStatus, DishTicket, OrderNumber, OrderedDish, Table, TableCreate,
    TableNumber,
};
use crate::table_actor::{Resolved, TableAction, TableActionResult, TableError};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Client for the table actor.
///
/// Requests for a table number that is not open answer with the neutral result
/// (`false`, `None`, empty) instead of an error.
#[derive(Clone)]
pub struct TableClient {
    inner: ResourceClient<Table>,
}

#[async_trait]
impl ActorClient<Table> for TableClient {
    type Error = TableError;

    fn inner(&self) -> &ResourceClient<Table> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TableError::ActorCommunicationError(e.to_string())
    }
}

impl TableClient {
    pub fn new(inner: ResourceClient<Table>) -> Self {
        Self { inner }
    }

    /// Opens a table for `server`. `Ok(false)` if the number is already in use.
    #[instrument(skip(self))]
    pub async fn open(&self, number: TableNumber, server: &str) -> Result<bool, TableError> {
        debug!("Sending request");
        let params = TableCreate {
            number,
            server: server.to_string(),
        };
        match self.inner.create(params).await {
            Ok(_) => Ok(true),
            Err(FrameworkError::AlreadyExists(_)) => Ok(false),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Closes an empty table. `Ok(false)` if it is unknown or still has orders.
    #[instrument(skip(self))]
    pub async fn close(&self, number: TableNumber) -> Result<bool, TableError> {
        debug!("Sending request");
        match self.inner.delete(number).await {
            Ok(()) => Ok(true),
            Err(FrameworkError::NotFound(_)) => Ok(false),
            Err(FrameworkError::EntityError(e)) => {
                warn!(error = %e, "Close refused");
                Ok(false)
            }
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// `Ok(None)` when the table is not open.
    async fn act(
        &self,
        number: TableNumber,
        action: TableAction,
    ) -> Result<Option<TableActionResult>, TableError> {
        match self.inner.perform_action(number, action).await {
            Ok(result) => Ok(Some(result)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    #[instrument(skip(self))]
    pub async fn open_order(&self, table: TableNumber) -> Result<Option<OrderNumber>, TableError> {
        debug!("Sending request");
        match self.act(table, TableAction::OpenOrder).await? {
            None => Ok(None),
            Some(TableActionResult::OpenOrder(number)) => Ok(Some(number)),
            Some(_) => Err(TableError::UnexpectedResult("OpenOrder")),
        }
    }

    #[instrument(skip(self, dish), fields(dish = %dish.id))]
    pub async fn add_tentative(
        &self,
        table: TableNumber,
        order: OrderNumber,
        dish: OrderedDish,
    ) -> Result<bool, TableError> {
        match self.act(table, TableAction::AddTentative { order, dish }).await? {
            None => Ok(false),
            Some(TableActionResult::AddTentative(added)) => Ok(added),
            Some(_) => Err(TableError::UnexpectedResult("AddTentative")),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_tentative(
        &self,
        table: TableNumber,
        order: OrderNumber,
        dish: DishId,
    ) -> Result<bool, TableError> {
        match self.act(table, TableAction::RemoveTentative { order, dish }).await? {
            None => Ok(false),
            Some(TableActionResult::RemoveTentative(removed)) => Ok(removed),
            Some(_) => Err(TableError::UnexpectedResult("RemoveTentative")),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_rejected(
        &self,
        table: TableNumber,
        order: OrderNumber,
        dish: DishId,
    ) -> Result<bool, TableError> {
        match self.act(table, TableAction::RemoveRejected { order, dish }).await? {
            None => Ok(false),
            Some(TableActionResult::RemoveRejected(removed)) => Ok(removed),
            Some(_) => Err(TableError::UnexpectedResult("RemoveRejected")),
        }
    }

    #[instrument(skip(self))]
    pub async fn finalize_all(&self, table: TableNumber) -> Result<Vec<DishTicket>, TableError> {
        debug!("Sending request");
        match self.act(table, TableAction::FinalizeAll).await? {
            None => Ok(Vec::new()),
            Some(TableActionResult::FinalizeAll(tickets)) => Ok(tickets),
            Some(_) => Err(TableError::UnexpectedResult("FinalizeAll")),
        }
    }

    /// Moves the dish one step (or cancels it) if it is currently in `expect`.
    ///
    /// Returns the new status, or `None` if the dish is missing or in another state.
    #[instrument(skip(self))]
    pub async fn transition(
        &self,
        key: DishKey,
        expect: DishStatus,
        proceed: bool,
    ) -> Result<Option<DishStatus>, TableError> {
        let action = TableAction::Transition {
            order: key.order,
            dish: key.dish,
            expect,
            proceed,
        };
        match self.act(key.table, action).await? {
            None => Ok(None),
            Some(TableActionResult::Transition(status)) => Ok(status),
            Some(_) => Err(TableError::UnexpectedResult("Transition")),
        }
    }

    #[instrument(skip(self))]
    pub async fn return_dish(&self, key: DishKey) -> Result<Option<DishTicket>, TableError> {
        let action = TableAction::ReturnDish {
            order: key.order,
            dish: key.dish,
        };
        match self.act(key.table, action).await? {
            None => Ok(None),
            Some(TableActionResult::ReturnDish(ticket)) => Ok(ticket),
            Some(_) => Err(TableError::UnexpectedResult("ReturnDish")),
        }
    }

    /// Bill for one order, or for the whole table when `order` is `None`.
    #[instrument(skip(self))]
    pub async fn bill(
        &self,
        table: TableNumber,
        order: Option<OrderNumber>,
    ) -> Result<Option<Bill>, TableError> {
        match self.act(table, TableAction::Bill { order }).await? {
            None => Ok(None),
            Some(TableActionResult::Bill(bill)) => Ok(bill),
            Some(_) => Err(TableError::UnexpectedResult("Bill")),
        }
    }

    #[instrument(skip(self))]
    pub async fn resolve(
        &self,
        table: TableNumber,
        order: OrderNumber,
    ) -> Result<Option<Resolved>, TableError> {
        match self.act(table, TableAction::Resolve { order }).await? {
            None => Ok(None),
            Some(TableActionResult::Resolve(resolved)) => Ok(resolved),
            Some(_) => Err(TableError::UnexpectedResult("Resolve")),
        }
    }

    #[instrument(skip(self))]
    pub async fn pending_delivery(&self, table: TableNumber) -> Result<Vec<DishKey>, TableError> {
        match self.act(table, TableAction::PendingDelivery).await? {
            None => Ok(Vec::new()),
            Some(TableActionResult::PendingDelivery(keys)) => Ok(keys),
            Some(_) => Err(TableError::UnexpectedResult("PendingDelivery")),
        }
    }
}
