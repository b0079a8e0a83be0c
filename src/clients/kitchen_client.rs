use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::kitchen_actor::{KitchenAction, KitchenActionResult, KitchenError};
use crate::model::{
    CookAttempt, DishKey, DishTicket, Ingredient, Inventory, Kitchen, KitchenCreate, KitchenId,
    KitchenUpdate,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the restaurant's kitchen.
///
/// Bound to one kitchen id; every method is a single request to the kitchen actor and
/// therefore atomic with respect to every other kitchen operation.
#[derive(Clone)]
pub struct KitchenClient {
    inner: ResourceClient<Kitchen>,
    id: KitchenId,
}

#[async_trait]
impl ActorClient<Kitchen> for KitchenClient {
    type Error = KitchenError;

    fn inner(&self) -> &ResourceClient<Kitchen> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => KitchenError::NotFound(id),
            other => KitchenError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl KitchenClient {
    pub fn new(inner: ResourceClient<Kitchen>, id: KitchenId) -> Self {
        Self { inner, id }
    }

    /// Registers a kitchen with the given stock and returns a client bound to it.
    #[instrument(skip(inner, inventory))]
    pub async fn open(inner: ResourceClient<Kitchen>, inventory: Inventory) -> Result<Self, KitchenError> {
        debug!(ingredients = inventory.entries().len(), "Opening kitchen");
        let id = inner
            .create(KitchenCreate { inventory })
            .await
            .map_err(Self::map_error)?;
        Ok(Self::new(inner, id))
    }

    pub fn id(&self) -> KitchenId {
        self.id
    }

    /// Current kitchen state.
    pub async fn snapshot(&self) -> Result<Option<Kitchen>, KitchenError> {
        self.get(self.id).await
    }

    async fn act(&self, action: KitchenAction) -> Result<KitchenActionResult, KitchenError> {
        self.inner
            .perform_action(self.id, action)
            .await
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, shipment), fields(ingredient = %shipment.name))]
    pub async fn receive_shipment(&self, shipment: Ingredient) -> Result<(), KitchenError> {
        debug!("Sending request");
        self.inner
            .update(self.id, KitchenUpdate::Shipment(shipment))
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    #[instrument(skip(self, tickets), fields(count = tickets.len()))]
    pub async fn enqueue(&self, tickets: Vec<DishTicket>) -> Result<(), KitchenError> {
        debug!("Sending request");
        match self.act(KitchenAction::Enqueue(tickets)).await? {
            KitchenActionResult::Enqueue(()) => Ok(()),
            _ => Err(KitchenError::UnexpectedResult("Enqueue")),
        }
    }

    #[instrument(skip(self))]
    pub async fn dequeue_next(&self) -> Result<Option<DishTicket>, KitchenError> {
        debug!("Sending request");
        match self.act(KitchenAction::DequeueNext).await? {
            KitchenActionResult::DequeueNext(ticket) => Ok(ticket),
            _ => Err(KitchenError::UnexpectedResult("DequeueNext")),
        }
    }

    #[instrument(skip(self, requirements))]
    pub async fn sufficient_for(&self, requirements: Vec<Ingredient>) -> Result<bool, KitchenError> {
        match self.act(KitchenAction::SufficientFor(requirements)).await? {
            KitchenActionResult::SufficientFor(enough) => Ok(enough),
            _ => Err(KitchenError::UnexpectedResult("SufficientFor")),
        }
    }

    /// Withdraws without a sufficiency check. Prefer [`Self::try_reserve`].
    #[instrument(skip(self, requirements))]
    pub async fn reserve(&self, requirements: Vec<Ingredient>) -> Result<(), KitchenError> {
        match self.act(KitchenAction::Reserve(requirements)).await? {
            KitchenActionResult::Reserve(()) => Ok(()),
            _ => Err(KitchenError::UnexpectedResult("Reserve")),
        }
    }

    #[instrument(skip(self, requirements))]
    pub async fn try_reserve(&self, requirements: Vec<Ingredient>) -> Result<bool, KitchenError> {
        match self.act(KitchenAction::TryReserve(requirements)).await? {
            KitchenActionResult::TryReserve(reserved) => Ok(reserved),
            _ => Err(KitchenError::UnexpectedResult("TryReserve")),
        }
    }

    #[instrument(skip(self))]
    pub async fn start_next(&self) -> Result<Option<CookAttempt>, KitchenError> {
        debug!("Sending request");
        match self.act(KitchenAction::StartNext).await? {
            KitchenActionResult::StartNext(attempt) => Ok(attempt),
            _ => Err(KitchenError::UnexpectedResult("StartNext")),
        }
    }

    #[instrument(skip(self, ticket), fields(key = %ticket.key))]
    pub async fn move_to_in_progress(&self, ticket: DishTicket) -> Result<(), KitchenError> {
        match self.act(KitchenAction::MoveToInProgress(ticket)).await? {
            KitchenActionResult::MoveToInProgress(()) => Ok(()),
            _ => Err(KitchenError::UnexpectedResult("MoveToInProgress")),
        }
    }

    #[instrument(skip(self))]
    pub async fn move_to_deliverable(&self, key: DishKey) -> Result<bool, KitchenError> {
        match self.act(KitchenAction::MoveToDeliverable(key)).await? {
            KitchenActionResult::MoveToDeliverable(moved) => Ok(moved),
            _ => Err(KitchenError::UnexpectedResult("MoveToDeliverable")),
        }
    }

    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, key: DishKey) -> Result<bool, KitchenError> {
        match self.act(KitchenAction::MarkDelivered(key)).await? {
            KitchenActionResult::MarkDelivered(removed) => Ok(removed),
            _ => Err(KitchenError::UnexpectedResult("MarkDelivered")),
        }
    }

    #[instrument(skip(self))]
    pub async fn discard(&self, key: DishKey) -> Result<bool, KitchenError> {
        match self.act(KitchenAction::Discard(key)).await? {
            KitchenActionResult::Discard(removed) => Ok(removed),
            _ => Err(KitchenError::UnexpectedResult("Discard")),
        }
    }

    pub async fn inventory_snapshot(&self) -> Result<String, KitchenError> {
        match self.act(KitchenAction::InventorySnapshot).await? {
            KitchenActionResult::InventorySnapshot(text) => Ok(text),
            _ => Err(KitchenError::UnexpectedResult("InventorySnapshot")),
        }
    }

    pub async fn work_in_progress(&self) -> Result<String, KitchenError> {
        match self.act(KitchenAction::WorkInProgress).await? {
            KitchenActionResult::WorkInProgress(text) => Ok(text),
            _ => Err(KitchenError::UnexpectedResult("WorkInProgress")),
        }
    }

    pub async fn stock(&self, ingredient: &str) -> Result<Option<f64>, KitchenError> {
        match self.act(KitchenAction::Stock(ingredient.to_string())).await? {
            KitchenActionResult::Stock(amount) => Ok(amount),
            _ => Err(KitchenError::UnexpectedResult("Stock")),
        }
    }
}
