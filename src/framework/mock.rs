//! # Mock Framework
//!
//! Stand-ins for a running `ResourceActor`, so that a coordinator can be exercised
//! against scripted actor answers.
//!
//! Two styles are available:
//! - [`MockClient`]: queue expectations up front, hand out the client, call
//!   [`MockClient::verify`] at the end.
//! - [`create_mock_client`] with [`expect_action`]/[`expect_get`]: receive each request
//!   yourself and answer it inline.

use super::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A scripted answer for the next request of the matching kind.
enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(_) => "get",
            Expectation::Create(_) => "create",
            Expectation::Delete(_) => "delete",
            Expectation::Action(_) => "action",
        }
    }
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("create {params:?}"),
        ResourceRequest::Get { id, .. } => format!("get {id}"),
        ResourceRequest::Update { id, update, .. } => format!("update {id} {update:?}"),
        ResourceRequest::Delete { id, .. } => format!("delete {id}"),
        ResourceRequest::Action { id, action, .. } => format!("action {id} {action:?}"),
    }
}

struct Script<T: ActorEntity> {
    pending: VecDeque<Expectation<T>>,
    failures: Vec<String>,
    seen: Vec<String>,
}

/// A mock client that answers requests from a queue of expectations.
///
/// ```ignore
/// let mut kitchen = MockClient::<Kitchen>::new();
/// kitchen.expect_action().return_ok(KitchenActionResult::Started(None));
/// let client = KitchenClient::new(kitchen.client(), KitchenId(1));
/// // ... drive the code under test ...
/// kitchen.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Arc<Mutex<Script<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(64);
        let script = Arc::new(Mutex::new(Script {
            pending: VecDeque::new(),
            failures: Vec::new(),
            seen: Vec::new(),
        }));
        let shared = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let Ok(mut script) = shared.lock() else {
                    return;
                };
                let next = script.pending.pop_front();
                match (request, next) {
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get(r))) => {
                        script.seen.push(format!("get {id}"));
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { params, respond_to }, Some(Expectation::Create(r))) => {
                        script.seen.push(format!("create {params:?}"));
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Delete { id, respond_to }, Some(Expectation::Delete(r))) => {
                        script.seen.push(format!("delete {id}"));
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::Action {
                            id,
                            action,
                            respond_to,
                        },
                        Some(Expectation::Action(r)),
                    ) => {
                        script.seen.push(format!("action {id} {action:?}"));
                        let _ = respond_to.send(r);
                    }
                    (request, next) => {
                        let expected = next.as_ref().map_or("nothing", Expectation::kind);
                        script
                            .failures
                            .push(format!("unexpected {}, expected {expected}", describe(&request)));
                        // Dropping the responder surfaces as ActorDropped to the caller.
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        if let Ok(mut script) = self.script.lock() {
            script.pending.push_back(expectation);
        }
    }

    /// Expects a `get` request.
    pub fn expect_get(&mut self) -> Expect<'_, T, Option<T>> {
        Expect {
            mock: self,
            wrap: Expectation::Get,
        }
    }

    /// Expects a `create` request.
    pub fn expect_create(&mut self) -> Expect<'_, T, T::Id> {
        Expect {
            mock: self,
            wrap: Expectation::Create,
        }
    }

    /// Expects a `delete` request.
    pub fn expect_delete(&mut self) -> Expect<'_, T, ()> {
        Expect {
            mock: self,
            wrap: Expectation::Delete,
        }
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> Expect<'_, T, T::ActionResult> {
        Expect {
            mock: self,
            wrap: Expectation::Action,
        }
    }

    /// Requests answered so far, in arrival order.
    pub fn seen(&self) -> Vec<String> {
        self.script.lock().map(|s| s.seen.clone()).unwrap_or_default()
    }

    /// Panics if an expectation is left over or a request did not match.
    pub fn verify(&self) {
        let script = self.script.lock().expect("mock script poisoned");
        if !script.failures.is_empty() {
            panic!("Mock saw unexpected requests: {:?}", script.failures);
        }
        if !script.pending.is_empty() {
            panic!("Not all expectations were met. {} remaining", script.pending.len());
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder returned by the `expect_*` methods.
pub struct Expect<'a, T: ActorEntity, R> {
    mock: &'a mut MockClient<T>,
    wrap: fn(Result<R, FrameworkError>) -> Expectation<T>,
}

impl<T: ActorEntity, R> Expect<'_, T, R> {
    /// Answer with a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.wrap)(Ok(value)));
    }

    /// Answer with an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.wrap)(Err(error)));
    }
}

// =============================================================================
// INLINE HELPERS
// =============================================================================

/// Creates a client whose requests arrive on the returned receiver.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Waits for the next request and returns it if it is an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Waits for the next request and returns it if it is a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}
