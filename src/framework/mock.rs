//! # Mock Clients
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from
//! a queue of expectations instead of a running actor. Use it to test code *around* a
//! client (the order actor's hooks, the services) without spawning the dependency.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | none, answers are scripted | real store |
//! | **Error injection** | `return_err` | needs a specific store state |
//! | **Use case** | one actor or service in isolation | whole-system tests |
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! (wrong kind or wrong id) panics the mock task, which surfaces in the test as
//! `ActorDropped`.
//!
//! ```rust
//! use hot_coffee::framework::mock::MockClient;
//! use hot_coffee::framework::FrameworkError;
//! use hot_coffee::model::{IngredientId, InventoryItem};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<InventoryItem>::new();
//!     mock.expect_get(IngredientId(1))
//!         .return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(IngredientId(1)).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For finer control (inspecting the payload, answering late) use [`create_mock_client`]
//! with the `expect_*` receiver helpers.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::{EntityResponse, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

type Reply<T, R> = Result<R, FrameworkError<<T as ActorEntity>::Error>>;

/// A scripted answer to one request.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Reply<T, Option<T>>,
    },
    List {
        response: Reply<T, Vec<T>>,
    },
    Create {
        response: Reply<T, T::Id>,
    },
    Update {
        id: T::Id,
        response: Reply<T, T>,
    },
    Delete {
        id: T::Id,
        response: Reply<T, ()>,
    },
    Action {
        id: T::Id,
        response: Reply<T, T::ActionResult>,
    },
    Command {
        response: Reply<T, T::CommandResult>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn name(&self) -> &'static str {
        match self {
            Self::Get { .. } => "get",
            Self::List { .. } => "list",
            Self::Create { .. } => "create",
            Self::Update { .. } => "update",
            Self::Delete { .. } => "delete",
            Self::Action { .. } => "action",
            Self::Command { .. } => "command",
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn answer<T: ActorEntity, R>(respond_to: EntityResponse<T, R>, response: Reply<T, R>) {
    let _ = respond_to.send(response);
}

fn check_id<I: PartialEq + std::fmt::Debug>(kind: &str, expected: &I, actual: &I) {
    assert_eq!(expected, actual, "mock {kind}: unexpected id");
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .pop_front();

                match (request, next) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("get", &expected, &id);
                        answer::<T, _>(respond_to, response);
                    }
                    (
                        ResourceRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        answer::<T, _>(respond_to, response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        answer::<T, _>(respond_to, response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("update", &expected, &id);
                        answer::<T, _>(respond_to, response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("delete", &expected, &id);
                        answer::<T, _>(respond_to, response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) => {
                        check_id("action", &expected, &id);
                        answer::<T, _>(respond_to, response);
                    }
                    (
                        ResourceRequest::Command { respond_to, .. },
                        Some(Expectation::Command { response }),
                    ) => {
                        answer::<T, _>(respond_to, response);
                    }
                    (_, Some(expected)) => {
                        panic!("mock expected a {} request", expected.name());
                    }
                    (_, None) => panic!("mock received a request with no expectation left"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        wrap: impl FnOnce(Reply<T, R>) -> Expectation<T> + Send + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            wrap: Box::new(wrap),
        }
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(move |response| Expectation::Action { id, response })
    }

    pub fn expect_command(&mut self) -> ExpectationBuilder<T, T::CommandResult> {
        self.builder(|response| Expectation::Command { response })
    }

    /// Panics if any expectation is still queued.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Finishes an expectation with the answer the mock should give.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    expectations: Queue<T>,
    wrap: Box<dyn FnOnce(Reply<T, R>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn push(self, response: Reply<T, R>) {
        let expectation = (self.wrap)(response);
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(expectation);
    }

    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError<T::Error>) {
        self.push(Err(error));
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client and the receiving end of its mailbox.
///
/// The test plays the actor: it pulls requests with the `expect_*` helpers below,
/// asserts on the payload and answers through the returned responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, EntityResponse<T, T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, EntityResponse<T, Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, EntityResponse<T, T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Command request.
pub async fn expect_command<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Command, EntityResponse<T, T::CommandResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Command {
            command,
            respond_to,
        }) => Some((command, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::entity::Store;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note error")]
    struct NoteError;

    #[async_trait]
    impl ActorEntity for Note {
        type Id = u32;
        type Create = NoteCreate;
        type Update = ();
        type Action = ();
        type ActionResult = ();
        type Command = ();
        type CommandResult = usize;
        type Context = ();
        type Error = NoteError;

        fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                text: params.text,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_command(
            store: &mut Store<Self>,
            _: (),
            _: &(),
        ) -> Result<usize, Self::Error> {
            Ok(store.len())
        }
    }

    #[tokio::test]
    async fn receiver_helpers_expose_payload() {
        let (client, mut receiver) = create_mock_client::<Note>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(NoteCreate {
                    text: "flat white".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.text, "flat white");
        responder.send(Ok(7)).expect("client waiting");

        let result = create_task.await.expect("task");
        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test]
    async fn scripted_answers_in_order() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(Note {
            id: 1,
            text: "latte".to_string(),
        }));
        mock.expect_command().return_ok(1);
        mock.expect_list().return_err(FrameworkError::ActorClosed);

        let client = mock.client();
        let id = client
            .create(NoteCreate {
                text: "latte".to_string(),
            })
            .await
            .expect("create");
        let fetched = client.get(id).await.expect("get").expect("present");
        assert_eq!(fetched.text, "latte");
        assert_eq!(client.command(()).await.expect("command"), 1);
        assert!(matches!(
            client.list().await,
            Err(FrameworkError::ActorClosed)
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn mismatched_request_drops_the_response() {
        let mut mock = MockClient::<Note>::new();
        mock.expect_delete(1).return_ok(());

        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
