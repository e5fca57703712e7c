//! # Core Actor Framework
//!
//! This module defines the generic building blocks for the collection actors.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that all collection items must implement.
//! - [`ResourceActor`]: The generic actor that owns an ordered collection.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, NotFound).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks and DTOs)
// =============================================================================

/// Trait that any collection item must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// The actor loop is written *once* against this contract. Associated types keep
/// payloads apart: a `Module` needs a `ModuleCreate`, and the compiler rejects
/// anything else.
///
/// # Provided Methods (Hooks)
/// [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
///
/// # Async & Context
/// Hooks are `#[async_trait]` so they can talk to other actors. The `Context`
/// type is injected into every hook by [`ResourceActor::run`] ("late binding").
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier for this entity. Must be buildable from a `u32` sequence number
    /// for generated ids.
    type Id: Eq + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The id this entity is stored under.
    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the id and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the collection.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message type sent to the actor to request operations.
///
/// The variants follow the CRUD lifecycle, plus the two whole-collection
/// operations an ordered list needs: `List` and `Replace`.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Replace {
        items: Vec<T>,
        respond_to: Response<()>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The generic actor that owns an ordered collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`) and
/// the receiver end of the channel. Messages are processed *sequentially*, so the
/// `Vec` needs no lock. Insertion order is the collection order.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Vec<T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: Vec::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    fn position(&self, id: &T::Id) -> Option<usize> {
        self.store.iter().position(|item| item.id() == id)
    }

    /// Generated ids skip anything already present (e.g. seeded by `Replace`).
    fn generate_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id += 1;
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Module" instead of "course_module::model::module::Module")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = self.generate_id();

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.push(item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.position(&id).map(|idx| self.store[idx].clone());
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.clone()));
                }
                ResourceRequest::Replace { items, respond_to } => {
                    let duplicate = items.iter().enumerate().find_map(|(idx, item)| {
                        items[..idx]
                            .iter()
                            .any(|earlier| earlier.id() == item.id())
                            .then(|| item.id().to_string())
                    });
                    if let Some(id) = duplicate {
                        warn!(entity_type, %id, "Replace rejected: duplicate id");
                        let _ = respond_to.send(Err(FrameworkError::DuplicateId(id)));
                        continue;
                    }
                    self.store = items;
                    info!(entity_type, size = self.store.len(), "Replaced");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    match self.position(&id) {
                        Some(idx) => {
                            let item = &mut self.store[idx];
                            if let Err(e) = item.on_update(update, &context).await {
                                warn!(entity_type, %id, error = %e, "Update failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    match self.position(&id) {
                        Some(idx) => {
                            if let Err(e) = self.store[idx].on_delete(&context).await {
                                warn!(entity_type, %id, error = %e, "on_delete failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.remove(idx);
                            info!(entity_type, %id, size = self.store.len(), "Deleted");
                            let _ = respond_to.send(Ok(()));
                        }
                        None => {
                            warn!(entity_type, %id, "Not found");
                            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        }
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a sender, so cloning is cheap. Every method round-trips through a
/// oneshot channel and resolves to `Result<_, FrameworkError>`.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn replace(&self, items: Vec<T>) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Replace { items, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: u32,
        text: String,
    }

    #[derive(Debug)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug)]
    struct NoteUpdate {
        text: Option<String>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("note rejected: {0}")]
    struct NoteError(String);

    #[async_trait]
    impl ActorEntity for Note {
        type Id = u32;
        type Create = NoteCreate;
        type Update = NoteUpdate;
        type Context = ();
        type Error = NoteError;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
            if params.text.is_empty() {
                return Err(NoteError("empty".into()));
            }
            Ok(Self {
                id,
                text: params.text,
            })
        }

        async fn on_update(&mut self, update: NoteUpdate, _ctx: &()) -> Result<(), Self::Error> {
            if let Some(text) = update.text {
                self.text = text;
            }
            Ok(())
        }
    }

    fn note(id: u32) -> Note {
        Note {
            id,
            text: format!("text of {id}"),
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_ordered_collection_lifecycle() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        tokio::spawn(actor.run(()));

        // 1. Seed and create
        client.replace(vec![note(1), note(7)]).await.unwrap();
        let id = client
            .create(NoteCreate { text: "Hi".into() })
            .await
            .unwrap();
        // 1 is taken, so the generator moves on
        assert_eq!(id, 2);

        // 2. Order is insertion order
        let ids: Vec<u32> = client
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, [1, 7, 2]);

        // 3. Update
        let updated = client
            .update(
                7,
                NoteUpdate {
                    text: Some("changed".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.text, "changed");

        // 4. Delete
        client.delete(1).await.unwrap();
        assert!(client.get(1).await.unwrap().is_none());
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_replace_rejects_duplicates_and_keeps_state() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        tokio::spawn(actor.run(()));

        client.replace(vec![note(5)]).await.unwrap();
        let result = client.replace(vec![note(3), note(3)]).await;
        assert!(matches!(result, Err(FrameworkError::DuplicateId(id)) if id == "3"));
        assert_eq!(client.list().await.unwrap(), vec![note(5)]);
    }

    #[tokio::test]
    async fn test_create_error_is_wrapped() {
        let (actor, client) = ResourceActor::<Note>::new(10);
        tokio::spawn(actor.run(()));

        let result = client.create(NoteCreate { text: String::new() }).await;
        assert!(matches!(result, Err(FrameworkError::EntityError(_))));
        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_actor_reports_closed() {
        let (actor, client) = ResourceActor::<Note>::new(1);
        drop(actor);
        assert!(matches!(client.list().await, Err(FrameworkError::ActorClosed)));
    }
}
