//! # Generic Messages
//!
//! The message types exchanged between `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use std::fmt;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

type VisitFn<T> = Box<dyn FnOnce(Result<&mut dyn Iterator<Item = &T>, FrameworkError>) + Send>;

/// A read-only pass over every stored entity, in ascending ID order.
///
/// The visitor owns its own responder, so it can compute a summary or a filtered projection
/// inside the actor and send back only that.
pub struct Visit<T: ActorEntity>(VisitFn<T>);

impl<T: ActorEntity> Visit<T> {
    pub fn new(
        visit: impl FnOnce(Result<&mut dyn Iterator<Item = &T>, FrameworkError>) + Send + 'static,
    ) -> Self {
        Self(Box::new(visit))
    }

    /// Runs the visitor over `items`.
    pub fn run(self, items: &mut dyn Iterator<Item = &T>) {
        (self.0)(Ok(items))
    }

    /// Answers the visitor's caller with `error` instead of running it.
    pub fn fail(self, error: FrameworkError) {
        (self.0)(Err(error))
    }
}

impl<T: ActorEntity> fmt::Debug for Visit<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Visit")
    }
}

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the standard resource lifecycle (Create, Get, List, Update, Delete) plus
/// `Action` for resource-specific logic that doesn't fit CRUD.
///
/// - **Create**: Uses [`ActorEntity::Create`] to initialize a new resource.
/// - **Get**: Fetches the current state of one resource by ID.
/// - **List**: Fetches a page of resources in ascending ID order, from a single consistent view.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing resource.
/// - **Delete**: Removes the resource.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
/// - **Scan**: Runs a [`Visit`] over all resources without copying them out.
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
        skip: usize,
        limit: usize,
        respond_to: Response<Vec<T>>,
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
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Scan {
        visit: Visit<T>,
    },
}
