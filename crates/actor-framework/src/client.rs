//! # Generic Client
//!
//! This module defines the generic client for communicating with actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Visit};
use crate::retry::RetryPolicy;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Forwards CRUD + Action requests over a bounded Tokio mpsc channel and returns results via
/// oneshot channels. Holds only a sender and a [`RetryPolicy`], so cloning is cheap.
///
/// Dropping a request future after it was sent only abandons the answer: the actor still applies
/// (or rejects) the request as one unit.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    retry: RetryPolicy,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            retry: self.retry,
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            retry: RetryPolicy::default(),
        }
    }

    /// Replaces the mailbox retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    async fn dispatch(&self, mut request: ResourceRequest<T>) -> Result<(), FrameworkError> {
        let mut attempt = 1;
        loop {
            match self.sender.try_send(request) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Closed(_)) => return Err(FrameworkError::ActorClosed),
                Err(TrySendError::Full(returned)) => {
                    if attempt >= self.retry.attempts {
                        warn!(attempts = attempt, "Mailbox full, giving up");
                        return Err(FrameworkError::Busy { attempts: attempt });
                    }
                    let delay = self.retry.backoff(attempt);
                    debug!(attempt, ?delay, "Mailbox full, retrying");
                    tokio::time::sleep(delay).await;
                    request = returned;
                    attempt += 1;
                }
            }
        }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.dispatch(build(respond_to)).await?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Returns up to `limit` entities in ascending ID order, skipping the first `skip`.
    pub async fn list(&self, skip: usize, limit: usize) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::List {
            skip,
            limit,
            respond_to,
        })
        .await
    }

    /// Runs `select` inside the actor over every entity in ascending ID order and returns its
    /// result. Use it to filter or summarize without copying the whole store.
    pub async fn scan<R, F>(&self, select: F) -> Result<R, FrameworkError>
    where
        R: Send + 'static,
        F: FnOnce(&mut dyn Iterator<Item = &T>) -> R + Send + 'static,
    {
        self.call(|respond_to| ResourceRequest::Scan {
            visit: Visit::new(move |items| {
                let _ = respond_to.send(items.map(select));
            }),
        })
        .await
    }

    /// Number of stored entities.
    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.scan(|items| items.count()).await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
