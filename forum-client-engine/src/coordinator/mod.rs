//! Optimistic vote coordinator.
//!
//! A click is applied to the caller's [`VoteBox`] synchronously, before the
//! backend call is spawned. The call is never cancelled or merged with other
//! clicks. Success invalidates the submission's cache tag; failure is reported
//! to the error surface and the optimistic state is left as is. A call that
//! panics or is cancelled is reported as aborted.
//!
//! Under [`VoteDispatch::Ordered`] a call waits for the previous call on the
//! same submission, so a call that never settles holds back every later click
//! on that submission. The backend's request timeout bounds that wait; other
//! submissions are unaffected.
mod pending;

pub use pending::PendingVote;

use std::collections::HashMap;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use forum_client_backend::{ForumBackend, Mutation};
use forum_client_shared::types::{VoteButton, VoteTarget};

use crate::cache::QueryCache;
use crate::config::VoteDispatch;
use crate::errors::CoordinatorError;
use crate::notify::ErrorSurface;
use crate::session::{Access, LoginPrompt, SessionGate};
use crate::vote::VoteBox;

type Settled = Shared<BoxFuture<'static, ()>>;

/// Last call issued for a submission, used to chain the next one behind it.
struct Lane {
    seq: u64,
    settled: Settled,
}

#[derive(Default)]
struct Lanes {
    by_target: HashMap<VoteTarget, Lane>,
    next_seq: u64,
}

fn lock(lanes: &Mutex<Lanes>) -> MutexGuard<'_, Lanes> {
    lanes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct VoteCoordinator {
    backend: Arc<dyn ForumBackend>,
    cache: Arc<QueryCache>,
    gate: Arc<dyn SessionGate>,
    prompt: Arc<dyn LoginPrompt>,
    errors: Arc<dyn ErrorSurface>,
    dispatch: VoteDispatch,
    lanes: Arc<Mutex<Lanes>>,
}

impl VoteCoordinator {
    pub fn new(
        backend: Arc<dyn ForumBackend>,
        cache: Arc<QueryCache>,
        gate: Arc<dyn SessionGate>,
        prompt: Arc<dyn LoginPrompt>,
        errors: Arc<dyn ErrorSurface>,
        dispatch: VoteDispatch,
    ) -> Self {
        Self {
            backend,
            cache,
            gate,
            prompt,
            errors,
            dispatch,
            lanes: Arc::new(Mutex::new(Lanes::default())),
        }
    }

    /// Submits a click on `button` for the submission held by `vote_box`.
    ///
    /// Without a session the login prompt is shown and the box is left
    /// untouched. Otherwise the box is updated before this returns and the
    /// backend call runs on a spawned task, so this must be called from
    /// within a Tokio runtime.
    ///
    /// # Returns
    ///
    /// A [`PendingVote`] resolving to the outcome of the backend call, or
    /// `CoordinatorError::Unauthenticated` when the click was refused.
    pub fn click(
        &self,
        vote_box: &mut VoteBox,
        button: VoteButton,
    ) -> Result<PendingVote, CoordinatorError> {
        if self.gate.check() == Access::DenyWithPrompt {
            info!(target_id = %vote_box.target(), "Vote refused without a session");
            self.prompt.prompt_login();
            return Err(CoordinatorError::Unauthenticated);
        }

        let outcome = vote_box.click(button);
        let target = vote_box.target().clone();
        let mutation = outcome.op.into_mutation(target.clone());
        debug!(
            target_id = %target,
            vote = ?outcome.snapshot.vote,
            likes = outcome.snapshot.likes,
            dislikes = outcome.snapshot.dislikes,
            "Applied optimistic vote"
        );

        let handle = match self.dispatch {
            VoteDispatch::Independent => {
                let send = self.send(mutation);
                tokio::spawn(send)
            }
            VoteDispatch::Ordered => self.spawn_ordered(target.clone(), mutation),
        };

        Ok(PendingVote::new(target, outcome.op, handle, self.errors.clone()))
    }

    /// Chains the call behind the previous one for the same submission. The
    /// lane is claimed here, synchronously, so calls are issued in click order.
    fn spawn_ordered(
        &self,
        target: VoteTarget,
        mutation: Mutation,
    ) -> JoinHandle<Result<(), CoordinatorError>> {
        let (done_tx, done_rx) = oneshot::channel::<()>();
        let settled: Settled = done_rx.map(|_| ()).boxed().shared();

        let (seq, previous) = {
            let mut lanes = lock(&self.lanes);
            lanes.next_seq += 1;
            let seq = lanes.next_seq;
            let previous = lanes
                .by_target
                .insert(target.clone(), Lane { seq, settled })
                .map(|lane| lane.settled);
            (seq, previous)
        };

        let send = self.send(mutation);
        let lanes = self.lanes.clone();
        tokio::spawn(async move {
            if let Some(previous) = previous {
                debug!(target_id = %target, seq, "Waiting for previous vote call");
                previous.await;
            }

            let result = send.await;

            let _ = done_tx.send(());
            let mut lanes = lock(&lanes);
            if lanes.by_target.get(&target).is_some_and(|lane| lane.seq == seq) {
                lanes.by_target.remove(&target);
            }
            result
        })
    }

    /// Builds the future performing one backend call and its follow-up.
    fn send(
        &self,
        mutation: Mutation,
    ) -> impl Future<Output = Result<(), CoordinatorError>> + Send + 'static {
        let backend = self.backend.clone();
        let cache = self.cache.clone();
        let errors = self.errors.clone();

        async move {
            let call = AssertUnwindSafe(backend.send(&mutation)).catch_unwind().await;
            match call {
                Ok(Ok(())) => {
                    let invalidated = cache.invalidate(mutation.invalidates());
                    info!(mutation = %mutation, invalidated, "Vote confirmed");
                    Ok(())
                }
                Ok(Err(e)) => {
                    error!(mutation = %mutation, error = %e, "Vote failed");
                    errors.report(&e);
                    Err(CoordinatorError::Api(e))
                }
                Err(panic) => {
                    let aborted = CoordinatorError::Aborted(panic_message(panic.as_ref()));
                    error!(mutation = %mutation, error = %aborted, "Vote call panicked");
                    errors.report_message(&aborted.to_string());
                    Err(aborted)
                }
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panicked".to_string()
    }
}
