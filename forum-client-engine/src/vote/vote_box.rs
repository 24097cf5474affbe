use forum_client_shared::types::{Votable, VoteButton, VoteSnapshot, VoteTarget};

use super::{apply_click, ClickOutcome};

/// Locally held vote state of one displayed submission.
///
/// Each displayed post or comment owns its own box, seeded from the server
/// value. Boxes are never shared, so two views of the same submission keep
/// independent optimistic copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteBox {
    target: VoteTarget,
    state: VoteSnapshot,
}

impl VoteBox {
    pub fn new(target: VoteTarget, state: VoteSnapshot) -> Self {
        Self { target, state }
    }

    /// Seeds a box from a post or comment returned by the backend.
    pub fn seeded(votable: &impl Votable) -> Self {
        Self::new(votable.vote_target(), votable.vote_snapshot())
    }

    pub fn target(&self) -> &VoteTarget {
        &self.target
    }

    pub fn state(&self) -> VoteSnapshot {
        self.state
    }

    /// Applies a click to the local state and returns the outcome.
    pub fn click(&mut self, button: VoteButton) -> ClickOutcome {
        let outcome = apply_click(self.state, button);
        self.state = outcome.snapshot;
        outcome
    }

    /// Replaces the local state with a fresh server value.
    pub fn reconcile(&mut self, votable: &impl Votable) {
        self.state = votable.vote_snapshot();
    }
}
