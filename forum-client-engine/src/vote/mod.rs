//! Tri-state vote machine.
//!
//! [`apply_click`] computes the next vote and counters of a submission for a
//! single button click, together with the one backend operation that makes
//! the server agree. It never looks at global state.
mod vote_box;

pub use vote_box::VoteBox;

use forum_client_backend::Mutation;
use forum_client_shared::types::{
    Vote, VoteButton, VoteSnapshot, VoteTarget, VoteTransition, VotesDelta,
};

/// The backend call that confirms a click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackendOp {
    /// Set the vote, replacing any previous one.
    Upsert(VoteButton),
    /// Remove the vote.
    Delete,
}

impl BackendOp {
    pub fn into_mutation(self, target: VoteTarget) -> Mutation {
        match self {
            BackendOp::Upsert(vote) => Mutation::UpsertVote { target, vote },
            BackendOp::Delete => Mutation::DeleteVote { target },
        }
    }
}

/// Result of a click: the state to display and the call to issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickOutcome {
    pub snapshot: VoteSnapshot,
    pub delta: VotesDelta,
    pub op: BackendOp,
}

/// Computes the state after clicking `button` on a submission in `current`.
///
/// Clicking the active button toggles the vote off. Clicking the other button
/// switches directly with a single upsert.
pub fn apply_click(current: VoteSnapshot, button: VoteButton) -> ClickOutcome {
    let (to, op) = if current.vote == button.as_vote() {
        (Vote::None, BackendOp::Delete)
    } else {
        (button.as_vote(), BackendOp::Upsert(button))
    };

    // A click always changes the vote, so the pair is never an identity.
    let delta = VoteTransition::new(current.vote, to)
        .map(|transition| transition.delta())
        .unwrap_or_default();

    let mut snapshot = current.apply_delta(delta);
    snapshot.vote = to;

    ClickOutcome {
        snapshot,
        delta,
        op,
    }
}
