use serde::{Deserialize, Serialize};

use crate::types::{Vote, VotesDelta};

/// The two kinds of submissions that can be voted on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Post,
    Comment,
}

impl EntityKind {
    /// Path segment of the endpoint family serving this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::Post => "posts",
            EntityKind::Comment => "comments",
        }
    }
}

/// Identifies one votable submission.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VoteTarget {
    pub kind: EntityKind,
    pub id: String,
}

impl VoteTarget {
    pub fn post(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Post,
            id: id.into(),
        }
    }

    pub fn comment(id: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Comment,
            id: id.into(),
        }
    }

    /// Path of the vote resource, e.g. `/posts/{id}/vote`.
    pub fn vote_path(&self) -> String {
        format!("/{}/{}/vote", self.kind.collection(), self.id)
    }
}

impl std::fmt::Display for VoteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.kind.collection(), self.id)
    }
}

/// The vote and counters of a submission as currently displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VoteSnapshot {
    pub vote: Vote,
    pub likes: u64,
    pub dislikes: u64,
}

impl VoteSnapshot {
    pub fn new(vote: Vote, likes: u64, dislikes: u64) -> Self {
        Self {
            vote,
            likes,
            dislikes,
        }
    }

    /// Applies a counter delta, saturating at zero.
    pub fn apply_delta(&self, delta: VotesDelta) -> Self {
        Self {
            vote: self.vote,
            likes: self.likes.saturating_add_signed(delta.likes),
            dislikes: self.dislikes.saturating_add_signed(delta.dislikes),
        }
    }
}

/// Anything that can seed a vote box: posts and comments.
pub trait Votable {
    fn vote_target(&self) -> VoteTarget;
    fn vote_snapshot(&self) -> VoteSnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_path() {
        assert_eq!(VoteTarget::post("p1").vote_path(), "/posts/p1/vote");
        assert_eq!(VoteTarget::comment("c1").vote_path(), "/comments/c1/vote");
    }

    #[test]
    fn test_apply_delta_saturates() {
        let snapshot = VoteSnapshot::new(Vote::Like, 0, 2);
        let next = snapshot.apply_delta(VotesDelta::new(-1, 1));
        assert_eq!(next.likes, 0);
        assert_eq!(next.dislikes, 3);
    }
}
