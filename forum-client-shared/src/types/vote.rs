use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// The current user's vote on a post or comment.
///
/// On the wire an absent vote is the empty string, matching the `userVote`
/// field returned by the backend.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Vote {
    /// The user has not voted.
    #[default]
    #[serde(rename = "")]
    None,
    /// The user likes the submission.
    Like,
    /// The user dislikes the submission.
    Dislike,
}

/// One of the two vote buttons a user can click.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VoteButton {
    Like,
    Dislike,
}

impl VoteButton {
    /// Returns the other button.
    pub fn opposite(self) -> Self {
        match self {
            VoteButton::Like => VoteButton::Dislike,
            VoteButton::Dislike => VoteButton::Like,
        }
    }

    /// Returns the vote that becomes active when this button is switched on.
    pub fn as_vote(self) -> Vote {
        match self {
            VoteButton::Like => Vote::Like,
            VoteButton::Dislike => Vote::Dislike,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoteButton::Like => "Like",
            VoteButton::Dislike => "Dislike",
        }
    }
}

impl std::fmt::Display for VoteButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Counter changes produced by a vote transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VotesDelta {
    pub likes: i64,
    pub dislikes: i64,
}

impl VotesDelta {
    pub fn new(likes: i64, dislikes: i64) -> Self {
        Self { likes, dislikes }
    }

    /// Returns true when the delta leaves both counters unchanged.
    pub fn is_zero(&self) -> bool {
        self.likes == 0 && self.dislikes == 0
    }
}

impl Add for VotesDelta {
    type Output = VotesDelta;

    fn add(self, other: VotesDelta) -> VotesDelta {
        VotesDelta {
            likes: self.likes + other.likes,
            dislikes: self.dislikes + other.dislikes,
        }
    }
}

impl AddAssign for VotesDelta {
    fn add_assign(&mut self, other: VotesDelta) {
        self.likes += other.likes;
        self.dislikes += other.dislikes;
    }
}

impl Sum for VotesDelta {
    fn sum<I: Iterator<Item = VotesDelta>>(iter: I) -> Self {
        iter.fold(VotesDelta::default(), Add::add)
    }
}

/// A change of the user's vote from one value to a different one.
///
/// Only the six non-identity pairs among `{None, Like, Dislike}` are valid
/// transitions; [`VoteTransition::new`] rejects identity pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VoteTransition {
    from: Vote,
    to: Vote,
}

impl VoteTransition {
    /// Creates a transition, returning `None` when `from == to`.
    pub fn new(from: Vote, to: Vote) -> Option<Self> {
        (from != to).then_some(Self { from, to })
    }

    /// Maps the transition to its counter delta.
    pub fn delta(&self) -> VotesDelta {
        let (likes, dislikes) = match (self.from, self.to) {
            (Vote::None, Vote::Like) => (1, 0),
            (Vote::None, Vote::Dislike) => (0, 1),
            (Vote::Like, Vote::None) => (-1, 0),
            (Vote::Dislike, Vote::None) => (0, -1),
            (Vote::Like, Vote::Dislike) => (-1, 1),
            (Vote::Dislike, Vote::Like) => (1, -1),
            (_, _) => (0, 0),
        };

        VotesDelta { likes, dislikes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        let cases = [
            (Vote::None, Vote::Like, 1, 0),
            (Vote::None, Vote::Dislike, 0, 1),
            (Vote::Like, Vote::None, -1, 0),
            (Vote::Dislike, Vote::None, 0, -1),
            (Vote::Like, Vote::Dislike, -1, 1),
            (Vote::Dislike, Vote::Like, 1, -1),
        ];

        for (from, to, likes, dislikes) in cases {
            let transition = VoteTransition::new(from, to).unwrap();
            assert_eq!(
                transition.delta(),
                VotesDelta::new(likes, dislikes),
                "{:?} -> {:?}",
                from,
                to
            );
        }
    }

    #[test]
    fn test_identity_is_not_a_transition() {
        assert!(VoteTransition::new(Vote::None, Vote::None).is_none());
        assert!(VoteTransition::new(Vote::Like, Vote::Like).is_none());
        assert!(VoteTransition::new(Vote::Dislike, Vote::Dislike).is_none());
    }

    #[test]
    fn test_deltas_sum() {
        let total: VotesDelta = [
            VotesDelta::new(1, 0),
            VotesDelta::new(-1, 1),
            VotesDelta::new(0, -1),
        ]
        .into_iter()
        .sum();
        assert!(total.is_zero());
    }

    #[test]
    fn test_vote_wire_format() {
        assert_eq!(serde_json::to_string(&Vote::None).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Vote::Like).unwrap(), "\"Like\"");
        assert_eq!(serde_json::from_str::<Vote>("\"Dislike\"").unwrap(), Vote::Dislike);
        assert_eq!(serde_json::from_str::<Vote>("\"\"").unwrap(), Vote::None);
    }

    #[test]
    fn test_button_opposite() {
        assert_eq!(VoteButton::Like.opposite(), VoteButton::Dislike);
        assert_eq!(VoteButton::Dislike.opposite().as_vote(), Vote::Like);
    }
}
