mod cache_tag;
mod comment;
mod filter;
mod post;
mod votable;
mod vote;

pub use cache_tag::CacheTag;
pub use comment::{Comment, NewComment};
pub use filter::{CommentFilter, PostFilter, SortBy};
pub use post::{ContentStatus, NewPost, Post};
pub use votable::{EntityKind, Votable, VoteSnapshot, VoteTarget};
pub use vote::{Vote, VoteButton, VoteTransition, VotesDelta};
