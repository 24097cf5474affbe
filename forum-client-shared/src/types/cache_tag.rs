use serde::{Deserialize, Serialize};

/// Label grouping cached query results that share invalidation triggers.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheTag {
    Post,
    Comment,
}

impl std::fmt::Display for CacheTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheTag::Post => write!(f, "Post"),
            CacheTag::Comment => write!(f, "Comment"),
        }
    }
}
