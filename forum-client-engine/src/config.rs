//! Engine tuning knobs.
use std::str::FromStr;

use crate::cache::DEFAULT_CACHE_CAPACITY;

/// How backend calls for clicks on the same submission are issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VoteDispatch {
    /// Each call waits for the previous call on the same submission to settle,
    /// so the server ends at the last clicked state.
    #[default]
    Ordered,
    /// Every call is issued immediately and may complete in any order.
    Independent,
}

impl FromStr for VoteDispatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ordered" => Ok(VoteDispatch::Ordered),
            "independent" => Ok(VoteDispatch::Independent),
            other => Err(format!("unknown vote dispatch mode: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub vote_dispatch: VoteDispatch,
    /// Maximum number of query results kept by the cache.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vote_dispatch: VoteDispatch::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}
