use serde::{Deserialize, Serialize};

/// Sort order for post and comment listings.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    Popular,
    Relevance,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Newest => "Newest",
            SortBy::Oldest => "Oldest",
            SortBy::Popular => "Popular",
            SortBy::Relevance => "Relevance",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameters of a post listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PostFilter {
    pub query: String,
    pub tags: Vec<String>,
    pub sort_by: SortBy,
}

/// Parameters of a comment listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CommentFilter {
    pub query: String,
    pub sort_by: SortBy,
}
