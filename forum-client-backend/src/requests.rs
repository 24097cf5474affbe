//! Request vocabulary of the forum backend.
//!
//! Every read is a [`Query`] and every write is a [`Mutation`]. Both know the
//! endpoint they target and the cache tags they provide or invalidate, so the
//! cache layer never needs to know about individual endpoints.

use forum_client_shared::types::{
    CacheTag, Comment, CommentFilter, EntityKind, NewComment, NewPost, Post, PostFilter,
    VoteButton, VoteTarget,
};
use reqwest::Method;
use serde::Serialize;
use url::form_urlencoded;

use crate::errors::ApiError;

const POST_TAGS: &[CacheTag] = &[CacheTag::Post];
const COMMENT_TAGS: &[CacheTag] = &[CacheTag::Comment];
const NO_TAGS: &[CacheTag] = &[];

/// A cacheable read against the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// Published posts matching a filter.
    Posts(PostFilter),
    /// Posts written by a user.
    UserPosts { author: String, filter: PostFilter },
    /// Drafts saved by a user.
    UserDrafts { author: String, filter: PostFilter },
    /// Posts liked by a user.
    LikedPosts { liked_by: String, filter: PostFilter },
    /// A single post.
    PostById(String),
    /// Comments under a post.
    CommentsByPost(String),
    /// Comments written by a user.
    UserComments { author: String, filter: CommentFilter },
    /// Comments liked by a user.
    LikedComments { liked_by: String, filter: CommentFilter },
    /// Every tag known to the backend.
    Tags,
}

/// Decoded payload of a [`Query`].
#[derive(Clone, Debug, PartialEq)]
pub enum QueryData {
    Posts(Vec<Post>),
    Post(Post),
    Comments(Vec<Comment>),
    Tags(Vec<String>),
}

impl Query {
    /// Endpoint path including the query string, relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Query::Posts(filter) => format!("/posts?{}", post_params(filter)),
            Query::UserPosts { author, filter } => {
                format!("/users/{}/posts?{}", author, post_params(filter))
            }
            Query::UserDrafts { author, filter } => {
                format!("/users/{}/drafts?{}", author, post_params(filter))
            }
            Query::LikedPosts { liked_by, filter } => {
                format!("/users/{}/liked-posts?{}", liked_by, post_params(filter))
            }
            Query::PostById(id) => format!("/posts/{}", id),
            Query::CommentsByPost(post_id) => format!("/posts/{}/comments", post_id),
            Query::UserComments { author, filter } => {
                format!("/users/{}/comments?{}", author, comment_params(filter))
            }
            Query::LikedComments { liked_by, filter } => {
                format!("/users/{}/liked-comments?{}", liked_by, comment_params(filter))
            }
            Query::Tags => "/tags".to_string(),
        }
    }

    /// Cache key of the query: endpoint plus every parameter.
    pub fn fingerprint(&self) -> String {
        format!("GET {}", self.path())
    }

    /// Tags carried by the cached result of this query.
    pub fn provides(&self) -> &'static [CacheTag] {
        match self {
            Query::Posts(_)
            | Query::UserPosts { .. }
            | Query::UserDrafts { .. }
            | Query::LikedPosts { .. }
            | Query::PostById(_) => POST_TAGS,
            Query::CommentsByPost(_) | Query::UserComments { .. } | Query::LikedComments { .. } => {
                COMMENT_TAGS
            }
            Query::Tags => NO_TAGS,
        }
    }

    /// Decode a successful response body into the payload this query expects.
    pub fn decode(&self, body: &str) -> Result<QueryData, ApiError> {
        let decoded = match self {
            Query::Posts(_)
            | Query::UserPosts { .. }
            | Query::UserDrafts { .. }
            | Query::LikedPosts { .. } => serde_json::from_str(body).map(QueryData::Posts),
            Query::PostById(_) => serde_json::from_str(body).map(QueryData::Post),
            Query::CommentsByPost(_) | Query::UserComments { .. } | Query::LikedComments { .. } => {
                serde_json::from_str(body).map(QueryData::Comments)
            }
            Query::Tags => serde_json::from_str(body).map(QueryData::Tags),
        };

        decoded.map_err(|e| ApiError::decode(format!("{}: {}", self.path(), e)))
    }
}

fn post_params(filter: &PostFilter) -> String {
    let mut params = form_urlencoded::Serializer::new(String::new());
    params.append_pair("query", &filter.query);
    params.append_pair("sortBy", filter.sort_by.as_str());
    for tag in &filter.tags {
        params.append_pair("tag", tag);
    }
    params.finish()
}

fn comment_params(filter: &CommentFilter) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("query", &filter.query)
        .append_pair("sortBy", filter.sort_by.as_str())
        .finish()
}

/// A write against the backend.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    CreatePost(NewPost),
    UpdatePost(NewPost),
    /// Publishes a draft, converting it into a post.
    PublishDraft(NewPost),
    DeletePost(String),
    /// Sets the user's vote, atomically replacing any previous one.
    UpsertVote { target: VoteTarget, vote: VoteButton },
    /// Removes the user's vote.
    DeleteVote { target: VoteTarget },
    CreateComment(NewComment),
    UpdateComment(NewComment),
    DeleteComment(String),
}

/// JSON body sent with a vote upsert.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct VoteBody {
    pub vote: VoteButton,
}

/// JSON body of a mutation.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum MutationBody<'a> {
    Post(&'a NewPost),
    Comment(&'a NewComment),
    Vote(VoteBody),
}

impl Mutation {
    pub fn method(&self) -> Method {
        match self {
            Mutation::CreatePost(_) | Mutation::PublishDraft(_) | Mutation::CreateComment(_) => {
                Method::POST
            }
            Mutation::UpdatePost(_) | Mutation::UpdateComment(_) | Mutation::UpsertVote { .. } => {
                Method::PUT
            }
            Mutation::DeletePost(_) | Mutation::DeleteVote { .. } | Mutation::DeleteComment(_) => {
                Method::DELETE
            }
        }
    }

    /// Endpoint path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Mutation::CreatePost(post) | Mutation::UpdatePost(post) => format!("/posts/{}", post.id),
            Mutation::PublishDraft(post) => format!("/posts/{}/conversion", post.id),
            Mutation::DeletePost(id) => format!("/posts/{}", id),
            Mutation::UpsertVote { target, .. } | Mutation::DeleteVote { target } => {
                target.vote_path()
            }
            Mutation::CreateComment(comment) | Mutation::UpdateComment(comment) => {
                format!("/comments/{}", comment.id)
            }
            Mutation::DeleteComment(id) => format!("/comments/{}", id),
        }
    }

    pub fn body(&self) -> Option<MutationBody<'_>> {
        match self {
            Mutation::CreatePost(post) | Mutation::UpdatePost(post) | Mutation::PublishDraft(post) => {
                Some(MutationBody::Post(post))
            }
            Mutation::CreateComment(comment) | Mutation::UpdateComment(comment) => {
                Some(MutationBody::Comment(comment))
            }
            Mutation::UpsertVote { vote, .. } => Some(MutationBody::Vote(VoteBody { vote: *vote })),
            Mutation::DeletePost(_) | Mutation::DeleteVote { .. } | Mutation::DeleteComment(_) => {
                None
            }
        }
    }

    /// Tags whose cached reads become stale once this mutation succeeds.
    pub fn invalidates(&self) -> &'static [CacheTag] {
        match self {
            Mutation::CreatePost(_)
            | Mutation::UpdatePost(_)
            | Mutation::PublishDraft(_)
            | Mutation::DeletePost(_) => POST_TAGS,
            Mutation::CreateComment(_) | Mutation::UpdateComment(_) | Mutation::DeleteComment(_) => {
                COMMENT_TAGS
            }
            Mutation::UpsertVote { target, .. } | Mutation::DeleteVote { target } => {
                match target.kind {
                    EntityKind::Post => POST_TAGS,
                    EntityKind::Comment => COMMENT_TAGS,
                }
            }
        }
    }
}

impl std::fmt::Display for Mutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
