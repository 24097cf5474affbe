use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Votable, Vote, VoteSnapshot, VoteTarget};

/// Lifecycle status of a post or comment.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentStatus {
    Draft,
    #[default]
    Published,
    Deleted,
}

/// A post as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    pub likes: u64,
    pub dislikes: u64,
    pub status: ContentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub user_vote: Vote,
}

impl Votable for Post {
    fn vote_target(&self) -> VoteTarget {
        VoteTarget::post(self.id.clone())
    }

    fn vote_snapshot(&self) -> VoteSnapshot {
        VoteSnapshot::new(self.user_vote, self.likes, self.dislikes)
    }
}

/// Body of a create/update request for a post.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPost {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub status: ContentStatus,
}

impl NewPost {
    /// Creates a post with a freshly generated id.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        tags: Vec<String>,
        status: ContentStatus,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            body: body.into(),
            tags,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_post() {
        let json = r#"{
            "id": "a7ef0016-a2f4-44fb-82ca-a4f5c61d2cf5",
            "title": "Hello",
            "body": "First post",
            "tags": ["rust", "forum"],
            "author": "alice",
            "likes": 10,
            "dislikes": 2,
            "status": "Published",
            "createdAt": "2024-04-23T08:00:00Z",
            "updatedAt": "2024-04-23T09:00:00Z",
            "userVote": ""
        }"#;

        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.tags, vec!["rust".to_string(), "forum".to_string()]);
        assert_eq!(post.user_vote, Vote::None);
        assert_eq!(
            post.vote_snapshot(),
            VoteSnapshot::new(Vote::None, 10, 2)
        );
        assert_eq!(post.vote_target(), VoteTarget::post("a7ef0016-a2f4-44fb-82ca-a4f5c61d2cf5"));
    }

    #[test]
    fn test_new_post_generates_uuid() {
        let post = NewPost::new("t", "b", vec![], ContentStatus::Draft);
        assert!(Uuid::parse_str(&post.id).is_ok());
    }
}
