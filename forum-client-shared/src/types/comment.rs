use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ContentStatus, Votable, Vote, VoteSnapshot, VoteTarget};

/// A comment as returned by the backend.
///
/// Replies carry a copy of the comment they answer in `parent_comment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub body: String,
    pub post_id: String,
    #[serde(default)]
    pub parent_comment: Option<Box<Comment>>,
    pub author: String,
    pub status: ContentStatus,
    pub likes: u64,
    pub dislikes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub user_vote: Vote,
}

impl Comment {
    pub fn is_edited(&self) -> bool {
        self.created_at != self.updated_at
    }
}

impl Votable for Comment {
    fn vote_target(&self) -> VoteTarget {
        VoteTarget::comment(self.id.clone())
    }

    fn vote_snapshot(&self) -> VoteSnapshot {
        VoteSnapshot::new(self.user_vote, self.likes, self.dislikes)
    }
}

/// Body of a create/update request for a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub id: String,
    pub body: String,
    pub post_id: String,
    pub parent_id: String,
    pub parent_author: String,
    pub parent_body: String,
}

impl NewComment {
    /// Creates a top-level comment on a post.
    pub fn on_post(post_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            body: body.into(),
            post_id: post_id.into(),
            parent_id: String::new(),
            parent_author: String::new(),
            parent_body: String::new(),
        }
    }

    /// Creates a reply to an existing comment.
    pub fn reply_to(parent: &Comment, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            body: body.into(),
            post_id: parent.post_id.clone(),
            parent_id: parent.id.clone(),
            parent_author: parent.author.clone(),
            parent_body: parent.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_reply() {
        let json = r#"{
            "id": "c2",
            "body": "Agreed",
            "postId": "p1",
            "parentComment": {
                "id": "c1",
                "body": "Nice post",
                "postId": "p1",
                "parentComment": null,
                "author": "bob",
                "status": "Published",
                "likes": 1,
                "dislikes": 0,
                "createdAt": "2024-04-23T08:00:00Z",
                "updatedAt": "2024-04-23T08:00:00Z",
                "userVote": "Like"
            },
            "author": "alice",
            "status": "Published",
            "likes": 0,
            "dislikes": 3,
            "createdAt": "2024-04-23T08:00:00Z",
            "updatedAt": "2024-04-23T10:00:00Z",
            "userVote": "Dislike"
        }"#;

        let comment: Comment = serde_json::from_str(json).unwrap();
        let parent = comment.parent_comment.as_ref().unwrap();
        assert_eq!(parent.user_vote, Vote::Like);
        assert!(comment.is_edited());
        assert!(!parent.is_edited());
        assert_eq!(comment.vote_target(), VoteTarget::comment("c2"));
    }

    #[test]
    fn test_reply_copies_parent() {
        let json = r#"{"id":"c1","body":"Nice","postId":"p1","author":"bob","status":"Published",
            "likes":0,"dislikes":0,"createdAt":"2024-04-23T08:00:00Z","updatedAt":"2024-04-23T08:00:00Z"}"#;
        let parent: Comment = serde_json::from_str(json).unwrap();
        let reply = NewComment::reply_to(&parent, "Thanks");
        assert_eq!(reply.post_id, "p1");
        assert_eq!(reply.parent_id, "c1");
        assert_eq!(reply.parent_author, "bob");
        assert_eq!(
            serde_json::to_value(&reply).unwrap()["parentBody"],
            serde_json::json!("Nice")
        );
    }
}
