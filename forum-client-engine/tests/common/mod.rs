//! Shared fixtures for the engine integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use forum_client_backend::{ApiError, ForumBackend, MockForumBackend, Mutation, Query, QueryData};
use forum_client_engine::{
    ErrorSurface, LoginPrompt, QueryCache, SessionGate, VoteCoordinator, VoteDispatch,
};
use forum_client_shared::types::{Comment, ContentStatus, Post, Vote};

/// Session gate with a switchable answer.
pub struct FixedSessionGate {
    authenticated: AtomicBool,
}

impl FixedSessionGate {
    pub fn new(authenticated: bool) -> Self {
        Self {
            authenticated: AtomicBool::new(authenticated),
        }
    }

    pub fn set(&self, authenticated: bool) {
        self.authenticated.store(authenticated, Ordering::SeqCst);
    }
}

impl SessionGate for FixedSessionGate {
    fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }
}

/// Records every reported error and login prompt.
#[derive(Default)]
pub struct Recorder {
    errors: Mutex<Vec<String>>,
    prompts: AtomicUsize,
}

impl Recorder {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl ErrorSurface for Recorder {
    fn report_message(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

impl LoginPrompt for Recorder {
    fn prompt_login(&self) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Coordinator wired to a mock backend and a recorder.
pub struct Harness {
    pub backend: Arc<MockForumBackend>,
    pub cache: Arc<QueryCache>,
    pub gate: Arc<FixedSessionGate>,
    pub recorder: Arc<Recorder>,
    pub coordinator: VoteCoordinator,
}

impl Harness {
    pub fn new(dispatch: VoteDispatch) -> Self {
        let backend = Arc::new(MockForumBackend::new());
        let cache = Arc::new(QueryCache::new(backend.clone()));
        let gate = Arc::new(FixedSessionGate::new(true));
        let recorder = Arc::new(Recorder::default());
        let coordinator = VoteCoordinator::new(
            backend.clone(),
            cache.clone(),
            gate.clone(),
            recorder.clone(),
            recorder.clone(),
            dispatch,
        );

        Self {
            backend,
            cache,
            gate,
            recorder,
            coordinator,
        }
    }
}

/// Backend whose writes panic mid-call.
pub struct PanickingBackend;

#[async_trait]
impl ForumBackend for PanickingBackend {
    async fn fetch(&self, _query: &Query) -> Result<QueryData, ApiError> {
        Err(ApiError::transport("offline"))
    }

    async fn send(&self, mutation: &Mutation) -> Result<(), ApiError> {
        panic!("connection state corrupted while sending {}", mutation);
    }
}

/// Lets spawned tasks run until they block.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

pub fn post(id: &str, vote: Vote, likes: u64, dislikes: u64) -> Post {
    let at = Utc.with_ymd_and_hms(2024, 4, 23, 8, 0, 0).unwrap();
    Post {
        id: id.to_string(),
        title: format!("Post {}", id),
        body: "body".to_string(),
        tags: vec!["rust".to_string()],
        author: "alice".to_string(),
        likes,
        dislikes,
        status: ContentStatus::Published,
        created_at: at,
        updated_at: at,
        user_vote: vote,
    }
}

pub fn comment(id: &str, post_id: &str, vote: Vote, likes: u64, dislikes: u64) -> Comment {
    let at = Utc.with_ymd_and_hms(2024, 4, 23, 9, 0, 0).unwrap();
    Comment {
        id: id.to_string(),
        body: "comment".to_string(),
        post_id: post_id.to_string(),
        parent_comment: None,
        author: "bob".to_string(),
        status: ContentStatus::Published,
        likes,
        dislikes,
        created_at: at,
        updated_at: at,
        user_vote: vote,
    }
}
