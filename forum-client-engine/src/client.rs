//! Forum client facade.
//!
//! Ties the cache, the session gate, the vote coordinator and the state store
//! together behind typed reads and writes.
use std::sync::Arc;

use tracing::{error, info};

use forum_client_backend::{ApiError, ForumBackend, Mutation, Query, QueryData};
use forum_client_shared::types::{Comment, CommentFilter, NewComment, NewPost, Post, VoteButton};

use crate::cache::QueryCache;
use crate::config::EngineConfig;
use crate::coordinator::{PendingVote, VoteCoordinator};
use crate::errors::{CoordinatorError, MutationError};
use crate::notify::ErrorSurface;
use crate::session::{Access, LoginPrompt, SessionGate};
use crate::store::{AppStore, DeleteTarget, PopupAction, PopupKind};
use crate::vote::VoteBox;

pub struct ForumClient {
    backend: Arc<dyn ForumBackend>,
    cache: Arc<QueryCache>,
    gate: Arc<dyn SessionGate>,
    store: Arc<AppStore>,
    coordinator: VoteCoordinator,
}

impl ForumClient {
    /// Creates a client whose store acts as both the error surface and the
    /// login prompt.
    pub fn new(
        backend: Arc<dyn ForumBackend>,
        gate: Arc<dyn SessionGate>,
        store: Arc<AppStore>,
        config: EngineConfig,
    ) -> Self {
        let cache = Arc::new(QueryCache::with_capacity(backend.clone(), config.cache_capacity));
        let coordinator = VoteCoordinator::new(
            backend.clone(),
            cache.clone(),
            gate.clone(),
            store.clone(),
            store.clone(),
            config.vote_dispatch,
        );

        Self {
            backend,
            cache,
            gate,
            store,
            coordinator,
        }
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    pub fn coordinator(&self) -> &VoteCoordinator {
        &self.coordinator
    }

    /// Reads through the cache. Failures are reported to the store and returned.
    pub async fn read(&self, query: &Query) -> Result<Arc<QueryData>, ApiError> {
        self.cache.read(query).await.inspect_err(|e| {
            error!(query = %query.path(), error = %e, "Read failed");
            self.store.report(e);
        })
    }

    async fn read_posts(&self, query: Query) -> Result<Vec<Post>, ApiError> {
        match self.read(&query).await?.as_ref() {
            QueryData::Posts(posts) => Ok(posts.clone()),
            other => Err(unexpected(&query, other)),
        }
    }

    async fn read_comments(&self, query: Query) -> Result<Vec<Comment>, ApiError> {
        match self.read(&query).await?.as_ref() {
            QueryData::Comments(comments) => Ok(comments.clone()),
            other => Err(unexpected(&query, other)),
        }
    }

    fn comment_filter(&self) -> CommentFilter {
        let filter = self.store.snapshot().filter;
        CommentFilter {
            query: filter.query,
            sort_by: filter.sort_by,
        }
    }

    /// Published posts selected by the current filter state.
    pub async fn front_page_posts(&self) -> Result<Vec<Post>, ApiError> {
        let filter = self.store.snapshot().filter.post_filter();
        self.read_posts(Query::Posts(filter)).await
    }

    pub async fn user_posts(&self, author: &str) -> Result<Vec<Post>, ApiError> {
        let filter = self.store.snapshot().filter.post_filter();
        self.read_posts(Query::UserPosts {
            author: author.to_string(),
            filter,
        })
        .await
    }

    pub async fn user_drafts(&self, author: &str) -> Result<Vec<Post>, ApiError> {
        let filter = self.store.snapshot().filter.post_filter();
        self.read_posts(Query::UserDrafts {
            author: author.to_string(),
            filter,
        })
        .await
    }

    pub async fn liked_posts(&self, username: &str) -> Result<Vec<Post>, ApiError> {
        let filter = self.store.snapshot().filter.post_filter();
        self.read_posts(Query::LikedPosts {
            liked_by: username.to_string(),
            filter,
        })
        .await
    }

    pub async fn post(&self, id: &str) -> Result<Post, ApiError> {
        let query = Query::PostById(id.to_string());
        match self.read(&query).await?.as_ref() {
            QueryData::Post(post) => Ok(post.clone()),
            other => Err(unexpected(&query, other)),
        }
    }

    pub async fn comments(&self, post_id: &str) -> Result<Vec<Comment>, ApiError> {
        self.read_comments(Query::CommentsByPost(post_id.to_string()))
            .await
    }

    pub async fn user_comments(&self, author: &str) -> Result<Vec<Comment>, ApiError> {
        let filter = self.comment_filter();
        self.read_comments(Query::UserComments {
            author: author.to_string(),
            filter,
        })
        .await
    }

    pub async fn liked_comments(&self, username: &str) -> Result<Vec<Comment>, ApiError> {
        let filter = self.comment_filter();
        self.read_comments(Query::LikedComments {
            liked_by: username.to_string(),
            filter,
        })
        .await
    }

    pub async fn tags(&self) -> Result<Vec<String>, ApiError> {
        match self.read(&Query::Tags).await?.as_ref() {
            QueryData::Tags(tags) => Ok(tags.clone()),
            other => Err(unexpected(&Query::Tags, other)),
        }
    }

    /// Sends a write after checking the session gate.
    ///
    /// On success every tag the mutation declares is invalidated. Failures are
    /// reported to the store and returned.
    pub async fn mutate(&self, mutation: &Mutation) -> Result<(), MutationError> {
        if self.gate.check() == Access::DenyWithPrompt {
            info!(mutation = %mutation, "Mutation refused without a session");
            self.store.prompt_login();
            return Err(MutationError::Unauthenticated);
        }

        match self.backend.send(mutation).await {
            Ok(()) => {
                let invalidated = self.cache.invalidate(mutation.invalidates());
                info!(mutation = %mutation, invalidated, "Mutation succeeded");
                Ok(())
            }
            Err(e) => {
                error!(mutation = %mutation, error = %e, "Mutation failed");
                self.store.report(&e);
                Err(MutationError::Api(e))
            }
        }
    }

    pub async fn create_post(&self, post: NewPost) -> Result<(), MutationError> {
        self.mutate(&Mutation::CreatePost(post)).await
    }

    pub async fn update_post(&self, post: NewPost) -> Result<(), MutationError> {
        self.mutate(&Mutation::UpdatePost(post)).await
    }

    pub async fn publish_draft(&self, post: NewPost) -> Result<(), MutationError> {
        self.mutate(&Mutation::PublishDraft(post)).await
    }

    pub async fn create_comment(&self, comment: NewComment) -> Result<(), MutationError> {
        self.mutate(&Mutation::CreateComment(comment)).await
    }

    pub async fn update_comment(&self, comment: NewComment) -> Result<(), MutationError> {
        self.mutate(&Mutation::UpdateComment(comment)).await
    }

    /// Submits a vote click. See [`VoteCoordinator::click`].
    pub fn vote(
        &self,
        vote_box: &mut VoteBox,
        button: VoteButton,
    ) -> Result<PendingVote, CoordinatorError> {
        self.coordinator.click(vote_box, button)
    }

    /// Opens the delete confirmation for a post or comment.
    pub fn request_delete(&self, target: DeleteTarget) {
        self.store.dispatch(PopupAction::ClickedDelete(target));
    }

    /// Deletes the submission awaiting confirmation and closes the popup.
    ///
    /// On failure the popup switches to the error view.
    pub async fn confirm_delete(&self) -> Result<(), MutationError> {
        let popup = self.store.snapshot().popup;
        let target = match (popup.kind, popup.delete_target) {
            (PopupKind::DeleteConfirmation, Some(target)) => target,
            _ => return Err(MutationError::NothingToConfirm),
        };

        self.store.dispatch(PopupAction::ClickedSubmit);
        self.mutate(&target.mutation()).await?;
        self.store.dispatch(PopupAction::Closed);
        Ok(())
    }
}

fn unexpected(query: &Query, data: &QueryData) -> ApiError {
    ApiError::decode(format!("unexpected payload for {}: {:?}", query.path(), data))
}
