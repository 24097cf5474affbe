//! # Forum Client Engine
//! This crate holds the client-side core of the forum: the vote state machine,
//! the optimistic vote coordinator, the tagged query cache, the session gate
//! and the application state store, tied together by the `ForumClient` facade.
pub mod cache;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod notify;
pub mod session;
pub mod store;
pub mod vote;

pub mod errors;

pub use cache::{QueryCache, DEFAULT_CACHE_CAPACITY};
pub use client::ForumClient;
pub use config::{EngineConfig, VoteDispatch};
pub use coordinator::{PendingVote, VoteCoordinator};
pub use notify::ErrorSurface;
pub use session::{Access, CookieSessionGate, LoginPrompt, SessionGate};
pub use store::{AppAction, AppState, AppStore};
pub use vote::{apply_click, BackendOp, ClickOutcome, VoteBox};
