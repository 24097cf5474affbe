//! This module defines and re-exports the interfaces for the forum backend.
//! It serves as a central point for accessing traits related to backend interaction.
mod forum_backend;

pub use forum_backend::ForumBackend;
