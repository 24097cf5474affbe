//! # Forum Client Shared
//! This crate defines shared data structures and types used across the forum client.
//! It includes definitions for votes and vote transitions, votable entities (posts and
//! comments), cache tags and the filters used when listing content.
pub mod types;
