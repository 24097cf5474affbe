mod client;

pub use client::HttpForumBackend;
