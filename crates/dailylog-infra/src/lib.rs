//! Infrastructure implementations for Dailylog.
//!
//! Concrete backends for the repository and provider traits defined in
//! `dailylog-core`: SQLite persistence, the OpenAI conversation and image
//! providers, and object storage (local filesystem or Cloudflare R2).

pub mod config;
pub mod image;
pub mod llm;
pub mod sqlite;
pub mod storage;
