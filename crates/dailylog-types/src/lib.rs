//! Shared domain types for Dailylog.
//!
//! Pure data definitions with no IO: chat sessions and messages, diaries,
//! users, payment records, and the domain error enums. Every other crate in
//! the workspace depends on this one; it depends on nothing but serde,
//! chrono, uuid, and thiserror.

pub mod chat;
pub mod diary;
pub mod error;
pub mod payment;
pub mod user;
