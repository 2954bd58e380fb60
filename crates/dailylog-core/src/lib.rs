//! Business logic and trait definitions for Dailylog.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the services that turn a chat
//! conversation into a diary entry. It depends only on `dailylog-types` --
//! never on `dailylog-infra` or any database/HTTP crate.

pub mod extract;
pub mod prompt;
pub mod provider;
pub mod repository;
pub mod service;
pub mod transcript;
