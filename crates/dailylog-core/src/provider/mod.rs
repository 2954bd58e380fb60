//! Provider trait definitions for external AI and storage services.
//!
//! Capability interfaces with multiple backing implementations selected at
//! process wiring time. Implementations live in dailylog-infra.

pub mod conversation;
pub mod image;
pub mod storage;

pub use conversation::ConversationProvider;
pub use image::{ImageFetcher, ImageGenerator};
pub use storage::ObjectStorage;
