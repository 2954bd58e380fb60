//! Business services.
//!
//! Each service is generic over the repository/provider traits it consumes
//! so the core crate never depends on concrete infrastructure. Wiring to
//! concrete implementations happens in dailylog-api.

pub mod conversation;
pub mod diary;
pub mod entitlement;
pub mod session;
pub mod thumbnail;

#[cfg(test)]
pub(crate) mod fakes;

pub use conversation::ConversationService;
pub use diary::DiaryService;
pub use entitlement::EntitlementService;
pub use session::SessionService;
pub use thumbnail::ThumbnailService;
