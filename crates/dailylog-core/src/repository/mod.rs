//! Repository trait definitions ("ports").
//!
//! Implementations live in dailylog-infra. All traits use native async fn
//! in traits (RPITIT, Rust 2024 edition) with explicit `Send` bounds so
//! services remain usable from multi-threaded executors.

pub mod chat;
pub mod diary;
pub mod payment;
pub mod user;

pub use chat::ChatRepository;
pub use diary::DiaryRepository;
pub use payment::PaymentRepository;
pub use user::UserRepository;
