//! Image generation and retrieval implementations.

pub mod dalle;
pub mod fetch;

pub use dalle::DalleImageGenerator;
pub use fetch::HttpImageFetcher;
