//! Application Layer
//!
//! Use cases over the CMS and blog sources.

pub mod blog;
pub mod collections;
pub mod config;
pub mod fetch_common;
pub mod fetch_user_data;

// Re-exports
pub use blog::BlogCategoryUseCase;
pub use collections::CollectionUseCase;
pub use config::ContentConfig;
pub use fetch_common::FetchCommonDataUseCase;
pub use fetch_user_data::FetchUserDataUseCase;
