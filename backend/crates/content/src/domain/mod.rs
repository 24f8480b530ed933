//! Domain Layer

pub mod collection;
pub mod records;
pub mod repository;

pub use collection::CollectionName;
pub use records::{BlogCategory, CommonData, StaffData, StudentData, UserData};
pub use repository::{BlogSource, ContentSource, QueryParams};
