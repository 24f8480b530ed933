//! Infrastructure Layer
//!
//! Session storage, tab registry and the upstream identity provider clients.

pub mod google;
pub mod memory_store;
pub mod recording_browser;
pub mod strapi;
pub mod tab_registry;

pub use google::GoogleCredentialDecoder;
pub use memory_store::MemorySessionStore;
pub use recording_browser::RecordingBrowser;
pub use strapi::StrapiIdentityClient;
pub use tab_registry::{SharedTab, TabRegistry};
