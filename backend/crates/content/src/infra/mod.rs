//! Infrastructure Layer
//!
//! HTTP clients for the headless CMS and the blog engine.

pub mod strapi_cms;
pub mod wordpress;

pub use strapi_cms::StrapiContentClient;
pub use wordpress::WordPressBlogClient;
