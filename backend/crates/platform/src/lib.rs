//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC signing, Base64)
//! - Cookie management
//! - Wall-clock abstraction
//! - Failed-attempt lockout policy
//! - Upstream HTTP client with timeout and error classification

pub mod clock;
pub mod cookie;
pub mod crypto;
pub mod http_client;
pub mod lockout;
