//! FixedFloat Rust SDK
//!
//! A Rust SDK for the FixedFloat exchange API:
//! - Request signing (HMAC-SHA256 over the exact payload bytes sent)
//! - Info endpoints (currencies, price quotes, order lookups)
//! - Exchange endpoints (order creation, emergency choice)

pub mod auth;
pub mod client;
pub mod error;
pub mod payload;
pub mod types;

mod exchange;
mod info;

pub use auth::Credentials;
pub use client::{Client, ClientConfig, BASE_URL};
pub use error::{Error, ErrorKind, Result};
pub use payload::Payload;
pub use types::*;
