//! Neynar social-graph provider.
//!
//! Authenticated with an API key in the `api_key` header. Implements
//! [`storagift_core::SocialGraph`] over the v2 REST endpoints.

mod api;
mod error;
pub(crate) mod parser;

pub use api::{NeynarClient, NEYNAR_API_BASE};
pub use error::NeynarError;
