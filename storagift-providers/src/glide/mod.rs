//! Glide payment-gateway provider.
//!
//! Authenticated with a project id in the `x-glide-project-id` header.
//! Implements [`storagift_core::PaymentGateway`] over the session REST API.

mod api;
mod error;
pub(crate) mod parser;

pub use api::{GlideClient, GLIDE_API_BASE};
pub use error::GlideError;
