// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Storagift Store
//!
//! Configuration and session state for Storagift.
//!
//! This crate provides:
//!
//! - **Config**: On-disk JSON configuration with per-section defaults
//! - **SessionStore**: Per-viewer page cursors over a ranking
//!
//! ## Usage
//!
//! ```ignore
//! use storagift_store::{Config, SessionStore};
//!
//! let config = Config::load()?;
//! let sessions = SessionStore::new();
//!
//! let state = sessions.get_or_insert("viewer-1", total_pages).await;
//! sessions.update("viewer-1", |s| s.next()).await?;
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{Config, GeneralConfig, PipelineConfig, ProvidersConfig};
pub use error::StoreError;
pub use session::{PageState, SessionStore};
