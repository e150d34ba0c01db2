//! X (Twitter) v2 posting surface.
//!
//! Submodules provide the credential loader, the HTTP client wrapper, the
//! strongly typed request/response models, and the error taxonomy surfaced
//! to the terminal.
pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

pub use client::XApi;
