//! Social network clients used by quill.
//!
//! Currently only the X (Twitter) posting surface is implemented: credential
//! loading, the v2 create-post call, and the error model the CLI reports.
pub mod twitter;

pub use twitter::client::{StatusPoster, XApi};
pub use twitter::credentials::Credentials;
pub use twitter::error::PostError;
pub use twitter::types::PostedTweet;
