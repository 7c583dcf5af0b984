//! REST client for the quiz backend.
//!
//! Every call returns a typed [`ApiError`] instead of panicking; deciding what a
//! failure means for the session is left to [`crate::session`].

pub mod client;
pub mod error;

pub use client::{ApiClient, AuthPayload};
pub use error::ApiError;
