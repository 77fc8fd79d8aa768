//! Remote Product Store gateway.
//!
//! Translates create/update/delete intents into HTTP round-trips against
//! the external Product Store API. Every operation is a single
//! request/response exchange: no retries, no batching, no optimism.

pub mod client;
pub mod error;

pub use client::{ProductStore, ProductStoreClient};
pub use error::StoreError;
