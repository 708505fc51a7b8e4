//! Upload client for the clipvault server.
//!
//! [`api::ApiClient`] wraps the catalog endpoints; [`uploader::Uploader`]
//! drives the sign → CDN upload → persist pipeline with progress reporting.

pub mod api;
pub mod progress;
pub mod uploader;
