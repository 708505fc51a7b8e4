//! Parameter signing and URL derivation for the media CDN.
//!
//! The CDN stores and transcodes every uploaded video; this module only builds
//! the request parameters it expects. Nothing here performs I/O.

mod sample;
mod signing;
mod url;

pub use sample::{FRAME_COUNT, FRAME_OFFSETS, frame_seconds};
pub use signing::sign_params;
pub use url::{DEFAULT_API_BASE, DEFAULT_DELIVERY_BASE, destroy_url, frame_url, upload_url};
