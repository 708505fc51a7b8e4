/// Default base for the CDN's authenticated API (upload, destroy).
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Default base for the CDN's public delivery host (playback, frames).
pub const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

/// Endpoint accepting signed direct-from-client video uploads.
pub fn upload_url(api_base: &str, cloud_name: &str) -> String {
    format!("{}/{}/video/upload", api_base.trim_end_matches('/'), cloud_name)
}

/// Endpoint accepting signed asset destroy requests.
pub fn destroy_url(api_base: &str, cloud_name: &str) -> String {
    format!("{}/{}/video/destroy", api_base.trim_end_matches('/'), cloud_name)
}

/// Still-frame extraction URL for one second offset into a stored video.
///
/// The transformation string asks the CDN for a 400px-wide JPEG filled crop
/// of the frame at `second`. The frame is rendered on request; no server-side
/// extraction happens on our end.
pub fn frame_url(delivery_base: &str, cloud_name: &str, public_id: &str, second: u32) -> String {
    format!(
        "{}/{}/video/upload/so_{},w_400,c_fill,q_auto,f_jpg/{}.jpg",
        delivery_base.trim_end_matches('/'),
        cloud_name,
        second,
        public_id,
    )
}
