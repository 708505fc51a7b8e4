/// Number of still frames sampled per video.
pub const FRAME_COUNT: usize = 5;

/// Proportional offsets into the video at which frames are sampled.
pub const FRAME_OFFSETS: [f64; FRAME_COUNT] = [0.0, 0.2, 0.4, 0.6, 0.8];

/// Duration assumed when a record carries a zero or unusable duration.
const FALLBACK_DURATION: f64 = 10.0;

/// Compute the five frame-sampling offsets, in whole seconds.
///
/// A non-finite or non-positive duration falls back to 10 seconds rather than
/// producing a degenerate all-zero storyboard.
pub fn frame_seconds(duration: f64) -> [u32; FRAME_COUNT] {
    let duration = if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        FALLBACK_DURATION
    };

    FRAME_OFFSETS.map(|offset| (duration * offset).round() as u32)
}
