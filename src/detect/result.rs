use serde::{Serialize, Serializer};
use std::time::Duration;

/// Decoded frame dimensions. `{0, 0}` when the frame failed to decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned box in integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

/// The single bounding region covering every changed pixel of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MotionRegion {
    pub bbox: BoundingBox,
    pub area: i64,
    pub center: Point,
}

impl MotionRegion {
    /// Derive `area` and `center` from the box. Center uses integer floor
    /// division.
    pub(crate) fn from_bbox(bbox: BoundingBox) -> Self {
        Self {
            area: i64::from(bbox.width) * i64::from(bbox.height),
            center: Point {
                x: bbox.x + bbox.width / 2,
                y: bbox.y + bbox.height / 2,
            },
            bbox,
        }
    }
}

/// Outcome of one `analyze` call.
///
/// Fully owned by the caller; field names are the wire names used when
/// serializing to JSON.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisResult {
    pub motion_detected: bool,
    /// Fraction of differing pixels, expressed as a 0.0-100.0 percentage.
    pub motion_score: f32,
    /// Zero or one region; never more.
    pub regions: Vec<MotionRegion>,
    pub frame_number: u64,
    pub image_size: ImageSize,
    /// Serialized as fractional seconds.
    #[serde(serialize_with = "duration_secs")]
    pub time_since_last_motion: Option<Duration>,
    pub recent_motion_events_count: usize,
    /// Decode failure reason, when the frame could not be processed.
    pub error: Option<String>,
}

fn duration_secs<S: Serializer>(
    value: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(duration) => serializer.serialize_some(&duration.as_secs_f64()),
        None => serializer.serialize_none(),
    }
}
