mod differ;
mod history;
mod options;
mod result;

pub use differ::FrameDiffer;
pub use history::{MotionEvent, MotionHistory, MAX_HISTORY_EVENTS, RECENT_WINDOW};
pub use options::{
    AnalysisOptions, DEFAULT_BLUR_KERNEL_SIZE, DEFAULT_MIN_AREA_FRACTION, DEFAULT_THRESHOLD,
    MIN_AREA_FRACTION_RANGE, THRESHOLD_RANGE,
};
pub use result::{AnalysisResult, BoundingBox, ImageSize, MotionRegion, Point};
