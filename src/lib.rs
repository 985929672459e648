//! Adaptive motion detection engine.
//!
//! This crate decides, frame by frame, whether motion occurred in a video
//! stream, how strong it was, and where, while keeping its background
//! reference current under changing lighting.
//!
//! # Design
//!
//! - Frames are compared against an exponentially adapting reference, not
//!   the previous frame, so brief motion is detected strongly while slow
//!   drift and parked changes are absorbed.
//! - Exactly one bounding region is reported per frame, covering the union
//!   of all changed pixels. There is no connected-component labeling.
//! - Malformed frames are per-frame errors in the result, never a panic,
//!   and never disturb the reference.
//! - One `FrameDiffer` per stream; calls are synchronous and unsynchronized.
//!
//! # Module Structure
//!
//! - `grid`: row-major luminance grid with shape invariants
//! - `decode`: the image-decoding seam (`LumaDecoder`) and its `image`-crate
//!   implementation
//! - `blur`: separable Gaussian noise reduction
//! - `detect`: the engine (`FrameDiffer`), options, results, event history
//! - `config`: motiond configuration (JSON file + environment overrides)

pub mod blur;
pub mod config;
pub mod decode;
pub mod detect;
pub mod grid;

pub use decode::{ImageLumaDecoder, LumaDecoder};
pub use detect::{
    AnalysisOptions, AnalysisResult, BoundingBox, FrameDiffer, ImageSize, MotionEvent,
    MotionHistory, MotionRegion, Point, MAX_HISTORY_EVENTS, RECENT_WINDOW,
};
pub use grid::Grid;
