//! Adaptive frame differencing.
//!
//! `FrameDiffer` keeps a per-stream background reference and compares each
//! incoming frame against it:
//!
//! decode -> blur -> baseline check -> abs diff vs reference -> score ->
//! EMA reference update -> region extraction -> history update
//!
//! The reference is rewritten every frame, so slow lighting drift is
//! absorbed and a change that stays put is assimilated after a while instead
//! of flagging motion forever. One instance per stream; `analyze` mutates
//! state and is not synchronized internally.

use std::time::SystemTime;

use crate::blur::gaussian_blur;
use crate::decode::{ImageLumaDecoder, LumaDecoder};
use crate::grid::Grid;

use super::history::{MotionEvent, MotionHistory};
use super::options::AnalysisOptions;
use super::result::{AnalysisResult, BoundingBox, ImageSize, MotionRegion};

/// EMA weight of the current frame in the reference update.
const BASELINE_ALPHA: f32 = 0.1;

/// Minimum absolute footprint for a reported region, as the product of the
/// mask's x and y spans in px^2. Independent of the fractional
/// `min_area_fraction` gate: that one asks "how much of the frame changed",
/// this one asks "is the changed patch big enough to mean anything".
const MIN_REGION_SPAN_AREA: i64 = 100;

/// Stateful per-stream motion detector.
pub struct FrameDiffer<D = ImageLumaDecoder> {
    decoder: D,
    reference: Option<Grid<f32>>,
    frame_count: u64,
    last_motion_timestamp: Option<SystemTime>,
    history: MotionHistory,
}

impl FrameDiffer<ImageLumaDecoder> {
    pub fn new() -> Self {
        Self::with_decoder(ImageLumaDecoder)
    }
}

impl Default for FrameDiffer<ImageLumaDecoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: LumaDecoder> FrameDiffer<D> {
    pub fn with_decoder(decoder: D) -> Self {
        Self {
            decoder,
            reference: None,
            frame_count: 0,
            last_motion_timestamp: None,
            history: MotionHistory::new(),
        }
    }

    /// Analyze one frame.
    ///
    /// Always advances the frame counter, including on decode failure, so
    /// callers can align results to a frame index even when frames are
    /// occasionally corrupt. Decode failures are reported in the result's
    /// `error` field and leave the reference untouched.
    pub fn analyze(&mut self, image_bytes: &[u8], options: &AnalysisOptions) -> AnalysisResult {
        self.frame_count += 1;
        let now = SystemTime::now();
        let options = options.clamped();

        let decoded = match self.decoder.decode_luminance(image_bytes) {
            Ok(grid) => grid,
            Err(err) => {
                log::debug!("frame {}: decode failed: {:#}", self.frame_count, err);
                let reason = format!("{:#}", err);
                return self.assemble(now, false, 0.0, vec![], ImageSize::default(), Some(reason));
            }
        };

        let current = if options.blur_kernel_size > 1 {
            gaussian_blur(&decoded, options.blur_kernel_size)
        } else {
            decoded
        };
        let image_size = ImageSize {
            width: current.width(),
            height: current.height(),
        };

        let mut reference = match self.reference.take() {
            Some(reference)
                if !options.force_rebaseline && reference.same_shape(&current) =>
            {
                reference
            }
            previous => {
                if previous.is_some() {
                    log::debug!(
                        "frame {}: re-baselining at {}x{}",
                        self.frame_count,
                        image_size.width,
                        image_size.height
                    );
                }
                self.reference = Some(current);
                return self.assemble(now, false, 0.0, vec![], image_size, None);
            }
        };

        let (mask, flagged) = diff_mask(&current, &reference, options.threshold);
        let fraction = flagged as f32 / current.len() as f32;
        let motion_score = fraction * 100.0;
        let motion_detected = fraction >= options.min_area_fraction;

        // Reference tracks the stream whether or not motion fired.
        reference.blend_toward(&current, BASELINE_ALPHA);
        self.reference = Some(reference);

        let regions = if motion_detected {
            extract_region(&mask).into_iter().collect()
        } else {
            vec![]
        };

        if motion_detected {
            self.history.push(MotionEvent {
                timestamp: now,
                frame_number: self.frame_count,
            });
            self.last_motion_timestamp = Some(now);
        }

        self.assemble(now, motion_detected, motion_score, regions, image_size, None)
    }

    /// Return to the freshly-constructed state: no reference, zero frames,
    /// empty history.
    pub fn reset(&mut self) {
        self.reference = None;
        self.frame_count = 0;
        self.last_motion_timestamp = None;
        self.history.clear();
    }

    /// Frames seen since construction or the last `reset`.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Motion events currently retained.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_motion_timestamp(&self) -> Option<SystemTime> {
        self.last_motion_timestamp
    }

    fn assemble(
        &self,
        now: SystemTime,
        motion_detected: bool,
        motion_score: f32,
        regions: Vec<MotionRegion>,
        image_size: ImageSize,
        error: Option<String>,
    ) -> AnalysisResult {
        AnalysisResult {
            motion_detected,
            motion_score,
            regions,
            frame_number: self.frame_count,
            image_size,
            time_since_last_motion: self
                .last_motion_timestamp
                .and_then(|at| now.duration_since(at).ok()),
            recent_motion_events_count: self.history.recent_count(now),
            error,
        }
    }
}

/// Per-pixel `|current - reference| > threshold` mask plus flagged count.
fn diff_mask(current: &Grid<f32>, reference: &Grid<f32>, threshold: f32) -> (Grid<bool>, usize) {
    let mut flagged = 0;
    let data: Vec<bool> = current
        .data()
        .iter()
        .zip(reference.data())
        .map(|(cur, refv)| {
            let hit = (cur - refv).abs() > threshold;
            flagged += usize::from(hit);
            hit
        })
        .collect();
    (
        Grid::from_raw(current.width(), current.height(), data),
        flagged,
    )
}

/// Single bounding region over every flagged pixel, via row/column
/// projections of the mask. Returns `None` when nothing is flagged or when
/// the flagged span is below the absolute footprint floor.
fn extract_region(mask: &Grid<bool>) -> Option<MotionRegion> {
    let width = mask.width() as usize;
    let height = mask.height() as usize;
    let mut row_has_motion = vec![false; height];
    let mut col_has_motion = vec![false; width];
    for (y, row) in mask.rows().enumerate() {
        for (x, &hit) in row.iter().enumerate() {
            if hit {
                row_has_motion[y] = true;
                col_has_motion[x] = true;
            }
        }
    }

    let y_min = row_has_motion.iter().position(|&hit| hit)?;
    let y_max = row_has_motion.iter().rposition(|&hit| hit)?;
    let x_min = col_has_motion.iter().position(|&hit| hit)?;
    let x_max = col_has_motion.iter().rposition(|&hit| hit)?;

    let span_area = (x_max - x_min) as i64 * (y_max - y_min) as i64;
    if span_area < MIN_REGION_SPAN_AREA {
        return None;
    }

    Some(MotionRegion::from_bbox(BoundingBox {
        x: x_min as u32,
        y: y_min as u32,
        width: (x_max - x_min + 1) as u32,
        height: (y_max - y_min + 1) as u32,
    }))
}
