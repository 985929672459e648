use std::ops::RangeInclusive;

pub const DEFAULT_THRESHOLD: f32 = 25.0;
pub const DEFAULT_MIN_AREA_FRACTION: f32 = 0.01;
pub const DEFAULT_BLUR_KERNEL_SIZE: u32 = 5;

pub const THRESHOLD_RANGE: RangeInclusive<f32> = 1.0..=100.0;
pub const MIN_AREA_FRACTION_RANGE: RangeInclusive<f32> = 0.001..=0.5;

/// Per-call tuning for `FrameDiffer::analyze`.
///
/// Constructed per call and never stored by the engine. Out-of-range values
/// are clamped into the recognized ranges before use.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisOptions {
    /// Intensity-difference cutoff in the 0-255 luma domain.
    pub threshold: f32,
    /// Fraction of total pixels that must differ for motion to count.
    pub min_area_fraction: f32,
    /// Gaussian kernel length; values <= 1 disable blurring.
    pub blur_kernel_size: u32,
    /// Discard the current reference and re-baseline on this frame.
    pub force_rebaseline: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_area_fraction: DEFAULT_MIN_AREA_FRACTION,
            blur_kernel_size: DEFAULT_BLUR_KERNEL_SIZE,
            force_rebaseline: false,
        }
    }
}

impl AnalysisOptions {
    /// Copy with `threshold` and `min_area_fraction` clamped into their
    /// recognized ranges.
    pub(crate) fn clamped(&self) -> Self {
        let threshold = self
            .threshold
            .clamp(*THRESHOLD_RANGE.start(), *THRESHOLD_RANGE.end());
        let min_area_fraction = self.min_area_fraction.clamp(
            *MIN_AREA_FRACTION_RANGE.start(),
            *MIN_AREA_FRACTION_RANGE.end(),
        );
        if threshold != self.threshold {
            log::debug!(
                "threshold {} outside recognized range, clamped to {}",
                self.threshold,
                threshold
            );
        }
        if min_area_fraction != self.min_area_fraction {
            log::debug!(
                "min_area_fraction {} outside recognized range, clamped to {}",
                self.min_area_fraction,
                min_area_fraction
            );
        }
        Self {
            threshold,
            min_area_fraction,
            blur_kernel_size: self.blur_kernel_size,
            force_rebaseline: self.force_rebaseline,
        }
    }
}
