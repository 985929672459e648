use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::Path;

use crate::detect::{
    AnalysisOptions, DEFAULT_BLUR_KERNEL_SIZE, DEFAULT_MIN_AREA_FRACTION, DEFAULT_THRESHOLD,
    MIN_AREA_FRACTION_RANGE, THRESHOLD_RANGE,
};

#[derive(Debug, Deserialize, Default)]
struct MotiondConfigFile {
    detector: Option<DetectorConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectorConfigFile {
    threshold: Option<f32>,
    min_area_fraction: Option<f32>,
    blur_kernel_size: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct MotiondConfig {
    pub threshold: f32,
    pub min_area_fraction: f32,
    pub blur_kernel_size: u32,
}

impl MotiondConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("MOTION_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: MotiondConfigFile) -> Self {
        let detector = file.detector.unwrap_or_default();
        Self {
            threshold: detector.threshold.unwrap_or(DEFAULT_THRESHOLD),
            min_area_fraction: detector
                .min_area_fraction
                .unwrap_or(DEFAULT_MIN_AREA_FRACTION),
            blur_kernel_size: detector
                .blur_kernel_size
                .unwrap_or(DEFAULT_BLUR_KERNEL_SIZE),
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(threshold) = std::env::var("MOTION_THRESHOLD") {
            self.threshold = threshold
                .parse()
                .map_err(|_| anyhow!("MOTION_THRESHOLD must be a number"))?;
        }
        if let Ok(fraction) = std::env::var("MOTION_MIN_AREA_FRACTION") {
            self.min_area_fraction = fraction
                .parse()
                .map_err(|_| anyhow!("MOTION_MIN_AREA_FRACTION must be a number"))?;
        }
        if let Ok(kernel) = std::env::var("MOTION_BLUR_KERNEL") {
            self.blur_kernel_size = kernel
                .parse()
                .map_err(|_| anyhow!("MOTION_BLUR_KERNEL must be an integer"))?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !THRESHOLD_RANGE.contains(&self.threshold) {
            return Err(anyhow!(
                "threshold {} outside recognized range {:?}",
                self.threshold,
                THRESHOLD_RANGE
            ));
        }
        if !MIN_AREA_FRACTION_RANGE.contains(&self.min_area_fraction) {
            return Err(anyhow!(
                "min_area_fraction {} outside recognized range {:?}",
                self.min_area_fraction,
                MIN_AREA_FRACTION_RANGE
            ));
        }
        Ok(())
    }

    /// Default per-call options for this process.
    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            threshold: self.threshold,
            min_area_fraction: self.min_area_fraction,
            blur_kernel_size: self.blur_kernel_size,
            force_rebaseline: false,
        }
    }
}

fn read_config_file(path: &Path) -> Result<MotiondConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
