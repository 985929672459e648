//! motiond - run the adaptive motion detector over a sequence of image files

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

use motion_engine::config::MotiondConfig;
use motion_engine::FrameDiffer;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Image files to analyze, in stream order.
    #[arg(required = true)]
    frames: Vec<PathBuf>,
    /// Intensity-difference cutoff (1.0-100.0).
    #[arg(long)]
    threshold: Option<f32>,
    /// Fraction of pixels that must change for motion (0.001-0.5).
    #[arg(long)]
    min_area_fraction: Option<f32>,
    /// Gaussian blur kernel size; values <= 1 disable blurring.
    #[arg(long)]
    blur_kernel: Option<u32>,
    /// Force a fresh baseline every N frames (0 = never).
    #[arg(long, default_value_t = 0)]
    rebaseline_every: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = MotiondConfig::load()?;
    let mut options = config.analysis_options();
    if let Some(threshold) = args.threshold {
        options.threshold = threshold;
    }
    if let Some(fraction) = args.min_area_fraction {
        options.min_area_fraction = fraction;
    }
    if let Some(kernel) = args.blur_kernel {
        options.blur_kernel_size = kernel;
    }

    log::info!(
        "motiond starting: threshold {}, min area fraction {}, blur kernel {}",
        options.threshold,
        options.min_area_fraction,
        options.blur_kernel_size
    );

    let mut differ = FrameDiffer::new();
    for path in &args.frames {
        let bytes =
            fs::read(path).with_context(|| format!("read frame {}", path.display()))?;
        options.force_rebaseline =
            args.rebaseline_every > 0 && differ.frame_count() % args.rebaseline_every == 0;
        let result = differ.analyze(&bytes, &options);
        if let Some(reason) = &result.error {
            log::warn!("frame {}: {}", path.display(), reason);
        }
        println!("{}", serde_json::to_string(&result)?);
    }

    log::info!(
        "analyzed {} frames, {} motion events retained",
        differ.frame_count(),
        differ.history_len()
    );
    Ok(())
}
