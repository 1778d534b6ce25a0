//! Command-line and environment configuration for the replay host.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use annotator::consts::{DEFAULT_RECT_SIZE, DEFAULT_STAGE_HEIGHT, DEFAULT_STAGE_WIDTH, DEFAULT_STROKE_WIDTH};
use annotator::doc::RectDefaults;
use annotator::geom::Size;
use clap::Parser;

use crate::error::ReplayError;

#[derive(Parser, Debug)]
#[command(name = "videorect", about = "Replay rectangle annotation gestures over a video stage")]
pub struct Cli {
    #[arg(long, env = "VIDEORECT_STAGE_WIDTH", default_value_t = DEFAULT_STAGE_WIDTH)]
    pub stage_width: f64,

    #[arg(long, env = "VIDEORECT_STAGE_HEIGHT", default_value_t = DEFAULT_STAGE_HEIGHT)]
    pub stage_height: f64,

    /// Side length of newly added rectangles.
    #[arg(long, env = "VIDEORECT_RECT_SIZE", default_value_t = DEFAULT_RECT_SIZE)]
    pub rect_size: f64,

    #[arg(long, env = "VIDEORECT_STROKE_WIDTH", default_value_t = DEFAULT_STROKE_WIDTH)]
    pub stroke_width: f64,

    /// Seed for stroke colors; omit for a random seed.
    #[arg(long, env = "VIDEORECT_SEED")]
    pub seed: Option<u64>,

    /// JSON-lines gesture script, or `-` for stdin.
    #[arg(default_value = "-")]
    pub script: String,
}

/// Validated replay settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    pub stage: Size,
    pub defaults: RectDefaults,
    pub seed: Option<u64>,
    pub script: String,
}

impl Cli {
    /// Check sizes and build the replay settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::InvalidConfig`] if any size is non-finite or
    /// not positive, or the stroke width is negative.
    pub fn validate(self) -> Result<ReplayConfig, ReplayError> {
        check_positive("stage-width", self.stage_width)
            .and_then(|()| check_positive("stage-height", self.stage_height))
            .and_then(|()| check_positive("rect-size", self.rect_size))
            .map_err(ReplayError::InvalidConfig)?;
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ReplayError::InvalidConfig(format!(
                "stroke-width must be a non-negative number, got {}",
                self.stroke_width
            )));
        }
        Ok(ReplayConfig {
            stage: Size::new(self.stage_width, self.stage_height),
            defaults: RectDefaults { size: self.rect_size, stroke_width: self.stroke_width },
            seed: self.seed,
            script: self.script,
        })
    }
}

/// Sizes must be finite and strictly positive.
pub(crate) fn check_positive(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a positive number, got {value}"))
    }
}
