use tracing::debug;

use crate::error::{AlignError, Result};

use super::types::{AlignStrategy, AlignmentOffsets, AlignmentPlan, PlanMode, TrackKind};

/// Computes alignment plans from track durations and offset parameters
///
/// Pure and stateless apart from its configuration: the same inputs always
/// produce the same plan, and no media is touched. By default offsets are
/// accepted as-is and clamped where the arithmetic requires (negative lead-in
/// becomes zero, trims never run past the end of the source); a planner built
/// with [`strict`](Planner::strict) instead rejects offsets whose magnitude
/// exceeds a caller-chosen limit.
#[derive(Debug, Clone, Copy)]
pub struct Planner {
    strategy: AlignStrategy,
    offset_limit: Option<f64>,
}

impl Planner {
    /// Create a planner using the given strategy, clamping out-of-range offsets
    pub fn new(strategy: AlignStrategy) -> Self {
        Self { strategy, offset_limit: None }
    }

    /// Create a planner that rejects offsets with magnitude above `max_offset`
    pub fn strict(strategy: AlignStrategy, max_offset: f64) -> Self {
        Self { strategy, offset_limit: Some(max_offset) }
    }

    pub fn strategy(&self) -> AlignStrategy {
        self.strategy
    }

    /// Compute the output window and mode for the given durations and offsets
    ///
    /// Fails with [`AlignError::InvalidDuration`] when either duration is
    /// non-positive or non-finite, and with [`AlignError::InvalidOffset`] for
    /// non-finite offsets (or out-of-limit ones in strict mode). Negative
    /// offsets are otherwise accepted: a negative `start` is treated as zero,
    /// a negative `end` shortens the output from the tail.
    pub fn compute_plan(
        &self,
        video_duration: f64,
        audio_duration: f64,
        offsets: AlignmentOffsets,
    ) -> Result<AlignmentPlan> {
        validate_duration(TrackKind::Video, video_duration)?;
        validate_duration(TrackKind::Audio, audio_duration)?;
        self.validate_offset("start_duration", offsets.start)?;
        self.validate_offset("end_duration", offsets.end)?;

        let plan = match self.strategy {
            AlignStrategy::TrimWindow => trim_window(video_duration, audio_duration, offsets),
            AlignStrategy::LoopToFit => loop_to_fit(video_duration, audio_duration, offsets),
        };

        debug!(
            strategy = self.strategy.as_str(),
            window_start = plan.window_start,
            window_end = plan.window_end,
            looped = plan.is_loop(),
            audio_lead_in = plan.audio_lead_in,
            "alignment plan computed"
        );

        Ok(plan)
    }

    fn validate_offset(&self, name: &str, value: f64) -> Result<()> {
        let max = self.offset_limit.unwrap_or(f64::MAX);
        if !value.is_finite() || value.abs() > max {
            return Err(AlignError::InvalidOffset {
                name: name.to_string(),
                value,
                max,
            }
            .into());
        }
        Ok(())
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(AlignStrategy::default())
    }
}

fn validate_duration(kind: TrackKind, duration: f64) -> Result<()> {
    if !duration.is_finite() || duration <= 0.0 {
        return Err(AlignError::InvalidDuration {
            kind: kind.as_str().to_string(),
            duration,
        }
        .into());
    }
    Ok(())
}

/// Clamp-trim semantic: shift the kept window forward by the lead-in
///
/// The window starts `start` seconds in and ends where the audio runs out,
/// extended by `end`. The tail trim is clamped at zero so the window never
/// reaches past the source, and the start is clamped to the source duration
/// so the window is always well-ordered. The audio is left untouched.
fn trim_window(video: f64, audio: f64, offsets: AlignmentOffsets) -> AlignmentPlan {
    let window_start = offsets.start.max(0.0).min(video);
    let end_trim = (video - (audio + window_start) + offsets.end).max(0.0);
    let window_end = (video - end_trim).max(window_start);

    AlignmentPlan {
        window_start,
        window_end,
        mode: PlanMode::Trim,
        audio_lead_in: 0.0,
    }
}

/// Loop-or-trim semantic: anchor at zero, pad the audio, extend if needed
///
/// The output must cover `start + audio + end` seconds. A video shorter than
/// that is cycled to the target length; a longer one is cut at the target.
/// The lead-in is realized as silence prepended to the audio rather than a
/// shifted window, so the audible content starts `start` seconds in.
fn loop_to_fit(video: f64, audio: f64, offsets: AlignmentOffsets) -> AlignmentPlan {
    let total = offsets.total_with(audio);
    let mode = if video < total {
        PlanMode::Loop { target: total }
    } else {
        PlanMode::Trim
    };

    AlignmentPlan {
        window_start: 0.0,
        window_end: total,
        mode,
        audio_lead_in: offsets.lead_in(),
    }
}
