use serde::{Deserialize, Serialize};

use crate::error::{AlignError, Result};

/// Which kind of media a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

impl TrackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
        }
    }
}

/// A decoded video or audio clip, reduced to what the planner needs
///
/// The planner only ever reads the duration; trimming, looping and muxing are
/// requested from an external collaborator that owns the actual media. The
/// constructor is the single place durations are validated, so every plan is
/// computed from known-good inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MediaTrack {
    kind: TrackKind,
    duration: f64,
}

impl MediaTrack {
    /// Create a track, rejecting non-positive or non-finite durations
    pub fn new(kind: TrackKind, duration: f64) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(AlignError::InvalidDuration {
                kind: kind.as_str().to_string(),
                duration,
            }
            .into());
        }
        Ok(Self { kind, duration })
    }

    pub fn video(duration: f64) -> Result<Self> {
        Self::new(TrackKind::Video, duration)
    }

    pub fn audio(duration: f64) -> Result<Self> {
        Self::new(TrackKind::Audio, duration)
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    /// Duration in seconds, guaranteed positive and finite
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// User-supplied lead-in/lead-out timing parameters
///
/// `start` is the seconds of video shown before the audio's useful content
/// begins; `end` the seconds shown after it stops. Negative values are
/// accepted: a negative `end` trims the tail harder, and a negative `start`
/// is treated as zero. The host UI typically offers 0-10s, but no upper
/// bound is enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentOffsets {
    pub start: f64,
    pub end: f64,
}

impl AlignmentOffsets {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The lead-in actually applied (negative start clamps to zero)
    pub fn lead_in(&self) -> f64 {
        self.start.max(0.0)
    }

    /// Total output duration implied by these offsets around an audio track
    pub fn total_with(&self, audio_duration: f64) -> f64 {
        (self.lead_in() + audio_duration + self.end).max(0.0)
    }
}

impl Default for AlignmentOffsets {
    fn default() -> Self {
        Self { start: 0.0, end: 0.0 }
    }
}

/// Which alignment semantic the planner applies
///
/// The two strategies differ in how a lead-in is realized:
///
/// * [`TrimWindow`](Self::TrimWindow) shifts the kept video window forward by
///   `start` and never loops; the audio is muxed unmodified at the window
///   start. The video is assumed long enough to cover the audio.
/// * [`LoopToFit`](Self::LoopToFit) keeps the window anchored at zero,
///   prepends `start` seconds of silence to the audio, and loops the video
///   when it is shorter than `start + audio + end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignStrategy {
    TrimWindow,
    #[default]
    LoopToFit,
}

impl AlignStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrimWindow => "trim_window",
            Self::LoopToFit => "loop_to_fit",
        }
    }
}

impl std::str::FromStr for AlignStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "trim_window" | "trim" => Ok(Self::TrimWindow),
            "loop_to_fit" | "loop" => Ok(Self::LoopToFit),
            other => Err(format!(
                "unknown strategy '{}' (expected 'trim_window' or 'loop_to_fit')",
                other
            )),
        }
    }
}

/// Whether the video is shortened or extended to fill the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlanMode {
    /// Keep `video[window_start..window_end]`
    Trim,
    /// Cycle the video until it covers `target` seconds
    Loop { target: f64 },
}

/// Output of the planner: the window the video must occupy, how to fill it,
/// and how much silence to prepend to the audio before muxing
///
/// Invariant: `0 <= window_start <= window_end`, and in trim mode
/// `window_end` never exceeds the source video duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentPlan {
    pub window_start: f64,
    pub window_end: f64,
    pub mode: PlanMode,
    /// Seconds of silence prepended to the audio track (0 in trim-window plans)
    pub audio_lead_in: f64,
}

impl AlignmentPlan {
    /// Length of the kept video window
    pub fn window_len(&self) -> f64 {
        self.window_end - self.window_start
    }

    /// Duration of the composed output after applying this plan
    pub fn output_duration(&self) -> f64 {
        match self.mode {
            PlanMode::Trim => self.window_len(),
            PlanMode::Loop { target } => target,
        }
    }

    pub fn is_loop(&self) -> bool {
        matches!(self.mode, PlanMode::Loop { .. })
    }
}
