//! # Media Collaborators
//!
//! Seams to the external media tooling. The alignment core only computes
//! bounds; everything that touches actual bytes (probing durations, trimming,
//! looping, silence-padding, muxing, encoding) is requested through the two
//! traits here and performed by an external tool. [`FfmpegTool`] is the stock
//! implementation, shelling out to `ffprobe`/`ffmpeg`.

pub mod ffmpeg;

pub use ffmpeg::FfmpegTool;

use std::path::Path;

use crate::{
    align::{AlignmentPlan, MediaTrack, TrackKind},
    config::OutputConfig,
    error::Result,
};

/// Obtains track durations from media files
pub trait MediaProber {
    fn probe(
        &self,
        path: &Path,
        kind: TrackKind,
    ) -> impl std::future::Future<Output = Result<MediaTrack>> + Send;
}

/// Everything the editor needs to realize one alignment plan
#[derive(Debug, Clone)]
pub struct ApplyJob<'a> {
    pub video: &'a Path,
    pub audio: &'a Path,
    pub output: &'a Path,
    pub plan: AlignmentPlan,
    pub encoding: &'a OutputConfig,
}

/// Applies an alignment plan to real media, producing the muxed output file
///
/// Implementations trim or loop the video per the plan's mode, prepend
/// `audio_lead_in` seconds of silence to the audio, and mux both into the
/// output container.
pub trait ClipEditor {
    fn apply(&self, job: &ApplyJob<'_>) -> impl std::future::Future<Output = Result<()>> + Send;
}
