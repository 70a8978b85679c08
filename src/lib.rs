//! # Clipfuse
//!
//! Align an audio track onto a video track with lead-in/lead-out offsets,
//! mux the result, and optionally publish it for a shareable link.
//!
//! The heart of the library is a small, pure planner: given two durations and
//! an offset pair it decides the output window and whether the video must be
//! trimmed or looped. Everything that touches actual media bytes (probing,
//! trimming, muxing, encoding, uploading) is delegated to injected
//! collaborators, with ffmpeg-backed and local-filesystem implementations
//! included.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clipfuse::{
//!     align::AlignmentOffsets,
//!     compose::ComposeEngine,
//!     config::Config,
//!     media::FfmpegTool,
//!     storage::LocalStorage,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config::default();
//! let tool = FfmpegTool::new().await?;
//!
//! let engine = ComposeEngine::new(config, tool)
//!     .with_storage(LocalStorage::new("published"));
//!
//! let report = engine
//!     .fuse("clip.mp4", "voiceover.wav", "combined.mp4", AlignmentOffsets::new(1.0, 0.5))
//!     .await?;
//!
//! if let Some(link) = report.link {
//!     println!("shareable link: {}", link);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`align`] - The pure duration-alignment planner
//! - [`media`] - Probe and clip-editor seams, ffmpeg implementation
//! - [`compose`] - Pipeline orchestration
//! - [`storage`] - Publishing seam, local-filesystem implementation
//! - [`config`] - Configuration management

pub mod align;
pub mod compose;
pub mod config;
pub mod error;
pub mod media;
pub mod storage;

// Re-export commonly used types for convenience
pub use crate::{
    align::{AlignStrategy, AlignmentOffsets, AlignmentPlan, Planner},
    compose::{ComposeEngine, ComposeReport},
    config::Config,
    error::{FuseError, Result},
    storage::ShareLink,
};
