//! # Duration Alignment Module
//!
//! The computational core of clipfuse: given a video track and an audio track
//! (each with a known duration) plus a lead-in/lead-out offset pair, compute
//! the output time window the video must occupy and whether the video must be
//! shortened (trim) or extended (loop) to match.
//!
//! The planner is a pure function over durations. It never touches the media
//! itself; applying the resulting [`AlignmentPlan`] is the job of a
//! [`ClipEditor`](crate::media::ClipEditor) collaborator.
//!
//! ## Usage
//!
//! ```rust
//! use clipfuse::align::{AlignmentOffsets, AlignStrategy, Planner};
//!
//! # fn main() -> clipfuse::error::Result<()> {
//! let planner = Planner::new(AlignStrategy::LoopToFit);
//! let plan = planner.compute_plan(3.0, 5.0, AlignmentOffsets::new(1.0, 1.0))?;
//!
//! assert!(plan.is_loop());
//! assert_eq!(plan.output_duration(), 7.0);
//! # Ok(())
//! # }
//! ```

pub mod planner;
pub mod types;

pub use planner::Planner;
pub use types::{
    AlignStrategy, AlignmentOffsets, AlignmentPlan, MediaTrack, PlanMode, TrackKind,
};
