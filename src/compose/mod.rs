//! Pipeline orchestration: probe, plan, apply, publish.

pub mod engine;

pub use engine::{ComposeEngine, ComposeReport};
