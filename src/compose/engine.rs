use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    align::{AlignmentOffsets, AlignmentPlan, Planner, TrackKind},
    config::Config,
    error::Result,
    media::{ApplyJob, ClipEditor, MediaProber},
    storage::{ShareLink, StorageClient},
};

/// Outcome of one fuse run
#[derive(Debug, Clone)]
pub struct ComposeReport {
    /// The alignment plan that was applied
    pub plan: AlignmentPlan,

    /// Where the muxed file was written
    pub output: PathBuf,

    /// Shareable link, when a storage client was attached
    pub link: Option<ShareLink>,
}

/// Orchestrates the full fuse pipeline
///
/// The engine owns no media machinery of its own; it wires the pure planner
/// to injected collaborators:
/// 1. Probe - obtain both track durations from the prober
/// 2. Plan - compute the alignment window (pure arithmetic)
/// 3. Apply - trim/loop, silence-pad and mux via the clip editor
/// 4. Publish - hand the result to the storage client, if one is attached
pub struct ComposeEngine<T, S> {
    config: Config,
    tool: T,
    storage: Option<S>,
}

/// Placeholder storage type for engines built without a storage client
pub enum NoStorage {}

impl StorageClient for NoStorage {
    async fn upload(&self, _path: &Path) -> Result<ShareLink> {
        match *self {}
    }
}

impl<T> ComposeEngine<T, NoStorage>
where
    T: MediaProber + ClipEditor,
{
    /// Create an engine that muxes locally and skips the publish step
    pub fn new(config: Config, tool: T) -> Self {
        Self { config, tool, storage: None }
    }
}

impl<T, S> ComposeEngine<T, S>
where
    T: MediaProber + ClipEditor,
    S: StorageClient,
{
    /// Attach a storage client; the publish step runs after every mux
    pub fn with_storage<S2: StorageClient>(self, storage: S2) -> ComposeEngine<T, S2> {
        ComposeEngine {
            config: self.config,
            tool: self.tool,
            storage: Some(storage),
        }
    }

    /// Run the pipeline for one video/audio pair
    pub async fn fuse(
        &self,
        video_path: impl AsRef<Path>,
        audio_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
        offsets: AlignmentOffsets,
    ) -> Result<ComposeReport> {
        let video_path = video_path.as_ref();
        let audio_path = audio_path.as_ref();
        let output_path = output_path.as_ref();

        info!("🎬 Starting clipfuse pipeline");
        info!("   Video: {:?}", video_path);
        info!("   Audio: {:?}", audio_path);
        info!("   Output: {:?}", output_path);
        info!("   Offsets: start={}s end={}s", offsets.start, offsets.end);

        // Step 1: Probe both tracks
        info!("🔍 Step 1: Probing input durations...");
        let video = self.tool.probe(video_path, TrackKind::Video).await?;
        let audio = self.tool.probe(audio_path, TrackKind::Audio).await?;
        info!(
            "   Video {:.2}s, audio {:.2}s",
            video.duration(),
            audio.duration()
        );

        // Step 2: Compute the alignment plan
        info!("📐 Step 2: Computing alignment plan...");
        let planner = self.planner();
        let plan = planner.compute_plan(video.duration(), audio.duration(), offsets)?;
        info!(
            "   Plan: window [{:.2}s, {:.2}s], {} ({:.2}s output)",
            plan.window_start,
            plan.window_end,
            if plan.is_loop() { "loop" } else { "trim" },
            plan.output_duration()
        );

        // Step 3: Apply the plan
        info!("🎛️  Step 3: Applying plan via clip editor...");
        let job = ApplyJob {
            video: video_path,
            audio: audio_path,
            output: output_path,
            plan,
            encoding: &self.config.output,
        };
        self.tool.apply(&job).await?;

        // Step 4: Publish, when a storage client is attached
        let link = match &self.storage {
            Some(storage) => {
                info!("📤 Step 4: Publishing output...");
                let link = storage.upload(output_path).await?;
                info!("   Published: {}", link);
                Some(link)
            }
            None => {
                debug!("No storage client attached, skipping publish step");
                None
            }
        };

        info!("🎉 Fuse complete! Output saved to: {:?}", output_path);
        Ok(ComposeReport {
            plan,
            output: output_path.to_path_buf(),
            link,
        })
    }

    fn planner(&self) -> Planner {
        match self.config.align.max_offset {
            Some(max) => Planner::strict(self.config.align.strategy, max),
            None => Planner::new(self.config.align.strategy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{AlignStrategy, MediaTrack, PlanMode};
    use crate::error::{FuseError, MediaError};
    use std::sync::Mutex;

    /// Fake prober/editor with fixed durations, recording the jobs it gets
    struct FakeTool {
        video_duration: f64,
        audio_duration: f64,
        applied: Mutex<Vec<AlignmentPlan>>,
        fail_probe: bool,
    }

    impl FakeTool {
        fn new(video_duration: f64, audio_duration: f64) -> Self {
            Self {
                video_duration,
                audio_duration,
                applied: Mutex::new(Vec::new()),
                fail_probe: false,
            }
        }
    }

    impl MediaProber for FakeTool {
        async fn probe(&self, path: &Path, kind: TrackKind) -> Result<MediaTrack> {
            if self.fail_probe {
                return Err(MediaError::ProbeFailed {
                    path: path.display().to_string(),
                }
                .into());
            }
            let duration = match kind {
                TrackKind::Video => self.video_duration,
                TrackKind::Audio => self.audio_duration,
            };
            MediaTrack::new(kind, duration)
        }
    }

    impl ClipEditor for FakeTool {
        async fn apply(&self, job: &ApplyJob<'_>) -> Result<()> {
            self.applied.lock().unwrap().push(job.plan);
            std::fs::write(job.output, b"muxed").map_err(FuseError::from)?;
            Ok(())
        }
    }

    struct FakeStorage;

    impl StorageClient for FakeStorage {
        async fn upload(&self, path: &Path) -> Result<ShareLink> {
            Ok(ShareLink::new(format!(
                "https://storage.example/{}",
                path.file_name().unwrap().to_string_lossy()
            )))
        }
    }

    fn loop_config() -> Config {
        let mut config = Config::default();
        config.align.strategy = AlignStrategy::LoopToFit;
        config
    }

    #[tokio::test]
    async fn fuse_loops_short_video_and_publishes() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("combined.mp4");

        let engine = ComposeEngine::new(loop_config(), FakeTool::new(3.0, 5.0))
            .with_storage(FakeStorage);

        // Path arguments are independently generic: mixed types are fine
        let audio = dir.path().join("a.wav");
        let report = engine
            .fuse(
                dir.path().join("v.mp4"),
                audio.as_path(),
                &output,
                AlignmentOffsets::new(1.0, 1.0),
            )
            .await
            .unwrap();

        assert_eq!(report.plan.mode, PlanMode::Loop { target: 7.0 });
        assert_eq!(report.plan.audio_lead_in, 1.0);
        assert_eq!(report.output, output);
        let link = report.link.unwrap();
        assert_eq!(link.url(), "https://storage.example/combined.mp4");
    }

    #[tokio::test]
    async fn fuse_without_storage_skips_publish() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("combined.mp4");

        let tool = FakeTool::new(20.0, 5.0);
        let engine = ComposeEngine::new(loop_config(), tool);

        let report = engine
            .fuse(
                dir.path().join("v.mp4"),
                dir.path().join("a.wav"),
                output,
                AlignmentOffsets::new(1.0, 1.0),
            )
            .await
            .unwrap();

        assert!(report.link.is_none());
        assert_eq!(report.plan.mode, PlanMode::Trim);
        assert_eq!(report.plan.window_end, 7.0);
    }

    #[tokio::test]
    async fn editor_receives_the_computed_plan() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("combined.mp4");

        let mut config = Config::default();
        config.align.strategy = AlignStrategy::TrimWindow;
        let tool = FakeTool::new(10.0, 4.0);
        let engine = ComposeEngine::new(config, tool);

        let report = engine
            .fuse(
                dir.path().join("v.mp4"),
                dir.path().join("a.wav"),
                output,
                AlignmentOffsets::new(1.0, 0.0),
            )
            .await
            .unwrap();

        let applied = engine.tool.applied.lock().unwrap();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0], report.plan);
        assert_eq!(report.plan.window_start, 1.0);
        assert_eq!(report.plan.window_end, 5.0);
    }

    #[tokio::test]
    async fn probe_failure_aborts_the_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("combined.mp4");

        let mut tool = FakeTool::new(10.0, 4.0);
        tool.fail_probe = true;
        let engine = ComposeEngine::new(Config::default(), tool);

        let result = engine
            .fuse(
                dir.path().join("v.mp4"),
                dir.path().join("a.wav"),
                output.clone(),
                AlignmentOffsets::default(),
            )
            .await;

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn strict_offsets_from_config_are_enforced() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.align.max_offset = Some(10.0);
        let engine = ComposeEngine::new(config, FakeTool::new(10.0, 4.0));

        let result = engine
            .fuse(
                dir.path().join("v.mp4"),
                dir.path().join("a.wav"),
                dir.path().join("combined.mp4"),
                AlignmentOffsets::new(11.0, 0.0),
            )
            .await;

        assert!(matches!(
            result,
            Err(FuseError::Align(crate::error::AlignError::InvalidOffset { .. }))
        ));
    }
}
