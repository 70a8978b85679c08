use std::path::Path;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::{
    align::{MediaTrack, PlanMode, TrackKind},
    error::{MediaError, Result},
};

use super::{ApplyJob, ClipEditor, MediaProber};

/// Probe/edit collaborator backed by the `ffprobe` and `ffmpeg` binaries
///
/// All decode, transcode and mux work happens inside the external processes;
/// this type only marshals arguments and interprets exit status.
pub struct FfmpegTool;

impl FfmpegTool {
    /// Create the tool, verifying that ffmpeg is present on PATH
    pub async fn new() -> Result<Self> {
        let output = Command::new("ffmpeg")
            .arg("-version")
            .output()
            .await
            .map_err(|_| MediaError::ToolUnavailable { tool: "ffmpeg".to_string() })?;

        if !output.status.success() {
            return Err(MediaError::ToolUnavailable { tool: "ffmpeg".to_string() }.into());
        }

        info!("Initialized external ffmpeg tooling");
        Ok(Self)
    }
}

impl MediaProber for FfmpegTool {
    async fn probe(&self, path: &Path, kind: TrackKind) -> Result<MediaTrack> {
        let path_str = path.display().to_string();
        let output = Command::new("ffprobe")
            .args([
                "-v", "error",
                "-show_entries", "format=duration",
                "-of", "default=noprint_wrappers=1:nokey=1",
                &path_str,
            ])
            .output()
            .await
            .map_err(|_| MediaError::ToolUnavailable { tool: "ffprobe".to_string() })?;

        if !output.status.success() {
            warn!("ffprobe failed for {}", path_str);
            return Err(MediaError::ProbeFailed { path: path_str }.into());
        }

        let raw = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let duration = parse_duration(&raw).ok_or_else(|| MediaError::BadDuration {
            path: path_str.clone(),
            raw: raw.clone(),
        })?;

        debug!("Probed {} {}: {:.3}s", kind.as_str(), path_str, duration);
        MediaTrack::new(kind, duration)
    }
}

impl ClipEditor for FfmpegTool {
    async fn apply(&self, job: &ApplyJob<'_>) -> Result<()> {
        let args = build_mux_args(job);
        debug!("ffmpeg {}", args.join(" "));

        let output = Command::new("ffmpeg")
            .args(&args)
            .output()
            .await
            .map_err(|_| MediaError::ToolUnavailable { tool: "ffmpeg".to_string() })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(MediaError::MuxFailed {
                output: job.output.display().to_string(),
                reason: stderr.lines().last().unwrap_or("unknown").to_string(),
            }
            .into());
        }

        info!("Muxed output written to {}", job.output.display());
        Ok(())
    }
}

fn parse_duration(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|d| d.is_finite())
}

/// Build the ffmpeg argument list realizing one alignment plan
///
/// Trim plans seek the video input only (`-ss` before its `-i`), so the
/// audio stream keeps its head and is muxed unmodified at the window start;
/// loop plans cycle the input (`-stream_loop -1`). Both cap the output with
/// `-t` at the plan's output duration, which truncates the tail without
/// touching either stream's start. A non-zero audio lead-in becomes an
/// `adelay` filter so the audible content starts that many seconds in.
fn build_mux_args(job: &ApplyJob<'_>) -> Vec<String> {
    let plan = &job.plan;
    let mut args: Vec<String> = vec!["-hide_banner".into(), "-loglevel".into(), "error".into()];

    if job.encoding.overwrite {
        args.push("-y".into());
    }

    match plan.mode {
        PlanMode::Trim => {
            if plan.window_start > 0.0 {
                args.extend(["-ss".into(), format!("{:.3}", plan.window_start)]);
            }
            args.extend(["-i".into(), job.video.display().to_string()]);
        }
        PlanMode::Loop { .. } => {
            args.extend([
                "-stream_loop".into(),
                "-1".into(),
                "-i".into(),
                job.video.display().to_string(),
            ]);
        }
    }
    args.extend(["-i".into(), job.audio.display().to_string()]);

    if plan.audio_lead_in > 0.0 {
        let delay_ms = (plan.audio_lead_in * 1000.0).round() as u64;
        args.extend(["-af".into(), format!("adelay={}:all=1", delay_ms)]);
    }

    args.extend(["-t".into(), format!("{:.3}", plan.output_duration())]);

    args.extend([
        "-map".into(), "0:v:0".into(),
        "-map".into(), "1:a:0".into(),
        "-c:v".into(), job.encoding.video_codec.clone(),
        "-c:a".into(), job.encoding.audio_codec.clone(),
        job.output.display().to_string(),
    ]);

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::AlignmentPlan;
    use crate::config::OutputConfig;
    use std::path::PathBuf;

    fn job<'a>(
        plan: AlignmentPlan,
        video: &'a Path,
        audio: &'a Path,
        output: &'a Path,
        encoding: &'a OutputConfig,
    ) -> ApplyJob<'a> {
        ApplyJob { video, audio, output, plan, encoding }
    }

    #[test]
    fn parses_probe_output() {
        assert_eq!(parse_duration("12.345"), Some(12.345));
        assert_eq!(parse_duration("N/A"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("nan"), None);
    }

    #[test]
    fn trim_plan_args_use_window_bounds() {
        let video = PathBuf::from("in.mp4");
        let audio = PathBuf::from("in.wav");
        let output = PathBuf::from("out.mp4");
        let encoding = OutputConfig::default();
        let plan = AlignmentPlan {
            window_start: 1.0,
            window_end: 5.0,
            mode: PlanMode::Trim,
            audio_lead_in: 0.0,
        };

        let args = build_mux_args(&job(plan, &video, &audio, &output, &encoding));
        let joined = args.join(" ");
        assert!(joined.contains("-ss 1.000"));
        assert!(joined.contains("-t 4.000"));
        assert!(!joined.contains("-stream_loop"));
        assert!(!joined.contains("adelay"));
        assert!(joined.contains("-c:v libx264"));
        assert!(joined.contains("-c:a aac"));
        assert!(joined.ends_with("out.mp4"));
    }

    #[test]
    fn trim_seek_applies_to_video_input_only() {
        // The seek must be an input option on the video: placed after the
        // inputs it would drop the audio's head along with the video's.
        let video = PathBuf::from("in.mp4");
        let audio = PathBuf::from("in.wav");
        let output = PathBuf::from("out.mp4");
        let encoding = OutputConfig::default();
        let plan = AlignmentPlan {
            window_start: 1.0,
            window_end: 5.0,
            mode: PlanMode::Trim,
            audio_lead_in: 0.0,
        };

        let args = build_mux_args(&job(plan, &video, &audio, &output, &encoding));
        let pos = |needle: &str| args.iter().position(|a| a == needle).unwrap();

        let seek = pos("-ss");
        let video_input = args.iter().position(|a| a == "in.mp4").unwrap();
        let audio_input = args.iter().position(|a| a == "in.wav").unwrap();

        assert!(seek < video_input, "seek must precede the video -i: {:?}", args);
        assert!(video_input < audio_input);
        // Nothing seek-related between the video input and the audio input
        assert!(!args[video_input..audio_input].contains(&"-ss".to_string()));
        // The output cap comes after both inputs
        assert!(pos("-t") > audio_input);
    }

    #[test]
    fn loop_plan_args_cycle_and_cap() {
        let video = PathBuf::from("in.mp4");
        let audio = PathBuf::from("in.wav");
        let output = PathBuf::from("out.mp4");
        let encoding = OutputConfig::default();
        let plan = AlignmentPlan {
            window_start: 0.0,
            window_end: 7.0,
            mode: PlanMode::Loop { target: 7.0 },
            audio_lead_in: 1.0,
        };

        let args = build_mux_args(&job(plan, &video, &audio, &output, &encoding));
        let joined = args.join(" ");
        assert!(joined.contains("-stream_loop -1"));
        assert!(joined.contains("-t 7.000"));
        assert!(joined.contains("adelay=1000:all=1"));
        assert!(!joined.contains("-ss"));
    }

    #[test]
    fn overwrite_flag_follows_config() {
        let video = PathBuf::from("in.mp4");
        let audio = PathBuf::from("in.wav");
        let output = PathBuf::from("out.mp4");
        let mut encoding = OutputConfig::default();
        encoding.overwrite = false;
        let plan = AlignmentPlan {
            window_start: 0.0,
            window_end: 4.0,
            mode: PlanMode::Trim,
            audio_lead_in: 0.0,
        };

        let args = build_mux_args(&job(plan, &video, &audio, &output, &encoding));
        assert!(!args.contains(&"-y".to_string()));
    }
}
