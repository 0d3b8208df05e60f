//! FFmpeg execution adapter
//!
//! Builds ffmpeg argument lists for the trim and burn steps and runs them as
//! child processes. A non-zero exit is reported with ffmpeg's stderr.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::adapters::toml_config::EncoderSettings;
use crate::error::{ClipError, ClipResult};
use crate::ports::{BurnJob, ExecutePort, TrimJob};

/// Builder for FFmpeg commands
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    input: PathBuf,
    output: PathBuf,
    /// Arguments placed before -i
    input_args: Vec<String>,
    /// Arguments placed after -i
    output_args: Vec<String>,
    log_level: String,
}

impl FfmpegCommand {
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            log_level: "error".to_string(),
        }
    }

    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Input seek, millisecond precision
    pub fn seek(self, offset: Duration) -> Self {
        self.input_arg("-ss").input_arg(format_seconds(offset))
    }

    /// Limit how much of the input is read
    pub fn duration(self, length: Duration) -> Self {
        self.input_arg("-t").input_arg(format_seconds(length))
    }

    pub fn video_filter(self, filter: impl Into<String>) -> Self {
        self.output_arg("-vf").output_arg(filter)
    }

    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:a").output_arg(codec)
    }

    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.output_arg("-b:a").output_arg(bitrate)
    }

    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments; output is always overwritten
    pub fn build_args(&self) -> Vec<String> {
        let mut args = vec!["-y".to_string(), "-v".to_string(), self.log_level.clone()];
        args.extend(self.input_args.iter().cloned());
        args.push("-i".to_string());
        args.push(self.input.to_string_lossy().to_string());
        args.extend(self.output_args.iter().cloned());
        args.push(self.output.to_string_lossy().to_string());
        args
    }
}

fn format_seconds(value: Duration) -> String {
    format!("{}.{:03}", value.as_secs(), value.subsec_millis())
}

/// Escape a path for use as an unquoted filter option value.
///
/// ffmpeg unescapes the value twice: once when splitting the filtergraph and
/// once when splitting the filter's `key=value` options.
pub fn escape_filter_path(path: &Path) -> String {
    let value = path.to_string_lossy().replace('\\', "/");
    escape_chars(&escape_chars(&value, &['\\', '\'', ':']), &['\\', '\'', '[', ']', ',', ';'])
}

fn escape_chars(value: &str, special: &[char]) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if special.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// FFmpeg-based execution adapter
pub struct FfmpegAdapter {
    settings: EncoderSettings,
}

impl FfmpegAdapter {
    pub fn new(settings: EncoderSettings) -> Self {
        Self { settings }
    }

    /// Command for the trim/crop/re-encode step
    pub fn trim_command(&self, job: &TrimJob) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new(&job.input, &job.output)
            .log_level(&self.settings.log_level)
            .seek(job.start.as_duration())
            .duration(job.duration);

        if let Some(crop) = &job.crop {
            cmd = cmd.video_filter(crop.to_filter());
        }

        cmd.video_codec(&self.settings.video_codec)
            .audio_codec(&self.settings.audio_codec)
            .audio_bitrate(&self.settings.audio_bitrate)
            .output_arg("-vsync")
            .output_arg("vfr")
    }

    /// Command for the subtitle overlay step
    pub fn burn_command(&self, job: &BurnJob) -> FfmpegCommand {
        FfmpegCommand::new(&job.video, &job.output)
            .log_level(&self.settings.log_level)
            .video_filter(format!(
                "subtitles=filename={}:charenc=UTF-8",
                escape_filter_path(&job.subtitles)
            ))
            .audio_codec("copy")
    }

    /// Run ffmpeg; a failed run is reported through `failure` with ffmpeg's stderr
    async fn run(&self, cmd: &FfmpegCommand, failure: fn(String) -> ClipError) -> ClipResult<()> {
        which::which(&self.settings.ffmpeg_bin).map_err(|_| ClipError::ToolNotFound {
            tool: self.settings.ffmpeg_bin.clone(),
        })?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: {} {}", self.settings.ffmpeg_bin, args.join(" "));

        let started = Instant::now();
        let output = Command::new(&self.settings.ffmpeg_bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| failure(format!("failed to spawn ffmpeg: {}", e)))?;

        if !output.status.success() {
            return Err(failure(format!(
                "ffmpeg exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "FFmpeg finished");
        Ok(())
    }
}

#[async_trait]
impl ExecutePort for FfmpegAdapter {
    async fn execute_trim(&self, job: &TrimJob) -> ClipResult<()> {
        let cmd = self.trim_command(job);
        self.run(&cmd, |message| ClipError::TranscoderFailure { message }).await?;
        info!(output = %job.output.display(), "Trimmed video saved");
        Ok(())
    }

    async fn execute_burn(&self, job: &BurnJob) -> ClipResult<()> {
        let cmd = self.burn_command(job);
        self.run(&cmd, |message| ClipError::RenderFailure { message }).await?;
        info!(output = %job.output.display(), "Subtitles burned into video");
        Ok(())
    }
}
