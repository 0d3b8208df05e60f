//! Command-line tests for the clipsub binary
//!
//! None of these need ffmpeg: they cover argument handling, configuration
//! layering, the dry-run inspection, readiness waits and batch reporting of
//! tool failures.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SEVENTY_SECONDS: &str =
    "1\n00:00:10,000 --> 00:00:40,000\nHello\n\n2\n00:00:50,000 --> 00:01:20,000\nWorld\n";

fn clipsub(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("clipsub").unwrap();
    cmd.current_dir(dir);
    for var in [
        "CLIPSUB_MIN_SECS",
        "CLIPSUB_MAX_SECS",
        "CLIPSUB_CROP",
        "CLIPSUB_FFMPEG_BIN",
        "CLIPSUB_FFPROBE_BIN",
        "CLIPSUB_CONTAINER",
        "CLIPSUB_POLL_INTERVAL_MS",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_commands() {
    let temp = TempDir::new().unwrap();
    clipsub(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("clip"))
        .stdout(predicate::str::contains("burn-all"))
        .stdout(predicate::str::contains("wait"));
}

#[test]
fn test_wait_times_out_with_exit_code_two() {
    let temp = TempDir::new().unwrap();
    clipsub(temp.path())
        .args(["wait", "--path", "never.srt", "--timeout-secs", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timed out"));
}

#[test]
fn test_wait_ready_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("ready.srt"), SEVENTY_SECONDS).unwrap();
    clipsub(temp.path())
        .args(["wait", "--path", "ready.srt", "--timeout-secs", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ready"));
}

#[test]
fn test_inspect_json_accepts_seventy_seconds() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.srt"), SEVENTY_SECONDS).unwrap();
    clipsub(temp.path())
        .args(["inspect", "--subtitles", "a.srt", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"accepted\": true"))
        .stdout(predicate::str::contains("\"duration_ms\": 70000"));
}

#[test]
fn test_inspect_respects_cli_bounds() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.srt"), SEVENTY_SECONDS).unwrap();
    clipsub(temp.path())
        .args(["inspect", "--subtitles", "a.srt", "--max-secs", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exceeds maximum clip length"));
}

#[test]
fn test_config_file_in_working_directory_is_used() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.srt"), SEVENTY_SECONDS).unwrap();
    fs::write(
        temp.path().join("clipsub.toml"),
        "[duration]\nmin_secs = 90.0\nmax_secs = 120.0\n",
    )
    .unwrap();
    clipsub(temp.path())
        .args(["inspect", "--subtitles", "a.srt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("too short to be useful as a social clip"));
}

#[test]
fn test_invalid_config_file_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.toml"), "[duration\n").unwrap();
    clipsub(temp.path())
        .args(["--config", "broken.toml", "wait", "--path", "x", "--timeout-secs", "0"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_invalid_crop_mode_fails() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.srt"), SEVENTY_SECONDS).unwrap();
    clipsub(temp.path())
        .args([
            "clip",
            "--video",
            "v.mp4",
            "--subtitles",
            "a.srt",
            "--output-dir",
            "clips",
            "--crop",
            "wide",
        ])
        .assert()
        .failure();
}

#[test]
fn test_run_reports_missing_tool_and_completes() {
    let temp = TempDir::new().unwrap();
    let videos = temp.path().join("videos");
    let subs = temp.path().join("subs");
    fs::create_dir_all(&videos).unwrap();
    fs::create_dir_all(&subs).unwrap();
    fs::write(videos.join("talk.mp4"), b"not really a video").unwrap();
    fs::write(subs.join("hook.srt"), SEVENTY_SECONDS).unwrap();

    clipsub(temp.path())
        .env("CLIPSUB_FFPROBE_BIN", "definitely-not-ffprobe")
        .args([
            "run",
            "--videos-dir",
            "videos",
            "--subtitles-dir",
            "subs",
            "--clips-dir",
            "clips",
            "--output-dir",
            "final",
            "--json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"tool_not_found\""))
        .stdout(predicate::str::contains("\"produced\": []"));
}

#[test]
fn test_burn_all_skips_unpaired_clips() {
    let temp = TempDir::new().unwrap();
    let clips = temp.path().join("clips");
    let subs = temp.path().join("subs");
    fs::create_dir_all(&clips).unwrap();
    fs::create_dir_all(&subs).unwrap();
    fs::write(clips.join("lonely_trimmed.mp4"), b"clip").unwrap();

    clipsub(temp.path())
        .args([
            "burn-all",
            "--clips-dir",
            "clips",
            "--subtitles-dir",
            "subs",
            "--output-dir",
            "final",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("subtitle file not found"))
        .stdout(predicate::str::contains("0 produced, 1 skipped"));
}
