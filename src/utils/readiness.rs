//! Bounded wait for files produced by other processes

use std::fs::OpenOptions;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Outcome of a readiness wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    TimedOut,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Polls a path until it exists and can be opened for appending
#[derive(Debug, Clone)]
pub struct FileReadinessCoordinator {
    poll_interval: Duration,
}

impl Default for FileReadinessCoordinator {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FileReadinessCoordinator {
    /// A zero interval is bumped to one millisecond
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Wait until `path` is ready or `timeout` elapses.
    ///
    /// The file is checked at least once, and the last sleep is shortened to
    /// the remaining time so the call never outlives the deadline by more
    /// than one interval.
    pub async fn await_ready(&self, path: &Path, timeout: Duration) -> Readiness {
        let deadline = Instant::now() + timeout;
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            if Self::is_ready(path) {
                debug!(path = %path.display(), attempts, "File ready");
                return Readiness::Ready;
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(
                    path = %path.display(),
                    timeout_ms = timeout.as_millis() as u64,
                    attempts,
                    "File not ready before timeout"
                );
                return Readiness::TimedOut;
            }

            sleep(self.poll_interval.min(deadline - now)).await;
        }
    }

    /// Opening for append fails while another process holds the file
    /// exclusively, and never truncates it
    fn is_ready(path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }
        match OpenOptions::new().append(true).open(path) {
            Ok(_) => true,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "File not ready");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant as StdInstant;

    #[tokio::test]
    async fn test_existing_file_is_ready_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip_trimmed.mp4");
        std::fs::write(&path, b"data").unwrap();

        let coordinator = FileReadinessCoordinator::new(Duration::from_secs(5));
        let started = StdInstant::now();
        let readiness = coordinator.await_ready(&path, Duration::from_secs(30)).await;

        assert_eq!(readiness, Readiness::Ready);
        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(std::fs::read(&path).unwrap(), b"data");
    }

    #[tokio::test]
    async fn test_missing_file_times_out_within_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.mp4");

        let interval = Duration::from_millis(20);
        let timeout = Duration::from_millis(100);
        let coordinator = FileReadinessCoordinator::new(interval);
        let started = StdInstant::now();
        let readiness = coordinator.await_ready(&path, timeout).await;

        assert_eq!(readiness, Readiness::TimedOut);
        assert!(started.elapsed() >= timeout);
        assert!(started.elapsed() < timeout + interval + Duration::from_millis(500));
    }

    #[tokio::test]
    async fn test_file_appearing_later_is_ready() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.srt");
        let writer_path = path.clone();

        tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            std::fs::write(writer_path, b"1\n").unwrap();
        });

        let coordinator = FileReadinessCoordinator::new(Duration::from_millis(10));
        let readiness = coordinator.await_ready(&path, Duration::from_secs(5)).await;
        assert!(readiness.is_ready());
    }

    #[tokio::test]
    async fn test_directory_is_not_ready() {
        let dir = tempfile::tempdir().unwrap();
        let coordinator = FileReadinessCoordinator::new(Duration::from_millis(5));
        let readiness = coordinator.await_ready(dir.path(), Duration::from_millis(20)).await;
        assert_eq!(readiness, Readiness::TimedOut);
    }

    #[tokio::test]
    async fn test_zero_timeout_checks_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("now.srt");
        std::fs::write(&path, b"").unwrap();

        let coordinator = FileReadinessCoordinator::default();
        assert_eq!(coordinator.await_ready(&path, Duration::ZERO).await, Readiness::Ready);
    }
}
