// Domain rules - Clip acceptance and crop policies

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::model::*;
use crate::error::{ClipError, ClipResult};

/// Default shortest accepted clip
pub const DEFAULT_MIN_CLIP: Duration = Duration::from_secs(30);
/// Default longest accepted clip (2m30s)
pub const DEFAULT_MAX_CLIP: Duration = Duration::from_secs(150);

/// Inclusive duration bounds for a social clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPolicy {
    pub min: Duration,
    pub max: Duration,
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_CLIP,
            max: DEFAULT_MAX_CLIP,
        }
    }
}

impl DurationPolicy {
    /// Create a policy, rejecting inverted bounds
    pub fn new(min: Duration, max: Duration) -> ClipResult<Self> {
        if min > max {
            return Err(ClipError::Config {
                message: format!(
                    "minimum clip length ({:.3}s) exceeds maximum ({:.3}s)",
                    min.as_secs_f64(),
                    max.as_secs_f64()
                ),
            });
        }
        Ok(Self { min, max })
    }
}

/// Why a window was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    TooShort { duration_ms: u64, min_ms: u64 },
    TooLong { duration_ms: u64, max_ms: u64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooShort { duration_ms, min_ms } => write!(
                f,
                "duration {:.3}s is below the {:.3}s minimum, too short to be useful as a social clip",
                *duration_ms as f64 / 1000.0,
                *min_ms as f64 / 1000.0
            ),
            RejectReason::TooLong { duration_ms, max_ms } => write!(
                f,
                "duration {:.3}s exceeds maximum clip length of {:.3}s",
                *duration_ms as f64 / 1000.0,
                *max_ms as f64 / 1000.0
            ),
        }
    }
}

/// Outcome of the duration gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Accept,
    Reject(RejectReason),
}

impl GateDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, GateDecision::Accept)
    }
}

/// Accepts or rejects candidate windows by duration
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentDurationGate {
    policy: DurationPolicy,
}

impl SegmentDurationGate {
    pub fn new(policy: DurationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &DurationPolicy {
        &self.policy
    }

    /// Evaluate a window against the policy; both bounds are inclusive
    pub fn evaluate(&self, window: &ClipWindow) -> GateDecision {
        self.evaluate_duration(window.duration())
    }

    /// Evaluate a bare duration
    pub fn evaluate_duration(&self, duration: Duration) -> GateDecision {
        let duration_ms = duration.as_millis() as u64;
        if duration < self.policy.min {
            GateDecision::Reject(RejectReason::TooShort {
                duration_ms,
                min_ms: self.policy.min.as_millis() as u64,
            })
        } else if duration > self.policy.max {
            GateDecision::Reject(RejectReason::TooLong {
                duration_ms,
                max_ms: self.policy.max.as_millis() as u64,
            })
        } else {
            GateDecision::Accept
        }
    }
}

/// Computes crop rectangles for the requested aspect ratio
pub struct AspectRatioCropPlanner;

impl AspectRatioCropPlanner {
    /// Plan a crop; `None` means the frame is used unchanged.
    ///
    /// Offsets truncate so the rectangle stays on the source pixel grid.
    pub fn plan(
        dimensions: FrameDimensions,
        mode: CropMode,
    ) -> ClipResult<Option<CropRectangle>> {
        let FrameDimensions { width, height } = dimensions;
        if width == 0 || height == 0 {
            return Err(ClipError::InvalidFrameDimensions { width, height });
        }

        match mode {
            CropMode::Original => Ok(None),
            CropMode::Square => {
                let side = width.min(height);
                let (x, y) = if width > height {
                    ((width - side) / 2, 0)
                } else {
                    (0, (height - side) / 2)
                };
                Ok(Some(CropRectangle { x, y, side }))
            }
        }
    }
}
