//! Fixed-duration horizontal transform animation.
//!
//! The animator is a pure function of elapsed time ([`TransformAnimator::tick`])
//! plus a completion predicate. Scheduling belongs to the host: it calls
//! [`TransformAnimator::step`] from its frame callback with the time elapsed
//! since the animation started. Each step positions the surface in its own
//! transaction, and the step that reaches the end reports completion exactly once.

use crate::host::{OriginSurface, SurfaceApi};
use serde::{Deserialize, Serialize};

/// Monotonic interpolation curve with `f(0) = 0` and `f(1) = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolator {
    /// Constant speed.
    Linear,
    /// Cosine ease: slow start and end.
    #[default]
    AccelerateDecelerate,
    /// Fast start, slow end.
    EaseOutCubic,
}

impl Interpolator {
    /// Map normalized time in `[0, 1]` to progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => ((t + 1.0) * std::f32::consts::PI).cos() / 2.0 + 0.5,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Parse a kebab-case curve name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "accelerate-decelerate" => Some(Self::AccelerateDecelerate),
            "ease-out-cubic" => Some(Self::EaseOutCubic),
            _ => None,
        }
    }
}

/// Result of one animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frame {
    /// Offset computed (and applied if the surface was live); more frames follow.
    Running(f32),
    /// Final offset reached. Reported once.
    Completed(f32),
    /// The animation had already completed; nothing was applied.
    Finished,
}

/// One settle run from `start` to `end` over `duration_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformAnimator {
    start: f32,
    end: f32,
    duration_ms: u64,
    interpolator: Interpolator,
    elapsed_ms: u64,
    completed: bool,
}

impl TransformAnimator {
    /// Animate from `start` to `end` over `duration_ms` along `interpolator`.
    pub fn new(start: f32, end: f32, duration_ms: u64, interpolator: Interpolator) -> Self {
        Self {
            start,
            end,
            duration_ms,
            interpolator,
            elapsed_ms: 0,
            completed: false,
        }
    }

    /// Offset at elapsed zero.
    pub fn start(&self) -> f32 {
        self.start
    }

    /// Offset once the duration has elapsed.
    pub fn end(&self) -> f32 {
        self.end
    }

    /// Largest elapsed time seen by [`Self::step`], capped at the duration.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Offset at `elapsed_ms`, clamped to the duration. Pure.
    pub fn tick(&self, elapsed_ms: u64) -> f32 {
        if elapsed_ms >= self.duration_ms {
            return self.end;
        }
        let fraction = elapsed_ms as f32 / self.duration_ms as f32;
        self.start + (self.end - self.start) * self.interpolator.apply(fraction)
    }

    /// True once elapsed time has reached the duration.
    pub fn is_complete(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Advance the clock to `elapsed_ms` and position `surface` accordingly.
    ///
    /// The clock never goes backwards. A surface that is no longer live is
    /// skipped for this frame while the clock still advances.
    pub fn step<S: SurfaceApi + ?Sized>(
        &mut self,
        host: &mut S,
        surface: &OriginSurface,
        elapsed_ms: u64,
    ) -> Frame {
        if self.completed {
            return Frame::Finished;
        }

        self.elapsed_ms = self.elapsed_ms.max(elapsed_ms).min(self.duration_ms);
        let offset = self.tick(self.elapsed_ms);
        surface.move_to(host, offset);

        if self.is_complete() {
            self.completed = true;
            Frame::Completed(offset)
        } else {
            Frame::Running(offset)
        }
    }
}

#[cfg(test)]
#[path = "animator_tests.rs"]
mod tests;
