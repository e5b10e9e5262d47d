//! Adaptive rendering quality.
//!
//! A [`PerformanceTuner`] classifies the device once from [`DeviceSignals`],
//! then watches the frame rate and steps the quality tier down when the
//! terminal can't keep up. Tiers are never raised automatically.

use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::constants::performance as defaults;
use crate::device::DeviceSignals;

/// Named quality level bundling several rendering parameters.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    Medium,
    High,
}

impl Quality {
    /// Particle budget for the header effect at this tier.
    pub fn particle_count(self) -> u32 {
        match self {
            Quality::Low => 1000,
            Quality::Medium => 3000,
            Quality::High => 8000,
        }
    }

    /// Number of glow rules drawn under the header.
    pub fn glow_layers(self) -> u8 {
        match self {
            Quality::Low => 1,
            Quality::Medium => 2,
            Quality::High => 3,
        }
    }

    /// The next tier down, or None at the bottom.
    pub fn downgrade(self) -> Option<Quality> {
        match self {
            Quality::High => Some(Quality::Medium),
            Quality::Medium => Some(Quality::Low),
            Quality::Low => None,
        }
    }

    /// Cycles high -> medium -> low -> high (manual override).
    pub fn cycle(self) -> Quality {
        self.downgrade().unwrap_or(Quality::High)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quality::Low => "low",
            Quality::Medium => "medium",
            Quality::High => "high",
        };
        f.write_str(name)
    }
}

/// Rendering parameters read by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceConfig {
    pub enable_animations: bool,
    pub particle_count: u32,
    pub glow_layers: u8,
    pub use_3d: bool,
    pub quality: Quality,
}

impl PerformanceConfig {
    /// Classifies a device into a tier.
    ///
    /// Low-end: mobile, fewer than 4 cores or less than 4 GB.
    /// High-end: at least 8 cores and 8 GB. Everything else is mid-range.
    pub fn for_device(signals: &DeviceSignals) -> Self {
        let cores = signals.cores_or_default();
        let memory = signals.memory_gb_or_default();
        let low_end = signals.is_mobile() || cores < 4 || memory < 4.0;
        let high_end = cores >= 8 && memory >= 8.0;

        let quality = if low_end {
            Quality::Low
        } else if high_end {
            Quality::High
        } else {
            Quality::Medium
        };

        Self {
            enable_animations: !signals.reduced_motion,
            particle_count: quality.particle_count(),
            glow_layers: quality.glow_layers(),
            use_3d: if low_end { signals.graphics_available } else { true },
            quality,
        }
    }

    fn apply_tier(&mut self, quality: Quality) {
        self.quality = quality;
        self.particle_count = quality.particle_count();
        self.glow_layers = quality.glow_layers();
    }
}

/// Counts frames and converts them to a rate once per sampling window.
///
/// Time is always passed in, so callers control the clock.
#[derive(Debug, Clone)]
pub struct FrameSampler {
    window: Duration,
    frames: u32,
    window_start: Option<Instant>,
}

impl FrameSampler {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            frames: 0,
            window_start: None,
        }
    }

    pub fn start(&mut self, now: Instant) {
        self.frames = 0;
        self.window_start = Some(now);
    }

    pub fn stop(&mut self) {
        self.frames = 0;
        self.window_start = None;
    }

    pub fn is_running(&self) -> bool {
        self.window_start.is_some()
    }

    /// Records one frame. Returns the estimated FPS when a window closes.
    pub fn record_frame(&mut self, now: Instant) -> Option<u32> {
        let start = self.window_start?;
        self.frames += 1;

        let elapsed = now.saturating_duration_since(start);
        if elapsed < self.window {
            return None;
        }

        let fps = (f64::from(self.frames) * 1000.0 / elapsed.as_millis().max(1) as f64).round();
        self.frames = 0;
        self.window_start = Some(now);
        Some(fps as u32)
    }
}

/// A tier step taken by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Downgrade {
    pub from: Quality,
    pub to: Quality,
    pub fps: u32,
}

/// Owns the rendering configuration for the session.
#[derive(Debug, Clone)]
pub struct PerformanceTuner {
    config: PerformanceConfig,
    fps: u32,
    min_fps: u32,
    sampler: FrameSampler,
}

impl PerformanceTuner {
    pub fn new(signals: &DeviceSignals, min_fps: u32, window: Duration) -> Self {
        let config = PerformanceConfig::for_device(signals);
        tracing::info!(
            quality = %config.quality,
            particles = config.particle_count,
            use_3d = config.use_3d,
            "Selected rendering quality"
        );
        Self {
            config,
            fps: 0,
            min_fps,
            sampler: FrameSampler::new(window),
        }
    }

    /// Tuner with the default 30 FPS floor and one-second window.
    pub fn with_defaults(signals: &DeviceSignals) -> Self {
        Self::new(
            signals,
            defaults::MIN_FPS,
            Duration::from_millis(defaults::SAMPLE_WINDOW_MS),
        )
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> PerformanceConfig {
        self.config
    }

    /// Last sampled frame rate (0 before the first window closes).
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Manual override. Resets particles and glow to the tier's defaults.
    pub fn set_quality(&mut self, quality: Quality) {
        tracing::info!(from = %self.config.quality, to = %quality, "Quality set manually");
        self.config.apply_tier(quality);
    }

    pub fn start(&mut self, now: Instant) {
        self.sampler.start(now);
    }

    pub fn stop(&mut self) {
        self.sampler.stop();
    }

    pub fn is_monitoring(&self) -> bool {
        self.sampler.is_running()
    }

    /// Called once per rendered frame.
    pub fn on_frame(&mut self, now: Instant) -> Option<Downgrade> {
        let fps = self.sampler.record_frame(now)?;
        self.fps = fps;

        if fps >= self.min_fps {
            return None;
        }

        let from = self.config.quality;
        let to = from.downgrade()?;
        self.config.apply_tier(to);
        tracing::warn!(fps, from = %from, to = %to, "Frame rate low, lowering quality");
        Some(Downgrade { from, to, fps })
    }
}
