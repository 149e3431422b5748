use std::{collections::VecDeque, sync::Arc};

use gestures::{
    clock::Clock,
    protocol::{PerformanceStats, PerformanceStatus},
};
use tracing::debug;

const TARGET_FPS: f64 = 30.0;
const MIN_FPS_THRESHOLD: f64 = 25.0;
const MAX_FPS_THRESHOLD: f64 = 35.0;
const FPS_MEASUREMENT_INTERVAL_MS: u64 = 1000;
const ADAPTIVE_FRAME_SKIP_THRESHOLD: f64 = 28.0;
const MAX_HISTORY: usize = 10;

/// Measures achieved processing throughput and derives a frame-skip
/// interval from it. Owned by the intake stage; never shared.
pub struct FrameGovernor {
    clock: Arc<dyn Clock>,
    frame_count: u32,
    last_measurement: u64,
    fps_history: VecDeque<f64>,
    current_fps: f64,
    average_fps: f64,
    status: PerformanceStatus,
    skip_counter: u32,
    skip_interval: u32,
    adaptive_enabled: bool,
    total_processed: u64,
    total_skipped: u64,
    started_at: u64,
}

impl FrameGovernor {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now_millis();
        Self {
            clock,
            frame_count: 0,
            last_measurement: now,
            fps_history: VecDeque::with_capacity(MAX_HISTORY),
            current_fps: 0.0,
            average_fps: 0.0,
            status: PerformanceStatus::Optimal,
            skip_counter: 0,
            skip_interval: 1,
            adaptive_enabled: true,
            total_processed: 0,
            total_skipped: 0,
            started_at: now,
        }
    }

    /// Account for a frame that made it through the gate. Once a full
    /// measurement window has elapsed the fps metrics are refreshed.
    pub fn on_frame_processed(&mut self) {
        let now = self.clock.now_millis();
        self.frame_count += 1;
        self.total_processed += 1;

        let elapsed = now.saturating_sub(self.last_measurement);
        if elapsed >= FPS_MEASUREMENT_INTERVAL_MS {
            let fps = (self.frame_count as f64 * 1000.0) / elapsed as f64;
            self.update_fps_metrics(fps);
            self.frame_count = 0;
            self.last_measurement = now;
        }
    }

    pub fn on_frame_skipped(&mut self) {
        self.total_skipped += 1;
    }

    /// Gate decision for the next frame. Pass-through when adaptive mode is
    /// off, during cold start (no measurement yet), or when throughput is at
    /// or above the adaptive threshold.
    pub fn should_process_frame(&mut self) -> bool {
        if !self.adaptive_enabled {
            return true;
        }

        self.skip_counter = self.skip_counter.wrapping_add(1);

        if self.current_fps < ADAPTIVE_FRAME_SKIP_THRESHOLD && self.current_fps > 0.0 {
            return self.skip_counter % self.skip_interval == 0;
        }

        true
    }

    fn update_fps_metrics(&mut self, fps: f64) {
        self.current_fps = fps;

        self.fps_history.push_back(fps);
        if self.fps_history.len() > MAX_HISTORY {
            self.fps_history.pop_front();
        }
        self.average_fps = self.fps_history.iter().sum::<f64>() / self.fps_history.len() as f64;

        self.status = if fps >= MAX_FPS_THRESHOLD {
            PerformanceStatus::Optimal
        } else if fps >= TARGET_FPS {
            PerformanceStatus::Good
        } else if fps >= MIN_FPS_THRESHOLD {
            PerformanceStatus::Acceptable
        } else {
            PerformanceStatus::Poor
        };

        self.adjust_skip_interval(fps);

        debug!(
            fps,
            average = self.average_fps,
            status = ?self.status,
            skip_interval = self.skip_interval,
            "fps window measured"
        );
    }

    fn adjust_skip_interval(&mut self, fps: f64) {
        if fps < 20.0 {
            self.skip_interval = 3;
        } else if fps < 25.0 {
            self.skip_interval = 2;
        } else if fps < ADAPTIVE_FRAME_SKIP_THRESHOLD {
            self.skip_interval = 2;
        } else if fps >= TARGET_FPS {
            self.skip_interval = 1;
        }
        // 28..30 fps keeps the previous interval
    }

    pub fn set_adaptive_enabled(&mut self, enabled: bool) {
        self.adaptive_enabled = enabled;
        if !enabled {
            self.skip_interval = 1;
        }
    }

    pub fn stats(&self) -> PerformanceStats {
        let now = self.clock.now_millis();
        let skip_rate_percent = if self.total_processed > 0 {
            (self.total_skipped as f64 / self.total_processed as f64) * 100.0
        } else {
            0.0
        };

        PerformanceStats {
            current_fps: self.current_fps,
            average_fps: self.average_fps,
            status: self.status,
            frame_skip_interval: self.skip_interval,
            total_frames_processed: self.total_processed,
            total_frames_skipped: self.total_skipped,
            skip_rate_percent,
            uptime_seconds: now.saturating_sub(self.started_at) as f64 / 1000.0,
        }
    }

    pub fn reset(&mut self) {
        let now = self.clock.now_millis();
        self.frame_count = 0;
        self.last_measurement = now;
        self.fps_history.clear();
        self.current_fps = 0.0;
        self.average_fps = 0.0;
        self.status = PerformanceStatus::Optimal;
        self.skip_counter = 0;
        self.skip_interval = 1;
        self.total_processed = 0;
        self.total_skipped = 0;
        self.started_at = now;
    }
}

#[cfg(test)]
#[path = "tests/governor_tests.rs"]
mod tests;
