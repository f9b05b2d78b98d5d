use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use quartz_core::{Clock, RenderStatistics};

/// Number of frames averaged over.
pub const STATISTICS_WINDOW: usize = 120;

#[derive(Debug, Clone, Copy)]
struct FrameSample {
    started: Duration,
    cpu_time: Duration,
}

/// Rolling frame timings measured on an injected clock.
pub struct FrameStatisticsCollector {
    clock: Arc<dyn Clock>,
    samples: VecDeque<FrameSample>,
    frame_started: Option<Duration>,
    gpu_time: Option<f64>,
}

impl FrameStatisticsCollector {
    /// Empty collector timed by `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            samples: VecDeque::with_capacity(STATISTICS_WINDOW),
            frame_started: None,
            gpu_time: None,
        }
    }

    /// Start timing a frame.
    pub fn begin_frame(&mut self) {
        self.frame_started = Some(self.clock.now());
    }

    /// Close the frame opened by [`begin_frame`](Self::begin_frame). Ignored if none is open.
    pub fn end_frame(&mut self) {
        let Some(started) = self.frame_started.take() else {
            return;
        };
        let cpu_time = self.clock.now().saturating_sub(started);
        if self.samples.len() == STATISTICS_WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(FrameSample { started, cpu_time });
    }

    /// Drop the open frame without recording a sample.
    pub fn cancel_frame(&mut self) {
        self.frame_started = None;
    }

    /// Latest GPU execution time in seconds, when the backend can measure it.
    pub fn record_gpu_time(&mut self, seconds: f64) {
        self.gpu_time = Some(seconds);
    }

    /// Frames currently in the window.
    pub fn frame_count(&self) -> usize {
        self.samples.len()
    }

    /// Averages over the window. Defaults when no frame was recorded.
    pub fn statistics(&self) -> RenderStatistics {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return RenderStatistics::default();
        };

        let frames = self.samples.len() as f64;
        let total_cpu: Duration = self.samples.iter().map(|sample| sample.cpu_time).sum();
        let average_cpu_time = total_cpu.as_secs_f64() / frames;

        let wall = (last.started + last.cpu_time).saturating_sub(first.started);
        let average_fps = if wall.is_zero() {
            0.0
        } else {
            frames / wall.as_secs_f64()
        };

        let average_theoretical_fps =
            (average_cpu_time > 0.0).then(|| (1.0 / average_cpu_time).round() as u32);

        RenderStatistics {
            average_cpu_time,
            average_gpu_time: self.gpu_time,
            average_fps,
            average_theoretical_fps,
        }
    }
}

impl std::fmt::Debug for FrameStatisticsCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameStatisticsCollector")
            .field("frames", &self.samples.len())
            .field("gpu_time", &self.gpu_time)
            .finish()
    }
}
