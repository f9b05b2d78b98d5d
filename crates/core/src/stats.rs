//! Render statistics shared between the renderer and the debug overlay.

use serde::{Deserialize, Serialize};

/// Averaged frame timings. Times are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RenderStatistics {
    /// Average CPU time spent producing a frame.
    pub average_cpu_time: f64,
    /// Average GPU execution time, when GPU counters are available.
    pub average_gpu_time: Option<f64>,
    /// Average frames per second actually achieved.
    pub average_fps: f64,
    /// Frames per second the CPU side could sustain if nothing else limited it.
    pub average_theoretical_fps: Option<u32>,
}

impl RenderStatistics {
    /// Average CPU time in milliseconds.
    pub fn average_cpu_ms(&self) -> f64 {
        self.average_cpu_time * 1000.0
    }

    /// Average GPU time in milliseconds.
    pub fn average_gpu_ms(&self) -> Option<f64> {
        self.average_gpu_time.map(|time| time * 1000.0)
    }
}
