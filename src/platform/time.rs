//! Frame timing from host timestamps

use crate::consts::MAX_FRAME_DT;
use crate::sanitize_dt;

/// Frames averaged for the FPS readout
pub const FPS_WINDOW: usize = 60;

/// Turns animation-frame timestamps (milliseconds) into sanitized `dt`
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_time: Option<f64>,
    // FPS tracking
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    samples: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            samples: 0,
            fps: 0,
        }
    }

    /// Record a frame at `now_ms` and return the seconds since the last one.
    ///
    /// The first frame returns 0. So does a timestamp that does not move
    /// forward, which is otherwise ignored. Stalls (hidden tab, debugger)
    /// are capped at `MAX_FRAME_DT`.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp {now_ms}");
            return 0.0;
        }
        let dt = match self.last_time {
            None => 0.0,
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            Some(_) => return 0.0,
        };
        self.last_time = Some(now_ms);
        self.record(now_ms);
        sanitize_dt(dt).min(MAX_FRAME_DT)
    }

    /// Frames per second over the last `FPS_WINDOW` frames, 0 until the window fills
    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Forget all history, e.g. after the tab was hidden
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.samples = (self.samples + 1).min(FPS_WINDOW);

        // Slot after the newest is the oldest once the ring is full
        if self.samples == FPS_WINDOW {
            let elapsed = time - self.frame_times[self.frame_index];
            if elapsed > 0.0 {
                self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(123_456.0), 0.0);
        let dt = clock.frame(123_472.0);
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn test_backwards_timestamp_is_zero() {
        let mut clock = FrameClock::new();
        clock.frame(1000.0);
        clock.frame(1016.0);
        assert_eq!(clock.frame(1010.0), 0.0);
        assert_eq!(clock.frame(1016.0), 0.0);
        // Measured from the last accepted frame
        assert!((clock.frame(1032.0) - 0.016).abs() < 1e-6);
        assert_eq!(clock.frame(f64::NAN), 0.0);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut clock = FrameClock::new();
        clock.frame(0.0);
        assert_eq!(clock.frame(5000.0), 0.1);
    }

    #[test]
    fn test_fps_over_window() {
        let mut clock = FrameClock::new();
        for i in 0..FPS_WINDOW - 1 {
            clock.frame(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(clock.fps(), 0);
        for i in FPS_WINDOW - 1..200 {
            clock.frame(i as f64 * 1000.0 / 60.0);
        }
        assert_eq!(clock.fps(), 60);

        clock.reset();
        assert_eq!(clock.fps(), 0);
        assert_eq!(clock.frame(10_000.0), 0.0);
    }
}
