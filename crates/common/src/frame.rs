use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Frame rate summary shown in the window title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub fps: f32,
    pub ms_per_frame: f32,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fps: {:.0}   mspf: {:.3}", self.fps, self.ms_per_frame)
    }
}

/// Rolling window of recent frame durations.
///
/// Keeps the last `capacity` samples and reports a [`FrameStats`] summary
/// every `report_every` of recorded time.
#[derive(Debug)]
pub struct FrameTimer {
    samples: VecDeque<Duration>,
    capacity: usize,
    report_every: Duration,
    since_report: Duration,
}

impl FrameTimer {
    /// Timer reporting twice per second.
    pub fn new(capacity: usize) -> Self {
        Self::with_report_interval(capacity, Duration::from_millis(500))
    }

    pub fn with_report_interval(capacity: usize, report_every: Duration) -> Self {
        assert!(capacity > 0, "frame timer capacity must be non-zero");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
            report_every,
            since_report: Duration::ZERO,
        }
    }

    /// Record one frame. Returns a summary when a report interval elapsed.
    pub fn record(&mut self, dt: Duration) -> Option<FrameStats> {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(dt);

        self.since_report += dt;
        if self.since_report < self.report_every {
            return None;
        }
        self.since_report = Duration::ZERO;

        let stats = self.stats();
        tracing::trace!(fps = stats.fps, mspf = stats.ms_per_frame, "frame stats");
        Some(stats)
    }

    pub fn count(&self) -> usize {
        self.samples.len()
    }

    pub fn average(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn min(&self) -> Duration {
        self.samples.iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn max(&self) -> Duration {
        self.samples.iter().copied().max().unwrap_or(Duration::ZERO)
    }

    /// Frames per second over the retained samples; 0 when nothing was timed.
    pub fn fps(&self) -> f32 {
        let avg = self.average().as_secs_f32();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }

    pub fn stats(&self) -> FrameStats {
        FrameStats {
            fps: self.fps(),
            ms_per_frame: self.average().as_secs_f32() * 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_min_max() {
        let mut timer = FrameTimer::new(3);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        timer.record(Duration::from_millis(30));

        assert_eq!(timer.count(), 3);
        assert_eq!(timer.average(), Duration::from_millis(20));
        assert_eq!(timer.min(), Duration::from_millis(10));
        assert_eq!(timer.max(), Duration::from_millis(30));
    }

    #[test]
    fn oldest_sample_is_dropped() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        timer.record(Duration::from_millis(30));

        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), Duration::from_millis(25));
        assert_eq!(timer.min(), Duration::from_millis(20));
    }

    #[test]
    fn empty_timer() {
        let timer = FrameTimer::new(4);
        assert_eq!(timer.count(), 0);
        assert_eq!(timer.average(), Duration::ZERO);
        assert_eq!(timer.fps(), 0.0);
    }

    #[test]
    fn fps_from_average() {
        let mut timer = FrameTimer::new(8);
        for _ in 0..8 {
            timer.record(Duration::from_millis(20));
        }
        assert!((timer.fps() - 50.0).abs() < 1e-3);
        assert!((timer.stats().ms_per_frame - 20.0).abs() < 1e-3);
    }

    #[test]
    fn reports_once_per_interval() {
        let mut timer = FrameTimer::with_report_interval(16, Duration::from_millis(100));
        let reports: Vec<_> = (0..10)
            .filter_map(|_| timer.record(Duration::from_millis(25)))
            .collect();

        // 250ms of frames at a 100ms interval.
        assert_eq!(reports.len(), 2);
        assert!((reports[0].fps - 40.0).abs() < 1e-3);
    }

    #[test]
    fn stats_display() {
        let stats = FrameStats {
            fps: 59.6,
            ms_per_frame: 16.6667,
        };
        assert_eq!(stats.to_string(), "fps: 60   mspf: 16.667");
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn zero_capacity_panics() {
        let _ = FrameTimer::new(0);
    }
}
