// Wall-clock access and the fixed-rate frame ticker driving the map redraw.
use chrono::{Datelike, Duration, Local, NaiveDateTime, Timelike, Weekday};
use std::cell::Cell;

use crate::model::TimeContext;

pub trait Clock {
    /// Local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    fn now_ms(&self) -> i64 {
        self.now().and_utc().timestamp_millis()
    }

    fn time_context(&self) -> TimeContext {
        TimeContext::from_datetime(&self.now())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + Duration::milliseconds(ms));
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.now.set(at);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

impl TimeContext {
    pub fn from_datetime(at: &NaiveDateTime) -> Self {
        Self {
            hour: at.hour() as u8,
            is_weekend: matches!(at.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    pub index: u64,
    /// Wall-clock seconds, used for time-based animation (pulse halo).
    pub time_secs: f64,
    pub hour: u8,
}

impl FrameTick {
    /// Off-schedule tick, for repaints triggered by input rather than the loop.
    pub fn at(clock: &dyn Clock, index: u64) -> Self {
        let now = clock.now();
        Self {
            index,
            time_secs: now.and_utc().timestamp_millis() as f64 / 1000.0,
            hour: now.hour() as u8,
        }
    }
}

/// Rate limiter between the browser's animation callback and the renderer.
/// Callbacks arriving sooner than `interval_ms` after the last accepted tick are dropped.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval_ms: i64,
    last_ms: Option<i64>,
    index: u64,
}

impl FrameTicker {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms: interval_ms as i64,
            last_ms: None,
            index: 0,
        }
    }

    pub fn poll(&mut self, clock: &dyn Clock) -> Option<FrameTick> {
        let tick = FrameTick::at(clock, self.index);
        let now_ms = (tick.time_secs * 1000.0).round() as i64;
        if let Some(last) = self.last_ms {
            // a clock that stepped backwards re-baselines instead of stalling
            let elapsed = now_ms - last;
            if (0..self.interval_ms).contains(&elapsed) {
                return None;
            }
            if elapsed < 0 {
                tracing::debug!(elapsed, "frame clock stepped back");
            }
        }
        self.last_ms = Some(now_ms);
        self.index += 1;
        Some(tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        // 2024-06-03 is a Monday
        NaiveDate::from_ymd_opt(2024, 6, day)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .expect("valid test date")
    }

    #[test]
    fn time_context_reads_hour_and_weekend() {
        let clock = ManualClock::new(at(3, 8, 15));
        assert_eq!(clock.time_context(), TimeContext { hour: 8, is_weekend: false });
        clock.set(at(8, 17, 0));
        assert_eq!(clock.time_context(), TimeContext { hour: 17, is_weekend: true });
        clock.set(at(9, 0, 0));
        assert!(clock.time_context().is_weekend);
    }

    #[test]
    fn ticker_drops_callbacks_inside_interval() {
        let clock = ManualClock::new(at(3, 12, 0));
        let mut ticker = FrameTicker::new(16);
        let first = ticker.poll(&clock).expect("first poll always ticks");
        assert_eq!(first.index, 0);
        clock.advance_ms(5);
        assert!(ticker.poll(&clock).is_none());
        clock.advance_ms(11);
        let second = ticker.poll(&clock).expect("interval elapsed");
        assert_eq!(second.index, 1);
        assert!((second.time_secs - first.time_secs - 0.016).abs() < 1e-6);
    }

    #[test]
    fn ticker_keeps_running_after_clock_steps_back() {
        let clock = ManualClock::new(at(3, 2, 30));
        let mut ticker = FrameTicker::new(16);
        assert!(ticker.poll(&clock).is_some());
        // fall-back: local time repeats the previous hour
        clock.set(at(3, 1, 30));
        let after = ticker.poll(&clock).expect("backwards step still ticks");
        assert_eq!((after.index, after.hour), (1, 1));
        clock.advance_ms(5);
        assert!(ticker.poll(&clock).is_none());
        clock.advance_ms(11);
        assert_eq!(ticker.poll(&clock).map(|t| t.index), Some(2));
    }

    #[test]
    fn ticker_reports_wall_clock_hour() {
        let clock = ManualClock::new(at(3, 7, 59));
        let mut ticker = FrameTicker::new(16);
        assert_eq!(ticker.poll(&clock).map(|t| t.hour), Some(7));
        clock.advance_ms(60_000);
        assert_eq!(ticker.poll(&clock).map(|t| t.hour), Some(8));
    }
}
