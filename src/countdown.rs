//! Live countdown towards the date carried by a countdown egg.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{GateError, Result};

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

const TICK: Duration = Duration::from_secs(1);

/// Parse a countdown target.
///
/// Accepts local timestamps (`2026-01-01T00:00:00`, optionally with
/// fractional seconds or without seconds), RFC 3339 timestamps which are
/// converted to local time, and bare dates meaning local midnight.
pub fn parse_target(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(local) = raw.parse::<NaiveDateTime>() {
        return Ok(local);
    }
    if let Ok(local) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Ok(local);
    }
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Ok(zoned.with_timezone(&Local).naive_local());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")?
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| GateError::Parse(format!("invalid date {}", raw)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Target still ahead, shown as `T-MINUS`
    Remaining,
    /// Target passed, shown as `T-PLUS`
    Elapsed,
}

impl Direction {
    pub fn prefix(&self) -> &'static str {
        match self {
            Direction::Remaining => "T-MINUS",
            Direction::Elapsed => "T-PLUS",
        }
    }
}

/// Distance between now and a countdown target, split into
/// days / hours / minutes / seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownReading {
    pub direction: Direction,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CountdownReading {
    pub fn between(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        let millis = (target - now).num_milliseconds();
        let direction = if millis >= 0 {
            Direction::Remaining
        } else {
            Direction::Elapsed
        };
        let total = millis.unsigned_abs() / 1000;

        Self {
            direction,
            days: total / SECONDS_PER_DAY,
            hours: total % SECONDS_PER_DAY / SECONDS_PER_HOUR,
            minutes: total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    pub fn now(target: NaiveDateTime) -> Self {
        Self::between(target, Local::now().naive_local())
    }
}

impl fmt::Display for CountdownReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02}:{:02}:{:02}",
            self.direction.prefix(),
            self.days,
            self.hours,
            self.minutes,
            self.seconds
        )
    }
}

/// A reading sent by a [`CountdownTicker`], tagged with the activation
/// that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountdownTick {
    pub generation: u64,
    pub reading: CountdownReading,
}

/// Re-computes a countdown once per second on a background task.
///
/// Starting a new countdown replaces the running one; dropping the
/// ticker stops it. Ticks already queued by a replaced activation are
/// told apart with [`is_current`](Self::is_current).
#[derive(Debug, Default)]
pub struct CountdownTicker {
    handle: Option<JoinHandle<()>>,
    target: Option<NaiveDateTime>,
    generation: u64,
}

impl CountdownTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(
        &mut self,
        target: NaiveDateTime,
        ticks: mpsc::UnboundedSender<CountdownTick>,
    ) {
        self.start_with_clock(
            target,
            || Local::now().naive_local(),
            ticks,
        )
    }

    /// Same as [`start`](Self::start) with the wall clock swapped out
    pub fn start_with_clock<C>(
        &mut self,
        target: NaiveDateTime,
        clock: C,
        ticks: mpsc::UnboundedSender<CountdownTick>,
    ) where
        C: Fn() -> NaiveDateTime + Send + 'static,
    {
        self.stop();
        self.generation += 1;
        log::debug!("starting countdown towards {}", target);

        let generation = self.generation;
        self.target = Some(target);
        self.handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK);
            loop {
                interval.tick().await;
                let reading = CountdownReading::between(target, clock());
                log::trace!("countdown tick {}", reading);
                let tick = CountdownTick {
                    generation,
                    reading,
                };
                if ticks.send(tick).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            log::debug!("stopping countdown towards {:?}", self.target);
            handle.abort();
        }
        self.target = None;
    }

    pub fn target(&self) -> Option<NaiveDateTime> {
        self.target
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether `tick` comes from the activation still running
    pub fn is_current(&self, tick: &CountdownTick) -> bool {
        self.handle.is_some() && tick.generation == self.generation
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("2025-12-31T23:00:00", "T-MINUS 00:01:00:00")]
    #[case("2026-01-01T00:00:00", "T-MINUS 00:00:00:00")]
    #[case("2026-01-01T00:00:01", "T-PLUS 00:00:00:01")]
    #[case("2025-12-31T23:59:59", "T-MINUS 00:00:00:01")]
    #[case("2025-12-30T00:00:00", "T-MINUS 02:00:00:00")]
    #[case("2025-12-30T22:58:57", "T-MINUS 01:01:01:03")]
    #[case("2026-01-02T01:02:03", "T-PLUS 01:01:02:03")]
    #[case("2025-09-23T00:00:00", "T-MINUS 100:00:00:00")]
    fn readings(#[case] now: &str, #[case] expected: &str) {
        let target = at("2026-01-01T00:00:00");
        let reading = CountdownReading::between(target, at(now));
        assert_eq!(reading.to_string(), expected);
    }

    #[rstest]
    #[case("2026-01-01T00:00:00")]
    #[case("2026-01-01T00:00")]
    #[case("2026-01-01T00:00:00.000")]
    #[case("2026-01-01")]
    #[case(" 2026-01-01T00:00:00 ")]
    fn parses_local_targets(#[case] raw: &str) {
        assert_eq!(parse_target(raw).unwrap(), at("2026-01-01T00:00:00"));
    }

    #[test]
    fn rejects_garbage_targets() {
        assert!(parse_target("next tuesday").is_err());
        assert!(parse_target("").is_err());
        assert!(parse_target("2026-01-01T00:00:00Z").is_ok());
    }

    #[test]
    fn fields_stay_within_bounds() {
        let target = at("2026-01-01T00:00:00");
        let now = at("2025-12-31T00:00:01");
        let reading = CountdownReading::between(target, now);
        assert_eq!(reading.direction, Direction::Remaining);
        assert_eq!(
            (reading.days, reading.hours, reading.minutes, reading.seconds),
            (0, 23, 59, 59)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_every_second() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = CountdownTicker::new();
        let target = at("2026-01-01T00:00:00");
        ticker.start_with_clock(target, || at("2025-12-31T23:00:00"), tx);
        assert!(ticker.is_running());

        for _ in 0..3 {
            let tick = rx.recv().await.unwrap();
            assert!(ticker.is_current(&tick));
            assert_eq!(tick.reading.to_string(), "T-MINUS 00:01:00:00");
        }
        ticker.stop();
        assert!(!ticker.is_running());
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_previous_interval() {
        let mut ticker = CountdownTicker::new();

        let (first_tx, mut first_rx) = mpsc::unbounded_channel();
        ticker.start_with_clock(
            at("2026-01-01T00:00:00"),
            || at("2025-12-31T23:00:00"),
            first_tx,
        );
        assert!(first_rx.recv().await.is_some());

        let (second_tx, mut second_rx) = mpsc::unbounded_channel();
        ticker.start_with_clock(
            at("2030-01-01T00:00:00"),
            || at("2030-01-01T00:00:05"),
            second_tx,
        );
        assert_eq!(ticker.target(), Some(at("2030-01-01T00:00:00")));

        // the first task was aborted, its sender went with it
        assert_eq!(first_rx.recv().await, None);
        let tick = second_rx.recv().await.unwrap();
        assert_eq!(tick.reading.to_string(), "T-PLUS 00:00:00:05");
    }

    #[tokio::test(start_paused = true)]
    async fn queued_ticks_of_a_replaced_countdown_are_stale() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut ticker = CountdownTicker::new();
        ticker.start_with_clock(
            at("2026-01-01T00:00:00"),
            || at("2025-12-31T23:00:00"),
            tx.clone(),
        );
        let stale = rx.recv().await.unwrap();
        assert!(ticker.is_current(&stale));

        ticker.start_with_clock(
            at("2030-01-01T00:00:00"),
            || at("2030-01-01T00:00:05"),
            tx,
        );
        assert!(!ticker.is_current(&stale));

        let fresh = rx.recv().await.unwrap();
        assert!(ticker.is_current(&fresh));
        assert_eq!(fresh.reading.to_string(), "T-PLUS 00:00:00:05");

        ticker.stop();
        assert!(!ticker.is_current(&fresh));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_stops_the_task() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let mut ticker = CountdownTicker::new();
            ticker.start_with_clock(
                at("2026-01-01T00:00:00"),
                || at("2025-12-31T23:00:00"),
                tx,
            );
        }
        while rx.recv().await.is_some() {}
    }
}
