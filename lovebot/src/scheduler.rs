//! Broadcast scheduler: fires the morning fan-out once per day at a fixed
//! local wall-clock time.
//!
//! A single-shot timer would fire once per process lifetime; the scheduler
//! therefore runs a self-rescheduling loop that recomputes the next
//! occurrence after every fire.

use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone};
use tracing::{info, instrument};

use crate::dispatcher::Dispatcher;

/// Next occurrence of `fire_time` strictly after `now`: today if still
/// ahead, otherwise the following day. Strict comparison means a process
/// waking exactly at the fire instant schedules the next day, so the
/// post-fire recompute can never double-fire within one occurrence. A
/// local instant skipped by a DST gap rolls forward to the next day it
/// exists.
pub fn next_occurrence<Tz: TimeZone>(now: &DateTime<Tz>, fire_time: NaiveTime) -> DateTime<Tz> {
    let mut date = now.date_naive();
    loop {
        if let Some(candidate) = now
            .timezone()
            .from_local_datetime(&date.and_time(fire_time))
            .earliest()
        {
            if candidate > *now {
                return candidate;
            }
        }
        date += Duration::days(1);
    }
}

/// Daily scheduler driving [`Dispatcher::broadcast`].
pub struct BroadcastScheduler {
    dispatcher: Dispatcher,
    fire_time: NaiveTime,
}

impl BroadcastScheduler {
    pub fn new(dispatcher: Dispatcher, fire_time: NaiveTime) -> Self {
        Self {
            dispatcher,
            fire_time,
        }
    }

    /// Runs forever: sleep until the next occurrence, fire the broadcast,
    /// recompute. Broadcast failures are handled (logged) inside the
    /// dispatcher and never unwind into this loop.
    #[instrument(skip(self), fields(fire_time = %self.fire_time))]
    pub async fn run(self) {
        loop {
            let now = Local::now();
            let next = next_occurrence(&now, self.fire_time);
            let wait = (next - now).to_std().unwrap_or_default();
            info!(next_fire = %next, wait_secs = wait.as_secs(), "Broadcast scheduled");

            tokio::time::sleep(wait).await;

            info!("Broadcast firing");
            self.dispatcher.broadcast().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    /// **Test: Starting after the fire hour schedules the next calendar
    /// day.**
    ///
    /// **Setup:** now = 09:00, fire time = 08:00.
    /// **Expected:** next occurrence is 08:00 tomorrow, not immediately.
    #[test]
    fn test_next_occurrence_after_fire_hour() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let next = next_occurrence(&now, at(8, 0, 0));
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 11, 8, 0, 0).unwrap());
    }

    /// **Test: Starting before the fire hour schedules the same day.**
    #[test]
    fn test_next_occurrence_before_fire_hour() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 7, 0, 0).unwrap();
        let next = next_occurrence(&now, at(8, 0, 0));
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap());
    }

    /// **Test: Waking exactly at the fire instant schedules the next day.**
    ///
    /// This is what lets the loop recompute immediately after firing
    /// without firing twice for the same occurrence.
    #[test]
    fn test_next_occurrence_at_exact_instant() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        let next = next_occurrence(&now, at(8, 0, 0));
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 11, 8, 0, 0).unwrap());
    }

    /// **Test: Month and year boundaries roll over correctly.**
    #[test]
    fn test_next_occurrence_rolls_over_month_and_year() {
        let now = Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap();
        assert_eq!(
            next_occurrence(&now, at(8, 0, 0)),
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
        );

        let now = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            next_occurrence(&now, at(8, 0, 0)),
            Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
        );
    }

    /// **Test: Sub-day fire times keep minute and second components.**
    #[test]
    fn test_next_occurrence_keeps_minutes_and_seconds() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 7, 0, 0).unwrap();
        let next = next_occurrence(&now, at(7, 30, 15));
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 10, 7, 30, 15).unwrap());
    }
}
