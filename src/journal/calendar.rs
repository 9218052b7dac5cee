use anyhow::{bail, Result};
use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};

/// The project's position in time: the epoch plus the moment "now". Day 1 is the epoch itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectClock {
    start: NaiveDate,
    now: DateTime<Local>,
    today: NaiveDate,
}

impl ProjectClock {
    /// Fails when `now` falls on a date before `start`.
    pub fn new(start: NaiveDate, now: DateTime<Local>) -> Result<Self> {
        let today = now.date_naive();
        if today < start {
            bail!("{today} is before the project start {start}");
        }
        Ok(Self { start, now, today })
    }

    /// Same as [ProjectClock::new], but a date before `start` is treated as `start`.
    pub fn clamped(start: NaiveDate, now: DateTime<Local>) -> Self {
        Self {
            start,
            now,
            today: now.date_naive().max(start),
        }
    }

    /// 1-based count of calendar days since the epoch.
    pub fn day(&self) -> u32 {
        let elapsed = (self.today - self.start).num_days();
        u32::try_from(elapsed).unwrap_or(u32::MAX - 1) + 1
    }

    pub fn week(&self) -> u32 {
        (self.day() - 1) / 7 + 1
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn weekday(&self) -> Weekday {
        self.today.weekday()
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};

    use super::ProjectClock;

    const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2025, 6, 26) {
        Some(date) => date,
        None => panic!(),
    };

    fn at(days_after_epoch: i64, hour: u32) -> DateTime<Local> {
        let date = EPOCH + Duration::days(days_after_epoch);
        Local
            .from_local_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn test_epoch_is_day_one() {
        let clock = ProjectClock::new(EPOCH, at(0, 0)).unwrap();
        assert_eq!(clock.day(), 1);
        assert_eq!(clock.week(), 1);

        let late = ProjectClock::new(EPOCH, at(0, 23)).unwrap();
        assert_eq!(late.day(), 1);
    }

    #[test]
    fn test_day_counts_calendar_days() {
        assert_eq!(ProjectClock::new(EPOCH, at(13, 9)).unwrap().day(), 14);
        assert_eq!(ProjectClock::new(EPOCH, at(59, 18)).unwrap().day(), 60);
        assert_eq!(ProjectClock::new(EPOCH, at(7, 12)).unwrap().week(), 2);
    }

    #[test]
    fn test_day_is_monotonic() {
        let mut previous = 0;
        for offset in 0..400 {
            let day = ProjectClock::new(EPOCH, at(offset, 12)).unwrap().day();
            assert_eq!(day as i64, offset + 1);
            assert!(day > previous);
            previous = day;
        }
    }

    #[test]
    fn test_before_epoch() {
        assert!(ProjectClock::new(EPOCH, at(-1, 12)).is_err());

        let clamped = ProjectClock::clamped(EPOCH, at(-30, 12));
        assert_eq!(clamped.day(), 1);
        assert_eq!(clamped.today(), EPOCH);
    }
}
