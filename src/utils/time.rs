use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use now::DateTimeNow;

/// This is the standard way of converting a date to a string in daybook.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Time elapsed since local midnight. Used as the window for "commits today".
pub fn since_start_of_day<Tz: TimeZone>(date: DateTime<Tz>) -> Duration {
    let start = date.beginning_of_day();
    date - start
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate, TimeZone};

    use super::{date_to_record_name, since_start_of_day};

    #[test]
    fn test_record_name_is_iso_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 26).unwrap();
        assert_eq!(date_to_record_name(date), "2025-06-26");
    }

    #[test]
    fn test_since_start_of_day() {
        let moment = Local.with_ymd_and_hms(2025, 7, 1, 13, 30, 0).unwrap();
        assert_eq!(
            since_start_of_day(moment),
            Duration::hours(13) + Duration::minutes(30)
        );
    }
}
