use std::fmt::Display;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use chrono_english::parse_date_string;
use clap::{Parser, ValueEnum};

use crate::utils::clock::{Clock, DefaultClock, FixedClock};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct StatusCommand {
    #[arg(
        long,
        help = "Show the status as of another moment. Examples are \"yesterday\", \"2 weeks ago\", \"15/03/2026\""
    )]
    at: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

impl StatusCommand {
    /// The clock the status is computed with.
    pub fn clock(&self) -> Result<Box<dyn Clock>> {
        match &self.at {
            None => Ok(Box::new(DefaultClock)),
            Some(at) => Ok(Box::new(FixedClock(parse_moment(
                at,
                Local::now(),
                self.date_style,
            )?))),
        }
    }
}

fn parse_moment(text: &str, now: DateTime<Local>, style: DateStyle) -> Result<DateTime<Local>> {
    parse_date_string(text, now, style.into())
        .with_context(|| format!("Couldn't parse date {text:?}"))
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local, TimeZone};

    use super::{parse_moment, DateStyle};

    #[test]
    fn test_parse_moment() {
        let now = Local.with_ymd_and_hms(2025, 9, 10, 12, 0, 0).unwrap();

        let uk = parse_moment("01/02/2026", now, DateStyle::Uk).unwrap();
        assert_eq!((uk.day(), uk.month()), (1, 2));
        let us = parse_moment("01/02/2026", now, DateStyle::Us).unwrap();
        assert_eq!((us.day(), us.month()), (2, 1));

        let yesterday = parse_moment("yesterday", now, DateStyle::Uk).unwrap();
        assert_eq!(yesterday.day(), 9);

        assert!(parse_moment("whenever", now, DateStyle::Uk).is_err());
    }
}
