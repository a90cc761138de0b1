use chrono::{Datelike, NaiveDate, Weekday};

use crate::model::attendance::CalendarDay;

/// Every date from `start` to `end`, both inclusive. A reversed range is empty.
pub fn partition(start: NaiveDate, end: NaiveDate) -> Vec<CalendarDay> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| CalendarDay {
            date,
            is_sunday: date.weekday() == Weekday::Sun,
        })
        .collect()
}

pub fn working_days(days: &[CalendarDay]) -> Vec<NaiveDate> {
    days.iter().filter(|d| !d.is_sunday).map(|d| d.date).collect()
}

pub fn sunday_count(days: &[CalendarDay]) -> u32 {
    days.iter().filter(|d| d.is_sunday).count() as u32
}
