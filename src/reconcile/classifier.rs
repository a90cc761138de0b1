use chrono::NaiveDate;

use crate::{model::attendance::DayCredit, reconcile::daily_hours::DailyHours};

/// Hours that earn a full day of credit.
pub const FULL_DAY_HOURS: f64 = 8.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub days: Vec<DayCredit>,
    pub absences: u32,
    pub work_credit: f64,
}

/// Credit for a day with `hours` worked. Exactly a full day counts as full credit.
pub fn work_credit(hours: f64) -> f64 {
    if hours >= FULL_DAY_HOURS {
        1.0
    } else if hours > 0.0 {
        hours / FULL_DAY_HOURS
    } else {
        0.0
    }
}

pub fn classify(daily: &DailyHours, working_days: &[NaiveDate]) -> Classification {
    let mut days = Vec::with_capacity(working_days.len());
    let mut absences = 0;
    let mut total = 0.0;

    for &date in working_days {
        let hours = daily.get(&date).copied().unwrap_or(0.0);
        let credit = work_credit(hours);
        // NaN hours fail both comparisons in work_credit and land here too
        let is_absence = !(hours > 0.0);
        if is_absence {
            absences += 1;
        }
        total += credit;
        days.push(DayCredit {
            date,
            work_credit: credit,
            is_absence,
        });
    }

    Classification {
        days,
        absences,
        work_credit: total,
    }
}
