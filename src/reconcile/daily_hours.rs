use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};

use crate::model::session::SessionRecord;

/// Hours worked per calendar date, for one employee.
pub type DailyHours = BTreeMap<NaiveDate, f64>;

/// Calendar date of a session: its first login seen from `offset`.
pub fn session_date(session: &SessionRecord, offset: FixedOffset) -> NaiveDate {
    session.first_login.with_timezone(&offset).date_naive()
}

/// Sums `total_hours` per session date. Several sessions on one date accumulate.
pub fn aggregate<'a, I>(sessions: I, offset: FixedOffset) -> DailyHours
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    let mut daily = DailyHours::new();
    for session in sessions {
        *daily.entry(session_date(session, offset)).or_insert(0.0) += session.total_hours;
    }
    daily
}
