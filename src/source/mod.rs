pub mod mysql;

use async_trait::async_trait;
use chrono::{Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{error::AppError, model::session::SessionRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub employee_id: Option<u64>,
    /// Timezone the `start`/`end` calendar dates are meant in.
    pub offset: FixedOffset,
}

impl SessionQuery {
    /// Half-open UTC window `[from, until)` covering `start 00:00` to `end+1 00:00` local time.
    pub fn utc_bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        let shift = Duration::seconds(i64::from(self.offset.local_minus_utc()));
        let to_utc = |local: NaiveDateTime| local.checked_sub_signed(shift).unwrap_or(local);

        let from = to_utc(self.start.and_time(NaiveTime::MIN));
        let until = self
            .end
            .succ_opt()
            .map(|next| to_utc(next.and_time(NaiveTime::MIN)))
            .unwrap_or(NaiveDateTime::MAX);
        (from, until)
    }
}

/// Where attendance sessions for a report come from.
#[async_trait]
pub trait SessionRecordSource: Send + Sync {
    async fn fetch_sessions(&self, query: &SessionQuery) -> Result<Vec<SessionRecord>, AppError>;
}
