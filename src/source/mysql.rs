use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{FromRow, MySqlPool};
use tracing::{debug, error};

use crate::{
    error::AppError,
    model::session::{EmployeeName, MonthlySalary, SessionRecord},
    source::{SessionQuery, SessionRecordSource},
};

/// Sessions stored in `work_sessions`, joined with the employee profile for name and salary.
pub struct MySqlSessionSource {
    pool: MySqlPool,
}

impl MySqlSessionSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    employee_id: u64,
    employee_code: Option<String>,
    first_name: String,
    last_name: String,
    // DATETIME columns, stored in UTC
    first_login: NaiveDateTime,
    last_logout: Option<NaiveDateTime>,
    total_hours: f64,
    monthly_salary: Option<f64>,
}

impl From<SessionRow> for SessionRecord {
    fn from(row: SessionRow) -> Self {
        SessionRecord {
            employee_id: row.employee_id,
            employee_code: row.employee_code,
            employee_name: EmployeeName {
                first_name: row.first_name,
                last_name: row.last_name,
            },
            first_login: row.first_login.and_utc(),
            last_logout: row.last_logout.map(|t| t.and_utc()),
            total_hours: row.total_hours,
            monthly_salary: row.monthly_salary.map(MonthlySalary::Amount),
        }
    }
}

const SESSIONS_SQL: &str = r#"
    SELECT
        s.employee_id,
        e.employee_code,
        e.first_name,
        e.last_name,
        s.first_login,
        s.last_logout,
        CAST(s.total_hours AS DOUBLE) AS total_hours,
        CAST(e.monthly_salary AS DOUBLE) AS monthly_salary
    FROM work_sessions s
    JOIN employees e ON e.id = s.employee_id
    WHERE s.first_login >= ? AND s.first_login < ?
    "#;

#[async_trait]
impl SessionRecordSource for MySqlSessionSource {
    async fn fetch_sessions(&self, query: &SessionQuery) -> Result<Vec<SessionRecord>, AppError> {
        let mut sql = SESSIONS_SQL.to_string();
        if query.employee_id.is_some() {
            sql.push_str(" AND s.employee_id = ?");
        }
        sql.push_str(" ORDER BY s.first_login, s.id");

        // first_login is UTC; select the local calendar days of the range
        let (from, until) = query.utc_bounds();
        debug!(sql = %sql, %from, %until, employee_id = ?query.employee_id, "Fetching sessions");

        let mut q = sqlx::query_as::<_, SessionRow>(&sql).bind(from).bind(until);
        if let Some(employee_id) = query.employee_id {
            q = q.bind(employee_id);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(|e| {
            error!(error = %e, "Failed to fetch sessions");
            AppError::Source(e)
        })?;

        Ok(rows.into_iter().map(SessionRecord::from).collect())
    }
}
