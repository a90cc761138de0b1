use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{payroll::SalarySummary, session::SessionRecord};

/// Rendered in place of a missing time or an empty duration.
pub const PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceRow {
    #[schema(example = 1)]
    pub serial: usize,
    #[schema(example = "2026-01-05")]
    pub date: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = "09:00 AM")]
    pub first_login: String,
    #[schema(example = "05:30 PM")]
    pub last_logout: String,
    #[schema(example = "08:30")]
    pub worked_hours: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SalaryRow {
    #[schema(example = 1)]
    pub serial: usize,
    #[schema(example = 1001)]
    pub employee_id: u64,
    #[schema(example = "EMP-001", nullable = true)]
    pub employee_code: Option<String>,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = 26)]
    pub working_days: u32,
    #[schema(example = 5)]
    pub sundays: u32,
    #[schema(example = 1)]
    pub paid_leave_used: u8,
    #[schema(example = "25.50")]
    pub effective_days_worked: String,
    #[schema(example = "30000.00")]
    pub monthly_salary: String,
    #[schema(example = "29423.08")]
    pub salary_earned: String,
}

/// `HH:MM` for a decimal hour count; zero, negative or non-finite input gives the placeholder.
pub fn format_hours_hhmm(decimal_hours: f64) -> String {
    if !(decimal_hours > 0.0) || !decimal_hours.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let mut hours = decimal_hours.floor() as u64;
    let mut minutes = ((decimal_hours - decimal_hours.floor()) * 60.0).round() as u64;
    if minutes == 60 {
        hours += 1;
        minutes = 0;
    }
    format!("{hours:02}:{minutes:02}")
}

pub fn format_date(ts: &DateTime<Utc>, offset: FixedOffset) -> String {
    ts.with_timezone(&offset).format("%Y-%m-%d").to_string()
}

pub fn format_time_12h(ts: Option<&DateTime<Utc>>, offset: FixedOffset) -> String {
    match ts {
        Some(ts) => ts.with_timezone(&offset).format("%I:%M %p").to_string(),
        None => PLACEHOLDER.to_string(),
    }
}

pub fn attendance_rows(sessions: &[SessionRecord], offset: FixedOffset) -> Vec<AttendanceRow> {
    sessions
        .iter()
        .enumerate()
        .map(|(i, s)| AttendanceRow {
            serial: i + 1,
            date: format_date(&s.first_login, offset),
            name: s.employee_name.display(),
            first_login: format_time_12h(Some(&s.first_login), offset),
            last_logout: format_time_12h(s.last_logout.as_ref(), offset),
            worked_hours: format_hours_hhmm(s.total_hours),
        })
        .collect()
}

pub fn salary_rows(summaries: &[SalarySummary]) -> Vec<SalaryRow> {
    summaries
        .iter()
        .enumerate()
        .map(|(i, s)| SalaryRow {
            serial: i + 1,
            employee_id: s.employee_id,
            employee_code: s.employee_code.clone(),
            name: s.name.clone(),
            working_days: s.total_working_days,
            sundays: s.sundays_count,
            paid_leave_used: s.paid_leave_used,
            effective_days_worked: format!("{:.2}", s.effective_days_worked),
            monthly_salary: format!("{:.2}", s.monthly_salary),
            salary_earned: format!("{:.2}", s.salary_earned),
        })
        .collect()
}

/// Name the export collaborator saves the workbook under.
pub fn export_file_name(start: &str, end: &str) -> String {
    format!("Attendance_{start}_to_{end}.xlsx")
}
