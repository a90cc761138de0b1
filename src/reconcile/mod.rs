//! Attendance-to-salary reconciliation.
//!
//! Sessions are grouped per employee, bucketed into daily hours, classified against the
//! non-Sunday days of the requested range, adjusted by one paid leave day and finally
//! prorated against the employee's monthly salary. Everything here is pure: the same
//! sessions, range and offset always give the same result.

pub mod calendar;
pub mod classifier;
pub mod daily_hours;
pub mod filter;
pub mod leave;
pub mod report;
pub mod salary;

use std::collections::HashMap;

use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::model::{attendance::CalendarDay, payroll::SalarySummary, session::SessionRecord};
use report::{AttendanceRow, SalaryRow};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reconciliation {
    pub attendance_rows: Vec<AttendanceRow>,
    pub salary_rows: Vec<SalaryRow>,
    pub summaries: Vec<SalarySummary>,
}

/// Sessions of one employee, in the order they were received.
struct EmployeeSessions<'a> {
    employee_id: u64,
    sessions: Vec<&'a SessionRecord>,
}

/// Groups by employee id, keeping employees in first-seen order.
fn group_by_employee(sessions: &[SessionRecord]) -> Vec<EmployeeSessions<'_>> {
    let mut groups: Vec<EmployeeSessions<'_>> = Vec::new();
    let mut index: HashMap<u64, usize> = HashMap::new();

    for session in sessions {
        let slot = *index.entry(session.employee_id).or_insert_with(|| {
            groups.push(EmployeeSessions {
                employee_id: session.employee_id,
                sessions: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].sessions.push(session);
    }
    groups
}

fn summarize_employee(
    group: &EmployeeSessions<'_>,
    days: &[CalendarDay],
    offset: FixedOffset,
) -> Option<SalarySummary> {
    // name, code and salary come from the first session
    let first = group.sessions.first()?;

    let Some(monthly_salary) = first
        .monthly_salary
        .as_ref()
        .and_then(|s| s.positive_amount())
    else {
        debug!(employee_id = group.employee_id, "No usable salary, excluded from payroll");
        return None;
    };

    let working_days = calendar::working_days(days);
    let total_working_days = working_days.len() as u32;

    let daily = daily_hours::aggregate(group.sessions.iter().copied(), offset);
    let classification = classifier::classify(&daily, &working_days);
    let adjusted = leave::apply_paid_leave(&classification);

    let Some(salary_earned) = salary::salary_earned(monthly_salary, &adjusted, total_working_days)
    else {
        debug!(employee_id = group.employee_id, "No working days in range, excluded from payroll");
        return None;
    };

    Some(SalarySummary {
        employee_id: group.employee_id,
        employee_code: first.employee_code.clone(),
        name: first.employee_name.display(),
        total_working_days,
        sundays_count: calendar::sunday_count(days),
        paid_leave_used: adjusted.paid_leave_used,
        absent_days: adjusted.absences,
        effective_days_worked: adjusted.work_credit,
        monthly_salary,
        salary_earned,
        days: classification.days,
    })
}

/// One salary summary per employee that has a usable salary and at least one working day.
pub fn summarize(
    sessions: &[SessionRecord],
    start: NaiveDate,
    end: NaiveDate,
    offset: FixedOffset,
) -> Vec<SalarySummary> {
    let days = calendar::partition(start, end);
    group_by_employee(sessions)
        .iter()
        .filter_map(|group| summarize_employee(group, &days, offset))
        .collect()
}

/// Attendance and payroll tables for the range. The two are computed independently:
/// an employee missing from payroll still has their attendance rows.
pub fn reconcile(
    sessions: &[SessionRecord],
    start: NaiveDate,
    end: NaiveDate,
    offset: FixedOffset,
) -> Reconciliation {
    let summaries = summarize(sessions, start, end, offset);
    Reconciliation {
        attendance_rows: report::attendance_rows(sessions, offset),
        salary_rows: report::salary_rows(&summaries),
        summaries,
    }
}
