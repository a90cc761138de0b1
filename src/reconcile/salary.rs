use crate::reconcile::leave::LeaveAdjusted;

/// Rounds half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Salary earned for the range, or `None` when there are no working days to prorate over.
pub fn salary_earned(monthly_salary: f64, adjusted: &LeaveAdjusted, total_working_days: u32) -> Option<f64> {
    if total_working_days == 0 {
        return None;
    }
    Some(round2(
        monthly_salary * adjusted.work_credit / f64::from(total_working_days),
    ))
}
