use crate::reconcile::classifier::Classification;

/// Attendance after the paid leave grace day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaveAdjusted {
    pub absences: u32,
    pub work_credit: f64,
    pub paid_leave_used: u8,
}

/// Grants one full day of credit against one absence, once per requested range.
///
/// The grant is flat: a one-day range and a full month both get the same single day.
pub fn apply_paid_leave(classification: &Classification) -> LeaveAdjusted {
    if classification.absences > 0 {
        LeaveAdjusted {
            absences: classification.absences - 1,
            work_credit: classification.work_credit + 1.0,
            paid_leave_used: 1,
        }
    } else {
        LeaveAdjusted {
            absences: 0,
            work_credit: classification.work_credit,
            paid_leave_used: 0,
        }
    }
}
