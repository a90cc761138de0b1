use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::attendance::DayCredit;

/// Prorated salary of one employee over one requested range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalarySummary {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = "EMP-001", nullable = true)]
    pub employee_code: Option<String>,

    #[schema(example = "John Doe")]
    pub name: String,

    #[schema(example = 26)]
    pub total_working_days: u32,

    #[schema(example = 5)]
    pub sundays_count: u32,

    /// 0 or 1
    #[schema(example = 1)]
    pub paid_leave_used: u8,

    /// Absences left after the paid leave was applied.
    #[schema(example = 0)]
    pub absent_days: u32,

    #[schema(example = 25.5)]
    pub effective_days_worked: f64,

    #[schema(example = 30000.0)]
    pub monthly_salary: f64,

    #[schema(example = 29423.08)]
    pub salary_earned: f64,

    pub days: Vec<DayCredit>,
}
