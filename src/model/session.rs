use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeName {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
}

impl EmployeeName {
    pub fn display(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Salary as it arrives from the employee profile: a number, a numeric string, or nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MonthlySalary {
    Amount(f64),
    Text(String),
}

impl MonthlySalary {
    /// The salary when it is a finite, strictly positive number.
    pub fn positive_amount(&self) -> Option<f64> {
        let amount = match self {
            MonthlySalary::Amount(v) => *v,
            MonthlySalary::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (amount.is_finite() && amount > 0.0).then_some(amount)
    }
}

/// One continuous login-to-logout span of one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[serde(default)]
    #[schema(example = "EMP-001", nullable = true)]
    pub employee_code: Option<String>,

    pub employee_name: EmployeeName,

    #[schema(example = "2026-01-05T09:00:00Z", value_type = String, format = DateTime)]
    pub first_login: DateTime<Utc>,

    #[serde(default)]
    #[schema(example = "2026-01-05T17:30:00Z", value_type = Option<String>, format = DateTime, nullable = true)]
    pub last_logout: Option<DateTime<Utc>>,

    #[schema(example = 8.5)]
    pub total_hours: f64,

    #[serde(default)]
    #[schema(example = 30000.0, value_type = Option<f64>, nullable = true)]
    pub monthly_salary: Option<MonthlySalary>,
}
