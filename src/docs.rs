use crate::api::reports::{ComputeMonthlyStatus, MonthlyStatusQuery, MonthlyStatusResponse};
use crate::model::attendance::{CalendarDay, DayCredit};
use crate::model::payroll::SalarySummary;
use crate::model::session::{EmployeeName, SessionRecord};
use crate::reconcile::report::{AttendanceRow, SalaryRow};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance & Payroll API",
        version = "0.1.0",
        description = r#"
## Attendance-to-Salary Reconciliation

Turns login/logout sessions for a date range into two tables:

- **Attendance**: one row per session with date, login/logout times and worked hours.
- **Salary summary**: one row per paid employee. Sundays are off, a working day is
  8 hours (shorter days earn a proportional share), one absence per range is covered by
  a paid leave day, and the monthly salary is prorated over the working days.

Employees without a salary on file appear only in the attendance table.

### 🔐 Security
All endpoints require a **JWT Bearer** access token issued by the portal's login service.
"#,
    ),
    paths(
        crate::api::reports::monthly_status,
        crate::api::reports::compute_monthly_status
    ),
    components(
        schemas(
            MonthlyStatusQuery,
            ComputeMonthlyStatus,
            MonthlyStatusResponse,
            AttendanceRow,
            SalaryRow,
            SalarySummary,
            DayCredit,
            CalendarDay,
            SessionRecord,
            EmployeeName
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Reports", description = "Attendance and payroll reports"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
