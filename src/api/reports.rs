use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::{
    auth::auth::AuthUser,
    config::Config,
    error::AppError,
    model::{payroll::SalarySummary, session::SessionRecord},
    reconcile::{
        self, Reconciliation,
        filter::SessionFilter,
        report::{AttendanceRow, SalaryRow, export_file_name},
    },
    source::{SessionQuery, SessionRecordSource},
};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct MonthlyStatusQuery {
    /// First day of the range (inclusive)
    #[schema(example = "2026-01-01")]
    pub start: Option<String>,

    /// Last day of the range (inclusive)
    #[schema(example = "2026-01-31")]
    pub end: Option<String>,

    /// Matches first name, last name, full name or employee code
    #[schema(example = "rao")]
    pub search: Option<String>,

    #[schema(example = 1001)]
    pub employee_id: Option<u64>,
}

#[derive(Deserialize, ToSchema)]
pub struct ComputeMonthlyStatus {
    #[schema(example = "2026-01-01")]
    pub start: Option<String>,
    #[schema(example = "2026-01-31")]
    pub end: Option<String>,
    pub search: Option<String>,
    pub sessions: Vec<SessionRecord>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyStatusResponse {
    #[schema(example = "2026-01-01", nullable = true)]
    pub start: Option<String>,
    #[schema(example = "2026-01-31", nullable = true)]
    pub end: Option<String>,
    pub attendance_rows: Vec<AttendanceRow>,
    pub salary_rows: Vec<SalaryRow>,
    pub summaries: Vec<SalarySummary>,
    #[schema(example = "Attendance_2026-01-01_to_2026-01-31.xlsx", nullable = true)]
    pub export_file_name: Option<String>,
}

impl MonthlyStatusResponse {
    fn empty(start: Option<String>, end: Option<String>) -> Self {
        Self {
            start,
            end,
            attendance_rows: Vec::new(),
            salary_rows: Vec::new(),
            summaries: Vec::new(),
            export_file_name: None,
        }
    }

    fn from_reconciliation(start: NaiveDate, end: NaiveDate, result: Reconciliation) -> Self {
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();
        Self {
            export_file_name: Some(export_file_name(&start, &end)),
            start: Some(start),
            end: Some(end),
            attendance_rows: result.attendance_rows,
            salary_rows: result.salary_rows,
            summaries: result.summaries,
        }
    }
}

/// Longest range, in days, a single report covers.
pub const MAX_RANGE_DAYS: i64 = 366;

/// Both dates must be present and valid `YYYY-MM-DD`, and the range at most
/// [`MAX_RANGE_DAYS`] long; otherwise nothing is computed.
fn parse_range(start: Option<&str>, end: Option<&str>) -> Option<(NaiveDate, NaiveDate)> {
    let (start, end) = (start?.trim(), end?.trim());
    if start.is_empty() || end.is_empty() {
        return None;
    }
    match (
        NaiveDate::parse_from_str(start, "%Y-%m-%d"),
        NaiveDate::parse_from_str(end, "%Y-%m-%d"),
    ) {
        (Ok(s), Ok(e)) => {
            let days = (e - s).num_days() + 1;
            if days > MAX_RANGE_DAYS {
                warn!(
                    start,
                    end,
                    days,
                    "Ignoring report range longer than {} days",
                    MAX_RANGE_DAYS
                );
                return None;
            }
            Some((s, e))
        }
        _ => {
            warn!(start, end, "Ignoring unparseable report range");
            None
        }
    }
}

fn run(
    sessions: Vec<SessionRecord>,
    search: Option<&str>,
    start: NaiveDate,
    end: NaiveDate,
    config: &Config,
) -> MonthlyStatusResponse {
    let sessions = SessionFilter::new(search).apply(sessions);
    let result = reconcile::reconcile(&sessions, start, end, config.session_offset());
    info!(
        sessions = sessions.len(),
        payroll = result.summaries.len(),
        %start,
        %end,
        "Monthly status computed"
    );
    MonthlyStatusResponse::from_reconciliation(start, end, result)
}

/// Attendance and salary tables for a date range, from stored sessions
#[utoipa::path(
    get,
    path = "/api/reports/monthly-status",
    params(MonthlyStatusQuery),
    responses(
        (status = 200, description = "Attendance and payroll tables", body = MonthlyStatusResponse),
        (status = 401, description = "Unauthorized"),
        (status = 503, description = "Session records unavailable", body = Object, example = json!({
            "message": "Session records unavailable, try again later"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn monthly_status(
    auth: AuthUser,
    source: web::Data<dyn SessionRecordSource>,
    config: web::Data<Config>,
    query: web::Query<MonthlyStatusQuery>,
) -> Result<HttpResponse, AppError> {
    info!(
        user_id = auth.user_id,
        username = %auth.username,
        employee_id = ?auth.employee_id,
        "Monthly status requested"
    );

    let query = query.into_inner();
    let Some((start, end)) = parse_range(query.start.as_deref(), query.end.as_deref()) else {
        return Ok(HttpResponse::Ok().json(MonthlyStatusResponse::empty(query.start, query.end)));
    };

    let sessions = source
        .fetch_sessions(&SessionQuery {
            start,
            end,
            employee_id: query.employee_id,
            offset: config.session_offset(),
        })
        .await?;

    Ok(HttpResponse::Ok().json(run(sessions, query.search.as_deref(), start, end, &config)))
}

/// Attendance and salary tables for caller-supplied sessions
#[utoipa::path(
    post,
    path = "/api/reports/monthly-status",
    request_body = ComputeMonthlyStatus,
    responses(
        (status = 200, description = "Attendance and payroll tables", body = MonthlyStatusResponse),
        (status = 400, description = "Malformed body"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Reports"
)]
pub async fn compute_monthly_status(
    auth: AuthUser,
    config: web::Data<Config>,
    payload: web::Json<ComputeMonthlyStatus>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    info!(
        user_id = auth.user_id,
        sessions = payload.sessions.len(),
        "Monthly status computation requested"
    );

    let Some((start, end)) = parse_range(payload.start.as_deref(), payload.end.as_deref()) else {
        return Ok(HttpResponse::Ok().json(MonthlyStatusResponse::empty(payload.start, payload.end)));
    };

    Ok(HttpResponse::Ok().json(run(
        payload.sessions,
        payload.search.as_deref(),
        start,
        end,
        &config,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{jwt::issue_test_token, middleware::auth_middleware},
        config::test_config,
        models::TokenType,
        reconcile::test_support::session,
        routes,
    };
    use actix_web::{App, http::StatusCode, middleware::from_fn, test};
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    /// In-memory source that records the queries it receives.
    struct StaticSource {
        sessions: Vec<SessionRecord>,
        fail: bool,
        queries: Mutex<Vec<SessionQuery>>,
    }

    impl StaticSource {
        fn new(sessions: Vec<SessionRecord>) -> Arc<Self> {
            Arc::new(Self {
                sessions,
                fail: false,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                sessions: Vec::new(),
                fail: true,
                queries: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl SessionRecordSource for StaticSource {
        async fn fetch_sessions(
            &self,
            query: &SessionQuery,
        ) -> Result<Vec<SessionRecord>, AppError> {
            self.queries.lock().unwrap().push(query.clone());
            if self.fail {
                return Err(AppError::Source(sqlx::Error::PoolTimedOut));
            }
            let (from, until) = query.utc_bounds();
            Ok(self
                .sessions
                .iter()
                .filter(|s| {
                    let login = s.first_login.naive_utc();
                    login >= from && login < until
                })
                .cloned()
                .collect())
        }
    }

    fn week_sessions() -> Vec<SessionRecord> {
        let mut sessions: Vec<_> = [8.0, 4.0, 0.0, 8.0, 8.0, 8.0]
            .iter()
            .enumerate()
            .filter(|(_, h)| **h > 0.0)
            .map(|(i, h)| session(1, &format!("2026-01-{:02}T09:00:00Z", 5 + i), *h))
            .collect();
        let mut unpaid = session(2, "2026-01-05T10:00:00Z", 8.0);
        unpaid.monthly_salary = None;
        sessions.push(unpaid);
        sessions
    }

    fn bearer() -> (&'static str, String) {
        let token = issue_test_token(TokenType::Access, &test_config().jwt_secret, 600);
        ("Authorization", format!("Bearer {token}"))
    }

    macro_rules! app {
        ($source:expr) => {
            app!($source, test_config())
        };
        ($source:expr, $config:expr) => {{
            let source: Arc<dyn SessionRecordSource> = $source;
            test::init_service(
                App::new()
                    .app_data(web::Data::new($config))
                    .app_data(web::Data::from(source))
                    .service(
                        web::scope("/api")
                            .wrap(from_fn(auth_middleware))
                            .configure(routes::report_routes),
                    ),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn computes_tables_for_stored_sessions() {
        let source = StaticSource::new(week_sessions());
        let app = app!(source.clone());

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2026-01-05&end=2026-01-11&employee_id=1")
            .insert_header(bearer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["attendance_rows"].as_array().unwrap().len(), 6);
        assert_eq!(body["salary_rows"].as_array().unwrap().len(), 1);
        assert_eq!(body["salary_rows"][0]["salary_earned"], "27500.00");
        assert_eq!(body["salary_rows"][0]["effective_days_worked"], "5.50");
        assert_eq!(body["summaries"][0]["paid_leave_used"], 1);
        assert_eq!(
            body["export_file_name"],
            "Attendance_2026-01-05_to_2026-01-11.xlsx"
        );

        let queries = source.queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].employee_id, Some(1));
        assert_eq!(queries[0].offset.local_minus_utc(), 0);
    }

    #[actix_web::test]
    async fn stored_sessions_are_selected_by_local_day() {
        let sessions = vec![
            session(1, "2026-01-01T03:00:00+05:30", 8.0),
            session(1, "2026-01-02T10:00:00+05:30", 8.0),
            session(1, "2026-01-03T10:00:00+05:30", 8.0),
            session(1, "2026-01-05T10:00:00+05:30", 8.0),
            session(1, "2026-01-06T10:00:00+05:30", 8.0),
            session(1, "2026-01-08T01:30:00+05:30", 8.0),
        ];
        let source = StaticSource::new(sessions);
        let mut config = test_config();
        config.session_utc_offset_minutes = 330;
        let app = app!(source.clone(), config);

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2026-01-01&end=2026-01-07")
            .insert_header(bearer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let dates: Vec<_> = body["attendance_rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["date"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            dates,
            ["2026-01-01", "2026-01-02", "2026-01-03", "2026-01-05", "2026-01-06"]
        );
        assert_eq!(body["salary_rows"][0]["effective_days_worked"], "6.00");
        assert_eq!(body["salary_rows"][0]["salary_earned"], "30000.00");

        let queries = source.queries.lock().unwrap();
        assert_eq!(queries[0].offset.local_minus_utc(), 330 * 60);
    }

    #[actix_web::test]
    async fn overlong_ranges_skip_the_fetch() {
        let source = StaticSource::new(week_sessions());
        let app = app!(source.clone());

        for uri in [
            "/api/reports/monthly-status?start=0001-01-01&end=9999-12-31",
            "/api/reports/monthly-status?start=2024-01-01&end=2025-01-01",
        ] {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(bearer())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["attendance_rows"], json!([]));
            assert_eq!(body["salary_rows"], json!([]));
            assert_eq!(body["export_file_name"], Value::Null);
        }
        assert!(source.queries.lock().unwrap().is_empty());

        // a leap year is exactly the limit
        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2024-01-01&end=2024-12-31")
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(source.queries.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn missing_dates_skip_the_fetch() {
        let source = StaticSource::new(week_sessions());
        let app = app!(source.clone());

        for uri in [
            "/api/reports/monthly-status?start=2026-01-05",
            "/api/reports/monthly-status?end=2026-01-11",
            "/api/reports/monthly-status?start=05/01/2026&end=2026-01-11",
        ] {
            let req = test::TestRequest::get()
                .uri(uri)
                .insert_header(bearer())
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["attendance_rows"], json!([]));
            assert_eq!(body["salary_rows"], json!([]));
            assert_eq!(body["export_file_name"], Value::Null);
        }

        assert!(source.queries.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn search_narrows_both_tables() {
        let app = app!(StaticSource::new(week_sessions()));

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2026-01-05&end=2026-01-11&search=emp-002")
            .insert_header(bearer())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["attendance_rows"].as_array().unwrap().len(), 1);
        assert_eq!(body["attendance_rows"][0]["name"], "Employee 2");
        // employee 2 has no salary on file
        assert_eq!(body["salary_rows"], json!([]));
    }

    #[actix_web::test]
    async fn source_failure_is_service_unavailable() {
        let app = app!(StaticSource::failing());

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2026-01-05&end=2026-01-11")
            .insert_header(bearer())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn rejects_missing_and_refresh_tokens() {
        let app = app!(StaticSource::new(Vec::new()));

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2026-01-05&end=2026-01-11")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Missing Authorization header");

        let refresh = issue_test_token(TokenType::Refresh, &test_config().jwt_secret, 600);
        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2026-01-05&end=2026-01-11")
            .insert_header(("Authorization", format!("Bearer {refresh}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
        assert!(body.get("error").is_none());

        let req = test::TestRequest::get()
            .uri("/api/reports/monthly-status?start=2026-01-05&end=2026-01-11")
            .insert_header(("Authorization", "Token abc"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn computes_tables_for_posted_sessions() {
        let app = app!(StaticSource::new(Vec::new()));

        let req = test::TestRequest::post()
            .uri("/api/reports/monthly-status")
            .insert_header(bearer())
            .set_json(json!({
                "start": "2026-01-11",
                "end": "2026-01-11",
                "sessions": [{
                    "employeeId": 5,
                    "employeeName": { "firstName": "Asha", "lastName": "Rao" },
                    "firstLogin": "2026-01-11T09:00:00Z",
                    "lastLogout": "2026-01-11T13:30:00Z",
                    "totalHours": 4.5,
                    "monthlySalary": 30000
                }]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        // a Sunday-only range: attendance kept, no payroll
        assert_eq!(body["attendance_rows"][0]["worked_hours"], "04:30");
        assert_eq!(body["attendance_rows"][0]["last_logout"], "01:30 PM");
        assert_eq!(body["salary_rows"], json!([]));
    }
}
