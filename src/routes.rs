use crate::{api::reports, auth::middleware::auth_middleware, config::Config};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};

pub type LimiterConfig = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP limiter config. The limiter state lives in the config, so every worker built
/// from the same config shares one budget.
fn build_limiter(requests_per_min: u32) -> anyhow::Result<LimiterConfig> {
    let per_ms = if requests_per_min == 0 {
        1
    } else {
        (60_000 / requests_per_min as u64).max(1)
    };
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min.max(1))
        .key_extractor(PeerIpKeyExtractor)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("invalid rate limit: {requests_per_min} per minute"))?;
    Ok(cfg)
}

pub fn configure(
    cfg: &mut web::ServiceConfig,
    config: &Config,
    limiter: &LimiterConfig,
) {
    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(Governor::new(limiter)) // rate limiting
            .configure(report_routes),
    );
}

pub fn protected_limiter(config: &Config) -> anyhow::Result<LimiterConfig> {
    build_limiter(config.rate_protected_per_min)
}

pub fn report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            // /reports/monthly-status
            .service(
                web::resource("/monthly-status")
                    .route(web::get().to(reports::monthly_status))
                    .route(web::post().to(reports::compute_monthly_status)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_builds_for_edge_rates() {
        assert!(build_limiter(0).is_ok());
        assert!(build_limiter(1000).is_ok());
        assert!(build_limiter(120_000).is_ok());
    }
}
