use std::env;
use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, State, connect_info::ConnectInfo},
    http::{
        Method, Request,
        header::{CONTENT_TYPE, HeaderName, HeaderValue},
    },
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use clap::Parser;
use dotenvy::dotenv;
use governor::{
    Quota, RateLimiter, clock::DefaultClock, middleware::NoOpMiddleware,
    state::keyed::DashMapStateStore,
};
use jm_common::logging::{LogSettings, init_tracing_subscriber, install_tracing_panic_hook};
use jm_common::matching::MatchingProfiles;
use jm_common::notifications::ConnectionRegistry;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod error;
pub mod handlers;

use error::ApiError;
use handlers::{health, notifications, recommendations};

const SHUTDOWN_DRAIN_GRACE: Duration = Duration::from_millis(200);
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone, Parser)]
#[command(name = "jm-api", about = "HTTP API for candidate/job recommendations")]
struct Cli {
    /// Server port
    #[arg(long, env = "PORT", default_value_t = 3001)]
    port: u16,

    /// Comma separated list of allowed CORS origins
    #[arg(long, env = "JM_CORS_ORIGINS", default_value = "http://localhost:5173")]
    cors_origins: String,

    /// Prometheus exporter port
    #[arg(long, env = "JM_METRICS_PORT", default_value_t = 9464)]
    metrics_port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    fn from_cli(cli: &Cli) -> Result<Self, ApiError> {
        let cors_origins = cli
            .cors_origins
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect::<Vec<_>>();

        if cors_origins.iter().any(|origin| origin == "*") {
            return Err(ApiError::BadRequest(
                "JM_CORS_ORIGINS must list explicit origins".into(),
            ));
        }

        Ok(Self {
            port: cli.port,
            cors_origins,
        })
    }

    pub fn for_tests() -> Self {
        Self {
            port: 3001,
            cors_origins: vec!["http://localhost:5173".into()],
        }
    }
}

type IpRateLimiter = RateLimiter<IpAddr, DashMapStateStore<IpAddr>, DefaultClock, NoOpMiddleware>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub per_sec: u64,
    pub burst: u32,
}

impl RateLimitConfig {
    fn parse_env<T: std::str::FromStr + PartialOrd + Default>(name: &str) -> Option<T> {
        env::var(name)
            .ok()
            .and_then(|value| value.trim().parse::<T>().ok())
            .filter(|value| *value > T::default())
    }

    fn from_env() -> Self {
        Self {
            per_sec: Self::parse_env("JM_RATE_LIMIT_PER_SEC").unwrap_or(20),
            burst: Self::parse_env("JM_RATE_LIMIT_BURST").unwrap_or(40),
        }
    }
}

fn build_ip_limiter(config: &RateLimitConfig) -> Arc<IpRateLimiter> {
    let nanos_per_token = (1_000_000_000u64 / config.per_sec.max(1)).max(1);
    let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);
    let quota = Quota::with_period(Duration::from_nanos(nanos_per_token))
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
        .allow_burst(burst);

    Arc::new(RateLimiter::keyed(quota))
}

pub struct AppState {
    pub config: AppConfig,
    pub profiles: MatchingProfiles,
    pub registry: ConnectionRegistry,
    rate_limiter: Arc<IpRateLimiter>,
    pub readiness: AtomicBool,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig, profiles: MatchingProfiles, rate_limits: &RateLimitConfig) -> Self {
        Self {
            config,
            profiles,
            registry: ConnectionRegistry::new(),
            rate_limiter: build_ip_limiter(rate_limits),
            readiness: AtomicBool::new(true),
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
}

fn request_ip<B>(req: &Request<B>) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
}

async fn global_rate_limit(
    State(state): State<SharedState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(client_ip) = request_ip(&req) {
        if state.rate_limiter.check_key(&client_ip).is_err() {
            return Err(ApiError::TooManyRequests("rate limit exceeded".into()));
        }
    }

    Ok(next.run(req).await)
}

async fn attach_request_id_context(req: Request<Body>, next: Next) -> Response {
    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    error::with_request_id(request_id, next.run(req)).await
}

pub fn create_router(state: SharedState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_header = request_id_header.clone();

    let trace = TraceLayer::new_for_http().make_span_with(move |request: &Request<Body>| {
        let request_id = request
            .headers()
            .get(&trace_header)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("");

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    let api_routes = Router::new()
        .route("/recommendations", post(recommendations::recommend))
        .route(
            "/users/recommendations",
            post(recommendations::recommend_for_profile),
        )
        .route("/jobs/score", post(recommendations::score_job))
        .route(
            "/resume/recommendations",
            post(recommendations::recommend_from_resume),
        )
        .route("/notifications/fanout", post(notifications::fanout))
        .route("/connections", post(notifications::connect))
        .route(
            "/connections/:connection_id",
            delete(notifications::disconnect),
        );

    Router::new()
        .route("/livez", get(health::livez))
        .route("/readyz", get(health::readyz))
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            global_rate_limit,
        ))
        .layer(middleware::from_fn(attach_request_id_context))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(trace)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(
            request_id_header,
            MakeRequestUuid::default(),
        ))
        .layer(cors)
        .with_state(state)
}

pub fn test_state() -> SharedState {
    Arc::new(AppState::new(
        AppConfig::for_tests(),
        MatchingProfiles::default(),
        &RateLimitConfig {
            per_sec: 1_000,
            burst: 1_000,
        },
    ))
}

pub async fn run() -> Result<(), ApiError> {
    dotenv().ok();
    let log_settings = LogSettings::from_env();
    init_tracing_subscriber(env!("CARGO_PKG_NAME"), &log_settings);
    install_tracing_panic_hook(env!("CARGO_PKG_NAME"), &log_settings);

    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    let profiles = MatchingProfiles::from_env()?;
    let _ = jm_metrics::init_metrics("JM_METRICS_PORT", cli.metrics_port);

    info!(
        recommendation_weights = ?profiles.recommendations.weights,
        resume_weights = ?profiles.resume.weights,
        default_limit = profiles.default_limit,
        "matching profiles loaded"
    );

    let state = Arc::new(AppState::new(
        config.clone(),
        profiles,
        &RateLimitConfig::from_env(),
    ));

    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    let app = create_router(state.clone());

    info!(%addr, "jm-api listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    let service = app.into_make_service_with_connect_info::<SocketAddr>();

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(())
}

async fn shutdown_signal(state: SharedState) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
            let _ = sigterm.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    state.readiness.store(false, Ordering::SeqCst);

    // Let load balancers observe /readyz failing before connections stop.
    tokio::time::sleep(SHUTDOWN_DRAIN_GRACE).await;
}
