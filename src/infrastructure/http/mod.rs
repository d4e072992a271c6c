pub mod error_details;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorError,
    GovernorLayer,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{
    controllers::{
        access_token::AccessTokenController, fallback, health, tts::TtsController,
        voice::VoiceController,
    },
    domain::{access_token::AccessTokenService, tts::TtsService, voice::VoiceService},
    error::{panic_response, AppError},
    infrastructure::{
        auth::{cartesia_auth_middleware, request_id_middleware},
        config::Config,
        repositories::{
            CartesiaAccessTokenRepository, CartesiaClient, CartesiaTtsRepository,
            CartesiaVoiceRepository, NoopVoiceCache, RetryPolicy,
        },
    },
};
use error_details::error_details_middleware;

pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Controllers the router dispatches to
pub struct Controllers {
    pub tts: Arc<TtsController>,
    pub voice: Arc<VoiceController>,
    pub access_token: Arc<AccessTokenController>,
}

/// Wire repositories, services and controllers for the given configuration
pub fn create_app(config: Arc<Config>) -> anyhow::Result<Router> {
    // === DEPENDENCY INJECTION SETUP ===
    // 1. Provider client and repositories
    let client = CartesiaClient::from_config(&config).context("failed to build Cartesia client")?;
    let retry_policy = RetryPolicy::new(
        config.cartesia_max_attempts,
        Duration::from_millis(config.cartesia_retry_base_delay_ms),
    );

    let tts_repo = Arc::new(CartesiaTtsRepository::new(client.clone(), retry_policy));
    let voice_repo = Arc::new(CartesiaVoiceRepository::new(client.clone()));
    let token_repo = Arc::new(CartesiaAccessTokenRepository::new(client));

    // 2. Services
    let tts_service = Arc::new(TtsService::new(tts_repo));
    let voice_service = Arc::new(VoiceService::new(voice_repo, Arc::new(NoopVoiceCache)));
    let token_service = Arc::new(AccessTokenService::new(token_repo));

    // 3. Controllers
    let controllers = Controllers {
        tts: Arc::new(TtsController::new(tts_service)),
        voice: Arc::new(VoiceController::new(voice_service)),
        access_token: Arc::new(AccessTokenController::new(token_service)),
    };

    build_router(config, controllers)
}

/// Routes plus the cross-cutting layers
pub fn build_router(config: Arc<Config>, controllers: Controllers) -> anyhow::Result<Router> {
    // Synthesis checks the body before the credential, so no auth layer here
    let tts_routes = Router::new()
        .route("/api/tts", post(TtsController::synthesize))
        .with_state(controllers.tts);

    // Pass-through routes require the version header and a bearer credential
    let voice_routes = Router::new()
        .route("/cartesia/voices", get(VoiceController::list_voices))
        .route("/cartesia/voices/:id", get(VoiceController::get_voice))
        .with_state(controllers.voice)
        .route_layer(middleware::from_fn(cartesia_auth_middleware));

    let token_routes = Router::new()
        .route(
            "/cartesia/auth/access-token",
            post(AccessTokenController::generate),
        )
        .route(
            "/cartesia/auth/access-token/tts",
            post(AccessTokenController::generate_tts),
        )
        .route(
            "/cartesia/auth/access-token/stt",
            post(AccessTokenController::generate_stt),
        )
        .route(
            "/cartesia/auth/access-token/full",
            post(AccessTokenController::generate_full),
        )
        .with_state(controllers.access_token.clone())
        .route_layer(middleware::from_fn(cartesia_auth_middleware));

    // Local check, no credential needed
    let validate_routes = Router::new()
        .route(
            "/cartesia/auth/validate-token",
            post(AccessTokenController::validate_token),
        )
        .with_state(controllers.access_token);

    let app = Router::new()
        .route("/health", get(health::health))
        .merge(tts_routes)
        .merge(voice_routes)
        .merge(token_routes)
        .merge(validate_routes)
        .fallback(fallback::not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(
            config.clone(),
            error_details_middleware,
        ))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    let app = if config.rate_limit_enabled {
        with_rate_limit(app, &config)?
    } else {
        app
    };

    let app = app
        .layer(cors_layer(&config))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-dns-prefetch-control"),
            HeaderValue::from_static("off"),
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http());

    Ok(app)
}

/// Token bucket per client IP: `max` requests per window, refilled evenly
fn with_rate_limit(app: Router, config: &Config) -> anyhow::Result<Router> {
    let max_requests = config.rate_limit_max_requests.max(1);
    let replenish_secs = (config.rate_limit_window_secs / u64::from(max_requests)).max(1);

    let governor_config = GovernorConfigBuilder::default()
        .per_second(replenish_secs)
        .burst_size(max_requests)
        .key_extractor(SmartIpKeyExtractor)
        .error_handler(rate_limit_response)
        .finish()
        .context("invalid rate limit configuration")?;

    tracing::info!(
        max_requests,
        window_secs = config.rate_limit_window_secs,
        "Rate limiting enabled"
    );

    Ok(app.layer(GovernorLayer {
        config: Arc::new(governor_config),
    }))
}

/// Limiter rejections answer in the same envelope as every other error
fn rate_limit_response(error: GovernorError) -> Response {
    match error {
        GovernorError::TooManyRequests { wait_time, headers } => {
            tracing::warn!(wait_time, "Rate limit exceeded");
            let mut response = AppError::RateLimited(
                "Too many requests from this IP, please try again later.".to_string(),
            )
            .into_response();
            if let Some(headers) = headers {
                response.headers_mut().extend(headers);
            }
            response
        }
        GovernorError::UnableToExtractKey => {
            AppError::Internal("unable to determine client address".to_string()).into_response()
        }
        GovernorError::Other { msg, .. } => {
            AppError::Internal(msg.unwrap_or_else(|| "rate limiter failure".to_string()))
                .into_response()
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = config.cors_allowed_origins.trim();
    let allow_origin = if origins == "*" {
        AllowOrigin::from(Any)
    } else {
        let list: Vec<HeaderValue> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("cartesia-version"),
        ])
        .expose_headers([
            HeaderName::from_static("x-cartesia-file-id"),
            HeaderName::from_static("x-request-id"),
        ])
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(config: Arc<Config>, app: Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
