use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;
use voice_gateway::infrastructure::config::{Config, Environment, LogFormat};
use voice_gateway::infrastructure::http::create_app;
use wiremock::MockServer;

pub mod api_client;

use api_client::TestClient;

pub const VOICE_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

/// A running gateway wired to a mock Cartesia API
pub struct TestContext {
    pub client: TestClient,
    pub upstream: MockServer,
    #[allow(dead_code)]
    pub config: Config,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            // Fresh mock upstream per test, so recorded calls never leak between tests
            let upstream = MockServer::start().await;

            let config = Config {
                host: "127.0.0.1".to_string(),
                port: 0, // Will be assigned by the OS
                environment: Environment::Development,
                log_format: LogFormat::Pretty,
                cartesia_api_url: upstream.uri(),
                cartesia_timeout_ms: 2_000,
                cartesia_max_attempts: 3,
                // Real backoff shape, shortened
                cartesia_retry_base_delay_ms: 10,
                rate_limit_enabled: false,
                ..Config::default()
            };

            let app = create_app(Arc::new(config.clone())).expect("Failed to create app");
            let base_url = spawn_server(app).await.expect("Failed to start server");

            Self {
                client: TestClient::new(&base_url),
                upstream,
                config,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // MockServer verifies `expect(..)` counts when dropped
        }
    }
}

impl TestContext {
    /// Number of requests the mock upstream received
    pub async fn upstream_calls(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or(0)
    }
}

async fn spawn_server(app: Router) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    Ok(format!("http://{}", addr))
}
