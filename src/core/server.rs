use crate::core::dispatcher::{health_handler, verify_handler, Dispatcher};
use crate::core::registry::VerifierRegistry;
use crate::core::ConfigProvider;
use crate::utils::error::{OracleError, Result};
use axum::routing::{any, get};
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// 建立路由；request_timeout 為整體上限（含讀取 body），逾時回 408
// 方法與類別檢查都交給 dispatcher，錯誤格式才一致
pub fn build_router(dispatcher: Dispatcher, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/verify/:domain", any(verify_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(dispatcher)
}

pub struct OracleServer {
    address: String,
    request_timeout: Duration,
    dispatcher: Dispatcher,
}

impl OracleServer {
    pub fn new<C: ConfigProvider>(config: &C, registry: VerifierRegistry) -> Self {
        Self {
            address: format!("{}:{}", config.bind_address(), config.port()),
            request_timeout: config.read_timeout() + config.write_timeout(),
            dispatcher: Dispatcher::new(registry, config.write_timeout()),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.dispatcher.clone(), self.request_timeout)
    }

    /// 綁定埠號並服務到收到 Ctrl-C 為止
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.address)
            .await
            .map_err(|e| OracleError::ServerError(format!("failed to bind {}: {}", self.address, e)))?;

        tracing::info!(
            "Oracle node listening on {} (domains: {:?})",
            self.address,
            self.dispatcher.registry().domains()
        );

        self.serve(listener).await
    }

    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| OracleError::ServerError(e.to_string()))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining in-flight requests");
}
