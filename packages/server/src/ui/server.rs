//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{debug_session_state, health_check, login, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// SmileSync hub server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app.state(), None);
/// server.run("127.0.0.1", 8081).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    /// CORS で許可するオリジン（`None` の場合は全て許可）
    allowed_origin: Option<HeaderValue>,
}

impl Server {
    pub fn new(state: Arc<AppState>, allowed_origin: Option<HeaderValue>) -> Self {
        Self {
            state,
            allowed_origin,
        }
    }

    fn cors_layer(&self) -> CorsLayer {
        let allow_origin = match &self.allowed_origin {
            Some(origin) => AllowOrigin::exact(origin.clone()),
            None => AllowOrigin::any(),
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::OPTIONS,
                Method::PUT,
                Method::DELETE,
            ])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }

    /// ルーターを構築する
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/login", post(login))
            .route("/api/health", get(health_check))
            .route("/debug/session", get(debug_session_state))
            .layer(self.cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives
    pub async fn run(self, host: &str, port: u16) -> Result<(), std::io::Error> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("SmileSync hub listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener (no shutdown signal)
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        axum::serve(listener, self.router()).await
    }
}
