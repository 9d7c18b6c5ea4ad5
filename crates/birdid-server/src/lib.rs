mod cors;
mod health;

use std::net::SocketAddr;

use axum::Router;
use birdid_config::Config;
use tower_http::trace::TraceLayer;

/// Assembled relay server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an upstream HTTP client cannot be constructed
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let identifier = birdid_identify::build_identifier(config)?;
        let endpoints = birdid_identify::identify_router(identifier);

        let mut app = Router::new();

        // Health check stays at the root regardless of the base path
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        let base_path = config.server.base_path.as_str();
        app = if base_path.is_empty() {
            app.merge(endpoints)
        } else {
            app.nest(base_path, endpoints)
        };

        tracing::debug!(
            base_path,
            audio = birdid_identify::AUDIO_PATH,
            image = birdid_identify::IMAGE_PATH,
            "identification routes mounted"
        );

        // Apply middleware layers (innermost first)
        app = app.layer(TraceLayer::new_for_http());

        // Pre-flight never reaches this layer; everything else gets the allowed headers
        if let Some(layer) = cors::allow_headers_layer(&config.server.cors) {
            app = app.layer(layer);
        }

        // CORS is outermost so errors and pre-flight carry the headers too
        app = app.layer(cors::cors_layer(&config.server.cors));

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
