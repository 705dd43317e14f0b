//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::core::auth::AuthState;
use crate::core::module::Module;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating HTTP servers with auto-registered routes
///
/// # Example
///
/// ```ignore
/// let state = AppState::new(store.clone(), config.reports.clone());
/// ServerBuilder::new()
///     .with_auth(AuthState::new(provider, AuthPolicy::Authenticated))
///     .register_module(OrderDeskModule::new(state))
///     .serve("127.0.0.1:8000")
///     .await?;
/// ```
pub struct ServerBuilder {
    service_name: String,
    entity_registry: EntityRegistry,
    modules: Vec<Arc<dyn Module>>,
    public_routes: Vec<Router>,
    custom_routes: Vec<Router>,
    auth: Option<AuthState>,
    cors: bool,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            service_name: env!("CARGO_PKG_NAME").to_string(),
            entity_registry: EntityRegistry::new(),
            modules: Vec::new(),
            public_routes: Vec::new(),
            custom_routes: Vec::new(),
            auth: None,
            cors: false,
        }
    }

    /// Name reported by `/health`
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Add custom routes behind the authentication layer
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Add routes that never require credentials
    pub fn with_public_routes(mut self, routes: Router) -> Self {
        self.public_routes.push(routes);
        self
    }

    /// Require authentication on every entity and custom route
    pub fn with_auth(mut self, auth: AuthState) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Enable a permissive CORS layer
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Register a module
    ///
    /// This will:
    /// 1. Register all entities from the module
    /// 2. Collect the module's public routes
    pub fn register_module(mut self, module: impl Module + 'static) -> Self {
        let module = Arc::new(module);

        module.register_entities(&mut self.entity_registry);
        if let Some(routes) = module.public_routes() {
            self.public_routes.push(routes);
        }
        tracing::debug!(
            module = module.name(),
            version = module.version(),
            entities = ?module.entity_types(),
            "module registered"
        );

        self.modules.push(module);
        self
    }

    /// Names of the registered modules
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Build the host holding every collected component
    pub fn build_host(self) -> ServerHost {
        let mut host = ServerHost::new(self.service_name, self.entity_registry);
        host.public_routes = self.public_routes;
        host.custom_routes = self.custom_routes;
        host.auth = self.auth;
        host.cors = self.cors;
        host
    }

    /// Build the final REST router
    pub fn build(self) -> Router {
        RestExposure::build_router(self.build_host())
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for a shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
