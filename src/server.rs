//! Server runtime
//!
//! [`ServerHandle`] owns the whole lifecycle: storage selection, migrations,
//! account bootstrap, metrics recorder, the HTTP listener and graceful
//! shutdown. The CLI binary is a thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::application::UserService;
use crate::config::{AppConfig, StorageBackend};
use crate::domain::RepositoryProvider;
use crate::infrastructure::{
    init_database, run_migrations, JsonRepositoryProvider, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::{build_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

pub struct ServerOptions {
    pub config: AppConfig,
    /// Apply pending migrations (database backend only)
    pub auto_migrate: bool,
    /// Create the configured accounts when no user exists
    pub bootstrap_accounts: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            bootstrap_accounts: true,
        }
    }
}

/// A running server.
///
/// ```rust,no_run
/// use certhub::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), certhub::server::BoxError> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Address actually bound; differs from the config when port 0 was asked for
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

/// The global recorder can be installed once per process; later starts in
/// the same process reuse it.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();
    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Metrics disabled: recorder could not be installed");
                None
            }
        })
        .clone()
}

/// Build the repository provider for the configured backend.
pub async fn open_storage(
    config: &AppConfig,
    auto_migrate: bool,
) -> Result<(Arc<dyn RepositoryProvider>, Option<DatabaseConnection>), BoxError> {
    match config.storage.backend {
        StorageBackend::Database => {
            let db = init_database(&config.storage.database()).await?;
            if auto_migrate {
                info!("Running database migrations...");
                run_migrations(&db).await?;
            }
            let repos: Arc<dyn RepositoryProvider> =
                Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
            Ok((repos, Some(db)))
        }
        StorageBackend::Json => {
            let repos = JsonRepositoryProvider::open(&config.storage.data_dir).await?;
            Ok((Arc::new(repos), None))
        }
    }
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, BoxError> {
        let config = opts.config;
        config.validate()?;

        info!(
            backend = config.storage.backend.as_str(),
            "Starting CertHub..."
        );

        let metrics = prometheus_handle();
        let (repos, db) = open_storage(&config, opts.auto_migrate).await?;

        if opts.bootstrap_accounts && config.bootstrap.enabled {
            let users = UserService::new(repos.clone());
            match users.bootstrap(&config.bootstrap.new_accounts()).await {
                Ok(0) => {}
                Ok(created) => {
                    info!(created, "Default accounts created");
                    warn!("Change the default account passwords immediately");
                }
                Err(e) => error!(error = %e, "Account bootstrap failed"),
            }
        }

        let jwt = config.security.jwt();
        info!(hours = jwt.expiration_hours, "Session lifetime configured");

        let state = AppState::new(repos.clone(), jwt, config.security.secure_cookies);
        let router = build_router(state, metrics, config.server.static_dir.clone());

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let signal = shutdown.signal();
        let api_task = tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    signal.wait().await;
                    info!("HTTP server received shutdown signal");
                })
                .await;
            if let Err(e) = served {
                error!("HTTP server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGINT/SIGTERM.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the HTTP server to drain, bounded by `server.shutdown_timeout`,
    /// then close the database pool.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let drained = shutdown
            .shutdown_with_cleanup(|| async move {
                if let Err(e) = api_task.await {
                    error!("HTTP server task panicked: {}", e);
                }
            })
            .await;
        if !drained {
            warn!("In-flight requests were abandoned");
        }

        if let Some(db) = db {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            }
        }

        info!("CertHub shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Install the global tracing subscriber. Call once, before
/// [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.logging.format.eq_ignore_ascii_case("json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
