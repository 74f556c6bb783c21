//! credit — company lookup service.
//!
//! Serves `GET /company` on CREDIT_BIND_ADDR and `GET /metrics` on
//! CREDIT_METRICS_ADDR. See `credit::config` for the environment variables.

use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Context;
use credit::bureaus::{BureauService, MetricsRegistry, ReceitaFederalClient};
use credit::http::{create_metrics_router, create_router, AppState};
use credit::store::CompanyStore;
use credit::Config;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,credit=debug,tower_http=info".into()),
        )
        .init();

    // Registered once here, shared by the bureau client and the scrape endpoint
    let registry = Arc::new(MetricsRegistry::new().context("failed to register metrics")?);

    let bureau: Arc<dyn BureauService> = Arc::new(
        ReceitaFederalClient::from_config(&config, registry.bureau_metrics().clone())
            .context("failed to create HTTP client")?,
    );
    tracing::info!(
        url = %config.receita_federal_url,
        timeout_secs = config.bureau_timeout.as_secs(),
        "Receita Federal client ready"
    );

    let companies = company_store(&config).await?;

    let app = create_router(AppState::new(companies, bureau));
    let metrics_app = create_metrics_router(Arc::clone(&registry));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;
    let metrics_listener = TcpListener::bind(config.metrics_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.metrics_addr))?;

    tracing::info!("credit listening on {}", config.bind_addr);
    tracing::info!("metrics listening on {}", config.metrics_addr);

    tokio::select! {
        res = axum::serve(listener, app).into_future() => res.context("api server error")?,
        res = axum::serve(metrics_listener, metrics_app).into_future() => res.context("metrics server error")?,
    }

    Ok(())
}

#[cfg(feature = "database")]
async fn company_store(config: &Config) -> anyhow::Result<Arc<dyn CompanyStore>> {
    use credit::store::{InMemoryCompanyStore, PgCompanyStore};
    use sqlx::postgres::PgPoolOptions;

    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, companies are kept in memory");
        return Ok(Arc::new(InMemoryCompanyStore::new()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("failed to connect to database")?;
    tracing::info!("Connected to database");

    let store = PgCompanyStore::new(pool);
    store
        .ensure_schema()
        .await
        .context("failed to create companies table")?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "database"))]
async fn company_store(config: &Config) -> anyhow::Result<Arc<dyn CompanyStore>> {
    use credit::store::InMemoryCompanyStore;

    if config.database_url.is_some() {
        tracing::warn!("DATABASE_URL ignored: built without the `database` feature");
    }
    tracing::warn!("companies are kept in memory");
    Ok(Arc::new(InMemoryCompanyStore::new()))
}
