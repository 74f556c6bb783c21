//! HTTP routes for the credit service.
//!
//! ## Endpoints
//!
//! - `GET /company?cnpj=..&cpf=..` - fetch a company from the bureau and save it
//! - `GET /metrics` - Prometheus scrape endpoint, served by a separate router

pub mod error;

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::bureaus::{BureauService, SharedMetricsRegistry};
use crate::models::Company;
use crate::store::CompanyStore;

pub use error::AppError;

/// Collaborators shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub companies: Arc<dyn CompanyStore>,
    pub bureau: Arc<dyn BureauService>,
}

impl AppState {
    pub fn new(companies: Arc<dyn CompanyStore>, bureau: Arc<dyn BureauService>) -> Self {
        Self { companies, bureau }
    }
}

/// Query params for `GET /company`. Missing values arrive as empty strings
/// and are forwarded to the bureau as-is. When a key repeats, the first
/// occurrence wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SaveCompanyQuery {
    pub cnpj: String,
    pub cpf: String,
}

impl SaveCompanyQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut cnpj = None;
        let mut cpf = None;
        for (key, value) in pairs {
            match key.as_str() {
                "cnpj" if cnpj.is_none() => cnpj = Some(value),
                "cpf" if cpf.is_none() => cpf = Some(value),
                _ => {}
            }
        }
        Self {
            cnpj: cnpj.unwrap_or_default(),
            cpf: cpf.unwrap_or_default(),
        }
    }
}

/// GET /company
///
/// Fetches the company from the bureau, projects `{ id: cnpj, name:
/// nomeEmpresarial }` and saves it. Responds `201` with an empty body.
async fn save_company(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<StatusCode, AppError> {
    let query = SaveCompanyQuery::from_pairs(pairs);
    let empresa = state
        .bureau
        .fetch(&query.cnpj, &query.cpf)
        .await
        .map_err(|e| {
            tracing::error!(cnpj = %query.cnpj, error = %e, "bureau fetch failed");
            e
        })?;

    let company = Company {
        id: query.cnpj,
        name: empresa.nome_empresarial,
    };

    state.companies.save_company(&company).await.map_err(|e| {
        tracing::error!(cnpj = %company.id, error = %e, "failed to save company");
        e
    })?;

    tracing::info!(cnpj = %company.id, name = %company.name, "company saved");
    Ok(StatusCode::CREATED)
}

/// Create the API router. Only `GET /company` is routed; axum answers 405
/// for other methods on it and 404 for any other path.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/company", get(save_company))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /metrics
async fn metrics(State(registry): State<SharedMetricsRegistry>) -> Response {
    match registry.encode_text() {
        Ok(body) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Create the metrics router, served on its own listener.
pub fn create_metrics_router(registry: SharedMetricsRegistry) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .with_state(registry)
}
