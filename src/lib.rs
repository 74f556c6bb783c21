//! credit - company registration lookups
//!
//! Fetches company data from the Receita Federal bureau, projects it into a
//! [`Company`] record and persists it through a [`CompanyStore`].
//!
//! ## Flow
//! `GET /company?cnpj=..&cpf=..` -> bureau fetch (metrics recorded) ->
//! projection -> store upsert -> `201 Created`

// Runtime configuration from the environment
pub mod config;

// Persisted company record
pub mod models;

// External bureau clients and their metrics
pub mod bureaus;

// Company persistence
pub mod store;

// HTTP routes
pub mod http;

pub use bureaus::{BureauError, BureauService, Empresa, MetricsRegistry, ReceitaFederalClient};
pub use config::Config;
pub use models::Company;
pub use store::{CompanyStore, InMemoryCompanyStore, StoreError};
