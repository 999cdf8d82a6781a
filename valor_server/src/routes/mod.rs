//! HTTP routes for the land value API.

pub mod api;
pub mod openapi;

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use utoipa::IntoParams;

use crate::config::ValorConfig;
use crate::dataset::Dataset;
use crate::error::{ErrorJson, LookupError};

/// Shared state for route handlers. Both halves are immutable after startup.
#[derive(Clone)]
pub struct ValorRouterState {
    pub dataset: Arc<Dataset>,
    pub config: Arc<ValorConfig>,
}

/// Build the API router.
pub fn valor_router(state: ValorRouterState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/departamentos", get(departments_handler))
        .route("/distritos", get(districts_handler))
        .route("/distrito/{ubigeo}", get(district_handler))
        .route("/valor-terreno", get(valuation_handler))
        .route(api::DOCS_PATH, get(openapi::openapi_spec))
        .route("/openapi.json", get(openapi::openapi_spec))
        .with_state(state)
}

fn bad_query(rejection: QueryRejection) -> LookupError {
    LookupError::BadRequest(rejection.body_text())
}

fn bad_path(rejection: PathRejection) -> LookupError {
    LookupError::BadRequest(rejection.body_text())
}

/// Service banner and dataset summary.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service banner", body = api::IndexJson)
    ),
    tag = "Servicio"
)]
async fn index_handler(State(state): State<ValorRouterState>) -> Json<api::IndexJson> {
    crate::metrics::request_received("index");
    Json(api::index(&state.dataset, &state.config))
}

/// All departments with their partition keys.
#[utoipa::path(
    get,
    path = "/departamentos",
    responses(
        (status = 200, description = "Departments in key order", body = api::DepartmentsJson)
    ),
    tag = "Consulta"
)]
async fn departments_handler(State(state): State<ValorRouterState>) -> Json<api::DepartmentsJson> {
    crate::metrics::request_received("departamentos");
    Json(api::departments(&state.dataset))
}

#[derive(serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DistrictsQuery {
    /// Partition key (`15_LIMA`) or department name, accents and case ignored.
    pub departamento: String,
}

/// Ubigeos of one department, ascending.
#[utoipa::path(
    get,
    path = "/distritos",
    params(DistrictsQuery),
    responses(
        (status = 200, description = "District codes", body = Vec<api::DistrictRefJson>),
        (status = 400, description = "Missing parameter", body = ErrorJson),
        (status = 404, description = "Unknown department", body = ErrorJson)
    ),
    tag = "Consulta"
)]
async fn districts_handler(
    State(state): State<ValorRouterState>,
    query: Result<Query<DistrictsQuery>, QueryRejection>,
) -> Result<Json<Vec<api::DistrictRefJson>>, LookupError> {
    crate::metrics::request_received("distritos");
    let Query(query) = query.map_err(bad_query)?;

    api::districts(&state.dataset, &query.departamento).map(Json)
}

/// Full record of one district.
#[utoipa::path(
    get,
    path = "/distrito/{ubigeo}",
    params(
        ("ubigeo" = String, Path, description = "District code, zero-padded to six digits if shorter")
    ),
    responses(
        (status = 200, description = "District record", body = api::DistrictJson),
        (status = 400, description = "Malformed ubigeo", body = ErrorJson),
        (status = 404, description = "Unknown ubigeo", body = ErrorJson)
    ),
    tag = "Consulta"
)]
async fn district_handler(
    State(state): State<ValorRouterState>,
    ubigeo: Result<Path<String>, PathRejection>,
) -> Result<Json<api::DistrictJson>, LookupError> {
    crate::metrics::request_received("distrito");
    let Path(ubigeo) = ubigeo.map_err(bad_path)?;

    api::district(&state.dataset, &state.config, &ubigeo).map(Json)
}

#[derive(serde::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValuationQuery {
    /// District code.
    pub ubigeo: String,
    /// `urbano` or `rustico`.
    pub tipo: String,
    /// Land area: m² for urban, hectares for rustic. Finite and >= 0.
    pub area: f64,
}

/// Official min/max value of a land area in a district.
#[utoipa::path(
    get,
    path = "/valor-terreno",
    params(ValuationQuery),
    responses(
        (status = 200, description = "Value estimate", body = api::ValuationJson),
        (status = 400, description = "Bad type, ubigeo or area", body = ErrorJson),
        (status = 404, description = "Unknown ubigeo or no values for the type", body = ErrorJson)
    ),
    tag = "Valuación"
)]
async fn valuation_handler(
    State(state): State<ValorRouterState>,
    query: Result<Query<ValuationQuery>, QueryRejection>,
) -> Result<Json<api::ValuationJson>, LookupError> {
    crate::metrics::request_received("valor_terreno");
    let Query(query) = query.map_err(bad_query)?;

    api::valuation(
        &state.dataset,
        &state.config,
        &query.ubigeo,
        &query.tipo,
        query.area,
    )
    .map(Json)
    .inspect_err(|e| tracing::debug!(ubigeo = %query.ubigeo, tipo = %query.tipo, "Valuation rejected: {e}"))
}
