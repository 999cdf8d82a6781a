//! OpenAPI document generation and serving.

use axum::{http::StatusCode, response::IntoResponse};
use utoipa::OpenApi;

use super::api;
use crate::error::ErrorJson;
use crate::models::district::DistrictRecord;
use crate::models::land_type::LandType;
use crate::services::department_service::Department;
use crate::services::valuation_service::Valuation;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "API Valor Oficial de Terrenos - MEF",
        description = "Valores arancelarios oficiales por distrito (urbano y rústico)"
    ),
    paths(
        super::index_handler,
        super::departments_handler,
        super::districts_handler,
        super::district_handler,
        super::valuation_handler,
    ),
    components(schemas(
        api::IndexJson,
        api::DepartmentsJson,
        api::DistrictRefJson,
        api::SourceJson,
        api::DistrictJson,
        api::ValuationJson,
        Department,
        DistrictRecord,
        LandType,
        Valuation,
        ErrorJson,
    )),
    tags(
        (name = "Servicio", description = "Service banner"),
        (name = "Consulta", description = "Department and district lookups"),
        (name = "Valuación", description = "Land value estimates"),
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi_spec() -> impl IntoResponse {
    let doc = ApiDoc::openapi()
        .to_json()
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e));
    (StatusCode::OK, [("content-type", "application/json")], doc)
}
