//! Error types: dataset loading failures and per-request lookup failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Failure to load the district CSV at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// A request that cannot be answered from the dataset.
#[derive(Debug, Error, PartialEq)]
pub enum LookupError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    /// The row exists but lacks the requested value pair.
    #[error("{0}")]
    NoData(String),
}

impl LookupError {
    pub fn department_not_found() -> Self {
        Self::NotFound("Departamento no encontrado".to_string())
    }

    pub fn ubigeo_not_found() -> Self {
        Self::NotFound("Ubigeo no encontrado".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::NoData(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Metric label for this kind of miss.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BadRequest(_) => "bad_request",
            Self::NoData(_) => "no_data",
        }
    }
}

/// Body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorJson {
    pub detail: String,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        crate::metrics::lookup_failed(self.kind());
        let status = self.status();
        (status, Json(ErrorJson { detail: self.to_string() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_data_maps_to_not_found() {
        let err = LookupError::NoData("No hay valores para ese tipo en este ubigeo".into());
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.kind(), "no_data");
    }

    #[test]
    fn bad_request_status() {
        let err = LookupError::BadRequest("tipo debe ser 'urbano' o 'rustico'".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "tipo debe ser 'urbano' o 'rustico'");
    }

    #[test]
    fn response_status_matches_kind() {
        let response = LookupError::ubigeo_not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
