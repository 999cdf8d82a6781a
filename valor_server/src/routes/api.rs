//! JSON bodies for the lookup API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ValorConfig;
use crate::dataset::Dataset;
use crate::error::LookupError;
use crate::models::district::DistrictRecord;
use crate::services::department_service::{self, Department};
use crate::services::valuation_service::{self, Valuation};

pub const ENDPOINTS: [&str; 4] = [
    "/departamentos",
    "/distritos",
    "/distrito/{ubigeo}",
    "/valor-terreno",
];

/// Where the OpenAPI document is served.
pub const DOCS_PATH: &str = "/docs";

/// Service banner returned by `/`.
#[derive(Debug, Serialize, ToSchema)]
pub struct IndexJson {
    pub mensaje: String,
    #[schema(value_type = String)]
    pub docs: &'static str,
    #[schema(value_type = Vec<String>)]
    pub endpoints: Vec<&'static str>,
    pub registros: usize,
    pub departamentos: usize,
    pub cargado: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepartmentsJson {
    pub departamentos: Vec<Department>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistrictRefJson {
    pub ubigeo: String,
}

/// Source attribution shared by district-level responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct SourceJson {
    pub fuente: String,
    pub anio: i32,
    pub nota: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DistrictJson {
    #[serde(flatten)]
    pub record: DistrictRecord,
    #[serde(flatten)]
    pub source: SourceJson,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValuationJson {
    #[serde(flatten)]
    pub valuation: Valuation,
    #[serde(flatten)]
    pub source: SourceJson,
}

impl SourceJson {
    fn from_config(config: &ValorConfig) -> Self {
        Self {
            fuente: config.fuente.clone(),
            anio: config.anio,
            nota: config.nota.clone(),
        }
    }
}

pub fn index(dataset: &Dataset, config: &ValorConfig) -> IndexJson {
    IndexJson {
        mensaje: format!(
            "API MEF - Valor oficial de terrenos {} (Reporte Rápido)",
            config.anio
        ),
        docs: DOCS_PATH,
        endpoints: ENDPOINTS.to_vec(),
        registros: dataset.len(),
        departamentos: dataset.department_count(),
        cargado: dataset.loaded_at(),
    }
}

pub fn departments(dataset: &Dataset) -> DepartmentsJson {
    DepartmentsJson {
        departamentos: department_service::list_departments(dataset),
    }
}

pub fn districts(dataset: &Dataset, departamento: &str) -> Result<Vec<DistrictRefJson>, LookupError> {
    let ubigeos = department_service::list_districts(dataset, departamento)?;
    Ok(ubigeos
        .into_iter()
        .map(|u| DistrictRefJson {
            ubigeo: u.to_string(),
        })
        .collect())
}

pub fn district(
    dataset: &Dataset,
    config: &ValorConfig,
    ubigeo: &str,
) -> Result<DistrictJson, LookupError> {
    let record = valuation_service::find_district(dataset, ubigeo)?;
    Ok(DistrictJson {
        record: record.clone(),
        source: SourceJson::from_config(config),
    })
}

pub fn valuation(
    dataset: &Dataset,
    config: &ValorConfig,
    ubigeo: &str,
    tipo: &str,
    area: f64,
) -> Result<ValuationJson, LookupError> {
    let valuation = valuation_service::estimate(dataset, ubigeo, tipo, area)?;
    crate::metrics::valuation_computed(valuation.tipo.as_str());
    Ok(ValuationJson {
        valuation,
        source: SourceJson::from_config(config),
    })
}
