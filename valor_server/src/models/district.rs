//! District valuation row: one ubigeo with its official min/max land values.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

static UBIGEO_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{1,6}$").unwrap());

/// Width of a district ubigeo.
pub const UBIGEO_WIDTH: usize = 6;

/// A row as it appears in `resumen_distrito.csv`, before any cleanup.
#[derive(Debug, Deserialize)]
pub struct DistrictRow {
    pub ubigeo: Option<String>,
    pub departamento_folder: Option<String>,
    pub dpto: Option<String>,
    pub prov: Option<String>,
    pub dist: Option<String>,
    pub urb_min_soles_m2: Option<f64>,
    pub urb_max_soles_m2: Option<f64>,
    pub rus_min_soles_ha: Option<f64>,
    pub rus_max_soles_ha: Option<f64>,
    pub urbano_pdf: Option<String>,
    pub rustico_pdf: Option<String>,
}

/// A cleaned district row held in memory for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DistrictRecord {
    pub ubigeo: String,
    #[serde(rename = "departamento_folder")]
    pub department_key: Option<String>,
    #[serde(rename = "dpto")]
    pub department: Option<String>,
    #[serde(rename = "prov")]
    pub province: Option<String>,
    #[serde(rename = "dist")]
    pub district: Option<String>,
    #[serde(rename = "urb_min_soles_m2")]
    pub urban_min: Option<f64>,
    #[serde(rename = "urb_max_soles_m2")]
    pub urban_max: Option<f64>,
    #[serde(rename = "rus_min_soles_ha")]
    pub rustic_min: Option<f64>,
    #[serde(rename = "rus_max_soles_ha")]
    pub rustic_max: Option<f64>,
    #[serde(rename = "urbano_pdf")]
    pub urban_pdf: Option<String>,
    #[serde(rename = "rustico_pdf")]
    pub rustic_pdf: Option<String>,
}

impl DistrictRow {
    /// Clean the raw row. Returns `None` when the ubigeo is missing or malformed.
    pub fn into_record(self) -> Option<DistrictRecord> {
        let ubigeo = pad_ubigeo(self.ubigeo.as_deref()?)?;
        Some(DistrictRecord {
            ubigeo,
            department_key: non_empty(self.departamento_folder),
            department: non_empty(self.dpto),
            province: non_empty(self.prov),
            district: non_empty(self.dist),
            urban_min: finite(self.urb_min_soles_m2),
            urban_max: finite(self.urb_max_soles_m2),
            rustic_min: finite(self.rus_min_soles_ha),
            rustic_max: finite(self.rus_max_soles_ha),
            urban_pdf: non_empty(self.urbano_pdf),
            rustic_pdf: non_empty(self.rustico_pdf),
        })
    }
}

/// Left-pad a numeric ubigeo with zeros to six digits (`"10101"` -> `"010101"`).
///
/// Returns `None` for anything that is not one to six ASCII digits.
pub fn pad_ubigeo(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if !UBIGEO_REGEX.is_match(raw) {
        return None;
    }
    Some(format!("{raw:0>width$}", width = UBIGEO_WIDTH))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// pandas writes missing values as empty cells, but some exports spell them `NaN`.
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
