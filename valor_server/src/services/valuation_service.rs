//! District lookups and land value estimates.

use serde::Serialize;
use utoipa::ToSchema;

use crate::dataset::Dataset;
use crate::error::LookupError;
use crate::models::district::{pad_ubigeo, DistrictRecord};
use crate::models::land_type::LandType;

/// Official value range of a district applied to a land area.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Valuation {
    pub ubigeo: String,
    pub tipo: LandType,
    #[schema(value_type = String)]
    pub unidad: &'static str,
    pub valor_min: f64,
    pub valor_max: f64,
    pub area: f64,
    pub valor_total_min: f64,
    pub valor_total_max: f64,
}

/// Zero-pad and validate a client-supplied ubigeo.
pub fn parse_ubigeo(raw: &str) -> Result<String, LookupError> {
    pad_ubigeo(raw).ok_or_else(|| {
        LookupError::BadRequest("ubigeo debe tener entre 1 y 6 dígitos".to_string())
    })
}

/// Exact lookup of a district by (unpadded or padded) ubigeo.
pub fn find_district<'a>(dataset: &'a Dataset, raw: &str) -> Result<&'a DistrictRecord, LookupError> {
    let ubigeo = parse_ubigeo(raw)?;
    dataset.get(&ubigeo).ok_or_else(LookupError::ubigeo_not_found)
}

/// Estimate the official value of `area` units of land in a district.
///
/// `area` is in m² for urban land and hectares for rustic land.
pub fn estimate(
    dataset: &Dataset,
    raw_ubigeo: &str,
    tipo: &str,
    area: f64,
) -> Result<Valuation, LookupError> {
    let record = find_district(dataset, raw_ubigeo)?;

    let land_type = LandType::parse(tipo).ok_or_else(|| {
        LookupError::BadRequest("tipo debe ser 'urbano' o 'rustico'".to_string())
    })?;

    if !area.is_finite() || area < 0.0 {
        return Err(LookupError::BadRequest(
            "area debe ser un número finito mayor o igual a 0".to_string(),
        ));
    }

    let (Some(valor_min), Some(valor_max)) = land_type.bounds(record) else {
        return Err(LookupError::NoData(
            "No hay valores para ese tipo en este ubigeo".to_string(),
        ));
    };

    let valor_total_min = round2(area * valor_min);
    let valor_total_max = round2(area * valor_max);
    if !valor_total_min.is_finite() || !valor_total_max.is_finite() {
        return Err(LookupError::BadRequest(
            "area demasiado grande: el valor total excede el rango numérico".to_string(),
        ));
    }

    Ok(Valuation {
        ubigeo: record.ubigeo.clone(),
        tipo: land_type,
        unidad: land_type.unit(),
        valor_min,
        valor_max,
        area,
        valor_total_min,
        valor_total_max,
    })
}

/// Above this magnitude an `f64` has no fractional cents left to round.
const ROUND2_LIMIT: f64 = 1e15;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    if value.abs() >= ROUND2_LIMIT {
        return value;
    }
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample;

    #[test]
    fn urban_estimate_multiplies_both_bounds() {
        let ds = sample();
        let v = estimate(&ds, "150101", "urbano", 120.0).unwrap();
        assert_eq!(v.tipo, LandType::Urbano);
        assert_eq!(v.unidad, "S/ por m²");
        assert_eq!(v.valor_min, 850.0);
        assert_eq!(v.valor_max, 4200.5);
        assert_eq!(v.valor_total_min, 102_000.0);
        assert_eq!(v.valor_total_max, 504_060.0);
    }

    #[test]
    fn totals_are_rounded_to_cents() {
        let ds = sample();
        let v = estimate(&ds, "150102", "urbano", 1.333).unwrap();
        assert_eq!(v.valor_total_min, 127.3);
        assert_eq!(v.valor_total_max, 546.53);
    }

    #[test]
    fn rustic_estimate_uses_hectare_values() {
        let ds = sample();
        let v = estimate(&ds, "10101", "Rústico", 2.5).unwrap();
        assert_eq!(v.ubigeo, "010101");
        assert_eq!(v.unidad, "S/ por ha");
        assert_eq!(v.valor_total_min, 8750.0);
        assert_eq!(v.valor_total_max, 24_500.0);
    }

    #[test]
    fn unknown_type_is_bad_request() {
        let ds = sample();
        let err = estimate(&ds, "150101", "industrial", 10.0).unwrap_err();
        assert!(matches!(err, LookupError::BadRequest(_)));
    }

    #[test]
    fn missing_code_is_not_found() {
        let ds = sample();
        assert_eq!(
            estimate(&ds, "999999", "urbano", 10.0).unwrap_err(),
            LookupError::ubigeo_not_found()
        );
    }

    #[test]
    fn missing_bound_is_no_data() {
        let ds = sample();
        // rustic min is NaN in the fixture
        let err = estimate(&ds, "120101", "rustico", 1.0).unwrap_err();
        assert!(matches!(err, LookupError::NoData(_)));
        let err = estimate(&ds, "150101", "rustico", 1.0).unwrap_err();
        assert!(matches!(err, LookupError::NoData(_)));
    }

    #[test]
    fn negative_or_infinite_area_is_rejected() {
        let ds = sample();
        assert!(matches!(
            estimate(&ds, "150101", "urbano", -1.0),
            Err(LookupError::BadRequest(_))
        ));
        assert!(matches!(
            estimate(&ds, "150101", "urbano", f64::INFINITY),
            Err(LookupError::BadRequest(_))
        ));
    }

    #[test]
    fn huge_area_keeps_finite_totals() {
        let ds = sample();
        let v = estimate(&ds, "150101", "urbano", 1e304).unwrap();
        assert_eq!(v.valor_total_min, 1e304 * 850.0);
        assert_eq!(v.valor_total_max, 1e304 * 4200.5);
        assert!(v.valor_total_max.is_finite());
    }

    #[test]
    fn overflowing_total_is_bad_request() {
        let ds = sample();
        let err = estimate(&ds, "150101", "urbano", 1e306).unwrap_err();
        assert!(matches!(err, LookupError::BadRequest(_)));
    }

    #[test]
    fn malformed_ubigeo_is_bad_request() {
        let ds = sample();
        assert!(matches!(
            find_district(&ds, "lima"),
            Err(LookupError::BadRequest(_))
        ));
        assert_eq!(find_district(&ds, "10101").unwrap().ubigeo, "010101");
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round2(2.346), 2.35);
        assert_eq!(round2(1e300), 1e300);
        assert_eq!(round2(-2.5e15), -2.5e15);
    }
}
