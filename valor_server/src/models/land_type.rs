//! Land classification used by the valuation endpoint.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::district::DistrictRecord;
use crate::services::normalize::normalize;

/// Urban (priced per m²) or rustic (priced per hectare) land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LandType {
    Urbano,
    Rustico,
}

impl LandType {
    /// Parse user input, ignoring case, accents and surrounding whitespace.
    pub fn parse(input: &str) -> Option<Self> {
        match normalize(input).as_str() {
            "URBANO" => Some(Self::Urbano),
            "RUSTICO" => Some(Self::Rustico),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urbano => "urbano",
            Self::Rustico => "rustico",
        }
    }

    /// Display unit of the per-area values.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Urbano => "S/ por m²",
            Self::Rustico => "S/ por ha",
        }
    }

    /// The `(min, max)` value pair of this classification for a district.
    pub fn bounds(self, record: &DistrictRecord) -> (Option<f64>, Option<f64>) {
        match self {
            Self::Urbano => (record.urban_min, record.urban_max),
            Self::Rustico => (record.rustic_min, record.rustic_max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_lenient_about_case_and_accents() {
        assert_eq!(LandType::parse("urbano"), Some(LandType::Urbano));
        assert_eq!(LandType::parse(" URBANO "), Some(LandType::Urbano));
        assert_eq!(LandType::parse("Rústico"), Some(LandType::Rustico));
        assert_eq!(LandType::parse("rustico"), Some(LandType::Rustico));
    }

    #[test]
    fn parse_rejects_unknown_types() {
        assert_eq!(LandType::parse("agricola"), None);
        assert_eq!(LandType::parse(""), None);
        assert_eq!(LandType::parse("urb"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(LandType::Rustico).unwrap(),
            serde_json::json!("rustico")
        );
    }
}
