//! Department resolution and listing.
//!
//! Departments are identified by their partition key, `"<code>_<NAME>"`
//! (e.g. `15_LIMA`, `13_LA_LIBERTAD`). Clients may pass either that key or a
//! loosely written name such as `"la libertad"` or `"Junín"`.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use crate::dataset::Dataset;
use crate::error::LookupError;
use crate::services::normalize::{normalize, normalize_opt};

static DEPARTMENT_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}_.+").unwrap());

/// A department as shown by `/departamentos`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Department {
    pub id: String,
    pub codigo: String,
    pub nombre: String,
}

/// Resolve a free-form department query to its partition key.
///
/// Canonical keys are accepted verbatim (and only verbatim). Anything else is
/// compared by normalized name against every known key.
pub fn resolve<'a>(dataset: &'a Dataset, query: &str) -> Result<&'a str, LookupError> {
    let query = query.trim();

    if DEPARTMENT_KEY_REGEX.is_match(query) {
        return dataset
            .department_keys()
            .find(|key| *key == query)
            .ok_or_else(LookupError::department_not_found);
    }

    let wanted = normalize(query);
    if wanted.is_empty() {
        return Err(LookupError::department_not_found());
    }

    dataset
        .department_keys()
        .find(|key| normalize_opt(key.split_once('_').map(|(_, name)| name)) == wanted)
        .ok_or_else(LookupError::department_not_found)
}

/// All departments in key order, with display names.
pub fn list_departments(dataset: &Dataset) -> Vec<Department> {
    dataset.department_keys().map(split_key).collect()
}

/// Ubigeos of a resolved department, ascending.
pub fn list_districts<'a>(dataset: &'a Dataset, query: &str) -> Result<Vec<&'a str>, LookupError> {
    let key = resolve(dataset, query)?;
    let districts = dataset.districts_in(key);
    if districts.is_empty() {
        return Err(LookupError::department_not_found());
    }
    tracing::debug!(department = key, count = districts.len(), "Listed districts");
    Ok(districts)
}

fn split_key(key: &str) -> Department {
    let (codigo, name) = key.split_once('_').unwrap_or(("", key));
    Department {
        id: key.to_string(),
        codigo: codigo.to_string(),
        nombre: title_case(name),
    }
}

/// `"MADRE_DE_DIOS"` -> `"Madre De Dios"`.
pub fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample;

    #[test]
    fn canonical_key_resolves_to_itself() {
        let ds = sample();
        for key in ds.department_keys() {
            assert_eq!(resolve(&ds, key).unwrap(), key);
        }
    }

    #[test]
    fn names_resolve_ignoring_case_and_accents() {
        let ds = sample();
        assert_eq!(resolve(&ds, "LÍMA").unwrap(), "15_LIMA");
        assert_eq!(resolve(&ds, "lima").unwrap(), "15_LIMA");
        assert_eq!(resolve(&ds, "Junín").unwrap(), "12_JUNIN");
        assert_eq!(resolve(&ds, "  la   libertad ").unwrap(), "13_LA_LIBERTAD");
    }

    #[test]
    fn keyed_query_must_match_exactly() {
        let ds = sample();
        assert_eq!(resolve(&ds, "15_lima"), Err(LookupError::department_not_found()));
        assert_eq!(resolve(&ds, "99_LIMA"), Err(LookupError::department_not_found()));
    }

    #[test]
    fn no_partial_matching() {
        let ds = sample();
        assert!(resolve(&ds, "LIM").is_err());
        assert!(resolve(&ds, "LIBERTAD").is_err());
        assert!(resolve(&ds, "").is_err());
        assert!(resolve(&ds, "   ").is_err());
    }

    #[test]
    fn lists_departments_with_display_names() {
        let ds = sample();
        let deps = list_departments(&ds);
        assert_eq!(deps.len(), 4);
        assert_eq!(
            deps[2],
            Department {
                id: "13_LA_LIBERTAD".into(),
                codigo: "13".into(),
                nombre: "La Libertad".into(),
            }
        );
    }

    #[test]
    fn lists_districts_of_resolved_department() {
        let ds = sample();
        assert_eq!(
            list_districts(&ds, "Lima").unwrap(),
            vec!["150101", "150102", "150132"]
        );
        assert_eq!(list_districts(&ds, "amazonas").unwrap(), vec!["010101"]);
        assert!(list_districts(&ds, "Cusco").is_err());
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("MADRE_DE_DIOS"), "Madre De Dios");
        assert_eq!(title_case("ANCASH"), "Ancash");
        assert_eq!(title_case("SAN MARTIN"), "San Martin");
    }
}
