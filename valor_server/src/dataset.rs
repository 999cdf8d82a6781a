//! In-memory district table, loaded once at startup and shared read-only.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::error::DatasetError;
use crate::models::district::{DistrictRecord, DistrictRow};

/// The full `resumen_distrito` table plus lookup indexes.
#[derive(Debug)]
pub struct Dataset {
    records: Vec<DistrictRecord>,
    by_ubigeo: HashMap<String, usize>,
    departments: BTreeSet<String>,
    skipped: usize,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Load the dataset from a CSV file with a header row.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            departments = dataset.department_count(),
            skipped = dataset.skipped(),
            "Loaded district dataset"
        );
        Ok(dataset)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        let mut skipped = 0;
        for (line, result) in rdr.deserialize::<DistrictRow>().enumerate() {
            let row = result?;
            match row.into_record() {
                Some(record) => rows.push(record),
                None => {
                    // +2: header line, 1-based numbering
                    tracing::warn!(line = line + 2, "Skipping row with missing or malformed ubigeo");
                    skipped += 1;
                }
            }
        }

        let mut dataset = Self::from_records(rows);
        dataset.skipped = skipped;
        Ok(dataset)
    }

    /// Build the indexes over already-cleaned records.
    pub fn from_records(records: Vec<DistrictRecord>) -> Self {
        let mut by_ubigeo = HashMap::with_capacity(records.len());
        let mut departments = BTreeSet::new();

        for (idx, record) in records.iter().enumerate() {
            // First row wins on duplicate codes.
            by_ubigeo.entry(record.ubigeo.clone()).or_insert(idx);
            if let Some(key) = &record.department_key {
                departments.insert(key.clone());
            }
        }

        Self {
            records,
            by_ubigeo,
            departments,
            skipped: 0,
            loaded_at: Utc::now(),
        }
    }

    /// Exact lookup by zero-padded ubigeo.
    pub fn get(&self, ubigeo: &str) -> Option<&DistrictRecord> {
        self.by_ubigeo.get(ubigeo).map(|&idx| &self.records[idx])
    }

    /// Distinct department partition keys, ascending.
    pub fn department_keys(&self) -> impl Iterator<Item = &str> {
        self.departments.iter().map(String::as_str)
    }

    /// Distinct ubigeos belonging to a department key, ascending.
    pub fn districts_in(&self, department_key: &str) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| r.department_key.as_deref() == Some(department_key))
            .map(|r| r.ubigeo.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn department_count(&self) -> usize {
        self.departments.len()
    }

    /// Rows dropped during loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Small fixture table shared by unit tests across modules.
#[cfg(test)]
pub(crate) const SAMPLE_CSV: &str = "\
ubigeo,departamento_folder,dpto,prov,dist,urb_min_soles_m2,urb_max_soles_m2,rus_min_soles_ha,rus_max_soles_ha,urbano_pdf,rustico_pdf
150101,15_LIMA,LIMA,LIMA,LIMA,850.0,4200.5,,,https://example.org/15/urbano.pdf,
150132,15_LIMA,LIMA,LIMA,SAN JUAN DE LURIGANCHO,320.0,1100.0,,,https://example.org/15/urbano.pdf,
150102,15_LIMA,LIMA,LIMA,ANCON,95.5,410.0,12000.0,25000.0,,https://example.org/15/rustico.pdf
10101,01_AMAZONAS,AMAZONAS,CHACHAPOYAS,CHACHAPOYAS,45.0,180.0,3500.0,9800.0,,
120101,12_JUNIN,JUNIN,HUANCAYO,HUANCAYO,70.0,650.0,NaN,8000.0,,
130101,13_LA_LIBERTAD,LA LIBERTAD,TRUJILLO,TRUJILLO,150.0,1900.0,,,,
";

#[cfg(test)]
pub(crate) fn sample() -> Dataset {
    Dataset::from_reader(SAMPLE_CSV.as_bytes()).unwrap()
}
