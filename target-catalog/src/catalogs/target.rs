//! Transiting-planet target records and the catalog that holds them
//!
//! One [`TargetRecord`] per confirmed transiting planet. Field names match the
//! archive column names so the same struct reads the archive response and the
//! intermediate target list.

use super::mission::MissionSource;
use super::{CatalogError, TargetSet};
use crate::data::cleaning::{clean_field, STRING_COLUMNS};
use crate::data::query::TARGET_COLUMNS;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// Name of the derived tag column, always written last
pub const MISSION_COLUMN: &str = "mission_source";

/// Archive columns without which classification and reporting cannot run
const REQUIRED_ARCHIVE_COLUMNS: [&str; 2] = ["hostname", "disc_facility"];

/// A single transiting planet with its host star properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetRecord {
    pub pl_name: String,
    pub hostname: String,
    pub gaia_dr3_id: String,
    pub gaia_dr2_id: String,
    pub tic_id: String,
    pub hd_name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub ra: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub dec: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sy_vmag: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sy_jmag: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sy_kmag: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sy_tmag: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sy_kepmag: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub sy_gaiamag: Option<f64>,
    /// Effective temperature, K
    #[serde(deserialize_with = "lenient_f64")]
    pub st_teff: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub st_logg: Option<f64>,
    /// Metallicity [Fe/H], dex
    #[serde(deserialize_with = "lenient_f64")]
    pub st_met: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub st_mass: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub st_rad: Option<f64>,
    pub st_spectype: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub st_lum: Option<f64>,
    /// Literature age, Gyr
    #[serde(deserialize_with = "lenient_f64")]
    pub st_age: Option<f64>,
    /// Upper age uncertainty, Gyr
    #[serde(deserialize_with = "lenient_f64")]
    pub st_ageerr1: Option<f64>,
    /// Lower age uncertainty, Gyr (archive stores it negative)
    #[serde(deserialize_with = "lenient_f64")]
    pub st_ageerr2: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub st_rotp: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pl_orbper: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pl_rade: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub pl_trandur: Option<f64>,
    pub disc_facility: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub disc_year: Option<i32>,
    pub mission_source: MissionSource,
}

impl TargetRecord {
    /// V magnitude, falling back to Gaia G when V is missing
    pub fn brightness(&self) -> Option<f64> {
        self.sy_vmag.or(self.sy_gaiamag)
    }

    /// Apply [`clean_field`] to every string column
    pub fn clean_strings(&mut self) {
        for field in [
            &mut self.pl_name,
            &mut self.hostname,
            &mut self.disc_facility,
            &mut self.st_spectype,
            &mut self.hd_name,
            &mut self.tic_id,
            &mut self.gaia_dr3_id,
            &mut self.gaia_dr2_id,
        ] {
            *field = clean_field(field);
        }
    }

    /// Recompute `mission_source` from `disc_facility`
    pub fn classify(&mut self) {
        self.mission_source = MissionSource::classify(&self.disc_facility);
    }
}

/// Parse a numeric cell; blanks, NaN markers and unparseable text are missing
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_number))
}

/// Integer cells may be written as floats ("2015.0") by other tools
fn lenient_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(parse_number)
        .filter(|v| v.fract() == 0.0 && *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
        .map(|v| v as i32))
}

/// Full set of target records from one fetch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetCatalog {
    records: Vec<TargetRecord>,
}

impl TargetCatalog {
    pub fn new(records: Vec<TargetRecord>) -> Self {
        Self { records }
    }

    /// Build a catalog from an archive CSV response.
    ///
    /// String columns are cleaned and every row is classified. Columns the
    /// response lacks are left empty, except `hostname` and `disc_facility`
    /// which are required.
    pub fn from_archive_csv(text: &str) -> Result<Self, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(false)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let present: HashSet<&str> = headers.iter().collect();

        if let Some(missing) = REQUIRED_ARCHIVE_COLUMNS
            .iter()
            .find(|column| !present.contains(*column))
        {
            return Err(CatalogError::MissingColumn(missing.to_string()));
        }
        for column in STRING_COLUMNS.iter().filter(|c| !present.contains(*c)) {
            log::warn!("Archive response has no '{column}' column; leaving it empty");
        }

        let mut records = Vec::new();
        for row in reader.deserialize::<TargetRecord>() {
            let mut record = row?;
            record.clean_strings();
            record.classify();
            records.push(record);
        }

        log::info!("Parsed {} archive rows", records.len());
        Ok(Self { records })
    }

    /// Read a target list written by [`TargetCatalog::save`]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CatalogError::NotFound(path.to_path_buf()),
            _ => CatalogError::Io(e),
        })?;
        let catalog = Self::from_reader(file)?;
        log::debug!("Loaded {} records from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Read a target list from any reader, checking that every column is present
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader.headers()?.clone();
        let present: HashSet<&str> = headers.iter().collect();
        if let Some(missing) = TARGET_COLUMNS
            .iter()
            .chain(std::iter::once(&MISSION_COLUMN))
            .find(|column| !present.contains(*column))
        {
            return Err(CatalogError::MissingColumn(missing.to_string()));
        }

        let records = reader
            .deserialize::<TargetRecord>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    /// Write the target list, replacing any existing file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.to_writer(file)?;
        log::info!("Wrote {} records to {}", self.len(), path.display());
        Ok(())
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), CatalogError> {
        let mut writer = csv::Writer::from_writer(writer);
        if self.records.is_empty() {
            // serialize() emits the header with the first row
            let header: Vec<&str> = TARGET_COLUMNS
                .iter()
                .copied()
                .chain(std::iter::once(MISSION_COLUMN))
                .collect();
            writer.write_record(&header)?;
        }
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Number of distinct host star names; a cleaned-out (empty) name counts
    /// as one more value
    pub fn unique_host_count(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.hostname.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Planet count per mission, largest first; ties follow priority order
    pub fn mission_breakdown(&self) -> Vec<(MissionSource, usize)> {
        let mut counts: HashMap<MissionSource, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.mission_source).or_insert(0) += 1;
        }

        let mut breakdown: Vec<(MissionSource, usize)> = counts.into_iter().collect();
        breakdown.sort_by(|(ma, ca), (mb, cb)| {
            cb.cmp(ca).then_with(|| ma.priority().cmp(&mb.priority()))
        });
        breakdown
    }
}

impl TargetSet for TargetCatalog {
    type Entry = TargetRecord;

    fn records(&self) -> &[TargetRecord] {
        &self.records
    }
}

impl FromIterator<TargetRecord> for TargetCatalog {
    fn from_iter<I: IntoIterator<Item = TargetRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ARCHIVE_CSV: &str = "\
pl_name,hostname,tic_id,disc_facility,st_age,st_ageerr1,st_ageerr2,disc_year
b'Kepler-10 b',b'Kepler-10',b'TIC 377780790',Kepler,10.6,1.5,-1.3,2011
WASP-12 b,WASP-12,nan,SuperWASP-North,,,,2008
K2-18 b,K2-18,<NA>,K2,2.4,,-0.6,2015.0
TOI-700 d,TOI-700,TIC 150428135,,NaN,,,
";

    #[test]
    fn test_parse_archive_csv() {
        let catalog = TargetCatalog::from_archive_csv(ARCHIVE_CSV).unwrap();
        assert_eq!(catalog.len(), 4);

        let kepler = &catalog.records()[0];
        assert_eq!(kepler.pl_name, "Kepler-10 b");
        assert_eq!(kepler.hostname, "Kepler-10");
        assert_eq!(kepler.tic_id, "TIC 377780790");
        assert_eq!(kepler.mission_source, MissionSource::Kepler);
        assert_relative_eq!(kepler.st_age.unwrap(), 10.6);
        assert_eq!(kepler.disc_year, Some(2011));
        // Column absent from the response
        assert_eq!(kepler.gaia_dr3_id, "");
        assert_eq!(kepler.sy_vmag, None);

        let wasp = &catalog.records()[1];
        assert_eq!(wasp.tic_id, "");
        assert_eq!(wasp.st_age, None);
        assert_eq!(wasp.mission_source, MissionSource::Wasp);

        let k2 = &catalog.records()[2];
        assert_eq!(k2.tic_id, "");
        assert_eq!(k2.disc_year, Some(2015));
        assert_eq!(k2.mission_source, MissionSource::K2);

        let toi = &catalog.records()[3];
        assert_eq!(toi.st_age, None);
        assert_eq!(toi.disc_year, None);
        assert_eq!(toi.mission_source, MissionSource::Other);
    }

    #[test]
    fn test_archive_requires_facility_column() {
        let result = TargetCatalog::from_archive_csv("pl_name,hostname\nX b,X\n");
        match result {
            Err(CatalogError::MissingColumn(column)) => assert_eq!(column, "disc_facility"),
            other => panic!("Expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_host_count_includes_empty_name() {
        let catalog: TargetCatalog = ["A", "A", "B", "", "nan"]
            .iter()
            .map(|host| TargetRecord {
                hostname: clean_field(host),
                ..TargetRecord::default()
            })
            .collect();
        assert_eq!(catalog.unique_host_count(), 3);
    }

    #[test]
    fn test_mission_breakdown_order() {
        let catalog: TargetCatalog = ["TESS", "Kepler", "TESS", "HATNet", "Kepler", "Paranal"]
            .iter()
            .map(|facility| {
                let mut record = TargetRecord {
                    disc_facility: facility.to_string(),
                    ..TargetRecord::default()
                };
                record.classify();
                record
            })
            .collect();

        assert_eq!(
            catalog.mission_breakdown(),
            vec![
                (MissionSource::Kepler, 2),
                (MissionSource::Tess, 2),
                (MissionSource::Hat, 1),
                (MissionSource::Other, 1),
            ]
        );
    }

    #[test]
    fn test_brightness_fallback() {
        let record = TargetRecord {
            sy_vmag: None,
            sy_gaiamag: Some(11.2),
            ..TargetRecord::default()
        };
        assert_eq!(record.brightness(), Some(11.2));

        let record = TargetRecord {
            sy_vmag: Some(9.8),
            sy_gaiamag: Some(11.2),
            ..TargetRecord::default()
        };
        assert_eq!(record.brightness(), Some(9.8));
    }

    #[test]
    fn test_empty_catalog_writes_header() {
        let mut buffer = Vec::new();
        TargetCatalog::default().to_writer(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("pl_name,hostname,"));
        assert!(text.trim_end().ends_with(",disc_year,mission_source"));

        let reloaded = TargetCatalog::from_reader(text.as_bytes()).unwrap();
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_load_rejects_missing_column() {
        let text = "pl_name,hostname\nX b,X\n";
        assert!(matches!(
            TargetCatalog::from_reader(text.as_bytes()),
            Err(CatalogError::MissingColumn(_))
        ));
    }
}
