use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DataError;

// ---------------------------------------------------------------------------
// Generation – one of the four cellular technology classes
// ---------------------------------------------------------------------------

/// Cellular technology generation.
///
/// The declaration order (2G < 3G < 4G < 5G) is the fixed iteration order
/// used everywhere a tie between generations must be broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Generation {
    G2,
    G3,
    G4,
    G5,
}

impl Generation {
    pub const ALL: [Generation; 4] = [
        Generation::G2,
        Generation::G3,
        Generation::G4,
        Generation::G5,
    ];

    /// Short label, e.g. `"4G"`.
    pub fn short_label(self) -> &'static str {
        match self {
            Generation::G2 => "2G",
            Generation::G3 => "3G",
            Generation::G4 => "4G",
            Generation::G5 => "5G",
        }
    }

    /// Name of the radio standard, e.g. `"LTE"`.
    pub fn standard(self) -> &'static str {
        match self {
            Generation::G2 => "GSM",
            Generation::G3 => "UMTS",
            Generation::G4 => "LTE",
            Generation::G5 => "NR",
        }
    }

    /// Tower count of this generation in `record`.
    pub fn count(self, record: &CountryRecord) -> u64 {
        match self {
            Generation::G2 => record.gsm,
            Generation::G3 => record.umts,
            Generation::G4 => record.lte,
            Generation::G5 => record.nr,
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.short_label(), self.standard())
    }
}

// ---------------------------------------------------------------------------
// CountryRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// Tower counts and metadata for one country.
///
/// Field names match the CSV header, so the struct (de)serialises directly
/// with `csv` and `serde_json`. Unknown columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub total_cells: u64,
    pub gsm: u64,
    pub umts: u64,
    pub lte: u64,
    pub nr: u64,
    #[serde(default)]
    pub population_millions: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub region: Option<String>,
}

impl CountryRecord {
    /// `(latitude, longitude)` when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = ["country", "total_cells", "gsm", "umts", "lte", "nr"];

/// Full column layout, in file order.
pub const ALL_COLUMNS: [&str; 10] = [
    "country",
    "total_cells",
    "gsm",
    "umts",
    "lte",
    "nr",
    "population_millions",
    "latitude",
    "longitude",
    "region",
];

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The validated dataset with pre-computed column information.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<CountryRecord>,
    /// Distinct regions in order of first appearance.
    pub regions: Vec<String>,
    pub has_population: bool,
    pub has_coordinates: bool,
    pub has_region: bool,
}

impl Dataset {
    /// Validate records and build the column indices.
    ///
    /// Country names must be non-empty and unique.
    pub fn from_records(records: Vec<CountryRecord>) -> Result<Self, DataError> {
        {
            let mut seen: BTreeSet<&str> = BTreeSet::new();
            for (row, rec) in records.iter().enumerate() {
                let name = rec.country.trim();
                if name.is_empty() {
                    return Err(DataError::EmptyCountry { row });
                }
                if !seen.insert(name) {
                    return Err(DataError::DuplicateCountry(name.to_string()));
                }
            }
        }

        let mut regions: Vec<String> = Vec::new();
        for region in records.iter().filter_map(|r| r.region.as_deref()) {
            if !regions.iter().any(|r| r == region) {
                regions.push(region.to_string());
            }
        }

        Ok(Dataset {
            has_population: records.iter().any(|r| r.population_millions.is_some()),
            has_coordinates: records.iter().any(|r| r.coordinates().is_some()),
            has_region: !regions.is_empty(),
            regions,
            records,
        })
    }

    /// Country names in file order.
    pub fn countries(&self) -> Vec<String> {
        self.records.iter().map(|r| r.country.clone()).collect()
    }

    /// Whether `regions` names every region of the dataset. Such a
    /// selection imposes no constraint, so rows without a region stay in.
    pub fn covers_all_regions(&self, regions: &BTreeSet<String>) -> bool {
        self.regions.iter().all(|r| regions.contains(r))
    }

    /// Countries belonging to any of `regions`. An empty or complete region
    /// set means every country.
    pub fn countries_in_regions(&self, regions: &BTreeSet<String>) -> Vec<String> {
        let unconstrained = regions.is_empty() || self.covers_all_regions(regions);
        self.records
            .iter()
            .filter(|r| {
                unconstrained || r.region.as_ref().is_some_and(|reg| regions.contains(reg))
            })
            .map(|r| r.country.clone())
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(
        country: &str,
        total: u64,
        nr: u64,
        region: Option<&str>,
    ) -> CountryRecord {
        CountryRecord {
            country: country.to_string(),
            total_cells: total,
            gsm: 0,
            umts: 0,
            lte: total.saturating_sub(nr),
            nr,
            population_millions: None,
            latitude: None,
            longitude: None,
            region: region.map(str::to_string),
        }
    }

    #[test]
    fn regions_keep_first_appearance_order() {
        let ds = Dataset::from_records(vec![
            record("Cuba", 10, 0, Some("Caribbean")),
            record("Chile", 20, 0, Some("South America")),
            record("Haiti", 5, 0, Some("Caribbean")),
        ])
        .unwrap();
        assert_eq!(ds.regions, vec!["Caribbean", "South America"]);
        assert!(ds.has_region);
        assert!(!ds.has_population);
        assert!(!ds.has_coordinates);
    }

    #[test]
    fn duplicate_country_is_rejected() {
        let err = Dataset::from_records(vec![
            record("Chile", 1, 0, None),
            record("Chile", 2, 0, None),
        ])
        .unwrap_err();
        assert!(matches!(err, DataError::DuplicateCountry(ref c) if c == "Chile"));
    }

    #[test]
    fn blank_country_is_rejected() {
        let err = Dataset::from_records(vec![record("  ", 1, 0, None)]).unwrap_err();
        assert!(matches!(err, DataError::EmptyCountry { row: 0 }));
    }

    #[test]
    fn countries_in_regions_filters_by_membership() {
        let ds = Dataset::from_records(vec![
            record("Cuba", 10, 0, Some("Caribbean")),
            record("Chile", 20, 0, Some("South America")),
            record("Nowhere", 1, 0, None),
        ])
        .unwrap();
        let carib: BTreeSet<String> = ["Caribbean".to_string()].into();
        assert_eq!(ds.countries_in_regions(&carib), vec!["Cuba"]);
        assert_eq!(ds.countries_in_regions(&BTreeSet::new()).len(), 3);

        let every: BTreeSet<String> = ds.regions.iter().cloned().collect();
        assert!(ds.covers_all_regions(&every));
        assert!(!ds.covers_all_regions(&carib));
        assert_eq!(ds.countries_in_regions(&every), vec!["Cuba", "Chile", "Nowhere"]);
    }

    #[test]
    fn generation_accessors_pick_matching_column() {
        let rec = CountryRecord {
            gsm: 1,
            umts: 2,
            lte: 3,
            nr: 4,
            ..record("X", 10, 0, None)
        };
        let counts: Vec<u64> = Generation::ALL.iter().map(|g| g.count(&rec)).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
        assert_eq!(Generation::G4.to_string(), "4G (LTE)");
    }
}
