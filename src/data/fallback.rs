use super::model::{CountryRecord, Dataset};

// country, total, gsm, umts, lte, nr, population (M), lat, lon
const ROWS: [(&str, u64, u64, u64, u64, u64, f64, f64, f64); 10] = [
    ("Argentina", 327_143, 55_074, 211_738, 60_331, 0, 45.4, -34.6118, -58.3960),
    ("Bolivia", 56_487, 11_131, 36_367, 8_987, 2, 11.8, -16.2902, -63.5887),
    ("Brasil", 1_903_025, 330_817, 1_268_672, 303_366, 170, 215.3, -14.2350, -51.9253),
    ("Chile", 208_660, 32_244, 140_895, 35_521, 0, 19.1, -35.6751, -71.5430),
    ("Colombia", 285_266, 68_817, 178_647, 37_798, 2, 51.5, 4.7110, -74.0721),
    ("Ecuador", 85_699, 23_942, 52_415, 9_337, 0, 17.6, -1.8312, -78.1834),
    ("Paraguay", 50_093, 8_737, 36_814, 4_542, 0, 7.3, -23.4425, -58.4438),
    ("Perú", 204_598, 43_202, 121_898, 39_498, 0, 33.0, -9.1900, -75.0152),
    ("Uruguay", 28_974, 6_376, 18_716, 3_882, 0, 3.4, -32.5228, -55.7658),
    ("Venezuela", 101_353, 27_667, 69_319, 4_108, 0, 28.4, 6.4238, -66.5897),
];

const REGION: &str = "South America";

/// The embedded ten-country South American table used when no data file
/// can be read.
pub fn fallback_records() -> Vec<CountryRecord> {
    ROWS.iter()
        .map(
            |&(country, total_cells, gsm, umts, lte, nr, population, lat, lon)| CountryRecord {
                country: country.to_string(),
                total_cells,
                gsm,
                umts,
                lte,
                nr,
                population_millions: Some(population),
                latitude: Some(lat),
                longitude: Some(lon),
                region: Some(REGION.to_string()),
            },
        )
        .collect()
}

/// [`fallback_records`] wrapped as a [`Dataset`].
pub fn fallback_dataset() -> Dataset {
    let records = fallback_records();
    let regions = vec![REGION.to_string()];
    Dataset {
        records,
        regions,
        has_population: true,
        has_coordinates: true,
        has_region: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_passes_validation() {
        let validated = Dataset::from_records(fallback_records()).unwrap();
        assert_eq!(validated, fallback_dataset());
        assert_eq!(validated.len(), 10);
    }

    #[test]
    fn fallback_totals_cover_generation_counts() {
        for r in fallback_records() {
            assert!(r.total_cells >= r.gsm + r.umts + r.lte + r.nr, "{}", r.country);
        }
    }
}
